//! Success-body rewrites for the geofencing map views.

use serde_json::{Map, Value, json};

use crate::error::ProxyError;

use super::spec::Transform;

/// Colour used for area types missing from [`AREA_STYLES`].
pub const DEFAULT_AREA_COLOR: &str = "#888888";
/// Icon used for area types missing from [`AREA_STYLES`].
pub const DEFAULT_AREA_ICON: &str = "📍";

/// `(area type, colour, icon)` for the known area types.
const AREA_STYLES: &[(&str, &str, &str)] = &[
    ("danger_zone", "#ff8800", "⚠️"),
    ("restricted_zone", "#ff0000", "🚫"),
    ("military_area", "#8b0000", "🪖"),
    ("wildlife_sanctuary", "#228b22", "🐾"),
    ("forest_area", "#006400", "🌲"),
    ("flood_prone", "#1e90ff", "🌊"),
];

/// Looks up the map colour and icon for an area type.
pub fn area_style(area_type: &str) -> (&'static str, &'static str) {
    AREA_STYLES
        .iter()
        .find(|(name, _, _)| *name == area_type)
        .map(|(_, color, icon)| (*color, *icon))
        .unwrap_or((DEFAULT_AREA_COLOR, DEFAULT_AREA_ICON))
}

/// Applies `transform` to a successful backend body.
pub fn apply(transform: Transform, body: Value) -> Result<Value, ProxyError> {
    match transform {
        Transform::Passthrough => Ok(body),
        Transform::AreaTypes => area_types(&body),
        Transform::RestrictedAreas => restricted_areas(&body),
    }
}

/// `{area_types: [{value, label, description}]}` into
/// `{area_types: [{id, name, description, color, icon}], total}`.
fn area_types(body: &Value) -> Result<Value, ProxyError> {
    let items = body
        .get("area_types")
        .and_then(Value::as_array)
        .ok_or_else(|| ProxyError::internal("Area-type response has no 'area_types' array"))?;

    let area_types: Vec<Value> = items
        .iter()
        .map(|item| {
            let value = field(item, "value");
            let (color, icon) = area_style(value.as_str().unwrap_or_default());
            json!({
                "id": value,
                "name": field(item, "label"),
                "description": field(item, "description"),
                "color": color,
                "icon": icon,
            })
        })
        .collect();

    Ok(json!({
        "total": area_types.len(),
        "area_types": area_types,
    }))
}

/// Reshapes each restricted area for the map view.
fn restricted_areas(body: &Value) -> Result<Value, ProxyError> {
    let items = body
        .as_array()
        .ok_or_else(|| ProxyError::internal("Restricted-area response is not an array"))?;

    let areas = items
        .iter()
        .map(|item| {
            if !item.is_object() {
                return Err(ProxyError::internal("Restricted-area entry is not an object"));
            }
            let area_type = field(item, "area_type");
            let created_at = field(item, "created_at");

            let mut area = Map::new();
            area.insert("id".into(), Value::String(id_string(&field(item, "id"))));
            area.insert("name".into(), field(item, "name"));
            area.insert(
                "description".into(),
                present(item, "description").unwrap_or_else(|| Value::String(String::new())),
            );
            area.insert("area_type_id".into(), area_type.clone());
            area.insert("area_type_name".into(), area_type);
            area.insert(
                "coordinates".into(),
                present(item, "coordinates").unwrap_or_else(|| Value::Array(Vec::new())),
            );
            area.insert("status".into(), field(item, "status"));
            area.insert(
                "updated_at".into(),
                present(item, "updated_at").unwrap_or_else(|| created_at.clone()),
            );
            area.insert("created_at".into(), created_at);
            Ok(Value::Object(area))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Array(areas))
}

/// Field value, `null` when missing.
fn field(item: &Value, key: &str) -> Value {
    item.get(key).cloned().unwrap_or(Value::Null)
}

/// Field value when present and non-null.
fn present(item: &Value, key: &str) -> Option<Value> {
    item.get(key).filter(|v| !v.is_null()).cloned()
}

fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
