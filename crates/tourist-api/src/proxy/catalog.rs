//! The proxy route catalogue: every backend resource the dashboard reaches
//! through the gateway.

use super::spec::{RouteSpec, Transform};

/// All proxy routes, grouped by backend resource.
pub fn routes() -> Vec<RouteSpec> {
    let mut routes = Vec::new();
    routes.extend(accommodations());
    routes.extend(activities());
    routes.extend(admin());
    routes.extend(alerts());
    routes.extend(auth());
    routes.extend(blockchain_id());
    routes.extend(geofencing());
    routes.extend(places());
    routes.extend(tracking_devices());
    routes.extend(tracking_admin());
    routes.extend(treks());
    routes.extend(users());
    routes
}

fn accommodations() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get(
            "/accommodations",
            "/accommodations",
            "Failed to fetch accommodations",
        )
        .paginated()
        .query(&["page", "page_size", "search", "city", "state", "accommodation_type"]),
        RouteSpec::post(
            "/accommodations",
            "/accommodations",
            "Failed to create accommodation",
        ),
        RouteSpec::get(
            "/accommodations/{id}",
            "/accommodations/{id}",
            "Failed to fetch accommodation",
        )
        .int_param("id", "accommodation"),
        RouteSpec::put(
            "/accommodations/{id}",
            "/accommodations/{id}",
            "Failed to update accommodation",
        )
        .int_param("id", "accommodation"),
        RouteSpec::delete(
            "/accommodations/{id}",
            "/accommodations/{id}",
            "Failed to delete accommodation",
        )
        .int_param("id", "accommodation"),
    ]
}

fn activities() -> Vec<RouteSpec> {
    let mut routes = Vec::new();
    for (kind, path, item_path) in [
        ("online", "/activities/online", "/activities/online/{id}"),
        ("offline", "/activities/offline", "/activities/offline/{id}"),
    ] {
        routes.extend([
            RouteSpec::get(path, path, format!("Failed to fetch {kind} activities"))
                .paginated()
                .query(&["page", "page_size", "category", "search"]),
            RouteSpec::post(path, path, format!("Failed to create {kind} activity")).created(),
            RouteSpec::get(item_path, item_path, format!("Failed to fetch {kind} activity"))
                .int_param("id", "activity"),
            RouteSpec::put(item_path, item_path, format!("Failed to update {kind} activity"))
                .int_param("id", "activity"),
            RouteSpec::delete(item_path, item_path, format!("Failed to delete {kind} activity"))
                .int_param("id", "activity"),
        ]);
    }
    routes
}

fn admin() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get(
            "/admin/stats",
            "/admin/dashboard/stats",
            "Failed to fetch dashboard statistics",
        ),
        RouteSpec::get("/admin/users", "/admin/users", "Failed to fetch users")
            .paginated()
            .query(&["page", "page_size", "role", "search", "is_active"]),
        RouteSpec::get(
            "/admin/users/{id}",
            "/admin/users/{id}",
            "Failed to fetch user",
        )
        .int_param("id", "user"),
        RouteSpec::patch(
            "/admin/users/{id}/role",
            "/admin/users/{id}/role",
            "Failed to update user role",
        )
        .int_param("id", "user"),
        RouteSpec::patch(
            "/admin/users/{id}/status",
            "/admin/users/{id}/status",
            "Failed to update user status",
        )
        .int_param("id", "user"),
    ]
}

fn alerts() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get("/alerts/active", "/alerts/active", "Failed to fetch alerts")
            .paginated()
            .query(&["page", "page_size", "severity", "alert_type"]),
        RouteSpec::get("/alerts/history", "/alerts/history", "Failed to fetch alert history")
            .paginated()
            .query(&["page", "page_size", "severity", "alert_type", "start_date", "end_date"]),
        RouteSpec::get("/alerts/{id}", "/alerts/{id}", "Failed to fetch alert")
            .int_param("id", "alert"),
        RouteSpec::post(
            "/alerts/{id}/acknowledge",
            "/alerts/{id}/acknowledge",
            "Failed to acknowledge alert",
        )
        .int_param("id", "alert"),
        RouteSpec::post(
            "/alerts/{id}/resolve",
            "/alerts/{id}/resolve",
            "Failed to resolve alert",
        )
        .int_param("id", "alert"),
    ]
}

fn auth() -> Vec<RouteSpec> {
    vec![RouteSpec::get(
        "/auth/me",
        "/auth/me",
        "Failed to fetch current user",
    )]
}

fn blockchain_id() -> Vec<RouteSpec> {
    vec![
        RouteSpec::post(
            "/blockchain-id/generate",
            "/blockchain/generate-id",
            "Failed to generate blockchain ID",
        ),
        RouteSpec::get(
            "/blockchain-id/verify/{blockchain_id}",
            "/blockchain/verify/{blockchain_id}",
            "Failed to verify blockchain ID",
        )
        .text_param("blockchain_id"),
        RouteSpec::get(
            "/blockchain-id/user/{user_id}",
            "/blockchain/user/{user_id}",
            "Failed to fetch blockchain ID",
        )
        .int_param("user_id", "user"),
        RouteSpec::get(
            "/blockchain-id/transactions",
            "/blockchain/transactions",
            "Failed to fetch blockchain transactions",
        )
        .paginated()
        .query(&["page", "page_size", "user_id"]),
    ]
}

fn geofencing() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get(
            "/geofencing/area-types",
            "/geofencing/area-types",
            "Failed to fetch area types",
        )
        .transform(Transform::AreaTypes),
        RouteSpec::get(
            "/geofencing/restricted-areas",
            "/geofencing/restricted-areas",
            "Failed to fetch restricted areas",
        )
        .query(&["status", "area_type", "skip", "limit"])
        .transform(Transform::RestrictedAreas),
        RouteSpec::post(
            "/geofencing/restricted-areas",
            "/geofencing/restricted-areas",
            "Failed to create restricted area",
        ),
        RouteSpec::get(
            "/geofencing/restricted-areas/{id}",
            "/geofencing/restricted-areas/{id}",
            "Failed to fetch restricted area",
        )
        .int_param("id", "area"),
        RouteSpec::put(
            "/geofencing/restricted-areas/{id}",
            "/geofencing/restricted-areas/{id}",
            "Failed to update restricted area",
        )
        .int_param("id", "area"),
        RouteSpec::delete(
            "/geofencing/restricted-areas/{id}",
            "/geofencing/restricted-areas/{id}",
            "Failed to delete restricted area",
        )
        .int_param("id", "area"),
        RouteSpec::post(
            "/geofencing/check-location",
            "/geofencing/check-location",
            "Failed to check location",
        ),
    ]
}

fn places() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get("/places", "/places", "Failed to fetch places")
            .paginated()
            .query(&["page", "page_size", "search", "category", "city"]),
        RouteSpec::post("/places", "/places", "Failed to create place"),
        RouteSpec::get("/places/{id}", "/places/{id}", "Failed to fetch place")
            .int_param("id", "place"),
        RouteSpec::put("/places/{id}", "/places/{id}", "Failed to update place")
            .int_param("id", "place"),
        RouteSpec::delete("/places/{id}", "/places/{id}", "Failed to delete place")
            .int_param("id", "place"),
    ]
}

fn tracking_devices() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get(
            "/tracking-device",
            "/tracking-device",
            "Failed to fetch tracking devices",
        )
        .paginated()
        .query(&["page", "page_size", "status", "user_id"]),
        RouteSpec::post(
            "/tracking-device/register",
            "/tracking-device/register",
            "Failed to register tracking device",
        ),
        RouteSpec::get(
            "/tracking-device/{id}",
            "/tracking-device/{id}",
            "Failed to fetch tracking device",
        )
        .int_param("id", "device"),
        RouteSpec::patch(
            "/tracking-device/{id}/status",
            "/tracking-device/{id}/status",
            "Failed to update tracking device status",
        )
        .int_param("id", "device"),
        RouteSpec::delete(
            "/tracking-device/{id}",
            "/tracking-device/{id}",
            "Failed to delete tracking device",
        )
        .int_param("id", "device"),
    ]
}

fn tracking_admin() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get(
            "/tracking/admin/locations",
            "/tracking/admin/locations",
            "Failed to fetch tourist locations",
        )
        .paginated()
        .query(&["page", "page_size", "user_id"]),
        RouteSpec::get(
            "/tracking/admin/users/{user_id}/history",
            "/tracking/admin/users/{user_id}/history",
            "Failed to fetch location history",
        )
        .int_param("user_id", "user")
        .query(&["start_time", "end_time", "limit"]),
    ]
}

fn treks() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get("/trek", "/trek", "Failed to fetch treks")
            .paginated()
            .query(&["page", "page_size", "difficulty", "search"]),
        RouteSpec::post("/trek", "/trek", "Failed to create trek"),
        RouteSpec::get("/trek/{id}", "/trek/{id}", "Failed to fetch trek").int_param("id", "trek"),
        RouteSpec::put("/trek/{id}", "/trek/{id}", "Failed to update trek")
            .int_param("id", "trek"),
        RouteSpec::delete("/trek/{id}", "/trek/{id}", "Failed to delete trek")
            .int_param("id", "trek"),
    ]
}

fn users() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get("/users/me", "/users/me", "Failed to fetch profile"),
        RouteSpec::put("/users/me", "/users/me", "Failed to update profile"),
        RouteSpec::get("/users/{id}", "/users/{id}", "Failed to fetch user")
            .int_param("id", "user"),
    ]
}
