//! Proxy route catalogue listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use tourist_api::proxy::{ParamKind, RouteSpec, Transform, catalog};
use tourist_core::error::AppError;

/// Arguments for the routes command
#[derive(Debug, Args)]
pub struct RoutesArgs {
    /// Only show routes whose local path starts with this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,
}

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Method
    method: String,
    /// Local path under /api
    path: String,
    /// Backend path
    backend: String,
    /// Validated identifiers
    ids: String,
    /// Forwarded query parameters
    query: String,
    /// Success status
    status: u16,
    /// Response rewrite
    transform: String,
}

impl From<&RouteSpec> for RouteRow {
    fn from(spec: &RouteSpec) -> Self {
        let ids = spec
            .params
            .iter()
            .filter_map(|p| match p.kind {
                ParamKind::Integer { entity } => Some(format!("{}:{entity}", p.name)),
                ParamKind::Text => None,
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut query = spec.query.join(", ");
        if spec.paginated {
            query.push_str(" (paged)");
        }

        let transform = match spec.transform {
            Transform::Passthrough => "-",
            Transform::AreaTypes => "area-types",
            Transform::RestrictedAreas => "restricted-areas",
        };

        Self {
            method: spec.verb.to_string(),
            path: format!("/api{}", spec.path),
            backend: spec.backend_path.to_string(),
            ids,
            query,
            status: spec.success_status.as_u16(),
            transform: transform.to_string(),
        }
    }
}

/// Execute the routes command
pub fn execute(args: &RoutesArgs, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<RouteRow> = catalog::routes()
        .iter()
        .filter(|spec| {
            args.prefix
                .as_deref()
                .is_none_or(|prefix| spec.path.starts_with(prefix))
        })
        .map(RouteRow::from)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
