//! One authorized backend call through the refresh-once client.

use clap::Args;
use reqwest::Method;

use crate::output::{self, OutputFormat};
use tourist_auth::http::build_http_client;
use tourist_auth::{ApiRequest, AuthorizedClient};
use tourist_core::error::AppError;

/// Arguments for the call command
#[derive(Debug, Args)]
pub struct CallArgs {
    /// HTTP method
    pub method: String,

    /// Backend path, e.g. `/places`
    pub path: String,

    /// Query parameter as `key=value` (repeatable)
    #[arg(short, long = "query")]
    pub query: Vec<String>,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Execute the call command
pub async fn execute(
    args: &CallArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path, env)?;
    let request = build_request(args)?;

    let (mut ctx, manager) = super::login::sign_in(&config, args.email.as_deref()).await?;
    let http = build_http_client(&config.backend)?;
    let client = AuthorizedClient::new(http, config.backend.clone(), manager);

    tracing::debug!(method = %request.method, path = %request.path, "Sending authorized request");
    let response = client.send(&mut ctx, &request).await?;
    match format {
        OutputFormat::Table => {
            output::print_kv("Status", response.status.as_str());
            output::print_json(&response.body);
        }
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "status": response.status.as_u16(),
            "body": response.body,
        })),
    }
    Ok(())
}

fn build_request(args: &CallArgs) -> Result<ApiRequest, AppError> {
    let method: Method = args
        .method
        .to_uppercase()
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown HTTP method '{}'", args.method)))?;

    let mut request = ApiRequest::new(method, args.path.clone());
    for pair in &args.query {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| AppError::validation(format!("Expected key=value, got '{pair}'")))?;
        request = request.query(key, value);
    }
    if let Some(data) = &args.data {
        request = request.json(serde_json::from_str(data)?);
    }
    Ok(request)
}
