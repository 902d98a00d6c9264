//! Start the gateway server.

use clap::Args;

use tourist_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub backend_url: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path, env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref url) = args.backend_url {
        config.backend.base_url = url.clone();
        config.validate()?;
    }

    println!("Starting tourist admin gateway...");
    println!("  Listen:  {}", config.server.bind_address());
    println!("  Backend: {}", config.backend.base_url);

    tourist_api::run_server(config).await
}
