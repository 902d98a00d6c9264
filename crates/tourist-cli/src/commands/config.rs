//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use tourist_core::config::AppConfig;
use tourist_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path, env)?;
            show(&config, format)?;
        }
        ConfigCommand::Validate => match super::load_config(config_path, env) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv("Listen", &config.server.bind_address());
                output::print_kv("Backend", &config.backend.base_url);
                output::print_kv("Required role", &config.auth.required_role);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn show(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut masked = config.clone();
    masked.auth.session_secret = mask(&masked.auth.session_secret);

    match format {
        OutputFormat::Json => output::print_item(&masked, format),
        OutputFormat::Table => {
            output::print_kv("server.host", &masked.server.host);
            output::print_kv("server.port", &masked.server.port.to_string());
            output::print_kv(
                "server.body_limit_bytes",
                &masked.server.body_limit_bytes.to_string(),
            );
            output::print_kv("backend.base_url", &masked.backend.base_url);
            output::print_kv(
                "backend.timeout_seconds",
                &masked.backend.timeout_seconds.to_string(),
            );
            output::print_kv("auth.session_secret", &masked.auth.session_secret);
            output::print_kv("auth.cookie_name", &masked.auth.cookie_name);
            output::print_kv("auth.required_role", &masked.auth.required_role);
            output::print_kv("logging.level", &masked.logging.level);
            output::print_kv("logging.format", &masked.logging.format);
        }
    }
    Ok(())
}

/// Keeps the first four characters of a secret.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
