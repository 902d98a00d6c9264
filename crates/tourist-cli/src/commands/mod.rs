//! CLI command definitions and dispatch.

pub mod call;
pub mod config;
pub mod login;
pub mod routes;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use tourist_core::config::AppConfig;
use tourist_core::error::AppError;

/// Tourist admin gateway: authenticated proxy in front of the tourist-safety backend
#[derive(Debug, Parser)]
#[command(name = "tourist-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve(serve::ServeArgs),
    /// List the proxy route catalogue
    Routes(routes::RoutesArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Sign in against the backend and show the resulting session
    Login(login::LoginArgs),
    /// Sign in, then send one authorized request to the backend
    Call(call::CallArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config, &self.env).await,
            Commands::Routes(args) => routes::execute(args, self.format),
            Commands::Config(args) => config::execute(args, &self.config, &self.env, self.format),
            Commands::Login(args) => {
                login::execute(args, &self.config, &self.env, self.format).await
            }
            Commands::Call(args) => call::execute(args, &self.config, &self.env, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}
