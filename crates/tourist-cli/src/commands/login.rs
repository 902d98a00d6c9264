//! Interactive sign-in against the backend.

use std::sync::Arc;

use clap::Args;
use dialoguer::{Input, Password};

use crate::output::{self, OutputFormat};
use tourist_auth::http::build_http_client;
use tourist_auth::{Credentials, HttpAuthBackend, SessionContext, SessionManager};
use tourist_core::config::AppConfig;
use tourist_core::error::AppError;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Execute the login command
pub async fn execute(
    args: &LoginArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path, env)?;
    let (ctx, _) = sign_in(&config, args.email.as_deref()).await?;

    if let Some(session) = ctx.session() {
        output::print_success("Signed in");
        output::print_item(&session.view(), format);
    }
    Ok(())
}

/// Prompts for credentials and signs in, returning the context and the
/// session manager that owns its refresh flow.
pub async fn sign_in(
    config: &AppConfig,
    email: Option<&str>,
) -> Result<(SessionContext, Arc<SessionManager>), AppError> {
    let credentials = prompt_credentials(email)?;

    let http = build_http_client(&config.backend)?;
    let backend = Arc::new(HttpAuthBackend::new(
        http,
        config.backend.clone(),
        config.auth.clone(),
    ));
    let manager = Arc::new(SessionManager::new(backend, &config.auth));

    let mut ctx = SessionContext::new();
    ctx.sign_in(&manager, &credentials).await?;
    Ok((ctx, manager))
}

fn prompt_credentials(email: Option<&str>) -> Result<Credentials, AppError> {
    let email = match email {
        Some(email) => email.to_string(),
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

    Ok(Credentials { email, password })
}
