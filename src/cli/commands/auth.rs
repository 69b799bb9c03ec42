use anyhow::Context;
use clap::Subcommand;
use reqwest::StatusCode;
use serde_json::Value;

use crate::cli::config::{load_cli_config, require_server, save_cli_config};
use crate::cli::{utils, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Store a session token for later commands")]
    Login {
        #[arg(help = "Bearer token")]
        token: String,
    },

    #[command(about = "Forget the stored session token")]
    Logout,

    #[command(about = "Show current user and scope from the selected server")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { token } => {
            let mut config = load_cli_config()?;
            config.token = Some(token.trim().to_string());
            save_cli_config(&config)?;
            utils::output_success(output_format, "Token stored", None)
        }
        AuthCommands::Logout => {
            let mut config = load_cli_config()?;
            config.token = None;
            save_cli_config(&config)?;
            utils::output_success(output_format, "Logged out", None)
        }
        AuthCommands::Whoami => {
            let config = load_cli_config()?;
            let server = require_server(&config)?;
            let token = config
                .token
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Not logged in, run `lms-admin auth login <token>` first"))?;

            let response = reqwest::Client::new()
                .get(format!("{}/api/auth/whoami", server))
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            let text = response.text().await?;
            let data = whoami_data(status, &text)?;

            utils::output_value(output_format, &data)
        }
    }
}

/// `data` of a whoami response. Error responses report the server's message;
/// a success with an unreadable body is an error, not an empty result.
fn whoami_data(status: StatusCode, body: &str) -> anyhow::Result<Value> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| "request failed".to_string());
        anyhow::bail!("whoami failed ({}): {}", status, message);
    }

    let body: Value = serde_json::from_str(body).context("server returned an invalid whoami response")?;
    match body.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => anyhow::bail!("whoami response has no data"),
    }
}
