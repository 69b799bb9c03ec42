use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_cli_config, require_server, save_cli_config};
use crate::cli::{utils, OutputFormat};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Select the server URL used by other commands")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Show the selected server")]
    Show,

    #[command(about = "Check the selected server's /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url } => {
            let parsed = url::Url::parse(&url).map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", url, e))?;
            let url = parsed.as_str().trim_end_matches('/').to_string();

            let mut config = load_cli_config()?;
            config.server = Some(url.clone());
            save_cli_config(&config)?;

            utils::output_success(output_format, &format!("Server set to {}", url), Some(json!({ "server": url })))
        }
        ServerCommands::Show => {
            let config = load_cli_config()?;
            utils::output_value(output_format, &json!({ "server": config.server }))
        }
        ServerCommands::Health => {
            let config = load_cli_config()?;
            let server = require_server(&config)?;

            let body: serde_json::Value = reqwest::Client::new()
                .get(format!("{}/health", server))
                .timeout(std::time::Duration::from_secs(5))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            utils::output_value(output_format, &body["data"])
        }
    }
}
