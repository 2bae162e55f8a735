//! Notion MCP CLI
//!
//! Runs the MCP server over stdio or HTTP, and exposes each tool as a
//! subcommand for scripting.

use anyhow::Result;
use clap::Parser;
use notion_mcp::SdkError;
use notion_mcp_core::error::exit_codes;
use notion_mcp_core::{Config, NotionError};

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    // stdout carries protocol traffic in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve => notion_mcp::start_server(config).await,
        Commands::Http(args) => commands::serve::run_http(args, config).await,
        Commands::Tools => commands::catalog::run_tools(),
        Commands::Resources => commands::catalog::run_resources(),
        Commands::Search(args) => commands::search::run(args, config).await,
        Commands::Workspace => commands::search::run_workspace(config).await,
        Commands::CreatePage(args) => commands::page::run_create(args, config).await,
        Commands::UpdatePage(args) => commands::page::run_update(args, config).await,
        Commands::Append(args) => commands::page::run_append(args, config).await,
        Commands::Config(args) => commands::config::run(args, config, cli.config.as_deref()),
    }
}

/// File, then environment, then flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .from_env();

    if let Some(token) = &cli.token {
        config.token = token.clone();
    }
    if let Some(size) = cli.page_size {
        config.set_default_page_size(size);
    }
    if let Some(secs) = cli.timeout {
        config.set_timeout_secs(secs);
    }
    Ok(config)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<NotionError>() {
        return e.exit_code();
    }
    match err.downcast_ref::<SdkError>() {
        Some(SdkError::Setup(e)) => e.exit_code(),
        Some(SdkError::Rpc(rpc)) => {
            let kind = rpc
                .data
                .as_ref()
                .and_then(|data| data.get("kind"))
                .and_then(|kind| kind.as_str());
            match kind {
                Some("auth") => exit_codes::AUTH_ERROR,
                _ => exit_codes::GENERAL_ERROR,
            }
        }
        _ => exit_codes::GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_mcp::protocol::JsonRpcError;
    use serde_json::json;

    fn rpc_error(data: Option<serde_json::Value>) -> anyhow::Error {
        SdkError::Rpc(JsonRpcError {
            code: -32603,
            message: "failed to search Notion".to_string(),
            data,
        })
        .into()
    }

    #[test]
    fn test_auth_failure_exit_code() {
        let err = rpc_error(Some(json!({"kind": "auth", "status": 401})));
        assert_eq!(exit_code(&err), exit_codes::AUTH_ERROR);
    }

    #[test]
    fn test_other_rpc_failures_exit_code() {
        let limited = rpc_error(Some(json!({"kind": "rate_limit", "status": 429})));
        assert_eq!(exit_code(&limited), exit_codes::GENERAL_ERROR);
        assert_eq!(exit_code(&rpc_error(None)), exit_codes::GENERAL_ERROR);
    }

    #[test]
    fn test_setup_failure_exit_code() {
        let missing: anyhow::Error =
            SdkError::Setup(NotionError::Config("token".to_string())).into();
        assert_eq!(exit_code(&missing), exit_codes::INVALID_INPUT);

        let unauthorized: anyhow::Error = NotionError::Unauthorized("bad".to_string()).into();
        assert_eq!(exit_code(&unauthorized), exit_codes::AUTH_ERROR);
    }
}
