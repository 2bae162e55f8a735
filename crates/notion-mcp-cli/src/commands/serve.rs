//! HTTP server command

use crate::app::HttpArgs;
use anyhow::Result;
use notion_mcp::NotionMcp;
use notion_mcp_core::Config;
use std::sync::Arc;

pub async fn run_http(args: HttpArgs, config: Config) -> Result<()> {
    let sdk = Arc::new(NotionMcp::new(config)?);
    tracing::info!("Starting Notion MCP HTTP server on {}", args.addr);
    notion_mcp::http::serve(sdk, &args.addr).await
}
