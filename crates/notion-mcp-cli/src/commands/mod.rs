//! CLI command handlers

pub mod catalog;
pub mod config;
pub mod page;
pub mod search;
pub mod serve;

use anyhow::Result;
use notion_mcp::NotionMcp;
use notion_mcp_core::Config;
use serde::Serialize;

fn connect(config: Config) -> Result<NotionMcp> {
    Ok(NotionMcp::new(config)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `-` reads the whole of stdin
fn read_content(arg: &str) -> Result<String> {
    if arg == "-" {
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        Ok(arg.to_string())
    }
}
