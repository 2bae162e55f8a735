//! Catalog listings

use super::print_json;
use anyhow::Result;
use serde_json::json;

pub fn run_tools() -> Result<()> {
    print_json(&json!({ "tools": notion_mcp::tools::catalog() }))
}

pub fn run_resources() -> Result<()> {
    print_json(&json!({ "resources": notion_mcp::resources::catalog() }))
}
