//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use notion_mcp_core::model::ObjectKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notion-mcp")]
#[command(
    author,
    version,
    about = "Notion search and page editing over the Model Context Protocol"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true, env = "NOTION_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Notion integration token
    #[arg(long, global = true, env = "NOTION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Page size used when a search gives none
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Per-request deadline in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP over stdio
    #[command(alias = "mcp")]
    Serve,

    /// Serve MCP and the REST routes over HTTP
    Http(HttpArgs),

    /// Print the tool catalog
    Tools,

    /// Print the resource catalog
    Resources,

    /// Search pages and databases
    Search(SearchArgs),

    /// Summarize the workspace
    Workspace,

    /// Create a page under a parent page
    CreatePage(CreatePageArgs),

    /// Retitle, archive or extend a page
    UpdatePage(UpdatePageArgs),

    /// Append a single block to a page
    Append(AppendArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct HttpArgs {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "NOTION_MCP_ADDR")]
    pub addr: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ObjectFilter {
    Page,
    Database,
}

impl From<ObjectFilter> for ObjectKind {
    fn from(filter: ObjectFilter) -> Self {
        match filter {
            ObjectFilter::Page => ObjectKind::Page,
            ObjectFilter::Database => ObjectKind::Database,
        }
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Vec<String>,

    /// Only return pages or only databases
    #[arg(short, long, value_enum)]
    pub filter: Option<ObjectFilter>,

    /// Number of results
    #[arg(short = 'n', long = "limit")]
    pub limit: Option<u32>,

    /// Sort by last edit time, newest first
    #[arg(long)]
    pub recent: bool,

    /// Continue from a previous result's next_cursor
    #[arg(long)]
    pub cursor: Option<String>,
}

#[derive(Args)]
pub struct CreatePageArgs {
    /// Parent page ID
    pub parent_id: String,

    /// Page title
    pub title: String,

    /// Markdown body; `-` reads stdin
    #[arg(short, long)]
    pub content: Option<String>,

    /// Emoji icon
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Args)]
pub struct UpdatePageArgs {
    /// Page ID
    pub page_id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Markdown appended to the page; `-` reads stdin
    #[arg(short, long)]
    pub content: Option<String>,

    /// Archive the page
    #[arg(long, conflicts_with = "restore")]
    pub archive: bool,

    /// Restore an archived page
    #[arg(long)]
    pub restore: bool,
}

#[derive(Args)]
pub struct AppendArgs {
    /// Page ID
    pub page_id: String,

    /// Block text; `-` reads stdin
    pub content: String,

    /// Block type (paragraph, heading_1, code, to_do, ...)
    #[arg(short = 't', long = "type", default_value = "paragraph")]
    pub block_type: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the merged configuration (token redacted)
    Show,
    /// Print the default config file path
    Path,
    /// Write the merged configuration to the config file
    Init,
}
