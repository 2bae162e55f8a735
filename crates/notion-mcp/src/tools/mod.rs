//! MCP tool definitions and handlers

mod blocks;
mod pages;
mod search;

pub use blocks::{append_block_tool_definition, handle_append_block};
pub use pages::{
    create_page_tool_definition, handle_create_page, handle_update_page,
    update_page_tool_definition,
};
pub use search::{handle_search, search_tool_definition};

use crate::args::{ArgError, Args};
use crate::protocol::{ToolDefinition, ToolResult};
use notion_mcp_core::{ContentProvider, NotionError};
use thiserror::Error;

pub const SEARCH_TOOL: &str = "notion_search";
pub const CREATE_PAGE_TOOL: &str = "notion_create_page";
pub const UPDATE_PAGE_TOOL: &str = "notion_update_page";
pub const APPEND_BLOCK_TOOL: &str = "notion_append_block";

/// Failure of a single tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments failed narrowing; the provider was not called
    #[error(transparent)]
    InvalidParams(#[from] ArgError),

    #[error("{context}: {source}")]
    Provider {
        context: &'static str,
        #[source]
        source: NotionError,
    },

    #[error("failed to encode tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    fn provider(context: &'static str) -> impl FnOnce(NotionError) -> ToolError {
        move |source| ToolError::Provider { context, source }
    }
}

/// The fixed tool set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Search,
    CreatePage,
    UpdatePage,
    AppendBlock,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::Search,
        Tool::CreatePage,
        Tool::UpdatePage,
        Tool::AppendBlock,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Search => SEARCH_TOOL,
            Tool::CreatePage => CREATE_PAGE_TOOL,
            Tool::UpdatePage => UPDATE_PAGE_TOOL,
            Tool::AppendBlock => APPEND_BLOCK_TOOL,
        }
    }

    pub fn definition(self) -> ToolDefinition {
        match self {
            Tool::Search => search_tool_definition(),
            Tool::CreatePage => create_page_tool_definition(),
            Tool::UpdatePage => update_page_tool_definition(),
            Tool::AppendBlock => append_block_tool_definition(),
        }
    }

    pub async fn call(
        self,
        provider: &dyn ContentProvider,
        args: &Args,
        default_page_size: u32,
    ) -> Result<ToolResult, ToolError> {
        match self {
            Tool::Search => handle_search(provider, args, default_page_size).await,
            Tool::CreatePage => handle_create_page(provider, args).await,
            Tool::UpdatePage => handle_update_page(provider, args).await,
            Tool::AppendBlock => handle_append_block(provider, args).await,
        }
    }
}

/// Tool catalog in listing order
pub fn catalog() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}
