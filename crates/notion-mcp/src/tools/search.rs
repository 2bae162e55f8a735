use super::{ToolError, SEARCH_TOOL};
use crate::args::Args;
use crate::convert;
use crate::params::SearchParams;
use crate::protocol::{ToolDefinition, ToolResult};
use notion_mcp_core::ContentProvider;

pub fn search_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: SEARCH_TOOL.to_string(),
        description: "Search pages and databases in the Notion workspace".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "filter": {
                    "type": "string",
                    "description": "Restrict results to 'page' or 'database'",
                    "enum": ["page", "database"]
                },
                "sortBy": {
                    "type": "string",
                    "description": "Sort field: 'last_edited_time'",
                    "enum": ["last_edited_time"]
                },
                "sortOrder": {
                    "type": "string",
                    "description": "Sort order: 'ascending' or 'descending'",
                    "enum": ["ascending", "descending"]
                },
                "startCursor": {
                    "type": "string",
                    "description": "Pagination cursor from a previous search"
                },
                "pageSize": {
                    "type": "integer",
                    "description": "Results per page (max 100)",
                    "minimum": 1,
                    "maximum": 100
                }
            }
        }),
    }
}

pub async fn handle_search(
    provider: &dyn ContentProvider,
    args: &Args,
    default_page_size: u32,
) -> Result<ToolResult, ToolError> {
    let params = SearchParams::from_args(args)?;
    let request = params.to_request(default_page_size);

    let response = provider
        .search(&request)
        .await
        .map_err(ToolError::provider("failed to search Notion"))?;

    tracing::debug!(
        "search returned {} results (has_more: {})",
        response.results.len(),
        response.has_more
    );

    Ok(ToolResult::json(&convert::search_result(&response))?)
}
