use super::{ToolError, CREATE_PAGE_TOOL, UPDATE_PAGE_TOOL};
use crate::args::Args;
use crate::convert;
use crate::params::{CreatePageParams, UpdatePageParams};
use crate::protocol::{ToolDefinition, ToolResult};
use notion_mcp_core::model::BlockBody;
use notion_mcp_core::ContentProvider;

pub fn create_page_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: CREATE_PAGE_TOOL.to_string(),
        description: "Create a new page in Notion".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "parentId": {
                    "type": "string",
                    "description": "ID of the parent page"
                },
                "title": {
                    "type": "string",
                    "description": "Page title"
                },
                "content": {
                    "type": "string",
                    "description": "Page body as markdown (optional)"
                },
                "properties": {
                    "type": "object",
                    "description": "Text properties keyed by name (optional)"
                },
                "icon": {
                    "type": "object",
                    "description": "Page icon (optional)",
                    "properties": {
                        "type": {
                            "type": "string",
                            "description": "Icon type: 'emoji' or 'external'",
                            "enum": ["emoji", "external"]
                        },
                        "emoji": {
                            "type": "string",
                            "description": "Emoji, when type is 'emoji'"
                        },
                        "url": {
                            "type": "string",
                            "description": "Image URL, when type is 'external'"
                        }
                    }
                },
                "cover": {
                    "type": "object",
                    "description": "Page cover (optional)",
                    "properties": {
                        "type": {
                            "type": "string",
                            "description": "Cover type: 'external'",
                            "enum": ["external"]
                        },
                        "url": {
                            "type": "string",
                            "description": "Cover image URL"
                        }
                    }
                }
            },
            "required": ["parentId", "title"]
        }),
    }
}

pub fn update_page_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: UPDATE_PAGE_TOOL.to_string(),
        description: "Update a Notion page".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "pageId": {
                    "type": "string",
                    "description": "ID of the page to update"
                },
                "title": {
                    "type": "string",
                    "description": "New page title (optional)"
                },
                "content": {
                    "type": "string",
                    "description": "Markdown to append to the page (optional)"
                },
                "properties": {
                    "type": "object",
                    "description": "Text properties to set (optional)"
                },
                "archived": {
                    "type": "boolean",
                    "description": "Archive or restore the page (optional)"
                }
            },
            "required": ["pageId"]
        }),
    }
}

pub async fn handle_create_page(
    provider: &dyn ContentProvider,
    args: &Args,
) -> Result<ToolResult, ToolError> {
    let params = CreatePageParams::from_args(args)?;

    let page = provider
        .create_page(&params.to_request())
        .await
        .map_err(ToolError::provider("failed to create Notion page"))?;

    append_content(provider, &page.id, &params.content_blocks()).await;

    Ok(ToolResult::json(&convert::page_result(&page))?)
}

pub async fn handle_update_page(
    provider: &dyn ContentProvider,
    args: &Args,
) -> Result<ToolResult, ToolError> {
    let params = UpdatePageParams::from_args(args)?;

    let page = provider
        .update_page(&params.page_id, &params.to_request())
        .await
        .map_err(ToolError::provider("failed to update Notion page"))?;

    append_content(provider, &page.id, &params.content_blocks()).await;

    Ok(ToolResult::json(&convert::page_result(&page))?)
}

/// Append page content after the page itself was written.
/// Failure here does not fail the tool call.
async fn append_content(provider: &dyn ContentProvider, page_id: &str, blocks: &[BlockBody]) {
    if blocks.is_empty() {
        return;
    }

    match provider.append_block_children(page_id, blocks).await {
        Ok(list) => tracing::debug!("appended {} blocks to {}", list.results.len(), page_id),
        Err(e) => tracing::warn!("failed to append content blocks to {}: {}", page_id, e),
    }
}
