use super::{ToolError, APPEND_BLOCK_TOOL};
use crate::args::Args;
use crate::convert;
use crate::params::AppendBlockParams;
use crate::protocol::{ToolDefinition, ToolResult};
use notion_mcp_core::{BlockKind, ContentProvider};

pub fn append_block_tool_definition() -> ToolDefinition {
    let kinds: Vec<&str> = BlockKind::ALL.iter().map(|k| k.as_str()).collect();

    ToolDefinition {
        name: APPEND_BLOCK_TOOL.to_string(),
        description: "Append a block of content to a Notion page".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "pageId": {
                    "type": "string",
                    "description": "ID of the target page"
                },
                "content": {
                    "type": "string",
                    "description": "Text of the block"
                },
                "blockType": {
                    "type": "string",
                    "description": "Block type (default: paragraph)",
                    "enum": kinds
                }
            },
            "required": ["pageId", "content"]
        }),
    }
}

pub async fn handle_append_block(
    provider: &dyn ContentProvider,
    args: &Args,
) -> Result<ToolResult, ToolError> {
    let params = AppendBlockParams::from_args(args)?;
    let block = params.block();

    let list = provider
        .append_block_children(&params.page_id, std::slice::from_ref(&block))
        .await
        .map_err(ToolError::provider("failed to append blocks"))?;

    Ok(ToolResult::json(&convert::block_result(&list))?)
}
