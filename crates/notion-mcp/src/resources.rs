//! MCP resource handlers

use crate::convert::WorkspaceInfo;
use crate::protocol::{ResourceContent, ResourceDefinition};
use notion_mcp_core::config::MAX_PAGE_SIZE;
use notion_mcp_core::model::SearchRequest;
use notion_mcp_core::{ContentProvider, Result, RESOURCE_SCHEME};

pub const WORKSPACE_NAME: &str = "workspace";
pub const JSON_MIME_TYPE: &str = "application/json";

/// URI of the workspace summary resource
pub fn workspace_uri() -> String {
    format!("{}{}", RESOURCE_SCHEME, WORKSPACE_NAME)
}

pub fn workspace_resource_definition() -> ResourceDefinition {
    ResourceDefinition {
        uri: workspace_uri(),
        name: "Notion Workspace".to_string(),
        description: "Workspace summary with page and database counts".to_string(),
        mime_type: JSON_MIME_TYPE.to_string(),
    }
}

/// Resource catalog in listing order
pub fn catalog() -> Vec<ResourceDefinition> {
    vec![workspace_resource_definition()]
}

/// Summarize the workspace from a single unfiltered search.
///
/// Only the first page of results (up to 100) is counted; the totals are
/// not a full workspace scan.
pub async fn workspace_info(provider: &dyn ContentProvider) -> Result<WorkspaceInfo> {
    let request = SearchRequest {
        page_size: Some(MAX_PAGE_SIZE),
        ..Default::default()
    };
    let response = provider.search(&request).await?;
    Ok(WorkspaceInfo::from_search(&response))
}

/// Read a resource by URI; `Ok(None)` when the URI is not served here
pub async fn read_resource(
    provider: &dyn ContentProvider,
    uri: &str,
) -> Result<Option<ResourceContent>> {
    if uri != workspace_uri() {
        return Ok(None);
    }

    let info = workspace_info(provider).await?;
    Ok(Some(ResourceContent {
        uri: uri.to_string(),
        mime_type: JSON_MIME_TYPE.to_string(),
        text: serde_json::to_string(&info)?,
    }))
}
