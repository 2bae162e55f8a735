//! Typed facade over the dispatcher
//!
//! Every call goes through a `tools/call` or `resources/read` envelope, the
//! same path a protocol client takes, and decodes the JSON carried in the
//! first content item.

use crate::convert::{BlockResult, PageResult, SearchResult, WorkspaceInfo};
use crate::params::{AppendBlockParams, CreatePageParams, SearchParams, UpdatePageParams};
use crate::protocol::*;
use crate::resources::workspace_uri;
use crate::server::McpServer;
use crate::tools::{APPEND_BLOCK_TOOL, CREATE_PAGE_TOOL, SEARCH_TOOL, UPDATE_PAGE_TOOL};
use notion_mcp_core::{BlockKind, Config, ContentProvider, NotionError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("failed to create MCP server: {0}")]
    Setup(#[from] NotionError),

    /// The dispatcher answered with an error envelope
    #[error("request failed ({}): {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    #[error("response carried no content")]
    MissingContent,

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SdkError {
    /// Protocol error code, for `Rpc` failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            SdkError::Rpc(err) => ErrorCode::from_code(err.code),
            _ => None,
        }
    }
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;

pub struct NotionMcp {
    server: Arc<McpServer>,
    next_id: AtomicU64,
}

impl NotionMcp {
    /// Facade over a Notion API client built from `config`
    pub fn new(config: Config) -> SdkResult<Self> {
        Ok(Self::from_server(McpServer::from_config(config)?))
    }

    /// Facade with default settings and the given token
    pub fn with_token(token: impl Into<String>) -> SdkResult<Self> {
        Self::new(Config::with_token(token))
    }

    pub fn with_provider(config: Config, provider: Arc<dyn ContentProvider>) -> SdkResult<Self> {
        Ok(Self::from_server(McpServer::new(config, provider)?))
    }

    pub fn from_server(server: McpServer) -> Self {
        Self {
            server: Arc::new(server),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn server(&self) -> &McpServer {
        &self.server
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        self.server.tools()
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        self.server.resources()
    }

    pub async fn search(&self, params: &SearchParams) -> SdkResult<SearchResult> {
        self.call_tool(SEARCH_TOOL, params).await
    }

    pub async fn create_page(&self, params: &CreatePageParams) -> SdkResult<PageResult> {
        self.call_tool(CREATE_PAGE_TOOL, params).await
    }

    pub async fn update_page(&self, params: &UpdatePageParams) -> SdkResult<PageResult> {
        self.call_tool(UPDATE_PAGE_TOOL, params).await
    }

    pub async fn append_block(&self, params: &AppendBlockParams) -> SdkResult<BlockResult> {
        self.call_tool(APPEND_BLOCK_TOOL, params).await
    }

    pub async fn workspace_info(&self) -> SdkResult<WorkspaceInfo> {
        let result = self
            .request("resources/read", json!({ "uri": workspace_uri() }))
            .await?;

        let text = result
            .get("contents")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("text"))
            .and_then(Value::as_str)
            .ok_or(SdkError::MissingContent)?;
        Ok(serde_json::from_str(text)?)
    }

    /// Search by query with the configured page size
    pub async fn quick_search(&self, query: &str) -> SdkResult<SearchResult> {
        let params = SearchParams {
            query: Some(query.to_string()),
            page_size: Some(self.config().default_page_size),
            ..Default::default()
        };
        self.search(&params).await
    }

    /// Create a page under `parent_id`; empty content is not appended
    pub async fn quick_create_page(
        &self,
        parent_id: &str,
        title: &str,
        content: &str,
    ) -> SdkResult<PageResult> {
        let mut params = CreatePageParams::new(parent_id, title);
        if !content.is_empty() {
            params.content = Some(content.to_string());
        }
        self.create_page(&params).await
    }

    pub async fn quick_append_text(&self, page_id: &str, content: &str) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::Paragraph).await
    }

    /// Levels outside 1..=3 produce a level-1 heading
    pub async fn quick_append_heading(
        &self,
        page_id: &str,
        content: &str,
        level: u8,
    ) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::heading(level))
            .await
    }

    pub async fn quick_append_code(&self, page_id: &str, content: &str) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::Code).await
    }

    pub async fn quick_append_quote(&self, page_id: &str, content: &str) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::Quote).await
    }

    pub async fn quick_append_callout(
        &self,
        page_id: &str,
        content: &str,
    ) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::Callout).await
    }

    pub async fn quick_append_todo(&self, page_id: &str, content: &str) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::ToDo).await
    }

    pub async fn quick_append_bullet_list(
        &self,
        page_id: &str,
        content: &str,
    ) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::BulletedListItem)
            .await
    }

    pub async fn quick_append_numbered_list(
        &self,
        page_id: &str,
        content: &str,
    ) -> SdkResult<BlockResult> {
        self.append_kind(page_id, content, BlockKind::NumberedListItem)
            .await
    }

    /// Ignored unless 1..=100
    pub fn set_default_page_size(&self, size: u32) {
        self.server.update_config(|c| c.set_default_page_size(size));
    }

    /// Ignored when zero
    pub fn set_timeout(&self, secs: u64) {
        self.server.update_config(|c| c.set_timeout_secs(secs));
    }

    /// Ignored when zero
    pub fn set_max_retries(&self, retries: u32) {
        self.server.update_config(|c| c.set_max_retries(retries));
    }

    pub fn config(&self) -> Config {
        self.server.config()
    }

    async fn append_kind(
        &self,
        page_id: &str,
        content: &str,
        kind: BlockKind,
    ) -> SdkResult<BlockResult> {
        self.append_block(&AppendBlockParams::new(page_id, content, kind))
            .await
    }

    async fn call_tool<P, R>(&self, name: &str, params: &P) -> SdkResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let arguments = match serde_json::to_value(params)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let call = ToolCall {
            name: name.to_string(),
            arguments,
        };

        let result = self
            .request("tools/call", serde_json::to_value(call)?)
            .await?;
        let result: ToolResult = serde_json::from_value(result)?;

        let text = result
            .content
            .first()
            .and_then(Content::text)
            .ok_or(SdkError::MissingContent)?;
        Ok(serde_json::from_str(text)?)
    }

    async fn request(&self, method: &str, params: Value) -> SdkResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, Some(params));
        let response = self.server.handle_request(&request).await;

        match (response.result, response.error) {
            (_, Some(error)) => Err(SdkError::Rpc(error)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(SdkError::MissingContent),
        }
    }
}
