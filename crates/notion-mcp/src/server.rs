//! MCP server implementation

use crate::protocol::*;
use crate::resources;
use crate::tools::{self, Tool, ToolError};
use notion_mcp_core::{Config, ContentProvider, FailureKind, NotionClient, NotionError};
use serde_json::{json, Value};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Request dispatcher
///
/// Tool and resource catalogs are built once here and never change. The
/// config is shared and may be changed through [`McpServer::update_config`]
/// while requests are in flight; a request reads the values it needs once.
pub struct McpServer {
    provider: Arc<dyn ContentProvider>,
    config: Arc<RwLock<Config>>,
    tools: Vec<ToolDefinition>,
    resources: Vec<ResourceDefinition>,
}

impl McpServer {
    /// Create a server over any provider; fails when the config has no token
    pub fn new(
        mut config: Config,
        provider: Arc<dyn ContentProvider>,
    ) -> notion_mcp_core::Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            config: Arc::new(RwLock::new(config)),
            tools: tools::catalog(),
            resources: resources::catalog(),
        })
    }

    /// Create a server talking to the Notion API
    pub fn from_config(mut config: Config) -> notion_mcp_core::Result<Self> {
        config.validate()?;
        let client = NotionClient::new(&config)?;
        Self::new(config, Arc::new(client))
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    /// Snapshot of the current config
    pub fn config(&self) -> Config {
        self.read_config().clone()
    }

    pub fn update_config(&self, update: impl FnOnce(&mut Config)) {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut config);
    }

    fn read_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let mut reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(trimmed).await {
                self.write_response(&mut writer, &response).await?;
            }
        }

        Ok(())
    }

    async fn write_response<W: AsyncWriteExt + Unpin>(
        &self,
        writer: &mut W,
        response: &JsonRpcResponse,
    ) -> anyhow::Result<()> {
        let json = serde_json::to_string(response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Handle one line of the stdio transport; notifications get no response
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    ErrorCode::ParseError,
                    format!("{}: {}", ErrorCode::ParseError.message(), e),
                ))
            }
        };

        let is_notification = value.get("id").map_or(true, Value::is_null)
            && value
                .get("method")
                .and_then(Value::as_str)
                .is_some_and(|m| m.starts_with("notifications/"));
        if is_notification {
            tracing::debug!("ignoring notification");
            return None;
        }

        Some(self.handle_value(value).await)
    }

    /// Handle a raw JSON document
    pub async fn handle_raw(&self, raw: &[u8]) -> JsonRpcResponse {
        match serde_json::from_slice::<Value>(raw) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => JsonRpcResponse::error(
                None,
                ErrorCode::ParseError,
                format!("{}: {}", ErrorCode::ParseError.message(), e),
            ),
        }
    }

    /// Handle well-formed JSON that may not be a valid request
    pub async fn handle_value(&self, value: Value) -> JsonRpcResponse {
        let id = value.get("id").cloned().filter(|id| !id.is_null());
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(&request).await,
            Err(e) => JsonRpcResponse::error(
                id,
                ErrorCode::InvalidRequest,
                format!("{}: {}", ErrorCode::InvalidRequest.message(), e),
            ),
        }
    }

    /// Dispatch a request, bounded by the configured timeout
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!("handling {}", request.method);

        let timeout_secs = self.read_config().timeout_secs;
        if timeout_secs == 0 {
            return self.dispatch(request).await;
        }

        match tokio::time::timeout(Duration::from_secs(timeout_secs), self.dispatch(request)).await
        {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!("{} timed out after {}s", request.method, timeout_secs);
                JsonRpcResponse::error_with_data(
                    request.id.clone(),
                    ErrorCode::InternalError,
                    format!("request timed out after {}s", timeout_secs),
                    Some(json!({ "kind": "timeout" })),
                )
            }
        }
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => self.handle_resources_list(request),
            "resources/read" => self.handle_resources_read(request).await,
            _ => JsonRpcResponse::error(
                request.id.clone(),
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let config = self.read_config();
        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            },
            "serverInfo": {
                "name": config.server_name,
                "version": config.server_version
            }
        });
        JsonRpcResponse::success(request.id.clone(), result)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": self.tools }))
    }

    fn handle_resources_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), json!({ "resources": self.resources }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let Some(params) = request.params.clone() else {
            return JsonRpcResponse::error(id, ErrorCode::InvalidParams, "Missing params");
        };

        let call: ToolCall = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    ErrorCode::ParseError,
                    format!("{}: {}", ErrorCode::ParseError.message(), e),
                )
            }
        };

        let Some(tool) = Tool::from_name(&call.name) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("Tool '{}' not found", call.name),
            );
        };

        let default_page_size = self.read_config().default_page_size;
        match tool
            .call(self.provider.as_ref(), &call.arguments, default_page_size)
            .await
        {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, ErrorCode::InternalError, e.to_string()),
            },
            Err(e) => tool_error_response(id, tool, e),
        }
    }

    async fn handle_resources_read(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let Some(params) = request.params.as_ref() else {
            return JsonRpcResponse::error(id, ErrorCode::InvalidParams, "Missing params");
        };

        let Some(uri) = params.get("uri").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "Invalid params: uri is required",
            );
        };

        match resources::read_resource(self.provider.as_ref(), uri).await {
            Ok(Some(content)) => {
                JsonRpcResponse::success(id, json!({ "contents": [content] }))
            }
            Ok(None) => JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("Resource '{}' not found", uri),
            ),
            Err(e) => provider_error_response(
                id,
                format!("failed to get workspace info: {}", e),
                &e,
            ),
        }
    }
}

fn tool_error_response(id: Option<Value>, tool: Tool, err: ToolError) -> JsonRpcResponse {
    match err {
        ToolError::InvalidParams(arg) => {
            tracing::debug!("{} rejected arguments: {}", tool.name(), arg);
            JsonRpcResponse::error_with_data(
                id,
                ErrorCode::InvalidParams,
                arg.to_string(),
                Some(json!({ "field": arg.field() })),
            )
        }
        ToolError::Provider { context, source } => {
            provider_error_response(id, format!("{}: {}", context, source), &source)
        }
        ToolError::Serialization(e) => {
            JsonRpcResponse::error(id, ErrorCode::InternalError, e.to_string())
        }
    }
}

/// Provider failures stay `InternalError`; the cause goes in `data`
fn provider_error_response(
    id: Option<Value>,
    message: String,
    source: &NotionError,
) -> JsonRpcResponse {
    let kind = match source.kind() {
        FailureKind::Auth => "auth",
        FailureKind::RateLimit => "rate_limit",
        FailureKind::Provider => "provider",
        FailureKind::Local => "internal",
    };
    let mut data = json!({ "kind": kind });
    if let Some(status) = source.status() {
        data["status"] = json!(status);
    }
    JsonRpcResponse::error_with_data(id, ErrorCode::InternalError, message, Some(data))
}

/// Run the stdio server against the Notion API
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let server = McpServer::from_config(config)?;
    let config = server.config();
    tracing::info!(
        "{} {} listening on stdio",
        config.server_name,
        config.server_version
    );
    server.run().await
}
