//! HTTP binding
//!
//! `POST /mcp` carries protocol envelopes. Transport failures (wrong verb,
//! body that is not JSON) are plain HTTP statuses; anything that reaches the
//! dispatcher is answered with 200 and an envelope, error or not.

use crate::params::SearchParams;
use crate::sdk::NotionMcp;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use notion_mcp_core::model::ObjectKind;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn router(sdk: Arc<NotionMcp>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/resources", get(list_resources))
        .route("/search", get(search))
        .route("/workspace", get(workspace))
        .with_state(sdk)
}

/// Serve the router on `addr` until the process exits
pub async fn serve(sdk: Arc<NotionMcp>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(sdk)).await?;
    Ok(())
}

async fn handle_mcp(State(sdk): State<Arc<NotionMcp>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("rejecting malformed body: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response();
        }
    };

    Json(sdk.server().handle_value(value).await).into_response()
}

async fn health(State(sdk): State<Arc<NotionMcp>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": sdk.config().server_name,
    }))
}

async fn list_tools(State(sdk): State<Arc<NotionMcp>>) -> Json<Value> {
    Json(json!({ "tools": sdk.tools() }))
}

async fn list_resources(State(sdk): State<Arc<NotionMcp>>) -> Json<Value> {
    Json(json!({ "resources": sdk.resources() }))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    filter: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

async fn search(
    State(sdk): State<Arc<NotionMcp>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let Some(q) = query.q.filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Query parameter 'q' is required",
        )
            .into_response();
    };

    let page_size = query
        .page_size
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or_else(|| sdk.config().default_page_size);

    let params = SearchParams {
        query: Some(q),
        filter: query.filter.as_deref().and_then(ObjectKind::from_name),
        page_size: Some(page_size),
        ..Default::default()
    };

    match sdk.search(&params).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search failed: {}", e),
        )
            .into_response(),
    }
}

async fn workspace(State(sdk): State<Arc<NotionMcp>>) -> Response {
    match sdk.workspace_info().await {
        Ok(info) => Json(info).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get workspace info: {}", e),
        )
            .into_response(),
    }
}
