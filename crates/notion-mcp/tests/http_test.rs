//! HTTP binding

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{config, RecordingProvider};
use notion_mcp::http::router;
use notion_mcp::NotionMcp;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(provider: RecordingProvider) -> axum::Router {
    let sdk = NotionMcp::with_provider(config(), Arc::new(provider)).unwrap();
    router(Arc::new(sdk))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_mcp(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_mcp_rejects_other_verbs() {
    let request = Request::builder()
        .method("GET")
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();
    let response = app(RecordingProvider::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_mcp_rejects_malformed_json() {
    let response = app(RecordingProvider::new())
        .oneshot(post_mcp("{\"jsonrpc\": "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protocol_errors_are_http_ok() {
    let body = json!({"jsonrpc": "2.0", "id": 11, "method": "bogus"}).to_string();
    let response = app(RecordingProvider::new())
        .oneshot(post_mcp(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = body_json(response).await;
    assert_eq!(envelope["jsonrpc"], "2.0");
    assert_eq!(envelope["id"], 11);
    assert_eq!(envelope["error"]["code"], -32601);
    assert!(envelope.get("result").is_none());
}

#[tokio::test]
async fn test_mcp_tools_list() {
    let body = json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}).to_string();
    let response = app(RecordingProvider::new())
        .oneshot(post_mcp(&body))
        .await
        .unwrap();
    let envelope = body_json(response).await;
    assert_eq!(envelope["result"]["tools"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_discovery_routes() {
    let health = app(RecordingProvider::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let health = body_json(health).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "notion-mcp-server");

    let resources = app(RecordingProvider::new())
        .oneshot(Request::get("/resources").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let resources = body_json(resources).await;
    assert_eq!(resources["resources"][0]["name"], "Notion Workspace");
}

#[tokio::test]
async fn test_search_route() {
    let missing = app(RecordingProvider::new())
        .oneshot(Request::get("/search").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let provider = RecordingProvider::new().with_search_results(vec![json!({
        "object": "page",
        "id": "p1",
        "properties": {"Name": {"id": "title", "type": "title", "title": [{"plain_text": "Hit"}]}}
    })]);
    let found = app(provider)
        .oneshot(
            Request::get("/search?q=hit&filter=page&pageSize=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    let result = body_json(found).await;
    assert_eq!(result["results"][0]["title"], "Hit");
}

#[tokio::test]
async fn test_workspace_route_failure_is_500() {
    let provider = RecordingProvider::new().failing(common::Failure::RateLimited);
    let response = app(provider)
        .oneshot(Request::get("/workspace").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
