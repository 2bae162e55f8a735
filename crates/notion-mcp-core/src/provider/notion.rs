//! Notion REST client

use super::ContentProvider;
use crate::config::Config;
use crate::error::{NotionError, Result};
use crate::model::{
    AppendBlockChildrenRequest, BlockBody, BlockList, Page, PageCreateRequest,
    PageUpdateRequest, SearchRequest, SearchResponse,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// reqwest-backed implementation of [`ContentProvider`]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    notion_version: String,
}

/// Error object Notion returns with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(NotionError::Config("Notion token is required".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("notion-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            notion_version: config.notion_version.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.notion_version)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status.as_u16(), &body))
    }
}

/// Map a failed response onto the error taxonomy
fn classify_failure(status: u16, body: &str) -> NotionError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let (code, message) = match parsed {
        Some(err) => (err.code, err.message),
        None => (String::new(), body.trim().to_string()),
    };

    tracing::debug!("Notion request failed with {}: {} {}", status, code, message);

    match status {
        401 | 403 => NotionError::Unauthorized(message),
        429 => NotionError::RateLimited(message),
        _ => NotionError::Api {
            status,
            code,
            message,
        },
    }
}

#[async_trait::async_trait]
impl ContentProvider for NotionClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.send(self.request(Method::POST, "search").json(request))
            .await
    }

    async fn create_page(&self, request: &PageCreateRequest) -> Result<Page> {
        self.send(self.request(Method::POST, "pages").json(request))
            .await
    }

    async fn update_page(&self, page_id: &str, request: &PageUpdateRequest) -> Result<Page> {
        self.send(
            self.request(Method::PATCH, &format!("pages/{}", page_id))
                .json(request),
        )
        .await
    }

    async fn append_block_children(
        &self,
        block_id: &str,
        children: &[BlockBody],
    ) -> Result<BlockList> {
        let body = AppendBlockChildrenRequest::new(children);
        self.send(
            self.request(Method::PATCH, &format!("blocks/{}/children", block_id))
                .json(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_failure() {
        let err = classify_failure(
            401,
            r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#,
        );
        assert!(matches!(err, NotionError::Unauthorized(ref m) if m == "API token is invalid."));
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_failure(429, r#"{"code":"rate_limited","message":"slow down"}"#);
        assert!(matches!(err, NotionError::RateLimited(_)));
    }

    #[test]
    fn test_classify_non_json_body() {
        let err = classify_failure(502, "Bad Gateway\n");
        match err {
            NotionError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert!(code.is_empty());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_empty_token() {
        assert!(NotionClient::new(&Config::default()).is_err());
    }
}
