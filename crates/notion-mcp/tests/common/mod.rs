//! In-memory provider that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use notion_mcp::McpServer;
use notion_mcp_core::model::{
    Block, BlockBody, BlockList, Page, PageCreateRequest, PageUpdateRequest, Parent,
    SearchRequest, SearchResponse,
};
use notion_mcp_core::{Config, ContentProvider, NotionError, Result};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchRequest),
    CreatePage(PageCreateRequest),
    UpdatePage(String, PageUpdateRequest),
    Append(String, Vec<BlockBody>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    Unauthorized,
    RateLimited,
    NotFound,
}

impl Failure {
    fn error(self) -> NotionError {
        match self {
            Failure::Unauthorized => NotionError::Unauthorized("API token is invalid.".to_string()),
            Failure::RateLimited => NotionError::RateLimited("slow down".to_string()),
            Failure::NotFound => NotionError::Api {
                status: 404,
                code: "object_not_found".to_string(),
                message: "Could not find page".to_string(),
            },
        }
    }
}

#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<Call>>,
    search_results: Vec<serde_json::Value>,
    fail_all: Option<Failure>,
    fail_append: Option<Failure>,
    delay: Option<Duration>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search hits as raw Notion JSON
    pub fn with_search_results(mut self, results: Vec<serde_json::Value>) -> Self {
        self.search_results = results;
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.fail_all = Some(failure);
        self
    }

    pub fn failing_append(mut self, failure: Failure) -> Self {
        self.fail_append = Some(failure);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.fail_all {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }
}

fn page(id: &str) -> Page {
    serde_json::from_value(json!({
        "object": "page",
        "id": id,
        "created_time": "2024-06-01T12:00:00.000Z",
        "last_edited_time": "2024-06-01T12:00:00.000Z",
        "created_by": {"object": "user", "id": "user-1"},
        "properties": {
            "title": {"id": "title", "type": "title", "title": [{"plain_text": "Created"}]}
        },
        "parent": {"type": "page_id", "page_id": "parent-1"},
        "url": format!("https://www.notion.so/{}", id)
    }))
    .unwrap()
}

#[async_trait]
impl ContentProvider for RecordingProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.record(Call::Search(request.clone())).await?;
        Ok(serde_json::from_value(json!({
            "object": "list",
            "results": self.search_results,
            "has_more": false,
            "next_cursor": null
        }))?)
    }

    async fn create_page(&self, request: &PageCreateRequest) -> Result<Page> {
        self.record(Call::CreatePage(request.clone())).await?;
        Ok(page("new-page"))
    }

    async fn update_page(&self, page_id: &str, request: &PageUpdateRequest) -> Result<Page> {
        self.record(Call::UpdatePage(page_id.to_string(), request.clone()))
            .await?;
        Ok(page(page_id))
    }

    async fn append_block_children(
        &self,
        block_id: &str,
        children: &[BlockBody],
    ) -> Result<BlockList> {
        self.record(Call::Append(block_id.to_string(), children.to_vec()))
            .await?;
        if let Some(failure) = self.fail_append {
            return Err(failure.error());
        }

        let results = children
            .iter()
            .enumerate()
            .map(|(i, body)| Block {
                id: format!("block-{}", i),
                created_time: None,
                last_edited_time: None,
                created_by: None,
                last_edited_by: None,
                has_children: false,
                archived: false,
                parent: Some(Parent::page(block_id)),
                body: body.clone(),
            })
            .collect();

        Ok(BlockList {
            object: "list".to_string(),
            results,
        })
    }
}

pub fn config() -> Config {
    Config::with_token("test-token")
}

pub fn server_with(provider: Arc<RecordingProvider>) -> McpServer {
    McpServer::new(config(), provider).unwrap()
}
