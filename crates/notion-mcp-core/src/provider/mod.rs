//! Content provider abstraction
//!
//! The MCP layer never talks HTTP itself. It goes through this trait, which
//! the Notion REST client implements and tests replace with in-memory fakes.

use crate::error::Result;
use crate::model::{
    BlockBody, BlockList, Page, PageCreateRequest, PageUpdateRequest, SearchRequest,
    SearchResponse,
};

pub mod notion;

pub use notion::NotionClient;

/// Operations the server needs from the content-management backend
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Search pages and databases shared with the integration
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Create a page
    async fn create_page(&self, request: &PageCreateRequest) -> Result<Page>;

    /// Patch a page's properties or archived flag
    async fn update_page(&self, page_id: &str, request: &PageUpdateRequest) -> Result<Page>;

    /// Append child blocks to a page or block
    async fn append_block_children(&self, block_id: &str, children: &[BlockBody])
        -> Result<BlockList>;
}
