//! Notion domain model
//!
//! Serde mappings for the subset of the Notion REST API this server speaks:
//! pages, databases, blocks and the search endpoint. Polymorphic objects are
//! closed enums dispatched on Notion's own `type` / `object` tags.

pub mod block;
pub mod common;
pub mod database;
pub mod page;
pub mod search;

pub use block::{
    AppendBlockChildrenRequest, Block, BlockBody, BlockList, CalloutBlock, ChildBlock, CodeBlock,
    EmptyObject, RichTextBlock, ToDoBlock,
};
pub use common::{FileLink, FileObject, HostedFile, Icon, Parent, RichText, TextContent, User};
pub use database::{Database, PropertyConfig};
pub use page::{Page, PageCreateRequest, PageUpdateRequest, PropertyInput, PropertyValue};
pub use search::{
    ObjectKind, SearchFilter, SearchObject, SearchRequest, SearchResponse, SearchSort,
    SortDirection, SortTimestamp,
};
