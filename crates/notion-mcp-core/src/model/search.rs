//! `POST /search` request and response

use super::database::Database;
use super::page::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Object kinds the search endpoint can be narrowed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Page,
    Database,
}

impl ObjectKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "page" => Some(ObjectKind::Page),
            "database" => Some(ObjectKind::Database),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub property: String,
    pub value: ObjectKind,
}

impl SearchFilter {
    /// Filter on the `object` property
    pub fn object(kind: ObjectKind) -> Self {
        Self {
            property: "object".to_string(),
            value: kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    LastEditedTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSort {
    pub direction: SortDirection,
    pub timestamp: SortTimestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub results: Vec<SearchObject>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A search hit, discriminated by Notion's `object` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SearchObject {
    Page(Page),
    Database(Database),
}

impl SearchObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SearchObject::Page(_) => ObjectKind::Page,
            SearchObject::Database(_) => ObjectKind::Database,
        }
    }
}
