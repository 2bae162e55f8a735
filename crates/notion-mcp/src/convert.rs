//! Content converter
//!
//! Pure projections from the Notion model into the result shapes returned to
//! protocol callers. Absent optional sub-objects map to absent fields.

use chrono::{DateTime, Utc};
use notion_mcp_core::model::{
    Block, BlockList, Database, FileObject, Icon, Page, Parent, PropertyConfig, PropertyValue,
    SearchObject, SearchResponse, User,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub object: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub workspace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// A property flattened to its identity; values are not materialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// A search hit, page or database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub object: String,
    pub id: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<UserRef>,
    pub archived: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// A created or updated page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub object: String,
    pub id: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<UserRef>,
    pub archived: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyRef>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockItem {
    pub object: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<UserRef>,
    pub has_children: bool,
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    pub content: BlockContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub object: String,
    pub results: Vec<BlockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub object: String,
    pub results: Vec<Item>,
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Aggregate served by the workspace resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInfo {
    pub total_pages: usize,
    pub total_databases: usize,
    pub recent_items: Vec<Item>,
}

impl WorkspaceInfo {
    /// Fold search hits into counts by object kind
    pub fn from_search(response: &SearchResponse) -> Self {
        response
            .results
            .iter()
            .fold(WorkspaceInfo::default(), |mut info, hit| {
                match hit {
                    SearchObject::Page(_) => info.total_pages += 1,
                    SearchObject::Database(_) => info.total_databases += 1,
                }
                info.recent_items.push(item(hit));
                info
            })
    }
}

pub fn search_result(response: &SearchResponse) -> SearchResult {
    SearchResult {
        object: response.object.clone(),
        results: response.results.iter().map(item).collect(),
        has_more: response.has_more,
        next_cursor: response.next_cursor.clone(),
    }
}

pub fn item(hit: &SearchObject) -> Item {
    match hit {
        SearchObject::Page(page) => page_item(page),
        SearchObject::Database(database) => database_item(database),
    }
}

fn page_item(page: &Page) -> Item {
    Item {
        object: "page".to_string(),
        id: page.id.clone(),
        created_time: page.created_time,
        last_edited_time: page.last_edited_time,
        created_by: user(page.created_by.as_ref()),
        last_edited_by: user(page.last_edited_by.as_ref()),
        archived: page.archived,
        properties: properties(&page.properties),
        parent: parent(page.parent.as_ref()),
        url: page.url.clone(),
        public_url: page.public_url.clone(),
        icon: icon(page.icon.as_ref()),
        cover: cover(page.cover.as_ref()),
        title: page_title(&page.properties),
    }
}

fn database_item(database: &Database) -> Item {
    let title = database
        .title
        .first()
        .map(|run| run.as_plain_text().to_string())
        .unwrap_or_else(|| title_from_configs(&database.properties));

    Item {
        object: "database".to_string(),
        id: database.id.clone(),
        created_time: database.created_time,
        last_edited_time: database.last_edited_time,
        created_by: user(database.created_by.as_ref()),
        last_edited_by: user(database.last_edited_by.as_ref()),
        archived: database.archived,
        properties: property_configs(&database.properties),
        parent: parent(database.parent.as_ref()),
        url: database.url.clone(),
        public_url: database.public_url.clone(),
        icon: icon(database.icon.as_ref()),
        cover: cover(database.cover.as_ref()),
        title,
    }
}

pub fn page_result(page: &Page) -> PageResult {
    PageResult {
        object: "page".to_string(),
        id: page.id.clone(),
        created_time: page.created_time,
        last_edited_time: page.last_edited_time,
        created_by: user(page.created_by.as_ref()),
        last_edited_by: user(page.last_edited_by.as_ref()),
        archived: page.archived,
        properties: properties(&page.properties),
        parent: parent(page.parent.as_ref()),
        url: page.url.clone(),
        public_url: page.public_url.clone(),
        icon: icon(page.icon.as_ref()),
        cover: cover(page.cover.as_ref()),
    }
}

pub fn block_item(block: &Block) -> BlockItem {
    BlockItem {
        object: "block".to_string(),
        id: block.id.clone(),
        kind: block.body.kind().to_string(),
        created_time: block.created_time,
        last_edited_time: block.last_edited_time,
        created_by: user(block.created_by.as_ref()),
        last_edited_by: user(block.last_edited_by.as_ref()),
        has_children: block.has_children,
        archived: block.archived,
        parent: parent(block.parent.as_ref()),
        content: BlockContent {
            text: block.body.plain_text(),
        },
    }
}

pub fn block_result(list: &BlockList) -> BlockResult {
    BlockResult {
        object: list.object.clone(),
        results: list.results.iter().map(block_item).collect(),
    }
}

/// Users without an id are treated as absent
pub fn user(user: Option<&User>) -> Option<UserRef> {
    let user = user.filter(|u| !u.id.is_empty())?;
    Some(UserRef {
        object: user.object.clone(),
        id: user.id.clone(),
        name: user.name.clone(),
        avatar_url: user.avatar_url.clone(),
        kind: user.kind.clone(),
    })
}

pub fn parent(parent: Option<&Parent>) -> Option<ParentRef> {
    let empty = |kind: &str| ParentRef {
        kind: kind.to_string(),
        page_id: None,
        database_id: None,
        block_id: None,
        workspace: false,
    };

    match parent? {
        Parent::PageId { page_id } => Some(ParentRef {
            page_id: Some(page_id.clone()),
            ..empty("page_id")
        }),
        Parent::DatabaseId { database_id } => Some(ParentRef {
            database_id: Some(database_id.clone()),
            ..empty("database_id")
        }),
        Parent::BlockId { block_id } => Some(ParentRef {
            block_id: Some(block_id.clone()),
            ..empty("block_id")
        }),
        Parent::Workspace { workspace } => Some(ParentRef {
            workspace: *workspace,
            ..empty("workspace")
        }),
        Parent::Unsupported => None,
    }
}

pub fn icon(icon: Option<&Icon>) -> Option<IconRef> {
    match icon? {
        Icon::Emoji { emoji } => Some(IconRef {
            kind: "emoji".to_string(),
            emoji: Some(emoji.clone()),
            url: None,
        }),
        Icon::External { external } => Some(IconRef {
            kind: "external".to_string(),
            emoji: None,
            url: Some(external.url.clone()),
        }),
        Icon::File { file } => Some(IconRef {
            kind: "file".to_string(),
            emoji: None,
            url: Some(file.url.clone()),
        }),
        Icon::Unsupported => None,
    }
}

pub fn cover(cover: Option<&FileObject>) -> Option<CoverRef> {
    cover.map(|c| CoverRef {
        kind: c.kind().to_string(),
        url: c.url().to_string(),
    })
}

pub fn properties(properties: &BTreeMap<String, PropertyValue>) -> BTreeMap<String, PropertyRef> {
    properties
        .iter()
        .map(|(name, p)| {
            (
                name.clone(),
                PropertyRef {
                    kind: p.kind.clone(),
                    id: p.id.clone(),
                },
            )
        })
        .collect()
}

pub fn property_configs(
    configs: &BTreeMap<String, PropertyConfig>,
) -> BTreeMap<String, PropertyRef> {
    configs
        .iter()
        .map(|(name, c)| {
            (
                name.clone(),
                PropertyRef {
                    kind: c.kind.clone(),
                    id: c.id.clone(),
                },
            )
        })
        .collect()
}

/// First run of the `title` property, or empty
pub fn page_title(properties: &BTreeMap<String, PropertyValue>) -> String {
    properties
        .values()
        .find(|p| p.kind == "title")
        .and_then(|p| p.title.first())
        .map(|run| run.as_plain_text().to_string())
        .unwrap_or_default()
}

/// Always empty: a database schema's title column carries no text.
/// The database's own title lives in `Database::title`.
pub fn title_from_configs(_configs: &BTreeMap<String, PropertyConfig>) -> String {
    String::new()
}
