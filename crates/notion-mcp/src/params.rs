//! Typed tool parameters
//!
//! Each struct is narrowed from a tool's raw argument map and knows how to
//! build the provider request for its tool. They serialize back to the same
//! camelCase argument shape, which is what the facade sends.

use crate::args::{
    optional_bool, optional_object, optional_str, optional_u32, required_str, ArgError, Args,
};
use notion_mcp_core::blocks::builder::block_for_kind;
use notion_mcp_core::config::MAX_PAGE_SIZE;
use notion_mcp_core::model::{
    BlockBody, FileObject, Icon, ObjectKind, PageCreateRequest, PageUpdateRequest, Parent,
    PropertyInput, SearchFilter, SearchRequest, SearchSort, SortDirection, SortTimestamp,
};
use notion_mcp_core::{markdown_to_blocks, BlockKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property name Notion uses for a page's title
pub const TITLE_PROPERTY: &str = "title";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Unrecognized filter names narrow to `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchParams {
    pub fn from_args(args: &Args) -> Result<Self, ArgError> {
        Ok(Self {
            query: optional_str(args, "query")?,
            filter: optional_str(args, "filter")?
                .as_deref()
                .and_then(ObjectKind::from_name),
            sort_by: optional_str(args, "sortBy")?,
            sort_order: optional_str(args, "sortOrder")?,
            start_cursor: optional_str(args, "startCursor")?,
            page_size: optional_u32(args, "pageSize")?,
        })
    }

    /// Sort applies only when both `sortBy` and `sortOrder` are given
    pub fn sort(&self) -> Option<SearchSort> {
        // Notion only sorts search results by last_edited_time
        self.sort_by.as_deref().filter(|s| !s.is_empty())?;
        let order = self.sort_order.as_deref().filter(|s| !s.is_empty())?;
        let direction = match order {
            "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        Some(SearchSort {
            direction,
            timestamp: SortTimestamp::LastEditedTime,
        })
    }

    /// Build the provider request; a zero or absent page size takes the default
    pub fn to_request(&self, default_page_size: u32) -> SearchRequest {
        let page_size = self
            .page_size
            .filter(|size| *size > 0)
            .unwrap_or(default_page_size)
            .min(MAX_PAGE_SIZE);

        SearchRequest {
            query: self.query.clone().filter(|q| !q.is_empty()),
            sort: self.sort(),
            filter: self.filter.map(SearchFilter::object),
            start_cursor: self.start_cursor.clone().filter(|c| !c.is_empty()),
            page_size: Some(page_size),
        }
    }
}

/// Page icon argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IconParam {
    Emoji { emoji: String },
    External { url: String },
}

impl IconParam {
    fn from_args(icon: &Args) -> Result<Self, ArgError> {
        match optional_str(icon, "type")?.as_deref() {
            Some("external") => Ok(IconParam::External {
                url: required_str(icon, "url").map_err(nested("icon"))?,
            }),
            Some("emoji") | None => Ok(IconParam::Emoji {
                emoji: required_str(icon, "emoji").map_err(nested("icon"))?,
            }),
            Some(_) => Err(ArgError::WrongType {
                field: "icon.type".to_string(),
                expected: "\"emoji\" or \"external\"",
            }),
        }
    }

    fn to_icon(&self) -> Icon {
        match self {
            IconParam::Emoji { emoji } => Icon::emoji(emoji.clone()),
            IconParam::External { url } => Icon::external(url.clone()),
        }
    }
}

/// Page cover argument; only external images are supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CoverParam {
    External { url: String },
}

impl CoverParam {
    fn from_args(cover: &Args) -> Result<Self, ArgError> {
        match optional_str(cover, "type")?.as_deref() {
            Some("external") | None => Ok(CoverParam::External {
                url: required_str(cover, "url").map_err(nested("cover"))?,
            }),
            Some(_) => Err(ArgError::WrongType {
                field: "cover.type".to_string(),
                expected: "\"external\"",
            }),
        }
    }

    fn to_file(&self) -> FileObject {
        match self {
            CoverParam::External { url } => FileObject::external(url.clone()),
        }
    }
}

fn nested(parent: &'static str) -> impl Fn(ArgError) -> ArgError {
    move |err| match err {
        ArgError::Missing { field } => ArgError::Missing {
            field: format!("{}.{}", parent, field),
        },
        ArgError::WrongType { field, expected } => ArgError::WrongType {
            field: format!("{}.{}", parent, field),
            expected,
        },
    }
}

/// Flat string properties; non-string values are dropped
fn string_properties(args: &Args) -> Result<BTreeMap<String, String>, ArgError> {
    Ok(optional_object(args, "properties")?
        .map(|props| {
            props
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default())
}

fn rich_text_properties(
    properties: &BTreeMap<String, String>,
) -> impl Iterator<Item = (String, PropertyInput)> + '_ {
    properties
        .iter()
        .map(|(k, v)| (k.clone(), PropertyInput::rich_text(v.clone())))
}

/// Markdown content as blocks; empty when absent
fn content_blocks(content: Option<&str>) -> Vec<BlockBody> {
    content.map(markdown_to_blocks).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageParams {
    pub parent_id: String,
    pub title: String,

    /// Markdown appended after the page is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconParam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverParam>,
}

impl CreatePageParams {
    pub fn new(parent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            title: title.into(),
            content: None,
            properties: BTreeMap::new(),
            icon: None,
            cover: None,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, ArgError> {
        Ok(Self {
            parent_id: required_str(args, "parentId")?,
            title: required_str(args, "title")?,
            content: optional_str(args, "content")?,
            properties: string_properties(args)?,
            icon: optional_object(args, "icon")?
                .map(IconParam::from_args)
                .transpose()?,
            cover: optional_object(args, "cover")?
                .map(CoverParam::from_args)
                .transpose()?,
        })
    }

    pub fn to_request(&self) -> PageCreateRequest {
        let mut properties: BTreeMap<String, PropertyInput> =
            rich_text_properties(&self.properties).collect();
        properties.insert(
            TITLE_PROPERTY.to_string(),
            PropertyInput::title(self.title.clone()),
        );

        PageCreateRequest {
            parent: Parent::page(self.parent_id.clone()),
            properties,
            icon: self.icon.as_ref().map(IconParam::to_icon),
            cover: self.cover.as_ref().map(CoverParam::to_file),
        }
    }

    pub fn content_blocks(&self) -> Vec<BlockBody> {
        content_blocks(self.content.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageParams {
    pub page_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl UpdatePageParams {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            ..Default::default()
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, ArgError> {
        Ok(Self {
            page_id: required_str(args, "pageId")?,
            title: optional_str(args, "title")?,
            content: optional_str(args, "content")?,
            properties: string_properties(args)?,
            archived: optional_bool(args, "archived")?,
        })
    }

    /// Only fields that were given end up in the patch
    pub fn to_request(&self) -> PageUpdateRequest {
        let mut properties: BTreeMap<String, PropertyInput> =
            rich_text_properties(&self.properties).collect();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            properties.insert(TITLE_PROPERTY.to_string(), PropertyInput::title(title));
        }

        PageUpdateRequest {
            properties: (!properties.is_empty()).then_some(properties),
            archived: self.archived,
        }
    }

    pub fn content_blocks(&self) -> Vec<BlockBody> {
        content_blocks(self.content.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendBlockParams {
    pub page_id: String,
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
}

impl AppendBlockParams {
    pub fn new(page_id: impl Into<String>, content: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            page_id: page_id.into(),
            content: content.into(),
            block_type: Some(kind.as_str().to_string()),
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, ArgError> {
        Ok(Self {
            page_id: required_str(args, "pageId")?,
            content: required_str(args, "content")?,
            block_type: optional_str(args, "blockType")?,
        })
    }

    /// Requested block kind, falling back to paragraph
    pub fn kind(&self) -> BlockKind {
        self.block_type
            .as_deref()
            .map(BlockKind::from_name)
            .unwrap_or(BlockKind::Paragraph)
    }

    pub fn block(&self) -> BlockBody {
        block_for_kind(self.kind(), &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn args(value: Value) -> Args {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_search_filter_and_no_sort() {
        let params = SearchParams::from_args(&args(json!({"filter": "page"}))).unwrap();
        let request = params.to_request(10);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"filter": {"property": "object", "value": "page"}, "page_size": 10})
        );
    }

    #[test]
    fn test_search_unknown_filter_is_no_filter() {
        let params = SearchParams::from_args(&args(json!({"filter": "block"}))).unwrap();
        assert!(params.to_request(10).filter.is_none());
    }

    #[test]
    fn test_search_sort_needs_both_fields() {
        let only_by = SearchParams::from_args(&args(json!({"sortBy": "last_edited_time"}))).unwrap();
        assert!(only_by.sort().is_none());

        let both = SearchParams::from_args(&args(
            json!({"sortBy": "last_edited_time", "sortOrder": "descending"}),
        ))
        .unwrap();
        assert_eq!(
            both.sort(),
            Some(SearchSort {
                direction: SortDirection::Descending,
                timestamp: SortTimestamp::LastEditedTime,
            })
        );

        let odd = SearchParams::from_args(&args(
            json!({"sortBy": "last_edited_time", "sortOrder": "DESC"}),
        ))
        .unwrap();
        assert_eq!(odd.sort().unwrap().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_search_page_size_defaults() {
        let zero = SearchParams::from_args(&args(json!({"pageSize": 0}))).unwrap();
        assert_eq!(zero.to_request(25).page_size, Some(25));
        let absent = SearchParams::default();
        assert_eq!(absent.to_request(10).page_size, Some(10));
        let big = SearchParams::from_args(&args(json!({"pageSize": 500}))).unwrap();
        assert_eq!(big.to_request(10).page_size, Some(100));
    }

    #[test]
    fn test_create_page_requires_title() {
        let err = CreatePageParams::from_args(&args(json!({"parentId": "p"}))).unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn test_create_page_request_shape() {
        let params = CreatePageParams::from_args(&args(json!({
            "parentId": "parent-1",
            "title": "Plan",
            "properties": {"Owner": "ana", "Count": 3},
            "icon": {"type": "emoji", "emoji": "🚀"},
            "cover": {"type": "external", "url": "https://img.test/c.png"}
        })))
        .unwrap();
        let value = serde_json::to_value(params.to_request()).unwrap();
        assert_eq!(value["parent"], json!({"type": "page_id", "page_id": "parent-1"}));
        assert_eq!(value["properties"]["title"]["title"][0]["text"]["content"], "Plan");
        assert_eq!(value["properties"]["Owner"]["type"], "rich_text");
        assert!(value["properties"].get("Count").is_none());
        assert_eq!(value["icon"], json!({"type": "emoji", "emoji": "🚀"}));
        assert_eq!(value["cover"]["external"]["url"], "https://img.test/c.png");
    }

    #[test]
    fn test_icon_missing_emoji_is_reported_with_path() {
        let err = CreatePageParams::from_args(&args(json!({
            "parentId": "p", "title": "t", "icon": {"type": "emoji"}
        })))
        .unwrap_err();
        assert_eq!(err.field(), "icon.emoji");
    }

    #[test]
    fn test_update_page_partial() {
        let params = UpdatePageParams::from_args(&args(json!({"pageId": "p1", "archived": true})))
            .unwrap();
        assert_eq!(
            serde_json::to_value(params.to_request()).unwrap(),
            json!({"archived": true})
        );

        let titled =
            UpdatePageParams::from_args(&args(json!({"pageId": "p1", "title": "New"}))).unwrap();
        let request = titled.to_request();
        assert!(request.archived.is_none());
        assert!(request.properties.unwrap().contains_key("title"));
    }

    #[test]
    fn test_update_page_mistyped_archived() {
        let err = UpdatePageParams::from_args(&args(json!({"pageId": "p1", "archived": "yes"})))
            .unwrap_err();
        assert!(matches!(err, ArgError::WrongType { .. }));
    }

    #[test]
    fn test_append_block_kind_fallback() {
        let params = AppendBlockParams::from_args(&args(
            json!({"pageId": "p", "content": "x", "blockType": "table"}),
        ))
        .unwrap();
        assert_eq!(params.kind(), BlockKind::Paragraph);

        let default = AppendBlockParams::from_args(&args(json!({"pageId": "p", "content": "x"})))
            .unwrap();
        assert_eq!(default.block().kind(), "paragraph");
    }

    #[test]
    fn test_params_serialize_as_arguments() {
        let params = AppendBlockParams::new("p", "Intro", BlockKind::Heading2);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"pageId": "p", "content": "Intro", "blockType": "heading_2"})
        );
        let search = SearchParams {
            filter: Some(ObjectKind::Database),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&search).unwrap(), json!({"filter": "database"}));
    }
}
