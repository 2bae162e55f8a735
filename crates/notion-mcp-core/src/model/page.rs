//! Pages and page properties

use super::common::{FileObject, Icon, Parent, RichText, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Notion page as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<User>,

    #[serde(default)]
    pub last_edited_by: Option<User>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(default)]
    pub parent: Option<Parent>,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(default)]
    pub icon: Option<Icon>,

    #[serde(default)]
    pub cover: Option<FileObject>,
}

impl Page {
    /// Plain text of the first run of the page's title property
    pub fn title(&self) -> &str {
        self.properties
            .values()
            .find(|p| p.kind == "title")
            .and_then(|p| p.title.first())
            .map(|run| run.as_plain_text())
            .unwrap_or("")
    }
}

/// A property value on a page
///
/// Only the identity and kind are modelled; title runs are kept so the
/// page title can be extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<RichText>,
}

/// Property value sent when creating or updating a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyInput {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
}

impl PropertyInput {
    pub fn title(text: impl Into<String>) -> Self {
        PropertyInput::Title {
            title: vec![RichText::plain(text)],
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        PropertyInput::RichText {
            rich_text: vec![RichText::plain(text)],
        }
    }
}

/// Body of `POST /pages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCreateRequest {
    pub parent: Parent,

    pub properties: BTreeMap<String, PropertyInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileObject>,
}

/// Body of `PATCH /pages/{id}`; absent fields are left untouched by Notion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertyInput>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl PageUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.properties.is_none() && self.archived.is_none()
    }
}
