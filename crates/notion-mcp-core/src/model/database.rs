//! Databases and their property schema

use super::common::{FileObject, Icon, Parent, RichText, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Notion database as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,

    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<User>,

    #[serde(default)]
    pub last_edited_by: Option<User>,

    /// The database title lives here, not in `properties`
    #[serde(default)]
    pub title: Vec<RichText>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,

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

/// Column definition in a database schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,
}
