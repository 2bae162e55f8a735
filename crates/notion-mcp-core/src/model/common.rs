//! Shared Notion value objects

use serde::{Deserialize, Serialize};

/// A run of rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "text_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plain_text: String,
}

fn text_kind() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    /// Plain text run
    pub fn plain(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind: text_kind(),
            text: Some(TextContent {
                content: content.clone(),
            }),
            plain_text: content,
        }
    }

    /// Text of this run, preferring Notion's rendered `plain_text`
    pub fn as_plain_text(&self) -> &str {
        if !self.plain_text.is_empty() {
            return &self.plain_text;
        }
        self.text.as_ref().map(|t| t.content.as_str()).unwrap_or("")
    }
}

/// Notion user reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Parent of a page, database or block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    PageId { page_id: String },
    DatabaseId { database_id: String },
    BlockId { block_id: String },
    Workspace { workspace: bool },
    #[serde(other)]
    Unsupported,
}

impl Parent {
    pub fn page(id: impl Into<String>) -> Self {
        Parent::PageId { page_id: id.into() }
    }
}

/// Page or callout icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: FileLink },
    File { file: HostedFile },
    #[serde(other)]
    Unsupported,
}

impl Icon {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Icon::Emoji {
            emoji: emoji.into(),
        }
    }

    pub fn external(url: impl Into<String>) -> Self {
        Icon::External {
            external: FileLink { url: url.into() },
        }
    }
}

/// Externally hosted file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLink {
    pub url: String,
}

/// Notion-hosted file with a signed, expiring URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

/// File object, used for page covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: FileLink },
    File { file: HostedFile },
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        FileObject::External {
            external: FileLink { url: url.into() },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FileObject::External { .. } => "external",
            FileObject::File { .. } => "file",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }
}
