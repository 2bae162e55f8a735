//! Blocks: the units of page content

use super::common::{Icon, Parent, RichText, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A block as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
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
    pub has_children: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub parent: Option<Parent>,

    #[serde(flatten)]
    pub body: BlockBody,
}

/// Typed block content, keyed by Notion's block `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockBody {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: RichTextBlock },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichTextBlock },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextBlock },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: RichTextBlock },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: RichTextBlock },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: RichTextBlock },
    #[serde(rename = "quote")]
    Quote { quote: RichTextBlock },
    #[serde(rename = "code")]
    Code { code: CodeBlock },
    #[serde(rename = "to_do")]
    ToDo { to_do: ToDoBlock },
    #[serde(rename = "callout")]
    Callout { callout: CalloutBlock },
    #[serde(rename = "divider")]
    Divider { divider: EmptyObject },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,

    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,

    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// Serializes as `{}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyObject {}

impl BlockBody {
    /// Notion's name for this block type
    pub fn kind(&self) -> &'static str {
        match self {
            BlockBody::Paragraph { .. } => "paragraph",
            BlockBody::Heading1 { .. } => "heading_1",
            BlockBody::Heading2 { .. } => "heading_2",
            BlockBody::Heading3 { .. } => "heading_3",
            BlockBody::BulletedListItem { .. } => "bulleted_list_item",
            BlockBody::NumberedListItem { .. } => "numbered_list_item",
            BlockBody::Quote { .. } => "quote",
            BlockBody::Code { .. } => "code",
            BlockBody::ToDo { .. } => "to_do",
            BlockBody::Callout { .. } => "callout",
            BlockBody::Divider { .. } => "divider",
            BlockBody::Unsupported => "unsupported",
        }
    }

    /// Rich text runs carried by this block, empty for dividers
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            BlockBody::Paragraph { paragraph: b }
            | BlockBody::Heading1 { heading_1: b }
            | BlockBody::Heading2 { heading_2: b }
            | BlockBody::Heading3 { heading_3: b }
            | BlockBody::BulletedListItem { bulleted_list_item: b }
            | BlockBody::NumberedListItem { numbered_list_item: b }
            | BlockBody::Quote { quote: b } => &b.rich_text,
            BlockBody::Code { code } => &code.rich_text,
            BlockBody::ToDo { to_do } => &to_do.rich_text,
            BlockBody::Callout { callout } => &callout.rich_text,
            BlockBody::Divider { .. } | BlockBody::Unsupported => &[],
        }
    }

    /// Concatenated plain text of all runs
    pub fn plain_text(&self) -> String {
        self.rich_text()
            .iter()
            .map(|run| run.as_plain_text())
            .collect()
    }
}

/// A new child block in an append request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildBlock {
    object: &'static str,

    #[serde(flatten)]
    pub body: BlockBody,
}

impl From<BlockBody> for ChildBlock {
    fn from(body: BlockBody) -> Self {
        Self {
            object: "block",
            body,
        }
    }
}

/// Body of `PATCH /blocks/{id}/children`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendBlockChildrenRequest {
    pub children: Vec<ChildBlock>,
}

impl AppendBlockChildrenRequest {
    pub fn new(children: &[BlockBody]) -> Self {
        Self {
            children: children.iter().cloned().map(ChildBlock::from).collect(),
        }
    }
}

/// List of blocks returned by the append endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockList {
    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub results: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_decodes_typed_body() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "to_do",
            "has_children": false,
            "to_do": {"rich_text": [{"type": "text", "text": {"content": "ship"}, "plain_text": "ship"}], "checked": true}
        }))
        .unwrap();

        assert_eq!(block.id, "b1");
        assert_eq!(block.body.kind(), "to_do");
        assert_eq!(block.body.plain_text(), "ship");
    }

    #[test]
    fn test_unknown_block_type_is_unsupported() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b2",
            "type": "table_of_contents",
            "table_of_contents": {}
        }))
        .unwrap();
        assert_eq!(block.body, BlockBody::Unsupported);
        assert_eq!(block.body.plain_text(), "");
    }

    #[test]
    fn test_child_block_wire_shape() {
        let request = AppendBlockChildrenRequest::new(&[BlockBody::Divider {
            divider: EmptyObject {},
        }]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"children": [{"object": "block", "type": "divider", "divider": {}}]})
        );
    }
}
