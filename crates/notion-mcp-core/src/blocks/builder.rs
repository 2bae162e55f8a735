//! Block builders

use crate::model::{
    BlockBody, CalloutBlock, CodeBlock, EmptyObject, Icon, RichText, RichTextBlock, ToDoBlock,
};

/// Language tag for code blocks appended without one
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Icon used for callouts
pub const CALLOUT_EMOJI: &str = "💡";

/// Block kinds accepted by the append-block tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Code,
    Quote,
    Callout,
}

impl BlockKind {
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::BulletedListItem,
        BlockKind::NumberedListItem,
        BlockKind::ToDo,
        BlockKind::Code,
        BlockKind::Quote,
        BlockKind::Callout,
    ];

    /// Parse a block type name; unrecognized names are paragraphs
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or(BlockKind::Paragraph)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading_1",
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::BulletedListItem => "bulleted_list_item",
            BlockKind::NumberedListItem => "numbered_list_item",
            BlockKind::ToDo => "to_do",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::Callout => "callout",
        }
    }

    /// Heading kind for a level; anything outside 1..=3 is a level-1 heading
    pub fn heading(level: u8) -> Self {
        match level {
            2 => BlockKind::Heading2,
            3 => BlockKind::Heading3,
            _ => BlockKind::Heading1,
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build exactly one block of the given kind holding `content`
pub fn block_for_kind(kind: BlockKind, content: &str) -> BlockBody {
    match kind {
        BlockKind::Paragraph => paragraph(content),
        BlockKind::Heading1 => heading(1, content),
        BlockKind::Heading2 => heading(2, content),
        BlockKind::Heading3 => heading(3, content),
        BlockKind::BulletedListItem => bulleted_list_item(content),
        BlockKind::NumberedListItem => numbered_list_item(content),
        BlockKind::ToDo => to_do(content, false),
        BlockKind::Code => code(content, DEFAULT_CODE_LANGUAGE),
        BlockKind::Quote => quote(content),
        BlockKind::Callout => callout(content, CALLOUT_EMOJI),
    }
}

fn runs(text: &str) -> RichTextBlock {
    RichTextBlock {
        rich_text: vec![RichText::plain(text)],
    }
}

pub fn paragraph(text: &str) -> BlockBody {
    BlockBody::Paragraph {
        paragraph: runs(text),
    }
}

pub fn heading(level: u8, text: &str) -> BlockBody {
    match BlockKind::heading(level) {
        BlockKind::Heading2 => BlockBody::Heading2 {
            heading_2: runs(text),
        },
        BlockKind::Heading3 => BlockBody::Heading3 {
            heading_3: runs(text),
        },
        _ => BlockBody::Heading1 {
            heading_1: runs(text),
        },
    }
}

pub fn bulleted_list_item(text: &str) -> BlockBody {
    BlockBody::BulletedListItem {
        bulleted_list_item: runs(text),
    }
}

pub fn numbered_list_item(text: &str) -> BlockBody {
    BlockBody::NumberedListItem {
        numbered_list_item: runs(text),
    }
}

pub fn quote(text: &str) -> BlockBody {
    BlockBody::Quote { quote: runs(text) }
}

pub fn code(text: &str, language: &str) -> BlockBody {
    BlockBody::Code {
        code: CodeBlock {
            rich_text: vec![RichText::plain(text)],
            language: language.to_string(),
        },
    }
}

pub fn to_do(text: &str, checked: bool) -> BlockBody {
    BlockBody::ToDo {
        to_do: ToDoBlock {
            rich_text: vec![RichText::plain(text)],
            checked,
        },
    }
}

pub fn callout(text: &str, emoji: &str) -> BlockBody {
    BlockBody::Callout {
        callout: CalloutBlock {
            rich_text: vec![RichText::plain(text)],
            icon: Some(Icon::emoji(emoji)),
        },
    }
}

pub fn divider() -> BlockBody {
    BlockBody::Divider {
        divider: EmptyObject {},
    }
}
