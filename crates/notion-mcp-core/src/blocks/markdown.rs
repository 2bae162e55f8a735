//! Markdown to block conversion
//!
//! A single left-to-right pass over lines. Only the line-level constructs
//! Notion has a block for are recognized; inline markup is left as text.
//!
//! Per line, in priority order:
//! 1. code fence toggle (```` ``` ````, optional language tag)
//! 2. headings `# `, `## `, `### `
//! 3. list items: bullet `- ` / `* `, numbered `1. `
//! 4. blockquote `> `
//! 5. horizontal rule `---` / `***`
//! 6. checkbox `[ ] ` / `[x] `
//! 7. blank line, which ends the current paragraph
//! 8. anything else, appended to the current paragraph
//!
//! Bullets win over checkboxes, so `- [ ] task` is a bullet reading
//! `[ ] task`. A to-do needs the bare `[ ] ` marker.
//!
//! A pending paragraph is flushed before any other block is emitted and at
//! end of input. A fence still open at end of input is emitted as code
//! rather than dropped.

use super::builder;
use crate::model::BlockBody;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERED_RE: Regex = Regex::new(r"^\d+\. ").unwrap();
}

const FENCE: &str = "```";

/// Convert markdown text into Notion blocks
pub fn markdown_to_blocks(markdown: &str) -> Vec<BlockBody> {
    if markdown.trim().is_empty() {
        return Vec::new();
    }

    let mut lexer = Lexer::default();
    for line in markdown.split('\n') {
        lexer.line(line.trim_end_matches('\r'));
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    blocks: Vec<BlockBody>,
    paragraph: Vec<String>,
    code: Option<CodeFence>,
}

struct CodeFence {
    language: String,
    lines: Vec<String>,
}

impl Lexer {
    fn line(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix(FENCE) {
            self.toggle_fence(rest);
            return;
        }

        if let Some(fence) = self.code.as_mut() {
            fence.lines.push(line.to_string());
            return;
        }

        if let Some(text) = line.strip_prefix("# ") {
            self.emit(builder::heading(1, text.trim()));
        } else if let Some(text) = line.strip_prefix("## ") {
            self.emit(builder::heading(2, text.trim()));
        } else if let Some(text) = line.strip_prefix("### ") {
            self.emit(builder::heading(3, text.trim()));
        } else if let Some(text) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            self.emit(builder::bulleted_list_item(text.trim()));
        } else if let Some(m) = NUMBERED_RE.find(line) {
            self.emit(builder::numbered_list_item(line[m.end()..].trim()));
        } else if let Some(text) = line.strip_prefix("> ") {
            self.emit(builder::quote(text.trim()));
        } else if matches!(line.trim(), "---" | "***") {
            self.emit(builder::divider());
        } else if let Some(text) = line.strip_prefix("[ ] ") {
            self.emit(builder::to_do(text.trim(), false));
        } else if let Some(text) = line
            .strip_prefix("[x] ")
            .or_else(|| line.strip_prefix("[X] "))
        {
            self.emit(builder::to_do(text.trim(), true));
        } else if line.trim().is_empty() {
            self.flush_paragraph();
        } else {
            self.paragraph.push(line.to_string());
        }
    }

    fn toggle_fence(&mut self, rest: &str) {
        match self.code.take() {
            Some(fence) => self.emit_code(fence),
            None => {
                self.flush_paragraph();
                let language = match rest.trim() {
                    "" => builder::DEFAULT_CODE_LANGUAGE,
                    tag => tag,
                };
                self.code = Some(CodeFence {
                    language: language.to_string(),
                    lines: Vec::new(),
                });
            }
        }
    }

    fn emit_code(&mut self, fence: CodeFence) {
        if !fence.lines.is_empty() {
            self.blocks
                .push(builder::code(&fence.lines.join("\n"), &fence.language));
        }
    }

    fn emit(&mut self, block: BlockBody) {
        self.flush_paragraph();
        self.blocks.push(block);
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join("\n");
            self.paragraph.clear();
            self.blocks.push(builder::paragraph(&text));
        }
    }

    fn finish(mut self) -> Vec<BlockBody> {
        self.flush_paragraph();
        if let Some(fence) = self.code.take() {
            self.emit_code(fence);
        }
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[BlockBody]) -> Vec<&'static str> {
        blocks.iter().map(|b| b.kind()).collect()
    }

    #[test]
    fn test_heading_then_paragraph() {
        let blocks = markdown_to_blocks("# Title\n\nBody line");
        assert_eq!(kinds(&blocks), vec!["heading_1", "paragraph"]);
        assert_eq!(blocks[0].plain_text(), "Title");
        assert_eq!(blocks[1].plain_text(), "Body line");
    }

    #[test]
    fn test_bullets_in_order() {
        let blocks = markdown_to_blocks("- a\n- b");
        assert_eq!(kinds(&blocks), vec!["bulleted_list_item", "bulleted_list_item"]);
        assert_eq!(blocks[0].plain_text(), "a");
        assert_eq!(blocks[1].plain_text(), "b");
    }

    #[test]
    fn test_blank_lines_only() {
        assert!(markdown_to_blocks("\n\n\n").is_empty());
        assert!(markdown_to_blocks("").is_empty());
        assert!(markdown_to_blocks("   \r\n\t").is_empty());
    }

    #[test]
    fn test_paragraph_lines_join_until_blank() {
        let blocks = markdown_to_blocks("first\nsecond\n\nthird");
        assert_eq!(kinds(&blocks), vec!["paragraph", "paragraph"]);
        assert_eq!(blocks[0].plain_text(), "first\nsecond");
        assert_eq!(blocks[1].plain_text(), "third");
    }

    #[test]
    fn test_paragraph_flushed_before_heading() {
        let blocks = markdown_to_blocks("intro\n## Section\n### Sub");
        assert_eq!(kinds(&blocks), vec!["paragraph", "heading_2", "heading_3"]);
        assert_eq!(blocks[2].plain_text(), "Sub");
    }

    #[test]
    fn test_numbered_items_drop_number() {
        let blocks = markdown_to_blocks("1. one\n10. ten\n2.no space");
        assert_eq!(
            kinds(&blocks),
            vec!["numbered_list_item", "numbered_list_item", "paragraph"]
        );
        assert_eq!(blocks[0].plain_text(), "one");
        assert_eq!(blocks[1].plain_text(), "ten");
        assert_eq!(blocks[2].plain_text(), "2.no space");
    }

    #[test]
    fn test_code_fence_with_language() {
        let blocks = markdown_to_blocks("text\n```rust\nfn main() {}\n\n# not a heading\n```\nafter");
        assert_eq!(kinds(&blocks), vec!["paragraph", "code", "paragraph"]);
        match &blocks[1] {
            BlockBody::Code { code } => {
                assert_eq!(code.language, "rust");
                assert_eq!(blocks[1].plain_text(), "fn main() {}\n\n# not a heading");
            }
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_fence_emits_nothing() {
        assert!(markdown_to_blocks("```\n```").is_empty());
    }

    #[test]
    fn test_fence_without_tag_uses_default_language() {
        let blocks = markdown_to_blocks("```\nlet x = 1;\n```");
        match &blocks[0] {
            BlockBody::Code { code } => assert_eq!(code.language, "plain text"),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fence_is_emitted_as_code() {
        let blocks = markdown_to_blocks("intro\n```python\nx = 1\ny = 2");
        assert_eq!(kinds(&blocks), vec!["paragraph", "code"]);
        assert_eq!(blocks[1].plain_text(), "x = 1\ny = 2");
        match &blocks[1] {
            BlockBody::Code { code } => assert_eq!(code.language, "python"),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_dash_checkbox_is_a_bullet() {
        let blocks = markdown_to_blocks("- [ ] task\n* [x] done");
        assert_eq!(kinds(&blocks), vec!["bulleted_list_item", "bulleted_list_item"]);
        assert_eq!(blocks[0].plain_text(), "[ ] task");
        assert_eq!(blocks[1].plain_text(), "[x] done");
    }

    #[test]
    fn test_quote_rule_and_todos() {
        let blocks = markdown_to_blocks("> wise words\n---\n***\n[ ] open\n[x] done");
        assert_eq!(
            kinds(&blocks),
            vec!["quote", "divider", "divider", "to_do", "to_do"]
        );
        match (&blocks[3], &blocks[4]) {
            (BlockBody::ToDo { to_do: open }, BlockBody::ToDo { to_do: done }) => {
                assert!(!open.checked);
                assert!(done.checked);
            }
            _ => panic!("expected to-do blocks"),
        }
        assert_eq!(blocks[4].plain_text(), "done");
    }

    #[test]
    fn test_star_bullet_and_crlf() {
        let blocks = markdown_to_blocks("* item\r\nplain\r\n");
        assert_eq!(kinds(&blocks), vec!["bulleted_list_item", "paragraph"]);
        assert_eq!(blocks[1].plain_text(), "plain");
    }

    #[test]
    fn test_deeper_heading_is_paragraph_text() {
        let blocks = markdown_to_blocks("#### deep");
        assert_eq!(kinds(&blocks), vec!["paragraph"]);
        assert_eq!(blocks[0].plain_text(), "#### deep");
    }
}
