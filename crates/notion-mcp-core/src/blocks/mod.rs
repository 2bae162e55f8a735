//! Block construction
//!
//! Builders for every block kind the server emits, and a line-oriented
//! markdown lexer on top of them.

pub mod builder;
pub mod markdown;

pub use builder::{block_for_kind, BlockKind};
pub use markdown::markdown_to_blocks;
