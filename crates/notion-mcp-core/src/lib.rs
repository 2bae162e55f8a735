//! Notion MCP Core Library
//!
//! Core functionality shared by the notion-mcp server and CLI.
//!
//! # Features
//! - Serde model of Notion pages, databases, blocks and search
//! - `ContentProvider` trait with a reqwest-backed Notion client
//! - Block builders and a line-oriented markdown-to-block converter
//! - YAML/env configuration with validated setters

pub mod blocks;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use blocks::{block_for_kind, markdown_to_blocks, BlockKind};
pub use config::Config;
pub use error::{Error, FailureKind, NotionError, Result};
pub use provider::{ContentProvider, NotionClient};

/// URI scheme for resources served by this crate family
pub const RESOURCE_SCHEME: &str = "notion://";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "notion-mcp";
