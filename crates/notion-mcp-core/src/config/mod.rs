//! Configuration management

use crate::error::{NotionError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SERVER_NAME: &str = "notion-mcp-server";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Server and Notion client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Notion integration token
    #[serde(default)]
    pub token: String,

    /// Name reported during `initialize`
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Version reported during `initialize`
    #[serde(default = "default_server_version")]
    pub server_version: String,

    /// Page size used by search when the caller gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Accepted but not acted on; reserved for a retrying provider
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Base URL of the Notion REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            server_name: default_server_name(),
            server_version: default_server_version(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_base_url: default_api_base_url(),
            notion_version: default_notion_version(),
        }
    }
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

impl Config {
    /// Create a config with defaults and the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a YAML file, falling back to defaults when absent
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to a YAML file
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Overlay environment variables onto this config
    pub fn from_env(self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; numbers that do not parse or fall out of
    /// range leave the field unchanged
    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup("NOTION_TOKEN") {
            self.token = token;
        }
        if let Some(size) = parse_number::<u32>(lookup("NOTION_MCP_PAGE_SIZE")) {
            self.set_default_page_size(size);
        }
        if let Some(secs) = parse_number::<u64>(lookup("NOTION_MCP_TIMEOUT")) {
            self.set_timeout_secs(secs);
        }
        if let Some(url) = lookup("NOTION_API_BASE_URL") {
            self.api_base_url = url;
        }
        self
    }

    /// Check the token and reset non-positive numeric fields to defaults
    pub fn validate(&mut self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(NotionError::Config(
                "Notion token is required (set NOTION_TOKEN or `token` in config.yml)".to_string(),
            ));
        }
        if self.default_page_size == 0 {
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if self.max_retries == 0 {
            self.max_retries = DEFAULT_MAX_RETRIES;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        Ok(())
    }

    /// Set the default page size; values outside 1..=100 are ignored
    pub fn set_default_page_size(&mut self, size: u32) {
        if (1..=MAX_PAGE_SIZE).contains(&size) {
            self.default_page_size = size;
        }
    }

    /// Set the request timeout; zero is ignored
    pub fn set_timeout_secs(&mut self, secs: u64) {
        if secs > 0 {
            self.timeout_secs = secs;
        }
    }

    /// Set the retry budget; zero is ignored
    pub fn set_max_retries(&mut self, retries: u32) {
        if retries > 0 {
            self.max_retries = retries;
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.trim().parse().ok())
}
