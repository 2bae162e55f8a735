//! Notion MCP Server
//!
//! Model Context Protocol server exposing Notion search and page editing as
//! tools, plus a workspace summary resource. Requests arrive as JSON-RPC
//! envelopes over stdio or HTTP.

pub mod args;
pub mod convert;
pub mod http;
pub mod params;
pub mod protocol;
pub mod resources;
pub mod sdk;
pub mod server;
pub mod tools;

pub use protocol::{ErrorCode, JsonRpcRequest, JsonRpcResponse};
pub use sdk::{NotionMcp, SdkError};
pub use server::{start_server, McpServer};
