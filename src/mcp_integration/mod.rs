//! MCP (Model Context Protocol) integration for Okta
//!
//! Exposes read-only Okta operations as tools that AI agents can discover
//! and call.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   AI Agent      │───▶│  MCP Protocol    │───▶│  Okta API       │
//! │   (Client)      │    │  (This Module)   │    │  (LazyClient)   │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!          │                        │                       │
//!          ▼                        ▼                       ▼
//!    Tool Discovery          Tool Execution        Rate limiting
//!    JSON-RPC framing        Argument checks       Pagination
//! ```
//!
//! ## Module Structure
//!
//! - `core` - Server type, server metadata and tool results
//! - `jsonrpc` - JSON-RPC 2.0 envelopes and error codes
//! - `protocol` - MCP methods, tool discovery and dispatch
//! - `tools/` - JSON schema definitions for tool discovery
//! - `handlers/` - Tool execution, one module per Okta resource
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use okta_mcp_server::mcp_integration::OktaMcpServer;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = OktaMcpServer::new();
//!
//!     let result = server
//!         .execute_tool("list_okta_users", json!({"query": "ada", "limit": 5}))
//!         .await;
//!
//!     if result.success {
//!         println!("{}", result.content);
//!     }
//! }
//! ```

pub mod core;
pub mod handlers;
pub mod jsonrpc;
pub mod protocol;
pub mod tools;


pub use core::{McpServerInfo, OktaMcpServer, OktaToolResult};
