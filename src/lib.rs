//! Model Context Protocol server for Okta Identity Cloud.
//!
//! Exposes read-only Okta management operations (users, groups, applications,
//! System Log, policies, network zones) as MCP tools for AI agents.
//!
//! # Core Components
//!
//! - [`OktaConfig`] - Settings parsed from the environment
//! - [`LazyClient`] - Okta client built on first use and shared afterwards
//! - [`OktaMcpServer`] - Tool discovery, dispatch and JSON-RPC handling
//! - [`transport::run`] - Serves the server over stdio or streamable HTTP
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use okta_mcp_server::mcp_integration::OktaMcpServer;
//! use okta_mcp_server::transport::{self, McpRuntime, RunMode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // No credentials are read until the first tool call
//! let runtime = McpRuntime::new(OktaMcpServer::new());
//! transport::run(&runtime, RunMode::Stdio).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mcp_integration;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::{ClientFactory, LazyClient, OktaApi, OktaClient, OktaClientFactory};
pub use config::{ApiToken, OktaConfig};
pub use error::{ConfigurationError, ErrorKind, OktaMcpError, OktaResult, TransportError};
pub use mcp_integration::{McpServerInfo, OktaMcpServer, OktaToolResult};
pub use transport::RunMode;
