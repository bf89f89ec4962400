//! Integration tests for the Okta MCP server.

pub mod configuration;
pub mod http_transport;
pub mod lazy_client;
pub mod mcp_protocol;
pub mod okta_client;
