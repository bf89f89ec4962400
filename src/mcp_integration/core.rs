//! Core MCP integration infrastructure
//!
//! This module contains the foundational types for the MCP server: the server
//! metadata advertised during `initialize`, the tool execution result, and the
//! server itself, which owns the lazily constructed Okta client.

use crate::client::{ClientFactory, EnvConfigSource, LazyClient, OktaApi, OktaClientFactory};
use crate::error::OktaMcpError;
use serde_json::{Value, json};

/// Information about the MCP server for AI agent discovery
///
/// # Examples
///
/// ```rust
/// use okta_mcp_server::mcp_integration::McpServerInfo;
///
/// let info = McpServerInfo::default();
/// assert_eq!(info.name, "Okta MCP Server");
/// ```
#[derive(Debug, Clone)]
pub struct McpServerInfo {
    /// Human-readable name of the server
    pub name: String,
    /// Version string for the server implementation
    pub version: String,
    /// Usage hints returned to the client in the `initialize` result
    pub instructions: String,
}

impl Default for McpServerInfo {
    fn default() -> Self {
        Self {
            name: "Okta MCP Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: "This server provides Okta Identity Cloud management capabilities. \
                Use list_okta_users to search and filter users with SCIM expressions and \
                get_okta_user to retrieve detailed user information. Use parse_relative_time \
                to turn expressions such as '2 days ago' into timestamps for get_okta_event_logs. \
                All Okta operations require OKTA_CLIENT_ORGURL and OKTA_API_TOKEN to be set."
                .to_string(),
        }
    }
}

/// Tool execution result for MCP clients
///
/// Represents the outcome of an AI agent's tool execution request.
#[derive(Debug, Clone)]
pub struct OktaToolResult {
    /// Whether the tool execution was successful
    pub success: bool,
    /// The main result content (Okta data or error information)
    pub content: Value,
    /// Optional metadata providing additional context about the operation
    pub metadata: Option<Value>,
}

impl OktaToolResult {
    /// Successful result tagged with the operation that produced it.
    pub fn success(content: Value, operation: &str) -> Self {
        Self {
            success: true,
            content,
            metadata: Some(json!({ "operation": operation })),
        }
    }

    /// Failed result carrying the full error message and its [`ErrorKind`] code.
    ///
    /// [`ErrorKind`]: crate::error::ErrorKind
    pub fn error(error: &OktaMcpError, operation: &str) -> Self {
        let mut content = json!({
            "error": error.to_string(),
            "error_code": error.kind().code(),
        });
        if let OktaMcpError::Api {
            status, error_code, ..
        } = error
        {
            content["status"] = json!(status);
            if let Some(code) = error_code {
                content["okta_error_code"] = json!(code);
            }
        }
        Self {
            success: false,
            content,
            metadata: Some(json!({ "operation": operation })),
        }
    }

    /// Failed result with a custom message.
    pub fn failure(message: impl Into<String>, error_code: &str) -> Self {
        Self {
            success: false,
            content: json!({
                "error": message.into(),
                "error_code": error_code,
            }),
            metadata: None,
        }
    }

    /// Render as an MCP `CallToolResult`.
    pub fn into_call_result(self) -> Value {
        let text = serde_json::to_string_pretty(&self.content)
            .unwrap_or_else(|_| self.content.to_string());
        let mut result = json!({
            "content": [{ "type": "text", "text": text }],
            "isError": !self.success,
        });
        if let Some(metadata) = self.metadata {
            result["_meta"] = metadata;
        }
        result
    }
}

/// MCP server exposing Okta operations as tools
///
/// Creating the server never reads configuration; the Okta client is built
/// on the first tool call that needs it.
///
/// # Examples
///
/// ```rust,no_run
/// use okta_mcp_server::mcp_integration::OktaMcpServer;
///
/// # async fn example() {
/// let server = OktaMcpServer::new();
/// println!("Available tools: {}", server.get_tools().len());
/// # }
/// ```
pub struct OktaMcpServer<F: ClientFactory = OktaClientFactory> {
    pub(crate) client: LazyClient<F>,
    pub(crate) server_info: McpServerInfo,
}

impl OktaMcpServer<OktaClientFactory> {
    /// Server backed by the HTTP client, configured from the environment on first use.
    pub fn new() -> Self {
        Self::with_client(LazyClient::new(EnvConfigSource, OktaClientFactory))
    }
}

impl Default for OktaMcpServer<OktaClientFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> OktaMcpServer<F>
where
    F: ClientFactory,
    F::Client: OktaApi,
{
    /// Server using a caller-supplied lazy client.
    pub fn with_client(client: LazyClient<F>) -> Self {
        Self {
            client,
            server_info: McpServerInfo::default(),
        }
    }

    /// Replace the advertised server metadata.
    pub fn with_info(mut self, server_info: McpServerInfo) -> Self {
        self.server_info = server_info;
        self
    }

    pub fn server_info(&self) -> &McpServerInfo {
        &self.server_info
    }

    /// The lazy client shared by all tool handlers.
    pub fn client(&self) -> &LazyClient<F> {
        &self.client
    }
}
