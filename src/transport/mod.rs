//! Run-mode selection and transport dispatch.
//!
//! The server speaks MCP over one of three transports, picked by the caller:
//!
//! * [`RunMode::Stdio`] (default): newline-delimited JSON-RPC on stdin/stdout
//! * [`RunMode::Http`]: MCP streamable HTTP on `http://host:port/mcp`
//! * [`RunMode::Sse`]: deprecated; served as HTTP when the runtime reports it
//!   unsupported
//!
//! [`run`] holds no state of its own. The [`TransportRuntime`] it drives owns
//! listeners and request concurrency.

pub mod http;
pub mod stdio;

use crate::client::{ClientFactory, OktaApi};
use crate::error::{TransportError, TransportResult};
use crate::mcp_integration::OktaMcpServer;
use async_trait::async_trait;
use log::{info, warn};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// How the server is exposed to MCP clients.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Stdio,
    Http {
        host: String,
        port: u16,
    },
    /// Deprecated event-stream transport.
    Sse {
        host: String,
        port: u16,
    },
}

impl RunMode {
    /// Mode for the `--http` / `--sse` command-line flags. `sse` wins when
    /// both are set.
    pub fn from_flags(http: bool, sse: bool, host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        if sse {
            RunMode::Sse { host, port }
        } else if http {
            RunMode::Http { host, port }
        } else {
            RunMode::Stdio
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Stdio => write!(f, "stdio"),
            RunMode::Http { host, port } => write!(f, "streamable HTTP on {host}:{port}"),
            RunMode::Sse { host, port } => write!(f, "SSE on {host}:{port}"),
        }
    }
}

/// Something that can serve the MCP server over each transport.
#[async_trait]
pub trait TransportRuntime: Send + Sync {
    async fn serve_stdio(&self) -> TransportResult<()>;

    async fn serve_http(&self, host: &str, port: u16) -> TransportResult<()>;

    /// Serve the deprecated SSE transport, or fail with
    /// [`TransportError::Unsupported`].
    async fn serve_sse(&self, host: &str, port: u16) -> TransportResult<()>;
}

/// Serve `mode` on `runtime` until the transport shuts down.
///
/// # Errors
///
/// Errors from the runtime are returned unchanged, except that an
/// [`TransportError::Unsupported`] from the SSE transport is answered by
/// serving HTTP on the same host and port.
pub async fn run(runtime: &dyn TransportRuntime, mode: RunMode) -> TransportResult<()> {
    info!("Starting Okta MCP server ({})", mode);
    match mode {
        RunMode::Stdio => runtime.serve_stdio().await,
        RunMode::Http { host, port } => runtime.serve_http(&host, port).await,
        RunMode::Sse { host, port } => {
            warn!("The SSE transport is deprecated; use streamable HTTP (--http) instead");
            match runtime.serve_sse(&host, port).await {
                Err(TransportError::Unsupported { mode, reason }) => {
                    warn!(
                        "{} transport unsupported ({}); falling back to streamable HTTP on {}:{}",
                        mode, reason, host, port
                    );
                    runtime.serve_http(&host, port).await
                }
                other => other,
            }
        }
    }
}

/// The bundled runtime: stdio and streamable HTTP over one shared server.
pub struct McpRuntime<F: ClientFactory> {
    server: Arc<OktaMcpServer<F>>,
}

impl<F: ClientFactory> McpRuntime<F> {
    pub fn new(server: OktaMcpServer<F>) -> Self {
        Self {
            server: Arc::new(server),
        }
    }

    pub fn server(&self) -> &Arc<OktaMcpServer<F>> {
        &self.server
    }
}

#[async_trait]
impl<F> TransportRuntime for McpRuntime<F>
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    async fn serve_stdio(&self) -> TransportResult<()> {
        stdio::serve_stdio(&self.server).await
    }

    async fn serve_http(&self, host: &str, port: u16) -> TransportResult<()> {
        http::serve_http(Arc::clone(&self.server), host, port).await
    }

    async fn serve_sse(&self, _host: &str, _port: u16) -> TransportResult<()> {
        Err(TransportError::unsupported(
            "sse",
            "server-sent events are not provided by this runtime",
        ))
    }
}
