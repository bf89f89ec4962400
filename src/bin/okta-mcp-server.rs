//! # Okta MCP Server
//!
//! Serves the Okta tools over stdio (default), streamable HTTP (`--http`) or
//! the deprecated SSE transport (`--sse`, served as HTTP).
//!
//! Okta settings come from the environment, optionally seeded from a `.env`
//! file in the working directory. They are read on the first tool call, so
//! the server starts and lists its tools even without credentials.
//!
//! ```bash
//! OKTA_CLIENT_ORGURL=https://acme.okta.com OKTA_API_TOKEN=... okta-mcp-server --http --port 3000
//! ```

use clap::Parser;
use log::{error, info};
use okta_mcp_server::mcp_integration::OktaMcpServer;
use okta_mcp_server::transport::{self, DEFAULT_HOST, DEFAULT_PORT, McpRuntime, RunMode};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "okta-mcp-server")]
#[command(about = "Model Context Protocol server for Okta Identity Cloud")]
#[command(version)]
struct Cli {
    /// Serve MCP streamable HTTP instead of stdio
    #[arg(long, conflicts_with = "sse")]
    http: bool,

    /// Serve the deprecated SSE transport (falls back to streamable HTTP)
    #[arg(long)]
    sse: bool,

    /// Address to bind for HTTP transports
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind for HTTP transports
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // stderr only: stdout belongs to the stdio transport
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = &cli.log_level {
        logger.parse_filters(level);
    }
    logger
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .init();

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let mode = RunMode::from_flags(cli.http, cli.sse, cli.host, cli.port);
    let runtime = McpRuntime::new(OktaMcpServer::new());

    match transport::run(&runtime, mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
