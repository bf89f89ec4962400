//! Newline-delimited JSON-RPC over standard input and output.
//!
//! stdout carries protocol messages only; all logging goes to stderr.

use crate::client::{ClientFactory, OktaApi};
use crate::error::TransportResult;
use crate::mcp_integration::OktaMcpServer;
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve the process's stdin/stdout until stdin closes.
pub async fn serve_stdio<F>(server: &OktaMcpServer<F>) -> TransportResult<()>
where
    F: ClientFactory,
    F::Client: OktaApi,
{
    info!("MCP server listening on stdio");
    serve_lines(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Read one JSON-RPC payload per line from `reader` and write each response
/// as one line to `writer`. Blank lines are skipped.
pub async fn serve_lines<F, R, W>(
    server: &OktaMcpServer<F>,
    reader: R,
    mut writer: W,
) -> TransportResult<()>
where
    F: ClientFactory,
    F::Client: OktaApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("stdio <- {} bytes", line.len());

        if let Some(response) = server.handle_text(line).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
