//! MCP streamable HTTP transport.
//!
//! A single endpoint, `/mcp`:
//!
//! * `POST` carries one JSON-RPC message or batch. The reply is JSON, or
//!   `202 Accepted` with no body when the post held only notifications.
//! * `DELETE` ends the session named by the `Mcp-Session-Id` header.
//! * `GET` answers `405`; the server never opens a stream of its own.
//!
//! An `initialize` request without a session header opens a session and the
//! response carries its id. Requests naming an unknown session get `404`.
//! Sessions idle for longer than [`SESSION_IDLE_TIMEOUT`] are dropped, and at
//! most [`MAX_SESSIONS`] are kept, the least recently used going first.

use crate::client::{ClientFactory, OktaApi};
use crate::error::{TransportError, TransportResult};
use crate::mcp_integration::OktaMcpServer;
use crate::mcp_integration::jsonrpc::{self, INVALID_REQUEST, PARSE_ERROR};
use axum::extract::State;
use axum::http::header::ALLOW;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::{debug, error, info};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const MCP_PATH: &str = "/mcp";

pub const SESSION_HEADER: HeaderName = HeaderName::from_static("mcp-session-id");

pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub const MAX_SESSIONS: usize = 1024;

/// Open sessions keyed by id, with the time each was last used.
#[derive(Debug)]
pub struct SessionStore {
    last_seen: HashMap<String, Instant>,
    idle_timeout: Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSION_IDLE_TIMEOUT, MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, capacity: usize) -> Self {
        Self {
            last_seen: HashMap::new(),
            idle_timeout,
            capacity: capacity.max(1),
        }
    }

    /// Open a new session, evicting expired ones and then, if still full,
    /// the least recently used.
    pub fn open(&mut self, now: Instant) -> String {
        self.expire(now);
        while self.last_seen.len() >= self.capacity {
            let oldest = self
                .last_seen
                .iter()
                .min_by_key(|(_, seen)| **seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    debug!("Evicting MCP session {}", id);
                    self.last_seen.remove(&id);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4().to_string();
        self.last_seen.insert(id.clone(), now);
        id
    }

    /// Mark a session as used. False when it is unknown or has expired.
    pub fn touch(&mut self, id: &str, now: Instant) -> bool {
        self.expire(now);
        match self.last_seen.get_mut(id) {
            Some(seen) => {
                *seen = now;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self, id: &str) -> bool {
        self.last_seen.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    fn expire(&mut self, now: Instant) {
        let timeout = self.idle_timeout;
        self.last_seen
            .retain(|_, seen| now.saturating_duration_since(*seen) < timeout);
    }
}

/// Shared state behind the router.
pub struct HttpState<F: ClientFactory> {
    server: Arc<OktaMcpServer<F>>,
    sessions: Arc<Mutex<SessionStore>>,
}

impl<F: ClientFactory> Clone for HttpState<F> {
    fn clone(&self) -> Self {
        Self {
            server: Arc::clone(&self.server),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

/// Build the `/mcp` router around a shared server.
pub fn router<F>(server: Arc<OktaMcpServer<F>>) -> Router
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    router_with_sessions(server, SessionStore::default())
}

/// Build the router over an explicitly configured session store.
pub fn router_with_sessions<F>(server: Arc<OktaMcpServer<F>>, sessions: SessionStore) -> Router
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    let state = HttpState {
        server,
        sessions: Arc::new(Mutex::new(sessions)),
    };

    Router::new()
        .route(
            MCP_PATH,
            post(handle_post::<F>)
                .delete(handle_delete::<F>)
                .get(method_not_allowed),
        )
        .with_state(state)
}

/// Bind `host:port` and serve until ctrl-c.
///
/// # Errors
///
/// [`TransportError::Unreachable`] when the address cannot be bound.
pub async fn serve_http<F>(
    server: Arc<OktaMcpServer<F>>,
    host: &str,
    port: u16,
) -> TransportResult<()>
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    let address = format!("{host}:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| TransportError::Unreachable {
            address: address.clone(),
            source,
        })?;

    info!("MCP streamable HTTP listening on http://{}{}", address, MCP_PATH);
    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. If the signal handler could not be
/// installed this never resolves, so the server keeps running.
async fn shutdown_on<S>(signal: S)
where
    S: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn handle_post<F>(
    State(state): State<HttpState<F>>,
    headers: HeaderMap,
    body: String,
) -> Response
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            let error =
                jsonrpc::error_response(Value::Null, PARSE_ERROR, format!("Parse error: {e}"));
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let mut new_session = None;
    match session_id(&headers) {
        Some(id) => {
            if !state.sessions.lock().await.touch(id, Instant::now()) {
                debug!("Rejecting request for unknown session {}", id);
                return unknown_session();
            }
        }
        None if is_initialize(&message) => {
            let id = state.sessions.lock().await.open(Instant::now());
            info!("Opened MCP session {}", id);
            new_session = Some(id);
        }
        None => {}
    }

    let mut response = match state.server.handle_message(message).await {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    };
    if let Some(id) = new_session {
        if let Ok(value) = HeaderValue::from_str(&id) {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
    }
    response
}

async fn handle_delete<F>(State(state): State<HttpState<F>>, headers: HeaderMap) -> Response
where
    F: ClientFactory + 'static,
    F::Client: OktaApi,
{
    let Some(id) = session_id(&headers) else {
        let error = jsonrpc::error_response(
            Value::Null,
            INVALID_REQUEST,
            "Bad Request: Mcp-Session-Id header is required",
        );
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    };

    if state.sessions.lock().await.close(id) {
        info!("Closed MCP session {}", id);
        StatusCode::OK.into_response()
    } else {
        unknown_session()
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, "POST, DELETE")],
    )
        .into_response()
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(&SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn is_initialize(message: &Value) -> bool {
    let is_init = |m: &Value| m.get("method").and_then(Value::as_str) == Some("initialize");
    match message {
        Value::Array(batch) => batch.iter().any(is_init),
        single => is_init(single),
    }
}

fn unknown_session() -> Response {
    let error = jsonrpc::error_response(Value::Null, INVALID_REQUEST, "Session not found");
    (StatusCode::NOT_FOUND, Json(error)).into_response()
}
