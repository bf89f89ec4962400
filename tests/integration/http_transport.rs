//! Streamable HTTP transport, driven in-process through `tower`.

use crate::common::fixtures::small_org;
use crate::common::{FakeOktaApi, fake_server};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use okta_mcp_server::error::TransportError;
use okta_mcp_server::transport::http::{
    MCP_PATH, SESSION_HEADER, SessionStore, router, router_with_sessions, serve_http,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(fake_server(small_org())))
}

fn post(body: Value, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(MCP_PATH)
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream");
    if let Some(id) = session {
        builder = builder.header(SESSION_HEADER, id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn initialize(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post(
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2025-03-26"}}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get(SESSION_HEADER)
        .expect("initialize opens a session")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_initialize_opens_session_and_calls_reuse_it() {
    let app = app();
    let session = initialize(&app).await;
    assert_eq!(session.len(), 36);

    let response = app
        .clone()
        .oneshot(post(
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "list_okta_groups", "arguments": {}}}),
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["result"]["isError"], false);
}

#[tokio::test]
async fn test_notification_only_post_is_accepted() {
    let app = app();
    let session = initialize(&app).await;

    let response = app
        .oneshot(post(
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let response = app()
        .oneshot(post(
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
            Some("00000000-0000-4000-8000-000000000000"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_ends_session() {
    let app = app();
    let session = initialize(&app).await;

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(MCP_PATH)
        .header(SESSION_HEADER, session.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after = app
        .oneshot(post(
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_and_malformed_body() {
    let app = app();

    let get = Request::builder()
        .method(Method::GET)
        .uri(MCP_PATH)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(get).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let malformed = Request::builder()
        .method(Method::POST)
        .uri(MCP_PATH)
        .header("content-type", "application/json")
        .body(Body::from("{oops"))
        .unwrap();
    let response = app.oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], -32700);
}

#[tokio::test]
async fn test_bind_failure_is_unreachable() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let err = serve_http(Arc::new(fake_server(FakeOktaApi::default())), "127.0.0.1", port)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Unreachable { .. }));
}

#[tokio::test]
async fn test_oldest_session_is_evicted_at_capacity() {
    let app = router_with_sessions(
        Arc::new(fake_server(small_org())),
        SessionStore::new(Duration::from_secs(3600), 1),
    );
    let first = initialize(&app).await;
    let second = initialize(&app).await;
    assert_ne!(first, second);

    let ping = |id: &str, n: i64| post(json!({"jsonrpc": "2.0", "id": n, "method": "ping"}), Some(id));
    let evicted = app.clone().oneshot(ping(&first, 2)).await.unwrap();
    assert_eq!(evicted.status(), StatusCode::NOT_FOUND);
    let live = app.oneshot(ping(&second, 3)).await.unwrap();
    assert_eq!(live.status(), StatusCode::OK);
}
