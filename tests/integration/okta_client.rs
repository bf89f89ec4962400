//! `OktaClient` over HTTP against an in-process mock of the Okta API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::future::join_all;
use okta_mcp_server::client::{OktaApi, OktaClient};
use okta_mcp_server::config::OktaConfig;
use okta_mcp_server::error::{ErrorKind, OktaMcpError};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

const TOKEN: &str = "secret-token";

/// Mock org state. `requests` counts every request the mock receives.
#[derive(Default)]
struct MockOrg {
    base: String,
    foreign: Option<String>,
    requests: AtomicUsize,
    recovering_hits: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    authorization: Mutex<Option<String>>,
}

impl MockOrg {
    fn record(&self, headers: &HeaderMap) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.authorization.lock().unwrap() = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

type Org = State<Arc<MockOrg>>;

async fn user(State(org): Org, headers: HeaderMap, Path(id): Path<String>) -> Response {
    org.record(&headers);
    if id == "missing" {
        let body = json!({
            "errorCode": "E0000007",
            "errorSummary": "Not found: Resource not found: missing (User)",
            "errorCauses": []
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(json!({"id": id, "status": "ACTIVE"})).into_response()
}

fn rate_limited() -> Response {
    let body = json!({
        "errorCode": "E0000047",
        "errorSummary": "API call exceeded rate limit due to too many requests."
    });
    (
        StatusCode::TOO_MANY_REQUESTS,
        [("x-rate-limit-reset", "0")],
        Json(body),
    )
        .into_response()
}

async fn throttled(State(org): Org, headers: HeaderMap) -> Response {
    org.record(&headers);
    rate_limited()
}

async fn recovering(State(org): Org, headers: HeaderMap) -> Response {
    org.record(&headers);
    if org.recovering_hits.fetch_add(1, Ordering::SeqCst) == 0 {
        return rate_limited();
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn groups(
    State(org): Org,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    org.record(&headers);
    match query.get("after").map(String::as_str) {
        None => {
            let link = format!(
                "<{base}/api/v1/groups>; rel=\"self\", <{base}/api/v1/groups?after=g1>; rel=\"next\"",
                base = org.base
            );
            ([(header::LINK, link)], Json(json!([{"id": "g1"}]))).into_response()
        }
        Some("g1") => Json(json!([{"id": "g2"}])).into_response(),
        Some(_) => Json(json!([])).into_response(),
    }
}

async fn apps(State(org): Org, headers: HeaderMap) -> Response {
    org.record(&headers);
    let Some(foreign) = &org.foreign else {
        return Json(json!([])).into_response();
    };
    let next = format!("<{foreign}/api/v1/groups?after=g1>; rel=\"next\"");
    ([(header::LINK, next)], Json(json!([{"id": "a1"}]))).into_response()
}

async fn slow(State(org): Org, headers: HeaderMap) -> Response {
    org.record(&headers);
    let now = org.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    org.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    org.in_flight.fetch_sub(1, Ordering::SeqCst);
    Json(json!({})).into_response()
}

async fn spawn_org(foreign: Option<String>) -> Arc<MockOrg> {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let org = Arc::new(MockOrg {
        base: format!("http://{}", listener.local_addr().unwrap()),
        foreign,
        ..MockOrg::default()
    });

    let app = Router::new()
        .route("/api/v1/users/:id", get(user))
        .route("/api/v1/throttled", get(throttled))
        .route("/api/v1/recovering", get(recovering))
        .route("/api/v1/groups", get(groups))
        .route("/api/v1/apps", get(apps))
        .route("/api/v1/slow", get(slow))
        .with_state(Arc::clone(&org));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    org
}

fn client_for(org: &MockOrg, configure: impl FnOnce(&mut OktaConfig)) -> OktaClient {
    let mut config = OktaConfig::new(org.base.clone(), TOKEN);
    configure(&mut config);
    OktaClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_get_sends_ssws_token() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |_| {});

    let user = client.get(&["users", "00u1"], &[]).await.unwrap();
    assert_eq!(user["id"], "00u1");
    assert_eq!(
        org.authorization.lock().unwrap().as_deref(),
        Some("SSWS secret-token")
    );
}

#[tokio::test]
async fn test_error_body_maps_to_api_error() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |_| {});

    let err = client.get(&["users", "missing"], &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    match err {
        OktaMcpError::Api {
            status,
            error_code,
            summary,
        } => {
            assert_eq!(status, 404);
            assert_eq!(error_code.as_deref(), Some("E0000007"));
            assert!(summary.starts_with("Not found"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_retries_are_bounded() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |config| config.max_retries = 1);

    let err = client.get(&["throttled"], &[]).await.unwrap_err();
    assert_eq!(org.requests(), 2);
    assert!(matches!(
        err,
        OktaMcpError::Api { status: 429, ref error_code, .. } if error_code.as_deref() == Some("E0000047")
    ));
}

#[tokio::test]
async fn test_rate_limit_without_retries_fails_at_once() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |config| config.max_retries = 0);

    let err = client.get(&["throttled"], &[]).await.unwrap_err();
    assert_eq!(org.requests(), 1);
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_rate_limit_retry_recovers() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |config| config.max_retries = 2);

    let body = client.get(&["recovering"], &[]).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(org.requests(), 2);
}

#[tokio::test]
async fn test_list_follows_next_links() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |_| {});

    let groups = client.list(&["groups"], &[], None).await.unwrap();
    let ids: Vec<&str> = groups.iter().filter_map(|g| g["id"].as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
    assert_eq!(org.requests(), 2);
}

#[tokio::test]
async fn test_list_stops_at_max_items() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |_| {});

    let groups = client.list(&["groups"], &[], Some(1)).await.unwrap();
    assert_eq!(groups, vec![json!({"id": "g1"})]);
    assert_eq!(org.requests(), 1);
}

#[tokio::test]
async fn test_foreign_next_link_is_not_followed() {
    let foreign = spawn_org(None).await;
    let org = spawn_org(Some(foreign.base.clone())).await;
    let client = client_for(&org, |_| {});

    let err = client.list(&["apps"], &[], None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(!err.to_string().contains(TOKEN));
    assert_eq!(foreign.requests(), 0);
    assert!(foreign.authorization.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_limit_caps_requests_in_flight() {
    let org = spawn_org(None).await;
    let client = client_for(&org, |config| config.concurrent_limit = 2);

    let results = join_all((0..6).map(|_| client.get(&["slow"], &[]))).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(org.requests(), 6);
    let peak = org.peak_in_flight.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak in flight was {peak}");
}
