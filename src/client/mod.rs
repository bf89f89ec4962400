//! Okta REST client.
//!
//! [`OktaClient`] is a thin read-only wrapper over `reqwest` that applies the
//! limits from [`OktaConfig`]:
//!
//! * at most `concurrent_limit` requests in flight (semaphore)
//! * `request_timeout` seconds per request
//! * up to `max_retries` retries when Okta answers 429
//!
//! Tool handlers only see the [`OktaApi`] trait, which keeps them testable
//! against in-memory fakes. The shared instance is owned by a [`LazyClient`].

mod lazy;
pub mod pagination;
pub mod rate_limit;

pub use lazy::{ClientFactory, ClientHandle, ConfigSource, EnvConfigSource, LazyClient};

use crate::config::{API_TOKEN_VAR, ORG_URL_VAR, OktaConfig};
use crate::error::{ConfigurationError, OktaMcpError, OktaResult};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Query parameters for a request, in order.
pub type Query<'a> = [(&'a str, String)];

/// Read access to the Okta management API.
///
/// `path` is a list of raw segments below `/api/v1`; implementations are
/// responsible for escaping them.
#[async_trait]
pub trait OktaApi: Send + Sync {
    /// Fetch a single JSON document.
    async fn get(&self, path: &[&str], query: &Query<'_>) -> OktaResult<Value>;

    /// Fetch a collection, following pagination until exhausted or until
    /// `max_items` objects have been collected.
    async fn list(
        &self,
        path: &[&str],
        query: &Query<'_>,
        max_items: Option<usize>,
    ) -> OktaResult<Vec<Value>>;
}

/// Okta error body (`errorCode`, `errorSummary`, ...).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OktaErrorBody {
    error_code: Option<String>,
    error_summary: Option<String>,
}

/// HTTP implementation of [`OktaApi`].
pub struct OktaClient {
    http: reqwest::Client,
    base_url: Url,
    permits: Arc<Semaphore>,
    max_retries: u32,
}

impl OktaClient {
    /// Build a client from validated configuration.
    ///
    /// No request is made here; an invalid token only surfaces on the first call.
    pub fn new(config: &OktaConfig) -> OktaResult<Self> {
        let base_url = Url::parse(config.org_url.trim_end_matches('/')).map_err(|e| {
            ConfigurationError::invalid_value(ORG_URL_VAR, format!("not a valid URL: {e}"))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigurationError::invalid_value(
                ORG_URL_VAR,
                "must be an http(s) URL such as https://example.okta.com",
            )
            .into());
        }

        let mut auth = HeaderValue::from_str(&format!("SSWS {}", config.api_token.expose()))
            .map_err(|_| {
                ConfigurationError::invalid_value(
                    API_TOKEN_VAR,
                    "contains characters that are not allowed in an HTTP header",
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("okta-mcp-server/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            permits: Arc::new(Semaphore::new(config.concurrent_limit as usize)),
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `/api/v1/<segments>?<query>` against the org URL.
    pub fn endpoint(&self, path: &[&str], query: &Query<'_>) -> OktaResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OktaMcpError::internal("organization URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(path);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Parse a `rel="next"` link, refusing any origin other than the org's.
    ///
    /// Every request carries the API token, so a link to another host is an
    /// error rather than a page.
    pub fn next_page(&self, link: &str) -> OktaResult<Url> {
        let next = Url::parse(link)
            .map_err(|e| OktaMcpError::internal(format!("invalid pagination link: {e}")))?;
        if next.origin() != self.base_url.origin() {
            return Err(OktaMcpError::internal(format!(
                "pagination link points outside {}",
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(next)
    }

    /// Issue a GET, retrying on 429 and mapping non-success statuses to
    /// [`OktaMcpError::Api`].
    async fn send(&self, url: Url) -> OktaResult<reqwest::Response> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| OktaMcpError::internal("request limiter closed"))?;

        let mut attempt = 0;
        loop {
            debug!("GET {}", url.path());
            let response = self.http.get(url.clone()).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.max_retries {
                let reset = response
                    .headers()
                    .get(rate_limit::RATE_LIMIT_RESET_HEADER)
                    .and_then(|v| v.to_str().ok());
                let delay = rate_limit::retry_delay(reset, Utc::now(), attempt);
                warn!(
                    "Okta rate limit hit on {}, retrying in {:?} (attempt {}/{})",
                    url.path(),
                    delay,
                    attempt + 1,
                    self.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                return Err(api_error(response).await);
            }
            return Ok(response);
        }
    }
}

async fn api_error(response: reqwest::Response) -> OktaMcpError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<OktaErrorBody>(&text).ok();

    let summary = body
        .as_ref()
        .and_then(|b| b.error_summary.clone())
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            } else {
                text.clone()
            }
        });

    OktaMcpError::Api {
        status: status.as_u16(),
        error_code: body.and_then(|b| b.error_code),
        summary,
    }
}

#[async_trait]
impl OktaApi for OktaClient {
    async fn get(&self, path: &[&str], query: &Query<'_>) -> OktaResult<Value> {
        let url = self.endpoint(path, query)?;
        let response = self.send(url).await?;
        Ok(response.json::<Value>().await?)
    }

    async fn list(
        &self,
        path: &[&str],
        query: &Query<'_>,
        max_items: Option<usize>,
    ) -> OktaResult<Vec<Value>> {
        let mut url = Some(self.endpoint(path, query)?);
        let mut items = Vec::new();

        while let Some(current) = url.take() {
            let response = self.send(current).await?;
            let next = pagination::next_link(response.headers());

            match response.json::<Value>().await? {
                Value::Array(page) => items.extend(page),
                other => {
                    return Err(OktaMcpError::internal(format!(
                        "expected a JSON array from /{}, got {}",
                        path.join("/"),
                        json_type(&other)
                    )));
                }
            }

            if let Some(cap) = max_items {
                if items.len() >= cap {
                    items.truncate(cap);
                    break;
                }
            }

            url = match next {
                Some(link) => Some(self.next_page(&link)?),
                None => None,
            };
        }

        Ok(items)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds [`OktaClient`]s for the lazy client.
#[derive(Debug, Default, Clone, Copy)]
pub struct OktaClientFactory;

#[async_trait]
impl ClientFactory for OktaClientFactory {
    type Client = OktaClient;

    async fn connect(&self, config: OktaConfig) -> OktaResult<OktaClient> {
        let client = OktaClient::new(&config)?;
        info!(
            "Okta client ready for {} (token sha256:{}, concurrency {}, timeout {}s, retries {})",
            client.base_url(),
            config.api_token.fingerprint(),
            config.concurrent_limit,
            config.request_timeout,
            config.max_retries
        );
        Ok(client)
    }
}
