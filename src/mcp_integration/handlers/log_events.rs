//! System Log query handler for MCP integration

use super::args;
use super::datetime::{format_timestamp, parse_relative_time};
use crate::client::OktaApi;
use crate::error::{OktaMcpError, OktaResult};
use chrono::Utc;
use serde_json::{Map, Value};

pub const DEFAULT_LOG_LIMIT: usize = 100;
pub const MAX_LOG_LIMIT: usize = 1000;

/// Handle System Log queries through MCP
///
/// `since` and `until` accept ISO 8601 timestamps or relative expressions
/// (`"7 days ago"`), resolved before the request is made. Okta itself
/// defaults `since` to seven days back when it is omitted.
pub async fn handle_get_event_logs(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let limit = args::limit(arguments, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT)?;
    let now = Utc::now();

    let mut query = Vec::new();
    if let Some(since) = args::optional_str(arguments, "since")? {
        query.push(("since", format_timestamp(parse_relative_time(since, now)?)));
    }
    if let Some(until) = args::optional_str(arguments, "until")? {
        query.push(("until", format_timestamp(parse_relative_time(until, now)?)));
    }
    args::push_optional(&mut query, "filter", args::optional_str(arguments, "filter")?);
    args::push_optional(&mut query, "q", args::optional_str(arguments, "query")?);

    let sort_order = match args::optional_str(arguments, "sort_order")? {
        None => "ASCENDING".to_string(),
        Some(order) => {
            let order = order.to_ascii_uppercase();
            if order != "ASCENDING" && order != "DESCENDING" {
                return Err(OktaMcpError::invalid_arguments(
                    "sort_order must be ASCENDING or DESCENDING",
                ));
            }
            order
        }
    };
    query.push(("sortOrder", sort_order));
    query.push(("limit", limit.to_string()));

    let events = api.list(&["logs"], &query, Some(limit)).await?;
    let mut payload = args::list_payload("events", events);
    let applied: Map<String, Value> = query
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect();
    payload["query"] = Value::Object(applied);
    Ok(payload)
}
