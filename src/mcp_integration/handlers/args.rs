//! Argument extraction shared by the tool handlers.

use crate::error::{OktaMcpError, OktaResult};
use serde_json::{Map, Value};

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 200;

/// A required, non-empty string argument.
pub fn required_str<'a>(arguments: &'a Value, name: &str) -> OktaResult<&'a str> {
    optional_str(arguments, name)?
        .ok_or_else(|| OktaMcpError::invalid_arguments(format!("Missing {name} parameter")))
}

/// An optional string argument; blank strings count as absent.
pub fn optional_str<'a>(arguments: &'a Value, name: &str) -> OktaResult<Option<&'a str>> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(_) => Err(OktaMcpError::invalid_arguments(format!(
            "{name} must be a string"
        ))),
    }
}

/// An optional integer argument.
pub fn optional_i64(arguments: &Value, name: &str) -> OktaResult<Option<i64>> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            OktaMcpError::invalid_arguments(format!("{name} must be an integer"))
        }),
    }
}

/// The `limit` argument, defaulted and capped.
pub fn limit(arguments: &Value, default: usize, max: usize) -> OktaResult<usize> {
    match optional_i64(arguments, "limit")? {
        None => Ok(default),
        Some(n) if n < 1 => Err(OktaMcpError::invalid_arguments(
            "limit must be a positive integer",
        )),
        Some(n) => Ok((n as usize).min(max)),
    }
}

/// Push `(key, value)` when the argument is present.
pub fn push_optional<'q>(
    query: &mut Vec<(&'q str, String)>,
    key: &'q str,
    value: Option<&str>,
) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

/// Drop hypermedia links from an Okta object.
pub fn strip_links(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        map.remove("_links");
    }
    value
}

/// Wrap a list result as `{ <key>: [...], "total": n }`.
pub fn list_payload(key: &str, items: Vec<Value>) -> Value {
    let total = items.len();
    let items: Vec<Value> = items.into_iter().map(strip_links).collect();
    let mut payload = Map::new();
    payload.insert(key.to_string(), Value::Array(items));
    payload.insert("total".to_string(), Value::from(total));
    Value::Object(payload)
}

/// Read a string at a `/`-separated JSON pointer, if present.
pub fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}
