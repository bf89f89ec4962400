//! Date and time helpers exposed as tools.
//!
//! Okta's System Log wants ISO 8601 timestamps while agents usually think in
//! "the last two days". These tools bridge the two and need no Okta access.

use super::args;
use crate::error::{OktaMcpError, OktaResult};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde_json::{Value, json};

/// Current UTC time, optionally shifted back by `buffer_hours`.
pub fn handle_get_current_time(arguments: &Value) -> OktaResult<Value> {
    let buffer_hours = args::optional_i64(arguments, "buffer_hours")?.unwrap_or(0);
    let now = Utc::now();
    let shifted = Duration::try_hours(buffer_hours)
        .and_then(|offset| now.checked_sub_signed(offset))
        .ok_or_else(|| OktaMcpError::invalid_arguments("buffer_hours is out of range"))?;

    Ok(json!({
        "current_time": format_timestamp(now),
        "adjusted_time": format_timestamp(shifted),
        "buffer_hours": buffer_hours,
    }))
}

pub fn handle_parse_relative_time(arguments: &Value) -> OktaResult<Value> {
    let expression = args::required_str(arguments, "time_expression")?;
    let parsed = parse_relative_time(expression, Utc::now())?;
    Ok(json!({
        "time_expression": expression,
        "timestamp": format_timestamp(parsed),
    }))
}

/// ISO 8601 with millisecond precision and a `Z` suffix, as Okta expects.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolve an absolute or relative time expression against `now`.
///
/// Accepted forms: RFC 3339 timestamps, `YYYY-MM-DD` dates (midnight UTC),
/// `now`, `today`, `yesterday`, `N <unit> ago` and `last N <unit>`, where the
/// unit is minute, hour, day, week or month (30 days), singular, plural or
/// abbreviated (`m`, `h`, `d`, `w`). `24h ago` is accepted as well.
pub fn parse_relative_time(expression: &str, now: DateTime<Utc>) -> OktaResult<DateTime<Utc>> {
    let normalized = expression.trim().to_ascii_lowercase();

    if let Ok(time) = DateTime::parse_from_rfc3339(expression.trim()) {
        return Ok(time.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc())
            .ok_or_else(|| unparseable(expression));
    }

    match normalized.as_str() {
        "now" => return Ok(now),
        "today" => return start_of_day(now, 0).ok_or_else(|| unparseable(expression)),
        "yesterday" => return start_of_day(now, 1).ok_or_else(|| unparseable(expression)),
        _ => {}
    }

    let body = normalized
        .strip_suffix(" ago")
        .or_else(|| normalized.strip_prefix("last "))
        .ok_or_else(|| unparseable(expression))?;

    let offset = parse_offset(body).ok_or_else(|| unparseable(expression))?;
    now.checked_sub_signed(offset)
        .ok_or_else(|| unparseable(expression))
}

fn parse_offset(body: &str) -> Option<Duration> {
    let body = body.trim();
    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (amount, unit) = body.split_at(digits_end);
    let amount: i64 = if amount.is_empty() { 1 } else { amount.parse().ok()? };

    let duration = match unit.trim() {
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(amount)?,
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(amount)?,
        "d" | "day" | "days" => Duration::try_days(amount)?,
        "w" | "week" | "weeks" => Duration::try_weeks(amount)?,
        "month" | "months" => Duration::try_days(amount.checked_mul(30)?)?,
        _ => return None,
    };
    Some(duration)
}

fn start_of_day(now: DateTime<Utc>, days_back: i64) -> Option<DateTime<Utc>> {
    let date = now.date_naive() - Duration::days(days_back);
    date.and_hms_opt(0, 0, 0).map(|t| t.and_utc())
}

fn unparseable(expression: &str) -> OktaMcpError {
    OktaMcpError::invalid_arguments(format!(
        "Could not parse time expression '{expression}'. Use ISO 8601 or forms like '2 days ago', 'last 24 hours', 'yesterday'."
    ))
}
