//! Login risk assessment from a user's recent sign-in events.

use super::args;
use super::datetime::format_timestamp;
use crate::client::OktaApi;
use crate::error::{OktaMcpError, OktaResult};
use chrono::{Duration, Utc};
use log::debug;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeSet;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;
pub const MAX_LOOKBACK_DAYS: i64 = 90;
const MAX_EVENTS: usize = 1000;

const SESSION_START_EVENT: &str = "user.session.start";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_score(score: u32) -> Self {
        match score {
            60.. => RiskLevel::High,
            30..=59 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Aggregate view over a batch of `user.session.start` events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRiskReport {
    pub total_attempts: usize,
    pub successful_attempts: usize,
    pub failed_attempts: usize,
    pub distinct_ips: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub clients: BTreeSet<String>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub indicators: Vec<String>,
}

pub async fn handle_analyze_user_login_risk(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let user_ref = args::required_str(arguments, "user")?;
    let days = match args::optional_i64(arguments, "days")? {
        None => DEFAULT_LOOKBACK_DAYS,
        Some(d) if d < 1 => {
            return Err(OktaMcpError::invalid_arguments(
                "days must be a positive integer",
            ));
        }
        Some(d) => d.min(MAX_LOOKBACK_DAYS),
    };

    let user = api.get(&["users", user_ref], &[]).await?;
    let user_id = args::str_at(&user, "/id")
        .ok_or_else(|| OktaMcpError::internal("Okta user record has no id"))?
        .to_string();

    let since = Utc::now() - Duration::days(days);
    let query = [
        (
            "filter",
            format!(r#"actor.id eq "{user_id}" and eventType eq "{SESSION_START_EVENT}""#),
        ),
        ("since", format_timestamp(since)),
        ("sortOrder", "DESCENDING".to_string()),
        ("limit", MAX_EVENTS.to_string()),
    ];
    let events = api.list(&["logs"], &query, Some(MAX_EVENTS)).await?;
    debug!("Assessing {} login events for user {}", events.len(), user_id);

    let report = assess_login_risk(&events);

    Ok(json!({
        "user": {
            "id": user_id,
            "login": args::str_at(&user, "/profile/login"),
            "status": args::str_at(&user, "/status"),
        },
        "period_days": days,
        "since": format_timestamp(since),
        "report": report,
    }))
}

/// Score a set of login events.
///
/// Points: failure ratio above 30% (+30), five or more failures (+20), more
/// than one country (+25, or +35 above two), more than five source IPs (+15),
/// any event flagged `threatSuspected` (+20), any new geo-location behavior
/// (+10). The total is capped at 100.
pub fn assess_login_risk(events: &[Value]) -> LoginRiskReport {
    let mut successful = 0;
    let mut failed = 0;
    let mut distinct_ips = BTreeSet::new();
    let mut countries = BTreeSet::new();
    let mut clients = BTreeSet::new();
    let mut threat_suspected = false;
    let mut new_geo_location = false;

    for event in events {
        match args::str_at(event, "/outcome/result") {
            Some("SUCCESS") => successful += 1,
            Some("FAILURE") | Some("DENY") => failed += 1,
            _ => {}
        }
        if let Some(ip) = args::str_at(event, "/client/ipAddress") {
            distinct_ips.insert(ip.to_string());
        }
        if let Some(country) = args::str_at(event, "/client/geographicalContext/country") {
            countries.insert(country.to_string());
        }
        if let Some(agent) = args::str_at(event, "/client/userAgent/rawUserAgent") {
            clients.insert(agent.to_string());
        }

        let debug_data = event.pointer("/debugContext/debugData");
        if debug_data
            .and_then(|d| d.get("threatSuspected"))
            .is_some_and(|v| v.as_str() == Some("true") || v.as_bool() == Some(true))
        {
            threat_suspected = true;
        }
        if debug_data
            .and_then(|d| d.get("behaviors"))
            .and_then(Value::as_str)
            .is_some_and(|b| b.contains("New Geo-Location=POSITIVE"))
        {
            new_geo_location = true;
        }
    }

    let total = events.len();
    let mut score = 0u32;
    let mut indicators = Vec::new();

    if total > 0 && failed as f64 / total as f64 > 0.3 {
        score += 30;
        indicators.push(format!("High failure rate: {failed} of {total} attempts failed"));
    }
    if failed >= 5 {
        score += 20;
        indicators.push(format!("{failed} failed login attempts"));
    }
    if countries.len() > 2 {
        score += 35;
        indicators.push(format!("Logins from {} countries", countries.len()));
    } else if countries.len() > 1 {
        score += 25;
        indicators.push(format!("Logins from {} countries", countries.len()));
    }
    if distinct_ips.len() > 5 {
        score += 15;
        indicators.push(format!("Logins from {} distinct IP addresses", distinct_ips.len()));
    }
    if threat_suspected {
        score += 20;
        indicators.push("Okta flagged a suspected threat".to_string());
    }
    if new_geo_location {
        score += 10;
        indicators.push("Login from a new geo-location".to_string());
    }

    let risk_score = score.min(100);
    LoginRiskReport {
        total_attempts: total,
        successful_attempts: successful,
        failed_attempts: failed,
        distinct_ips,
        countries,
        clients,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        indicators,
    }
}
