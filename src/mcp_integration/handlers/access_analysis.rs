//! User to application access analysis.
//!
//! Combines direct assignment, group assignment and the app's access policy
//! into one answer to "can this user get into this app, and why".

use super::args;
use crate::client::OktaApi;
use crate::error::{OktaMcpError, OktaResult};
use log::debug;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Okta application ids start with this prefix.
const APP_ID_PREFIX: &str = "0oa";

/// Result of intersecting a user's and an app's assignments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessSummary {
    pub has_access: bool,
    pub direct_assignment: bool,
    pub granting_groups: Vec<Value>,
    pub user_status: String,
    pub app_status: String,
    pub reasons: Vec<String>,
}

pub async fn handle_analyze_user_app_access(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let user_ref = args::required_str(arguments, "user")?;
    let app_ref = args::required_str(arguments, "application")?;

    let user = api.get(&["users", user_ref], &[]).await?;
    let user_id = args::str_at(&user, "/id")
        .ok_or_else(|| OktaMcpError::internal("Okta user record has no id"))?
        .to_string();

    let app = resolve_application(api, app_ref).await?;
    let app_id = args::str_at(&app, "/id")
        .ok_or_else(|| OktaMcpError::internal("Okta application record has no id"))?
        .to_string();
    debug!("Analyzing access for user {} to app {}", user_id, app_id);

    let direct = match api.get(&["apps", &app_id, "users", &user_id], &[]).await {
        Ok(assignment) => Some(args::strip_links(assignment)),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };

    let user_groups = api.list(&["users", &user_id, "groups"], &[], None).await?;
    let app_groups = api.list(&["apps", &app_id, "groups"], &[], None).await?;

    let policy_rules = match access_policy_id(&app) {
        Some(policy_id) => {
            let rules = api
                .list(&["policies", &policy_id, "rules"], &[], None)
                .await?;
            Some(json!({
                "policy_id": policy_id,
                "rules": rules.into_iter().map(args::strip_links).collect::<Vec<_>>(),
            }))
        }
        None => None,
    };

    let summary = summarize_access(&user, &app, direct.is_some(), &user_groups, &app_groups);

    Ok(json!({
        "user": {
            "id": user_id,
            "login": args::str_at(&user, "/profile/login"),
            "status": summary.user_status,
        },
        "application": {
            "id": app_id,
            "label": args::str_at(&app, "/label"),
            "name": args::str_at(&app, "/name"),
            "status": summary.app_status,
        },
        "direct_assignment": direct,
        "access_policy": policy_rules,
        "summary": summary,
    }))
}

/// Find an application by id, or by label through a name search.
///
/// An exact label match (case-insensitive) wins over the first search hit.
pub async fn resolve_application(api: &dyn OktaApi, reference: &str) -> OktaResult<Value> {
    if reference.starts_with(APP_ID_PREFIX) {
        return api.get(&["apps", reference], &[]).await;
    }

    let query = [("q", reference.to_string()), ("limit", "20".to_string())];
    let candidates = api.list(&["apps"], &query, Some(20)).await?;

    let exact = candidates.iter().position(|app| {
        args::str_at(app, "/label").is_some_and(|label| label.eq_ignore_ascii_case(reference))
    });
    match exact {
        Some(index) => Ok(candidates[index].clone()),
        None => candidates.into_iter().next().ok_or_else(|| {
            OktaMcpError::invalid_arguments(format!("No application found matching '{reference}'"))
        }),
    }
}

/// Policy id from `_links.accessPolicy.href`, the last path segment.
pub fn access_policy_id(app: &Value) -> Option<String> {
    let href = args::str_at(app, "/_links/accessPolicy/href")?;
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Decide access from already fetched records.
pub fn summarize_access(
    user: &Value,
    app: &Value,
    direct_assignment: bool,
    user_groups: &[Value],
    app_groups: &[Value],
) -> AccessSummary {
    let user_group_ids: HashSet<&str> = user_groups
        .iter()
        .filter_map(|g| args::str_at(g, "/id"))
        .collect();

    let granting_groups: Vec<Value> = app_groups
        .iter()
        .filter(|g| args::str_at(g, "/id").is_some_and(|id| user_group_ids.contains(id)))
        .map(|g| {
            json!({
                "id": args::str_at(g, "/id"),
                "name": user_groups
                    .iter()
                    .find(|ug| args::str_at(ug, "/id") == args::str_at(g, "/id"))
                    .and_then(|ug| args::str_at(ug, "/profile/name")),
                "priority": g.get("priority"),
            })
        })
        .collect();

    let user_status = args::str_at(user, "/status").unwrap_or("UNKNOWN").to_string();
    let app_status = args::str_at(app, "/status").unwrap_or("UNKNOWN").to_string();

    let mut reasons = Vec::new();
    if direct_assignment {
        reasons.push("User is directly assigned to the application".to_string());
    }
    for group in &granting_groups {
        let label = group["name"]
            .as_str()
            .or_else(|| group["id"].as_str())
            .unwrap_or("unknown");
        reasons.push(format!("User is assigned through group {label}"));
    }
    let assigned = direct_assignment || !granting_groups.is_empty();
    if !assigned {
        reasons.push("User has no direct or group assignment to the application".to_string());
    }
    if user_status != "ACTIVE" {
        reasons.push(format!("User status is {user_status}"));
    }
    if app_status != "ACTIVE" {
        reasons.push(format!("Application status is {app_status}"));
    }

    AccessSummary {
        has_access: assigned && user_status == "ACTIVE" && app_status == "ACTIVE",
        direct_assignment,
        granting_groups,
        user_status,
        app_status,
        reasons,
    }
}
