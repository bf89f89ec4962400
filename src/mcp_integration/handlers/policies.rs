//! Policy and network zone handlers for MCP integration

use super::args;
use crate::client::OktaApi;
use crate::error::{OktaMcpError, OktaResult};
use serde_json::Value;

/// Policy types accepted by `GET /api/v1/policies`.
pub const POLICY_TYPES: &[&str] = &[
    "OKTA_SIGN_ON",
    "PASSWORD",
    "MFA_ENROLL",
    "IDP_DISCOVERY",
    "ACCESS_POLICY",
    "PROFILE_ENROLLMENT",
    "POST_AUTH_SESSION",
    "ENTITY_RISK",
];

/// Handle policy listing through MCP
pub async fn handle_list_policies(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let policy_type = args::required_str(arguments, "policy_type")?.to_ascii_uppercase();
    if !POLICY_TYPES.contains(&policy_type.as_str()) {
        return Err(OktaMcpError::invalid_arguments(format!(
            "policy_type must be one of {}",
            POLICY_TYPES.join(", ")
        )));
    }

    let mut query = vec![("type", policy_type)];
    if let Some(status) = args::optional_str(arguments, "status")? {
        query.push(("status", status.to_ascii_uppercase()));
    }

    let policies = api.list(&["policies"], &query, None).await?;
    Ok(args::list_payload("policies", policies))
}

pub async fn handle_list_policy_rules(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let policy_id = args::required_str(arguments, "policy_id")?;
    let rules = api
        .list(&["policies", policy_id, "rules"], &[], None)
        .await?;
    Ok(args::list_payload("rules", rules))
}

pub async fn handle_get_policy_rule(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let policy_id = args::required_str(arguments, "policy_id")?;
    let rule_id = args::required_str(arguments, "rule_id")?;
    let rule = api
        .get(&["policies", policy_id, "rules", rule_id], &[])
        .await?;
    Ok(args::strip_links(rule))
}

/// Handle network zone listing through MCP
pub async fn handle_list_network_zones(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let mut query = Vec::new();
    args::push_optional(&mut query, "filter", args::optional_str(arguments, "filter")?);

    let zones = api.list(&["zones"], &query, None).await?;
    Ok(args::list_payload("zones", zones))
}
