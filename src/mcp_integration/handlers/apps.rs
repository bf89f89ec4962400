//! Application operation handlers for MCP integration

use super::args::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::client::OktaApi;
use crate::error::OktaResult;
use serde_json::Value;

/// Handle application listing through MCP
///
/// `query` matches on app name and label; `filter` accepts expressions such
/// as `status eq "ACTIVE"`.
pub async fn handle_list_applications(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let limit = args::limit(arguments, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;

    let mut query = Vec::new();
    args::push_optional(&mut query, "q", args::optional_str(arguments, "query")?);
    args::push_optional(&mut query, "filter", args::optional_str(arguments, "filter")?);
    query.push(("limit", limit.to_string()));

    let apps = api.list(&["apps"], &query, Some(limit)).await?;
    Ok(args::list_payload("applications", apps))
}

pub async fn handle_get_application(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let app_id = args::required_str(arguments, "app_id")?;
    let app = api.get(&["apps", app_id], &[]).await?;
    Ok(args::strip_links(app))
}

/// Handle directly assigned user listing for an application
pub async fn handle_list_application_users(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let app_id = args::required_str(arguments, "app_id")?;
    let limit = args::limit(arguments, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;
    let query = [("limit", limit.to_string())];

    let users = api
        .list(&["apps", app_id, "users"], &query, Some(limit))
        .await?;
    Ok(args::list_payload("users", users))
}

/// Handle group assignment listing for an application
pub async fn handle_list_application_groups(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let app_id = args::required_str(arguments, "app_id")?;
    let groups = api.list(&["apps", app_id, "groups"], &[], None).await?;
    Ok(args::list_payload("groups", groups))
}
