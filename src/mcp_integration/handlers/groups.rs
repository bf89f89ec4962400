//! Group operation handlers for MCP integration

use super::args::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::client::OktaApi;
use crate::error::OktaResult;
use serde_json::Value;

/// Handle group listing through MCP
pub async fn handle_list_groups(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let limit = args::limit(arguments, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;

    let mut query = Vec::new();
    args::push_optional(&mut query, "q", args::optional_str(arguments, "query")?);
    args::push_optional(&mut query, "search", args::optional_str(arguments, "search")?);
    args::push_optional(&mut query, "filter", args::optional_str(arguments, "filter")?);
    query.push(("limit", limit.to_string()));

    let groups = api.list(&["groups"], &query, Some(limit)).await?;
    Ok(args::list_payload("groups", groups))
}

pub async fn handle_get_group(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let group_id = args::required_str(arguments, "group_id")?;
    let group = api.get(&["groups", group_id], &[]).await?;
    Ok(args::strip_links(group))
}

/// Handle member listing for a group
pub async fn handle_list_group_members(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let group_id = args::required_str(arguments, "group_id")?;
    let limit = args::limit(arguments, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;
    let query = [("limit", limit.to_string())];

    let members = api
        .list(&["groups", group_id, "users"], &query, Some(limit))
        .await?;
    Ok(args::list_payload("users", members))
}

/// Handle assigned application listing for a group
pub async fn handle_list_group_applications(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let group_id = args::required_str(arguments, "group_id")?;
    let apps = api.list(&["groups", group_id, "apps"], &[], None).await?;
    Ok(args::list_payload("applications", apps))
}
