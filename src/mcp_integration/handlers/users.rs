//! User operation handlers for MCP integration
//!
//! Read-only access to Okta users. `user_id` accepts either the Okta id
//! (`00u...`) or the login, which the Users API resolves interchangeably.

use super::args::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::client::OktaApi;
use crate::error::OktaResult;
use serde_json::Value;

/// Handle user listing through MCP
///
/// `query` does a prefix match on name and email, `search` takes a SCIM
/// expression (e.g. `profile.department eq "Engineering"`), and `filter`
/// supports the limited Okta filter syntax.
pub async fn handle_list_users(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let limit = args::limit(arguments, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;

    let mut query = Vec::new();
    args::push_optional(&mut query, "q", args::optional_str(arguments, "query")?);
    args::push_optional(&mut query, "search", args::optional_str(arguments, "search")?);
    args::push_optional(&mut query, "filter", args::optional_str(arguments, "filter")?);
    query.push(("limit", limit.to_string()));

    let users = api.list(&["users"], &query, Some(limit)).await?;
    Ok(args::list_payload("users", users))
}

/// Handle single user retrieval through MCP
pub async fn handle_get_user(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let user_id = args::required_str(arguments, "user_id")?;
    let user = api.get(&["users", user_id], &[]).await?;
    Ok(args::strip_links(user))
}

/// Handle group membership listing for a user
pub async fn handle_list_user_groups(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let user_id = args::required_str(arguments, "user_id")?;
    let groups = api.list(&["users", user_id, "groups"], &[], None).await?;
    Ok(args::list_payload("groups", groups))
}

/// Handle application link listing for a user
///
/// App links are the applications shown on the user's dashboard, whether
/// assigned directly or through a group.
pub async fn handle_list_user_applications(
    api: &dyn OktaApi,
    arguments: &Value,
) -> OktaResult<Value> {
    let user_id = args::required_str(arguments, "user_id")?;
    let links = api.list(&["users", user_id, "appLinks"], &[], None).await?;
    Ok(args::list_payload("applications", links))
}

/// Handle enrolled factor listing for a user
pub async fn handle_list_user_factors(api: &dyn OktaApi, arguments: &Value) -> OktaResult<Value> {
    let user_id = args::required_str(arguments, "user_id")?;
    let factors = api.list(&["users", user_id, "factors"], &[], None).await?;
    Ok(args::list_payload("factors", factors))
}
