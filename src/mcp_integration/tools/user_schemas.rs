//! User tool schema definitions for MCP integration
//!
//! Each schema names the tool, describes it for the agent, and declares its
//! input parameters in JSON Schema form. Every user tool is read-only.

use serde_json::{Value, json};

/// Schema definition for user listing tool
pub fn list_users_tool() -> Value {
    json!({
        "name": "list_okta_users",
        "description": "List users in the Okta organization. Supports a simple name/email prefix query, SCIM search expressions and Okta filter expressions.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Prefix match on first name, last name or email"
                },
                "search": {
                    "type": "string",
                    "description": "SCIM search expression, e.g. profile.department eq \"Engineering\""
                },
                "filter": {
                    "type": "string",
                    "description": "Okta filter expression, e.g. status eq \"ACTIVE\""
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of users to return (default 50, max 200)",
                    "minimum": 1,
                    "maximum": 200
                }
            },
            "additionalProperties": false
        }
    })
}

/// Schema definition for user retrieval tool
pub fn get_user_tool() -> Value {
    json!({
        "name": "get_okta_user",
        "description": "Get a single Okta user by id or login",
        "inputSchema": {
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "Okta user id (00u...) or login"
                }
            },
            "required": ["user_id"],
            "additionalProperties": false
        }
    })
}

pub fn list_user_groups_tool() -> Value {
    user_scoped_tool(
        "list_okta_user_groups",
        "List the groups a user belongs to",
    )
}

pub fn list_user_applications_tool() -> Value {
    user_scoped_tool(
        "list_okta_user_applications",
        "List the application links assigned to a user, directly or through groups",
    )
}

pub fn list_user_factors_tool() -> Value {
    user_scoped_tool(
        "list_okta_user_factors",
        "List the authentication factors a user has enrolled",
    )
}

fn user_scoped_tool(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "Okta user id (00u...) or login"
                }
            },
            "required": ["user_id"],
            "additionalProperties": false
        }
    })
}
