//! Group tool schema definitions for MCP integration

use serde_json::{Value, json};

/// Schema definition for group listing tool
pub fn list_groups_tool() -> Value {
    json!({
        "name": "list_okta_groups",
        "description": "List groups in the Okta organization",
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Prefix match on group name"
                },
                "search": {
                    "type": "string",
                    "description": "Search expression, e.g. type eq \"OKTA_GROUP\""
                },
                "filter": {
                    "type": "string",
                    "description": "Okta filter expression"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of groups to return (default 50, max 200)",
                    "minimum": 1,
                    "maximum": 200
                }
            },
            "additionalProperties": false
        }
    })
}

pub fn get_group_tool() -> Value {
    group_scoped_tool("get_okta_group", "Get a single Okta group by id", false)
}

pub fn list_group_members_tool() -> Value {
    group_scoped_tool(
        "list_okta_group_members",
        "List the users who are members of a group",
        true,
    )
}

pub fn list_group_applications_tool() -> Value {
    group_scoped_tool(
        "list_okta_group_applications",
        "List the applications assigned to a group",
        false,
    )
}

fn group_scoped_tool(name: &str, description: &str, with_limit: bool) -> Value {
    let mut properties = json!({
        "group_id": {
            "type": "string",
            "description": "Okta group id (00g...)"
        }
    });
    if with_limit {
        properties["limit"] = json!({
            "type": "integer",
            "description": "Maximum number of results (default 50, max 200)",
            "minimum": 1,
            "maximum": 200
        });
    }

    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": ["group_id"],
            "additionalProperties": false
        }
    })
}
