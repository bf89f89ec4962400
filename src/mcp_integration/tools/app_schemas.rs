//! Application tool schema definitions for MCP integration

use serde_json::{Value, json};

pub fn list_applications_tool() -> Value {
    json!({
        "name": "list_okta_applications",
        "description": "List applications configured in the Okta organization",
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Match on application name or label"
                },
                "filter": {
                    "type": "string",
                    "description": "Okta filter expression, e.g. status eq \"ACTIVE\""
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of applications to return (default 50, max 200)",
                    "minimum": 1,
                    "maximum": 200
                }
            },
            "additionalProperties": false
        }
    })
}

pub fn get_application_tool() -> Value {
    app_scoped_tool("get_okta_application", "Get a single Okta application by id", false)
}

pub fn list_application_users_tool() -> Value {
    app_scoped_tool(
        "list_okta_application_users",
        "List the users assigned to an application",
        true,
    )
}

pub fn list_application_groups_tool() -> Value {
    app_scoped_tool(
        "list_okta_application_groups",
        "List the groups assigned to an application",
        false,
    )
}

fn app_scoped_tool(name: &str, description: &str, with_limit: bool) -> Value {
    let mut properties = json!({
        "app_id": {
            "type": "string",
            "description": "Okta application id (0oa...)"
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
            "required": ["app_id"],
            "additionalProperties": false
        }
    })
}
