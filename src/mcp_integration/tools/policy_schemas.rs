//! Policy and network zone tool schema definitions for MCP integration

use crate::mcp_integration::handlers::policies::POLICY_TYPES;
use serde_json::{Value, json};

pub fn list_policies_tool() -> Value {
    json!({
        "name": "list_okta_policies",
        "description": "List policies of a given type",
        "inputSchema": {
            "type": "object",
            "properties": {
                "policy_type": {
                    "type": "string",
                    "enum": POLICY_TYPES,
                    "description": "Policy type to list"
                },
                "status": {
                    "type": "string",
                    "enum": ["ACTIVE", "INACTIVE"],
                    "description": "Only return policies with this status"
                }
            },
            "required": ["policy_type"],
            "additionalProperties": false
        }
    })
}

pub fn list_policy_rules_tool() -> Value {
    json!({
        "name": "list_okta_policy_rules",
        "description": "List the rules of a policy",
        "inputSchema": {
            "type": "object",
            "properties": {
                "policy_id": {
                    "type": "string",
                    "description": "Okta policy id"
                }
            },
            "required": ["policy_id"],
            "additionalProperties": false
        }
    })
}

pub fn get_policy_rule_tool() -> Value {
    json!({
        "name": "get_okta_policy_rule",
        "description": "Get a single rule of a policy",
        "inputSchema": {
            "type": "object",
            "properties": {
                "policy_id": {
                    "type": "string",
                    "description": "Okta policy id"
                },
                "rule_id": {
                    "type": "string",
                    "description": "Rule id within the policy"
                }
            },
            "required": ["policy_id", "rule_id"],
            "additionalProperties": false
        }
    })
}

pub fn list_network_zones_tool() -> Value {
    json!({
        "name": "list_okta_network_zones",
        "description": "List network zones (IP and dynamic zones) used by policies",
        "inputSchema": {
            "type": "object",
            "properties": {
                "filter": {
                    "type": "string",
                    "description": "Filter expression, e.g. usage eq \"BLOCKLIST\""
                }
            },
            "additionalProperties": false
        }
    })
}
