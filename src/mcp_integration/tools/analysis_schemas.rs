//! Analysis tool schema definitions for MCP integration
//!
//! These tools combine several Okta reads into one answer.

use serde_json::{Value, json};

/// Schema definition for user to application access analysis
pub fn analyze_user_app_access_tool() -> Value {
    json!({
        "name": "analyze_user_app_access",
        "description": "Explain whether a user can access an application: direct assignment, group assignment, user and app status, and the app's access policy rules",
        "inputSchema": {
            "type": "object",
            "properties": {
                "user": {
                    "type": "string",
                    "description": "Okta user id or login"
                },
                "application": {
                    "type": "string",
                    "description": "Okta application id (0oa...) or label"
                }
            },
            "required": ["user", "application"],
            "additionalProperties": false
        }
    })
}

/// Schema definition for login risk analysis
pub fn analyze_user_login_risk_tool() -> Value {
    json!({
        "name": "analyze_user_login_risk",
        "description": "Score a user's recent sign-in activity for risk from failures, locations, source IPs and Okta threat signals",
        "inputSchema": {
            "type": "object",
            "properties": {
                "user": {
                    "type": "string",
                    "description": "Okta user id or login"
                },
                "days": {
                    "type": "integer",
                    "description": "Days of history to analyze (default 7, max 90)",
                    "minimum": 1,
                    "maximum": 90
                }
            },
            "required": ["user"],
            "additionalProperties": false
        }
    })
}
