//! System Log tool schema definitions for MCP integration

use serde_json::{Value, json};

/// Schema definition for System Log query tool
pub fn get_event_logs_tool() -> Value {
    json!({
        "name": "get_okta_event_logs",
        "description": "Query the Okta System Log. Time bounds accept ISO 8601 timestamps or relative expressions such as '2 days ago' or 'last 24 hours'.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "since": {
                    "type": "string",
                    "description": "Earliest event time (ISO 8601 or relative expression)"
                },
                "until": {
                    "type": "string",
                    "description": "Latest event time (ISO 8601 or relative expression)"
                },
                "filter": {
                    "type": "string",
                    "description": "Filter expression, e.g. eventType eq \"user.session.start\""
                },
                "query": {
                    "type": "string",
                    "description": "Keyword search across event fields"
                },
                "sort_order": {
                    "type": "string",
                    "enum": ["ASCENDING", "DESCENDING"],
                    "description": "Order of returned events (default ASCENDING)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of events to return (default 100, max 1000)",
                    "minimum": 1,
                    "maximum": 1000
                }
            },
            "additionalProperties": false
        }
    })
}
