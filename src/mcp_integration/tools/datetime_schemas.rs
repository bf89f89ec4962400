//! Date and time tool schema definitions for MCP integration

use serde_json::{Value, json};

pub fn get_current_time_tool() -> Value {
    json!({
        "name": "get_current_time",
        "description": "Get the current UTC time in ISO 8601, optionally shifted back by a number of hours",
        "inputSchema": {
            "type": "object",
            "properties": {
                "buffer_hours": {
                    "type": "integer",
                    "description": "Hours to subtract for adjusted_time (default 0)"
                }
            },
            "additionalProperties": false
        }
    })
}

pub fn parse_relative_time_tool() -> Value {
    json!({
        "name": "parse_relative_time",
        "description": "Convert an expression such as '2 days ago', 'last 24 hours' or 'yesterday' into an ISO 8601 timestamp",
        "inputSchema": {
            "type": "object",
            "properties": {
                "time_expression": {
                    "type": "string",
                    "description": "Relative or absolute time expression"
                }
            },
            "required": ["time_expression"],
            "additionalProperties": false
        }
    })
}
