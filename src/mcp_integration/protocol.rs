//! MCP protocol layer for tool discovery and dispatch
//!
//! This module handles the core MCP protocol functionality: the JSON-RPC
//! methods (`initialize`, `ping`, `tools/list`, `tools/call`), tool
//! discovery, and routing a tool call to its handler. Transports only move
//! text in and out of [`OktaMcpServer::handle_text`].

use super::core::{OktaMcpServer, OktaToolResult};
use super::handlers::{
    access_analysis, apps, datetime, groups, log_events, login_risk, policies, users,
};
use super::jsonrpc::{
    self, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, JsonRpcRequest, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use super::tools::{
    analysis_schemas, app_schemas, datetime_schemas, group_schemas, log_schemas, policy_schemas,
    user_schemas,
};
use crate::client::{ClientFactory, OktaApi};
use crate::error::{OktaMcpError, OktaResult};
use log::{debug, info, warn};
use serde_json::{Value, json};

/// Protocol revision used when the client does not offer a supported one.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-03-26";

/// Protocol revisions this server can speak.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26"];

/// Names of every registered tool, in `tools/list` order.
pub const TOOL_NAMES: [&str; 22] = [
    "list_okta_users",
    "get_okta_user",
    "list_okta_user_groups",
    "list_okta_user_applications",
    "list_okta_user_factors",
    "list_okta_groups",
    "get_okta_group",
    "list_okta_group_members",
    "list_okta_group_applications",
    "list_okta_applications",
    "get_okta_application",
    "list_okta_application_users",
    "list_okta_application_groups",
    "get_okta_event_logs",
    "list_okta_policies",
    "list_okta_policy_rules",
    "get_okta_policy_rule",
    "list_okta_network_zones",
    "get_current_time",
    "parse_relative_time",
    "analyze_user_app_access",
    "analyze_user_login_risk",
];

impl<F> OktaMcpServer<F>
where
    F: ClientFactory,
    F::Client: OktaApi,
{
    /// Get the list of available MCP tools as JSON
    ///
    /// Each entry carries `name`, `description` and `inputSchema`.
    pub fn get_tools(&self) -> Vec<Value> {
        vec![
            user_schemas::list_users_tool(),
            user_schemas::get_user_tool(),
            user_schemas::list_user_groups_tool(),
            user_schemas::list_user_applications_tool(),
            user_schemas::list_user_factors_tool(),
            group_schemas::list_groups_tool(),
            group_schemas::get_group_tool(),
            group_schemas::list_group_members_tool(),
            group_schemas::list_group_applications_tool(),
            app_schemas::list_applications_tool(),
            app_schemas::get_application_tool(),
            app_schemas::list_application_users_tool(),
            app_schemas::list_application_groups_tool(),
            log_schemas::get_event_logs_tool(),
            policy_schemas::list_policies_tool(),
            policy_schemas::list_policy_rules_tool(),
            policy_schemas::get_policy_rule_tool(),
            policy_schemas::list_network_zones_tool(),
            datetime_schemas::get_current_time_tool(),
            datetime_schemas::parse_relative_time_tool(),
            analysis_schemas::analyze_user_app_access_tool(),
            analysis_schemas::analyze_user_login_risk_tool(),
        ]
    }

    /// Whether a tool with this name is registered.
    pub fn has_tool(&self, tool_name: &str) -> bool {
        TOOL_NAMES.contains(&tool_name)
    }

    /// Execute a tool by name with arguments
    ///
    /// Tools that need Okta obtain the shared client here, so a missing or
    /// broken configuration surfaces as an error result of the call rather
    /// than at startup.
    pub async fn execute_tool(&self, tool_name: &str, arguments: Value) -> OktaToolResult {
        debug!("Executing MCP tool: {}", tool_name);

        let outcome = match tool_name {
            "get_current_time" => datetime::handle_get_current_time(&arguments),
            "parse_relative_time" => datetime::handle_parse_relative_time(&arguments),
            _ if !self.has_tool(tool_name) => {
                return OktaToolResult::failure(format!("Unknown tool: {tool_name}"), "UNKNOWN_TOOL");
            }
            _ => match self.client.get_client().await {
                Ok(client) => self.call_okta_tool(tool_name, &*client, &arguments).await,
                Err(e) => Err(e),
            },
        };

        match outcome {
            Ok(content) => OktaToolResult::success(content, tool_name),
            Err(e) => {
                warn!("Tool {} failed: {}", tool_name, e);
                OktaToolResult::error(&e, tool_name)
            }
        }
    }

    async fn call_okta_tool(
        &self,
        tool_name: &str,
        api: &dyn OktaApi,
        arguments: &Value,
    ) -> OktaResult<Value> {
        match tool_name {
            // User operations
            "list_okta_users" => users::handle_list_users(api, arguments).await,
            "get_okta_user" => users::handle_get_user(api, arguments).await,
            "list_okta_user_groups" => users::handle_list_user_groups(api, arguments).await,
            "list_okta_user_applications" => {
                users::handle_list_user_applications(api, arguments).await
            }
            "list_okta_user_factors" => users::handle_list_user_factors(api, arguments).await,

            // Group operations
            "list_okta_groups" => groups::handle_list_groups(api, arguments).await,
            "get_okta_group" => groups::handle_get_group(api, arguments).await,
            "list_okta_group_members" => groups::handle_list_group_members(api, arguments).await,
            "list_okta_group_applications" => {
                groups::handle_list_group_applications(api, arguments).await
            }

            // Application operations
            "list_okta_applications" => apps::handle_list_applications(api, arguments).await,
            "get_okta_application" => apps::handle_get_application(api, arguments).await,
            "list_okta_application_users" => {
                apps::handle_list_application_users(api, arguments).await
            }
            "list_okta_application_groups" => {
                apps::handle_list_application_groups(api, arguments).await
            }

            // System log
            "get_okta_event_logs" => log_events::handle_get_event_logs(api, arguments).await,

            // Policies and network zones
            "list_okta_policies" => policies::handle_list_policies(api, arguments).await,
            "list_okta_policy_rules" => policies::handle_list_policy_rules(api, arguments).await,
            "get_okta_policy_rule" => policies::handle_get_policy_rule(api, arguments).await,
            "list_okta_network_zones" => policies::handle_list_network_zones(api, arguments).await,

            // Composite analysis
            "analyze_user_app_access" => {
                access_analysis::handle_analyze_user_app_access(api, arguments).await
            }
            "analyze_user_login_risk" => {
                login_risk::handle_analyze_user_login_risk(api, arguments).await
            }

            other => Err(OktaMcpError::internal(format!(
                "tool '{other}' is registered without a handler"
            ))),
        }
    }

    /// Handle one raw JSON-RPC payload (single message or batch).
    ///
    /// Returns the serialized response, or `None` when nothing must be sent
    /// back (notifications only).
    pub async fn handle_text(&self, text: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(text) {
            Ok(message) => self.handle_message(message).await?,
            Err(e) => jsonrpc::error_response(Value::Null, PARSE_ERROR, format!("Parse error: {e}")),
        };
        Some(response.to_string())
    }

    /// Handle a parsed JSON-RPC message or batch.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        match message {
            Value::Array(batch) if batch.is_empty() => Some(jsonrpc::error_response(
                Value::Null,
                INVALID_REQUEST,
                "Invalid Request: empty batch",
            )),
            Value::Array(batch) => {
                let mut responses = Vec::new();
                for entry in batch {
                    if let Some(response) = self.handle_single(entry).await {
                        responses.push(response);
                    }
                }
                (!responses.is_empty()).then_some(Value::Array(responses))
            }
            other => self.handle_single(other).await,
        }
    }

    async fn handle_single(&self, message: Value) -> Option<Value> {
        let is_client_response = message.get("method").is_none()
            && (message.get("result").is_some() || message.get("error").is_some());
        if is_client_response {
            debug!("Ignoring JSON-RPC response sent by client");
            return None;
        }

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request = match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => request,
            Ok(_) => {
                return Some(jsonrpc::error_response(
                    id,
                    INVALID_REQUEST,
                    "Invalid Request: jsonrpc must be \"2.0\"",
                ));
            }
            Err(e) => {
                return Some(jsonrpc::error_response(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let params = request.params.unwrap_or_else(|| json!({}));

        let response = match request.method.as_str() {
            "initialize" => jsonrpc::success_response(id, self.initialize_result(&params)),
            "ping" => jsonrpc::success_response(id, json!({})),
            "tools/list" => jsonrpc::success_response(id, json!({ "tools": self.get_tools() })),
            "tools/call" => match tool_call_params(&params) {
                Ok((name, arguments)) => {
                    let result = self.execute_tool(name, arguments).await;
                    jsonrpc::success_response(id, result.into_call_result())
                }
                Err(message) => jsonrpc::error_response(id, INVALID_PARAMS, message),
            },
            method => jsonrpc::error_response(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            ),
        };
        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("MCP client initialized"),
            "notifications/cancelled" => debug!("Client cancelled a request"),
            other => debug!("Ignoring notification {}", other),
        }
    }

    fn initialize_result(&self, params: &Value) -> Value {
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(LATEST_PROTOCOL_VERSION);

        if let Some(client) = params.get("clientInfo") {
            info!(
                "MCP initialize from {} {} (protocol {})",
                client.get("name").and_then(Value::as_str).unwrap_or("unknown"),
                client.get("version").and_then(Value::as_str).unwrap_or(""),
                version
            );
        }

        json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version,
            },
            "instructions": self.server_info.instructions,
        })
    }
}

fn tool_call_params(params: &Value) -> Result<(&str, Value), String> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| "Invalid params: tools/call requires a string 'name'".to_string())?;

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => json!({}),
        Some(args @ Value::Object(_)) => args.clone(),
        Some(_) => return Err("Invalid params: 'arguments' must be an object".to_string()),
    };
    Ok((name, arguments))
}
