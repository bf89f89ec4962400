//! JSON-RPC handling and tool calls through the public server API.

use crate::assert_tool_error;
use crate::common::fixtures::small_org;
use crate::common::{CountingFactory, FakeOktaApi, fake_server, request};
use okta_mcp_server::client::LazyClient;
use okta_mcp_server::config::OktaConfig;
use okta_mcp_server::mcp_integration::OktaMcpServer;
use serde_json::{Value, json};

fn call_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result carries text content");
    serde_json::from_str(text).expect("tool text is JSON")
}

#[tokio::test]
async fn test_server_construction_reads_no_configuration() {
    let source = || -> okta_mcp_server::error::ConfigResult<OktaConfig> {
        panic!("configuration must not be loaded while listing tools")
    };
    let server = OktaMcpServer::with_client(LazyClient::new(source, CountingFactory::default()));

    let tools = server
        .handle_message(request(1, "tools/list", json!({})))
        .await
        .unwrap();
    assert_eq!(tools["result"]["tools"].as_array().unwrap().len(), 22);
    assert!(!server.client().is_initialized());
}

#[tokio::test]
async fn test_list_users_call() {
    let server = fake_server(small_org());

    let response = server
        .handle_message(request(
            7,
            "tools/call",
            json!({"name": "list_okta_users", "arguments": {"query": "a"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response["id"], 7);
    assert_eq!(response["result"]["isError"], false);
    let payload = call_payload(&response);
    assert_eq!(payload["total"], 2);
    assert_eq!(payload["users"][0]["profile"]["login"], "ada@example.com");
    assert!(payload["users"][0].get("_links").is_none());
}

#[tokio::test]
async fn test_network_zones_and_policy_errors() {
    let api = small_org();
    let server = fake_server(api.clone());

    let zones = server.execute_tool("list_okta_network_zones", json!({})).await;
    assert!(zones.success);
    assert_eq!(zones.content["zones"][0]["name"], "Corporate VPN");

    let bad_type = server
        .execute_tool("list_okta_policies", json!({"policy_type": "NOT_A_TYPE"}))
        .await;
    assert_tool_error!(bad_type, "INVALID_ARGUMENTS");

    let missing = server
        .execute_tool(
            "get_okta_policy_rule",
            json!({"policy_id": "rst1", "rule_id": "rul404"}),
        )
        .await;
    assert_tool_error!(missing, "OKTA_API_ERROR");
    assert_eq!(missing.content["status"], 404);
    assert!(api.calls().contains(&"policies/rst1/rules/rul404".to_string()));
}

#[tokio::test]
async fn test_tool_error_is_result_not_protocol_error() {
    let server = fake_server(FakeOktaApi::default());

    let response = server
        .handle_message(request(
            2,
            "tools/call",
            json!({"name": "get_okta_group", "arguments": {"group_id": "00g404"}}),
        ))
        .await
        .unwrap();

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    let payload = call_payload(&response);
    assert_eq!(payload["error_code"], "OKTA_API_ERROR");
    assert!(payload["error"].as_str().unwrap().contains("E0000007"));
}

#[tokio::test]
async fn test_parse_relative_time_tool() {
    let server = fake_server(FakeOktaApi::default());

    let result = server
        .execute_tool("parse_relative_time", json!({"time_expression": "2024-03-01"}))
        .await;
    assert!(result.success);
    assert_eq!(result.content["timestamp"], "2024-03-01T00:00:00.000Z");

    let missing = server.execute_tool("parse_relative_time", json!({})).await;
    assert_tool_error!(missing, "INVALID_ARGUMENTS");
}

#[tokio::test]
async fn test_text_round_trip() {
    let server = fake_server(FakeOktaApi::default());

    let reply = server
        .handle_text(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#)
        .await
        .unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&reply).unwrap(),
        json!({"jsonrpc": "2.0", "id": "a", "result": {}})
    );

    let silent = server
        .handle_text(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(silent.is_none());
}
