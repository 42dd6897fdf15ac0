// CIGAM Bridge: MCP (Model Context Protocol) Types
//
// Server-side shapes for the MCP JSON-RPC interface.
// Spec: https://spec.modelcontextprotocol.io/

use crate::atoms::types::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── JSON-RPC 2.0 Framing ──────────────────────────────────────────────

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// An incoming request or notification. Notifications have no `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// `null` only when the request id could not be read.
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        JsonRpcResponse { jsonrpc: "2.0".into(), id, result: Some(result), error: None }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        JsonRpcResponse {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message: message.into(), data: None }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// ── initialize ─────────────────────────────────────────────────────────

/// What we read from the client's `initialize` params.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub client_info: Option<McpPeerInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpPeerInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: McpServerCapabilities,
    pub server_info: McpPeerInfo,
}

/// Only `tools` is offered.
#[derive(Debug, Clone, Serialize)]
pub struct McpServerCapabilities {
    pub tools: Value,
}

impl Default for McpServerCapabilities {
    fn default() -> Self {
        McpServerCapabilities { tools: serde_json::json!({}) }
    }
}

// ── tools/list ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDefinition>,
}

// ── tools/call ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_string_id() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"abc","method":"tools/list"}"#).unwrap();
        assert_eq!(req.id, Some(json!("abc")));
        assert!(req.params.is_none());
        assert!(!req.is_notification());
    }

    #[test]
    fn test_notification_has_no_id() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(req.is_notification());
    }

    #[test]
    fn test_error_response_serde() {
        let resp = JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error");
        let wire = serde_json::to_value(&resp).unwrap();
        assert_eq!(wire["id"], Value::Null);
        assert_eq!(wire["error"]["code"], -32700);
        assert!(wire.get("result").is_none());
        assert!(wire["error"].get("data").is_none());
    }

    #[test]
    fn test_tool_definition_uses_camel_case_schema() {
        let list = ToolsListResult {
            tools: vec![ToolDefinition::new("t", "d", json!({"type": "object"}))],
        };
        let wire = serde_json::to_string(&list).unwrap();
        assert!(wire.contains("\"inputSchema\""));
    }

    #[test]
    fn test_tool_call_params_default_arguments() {
        let p: ToolCallParams = serde_json::from_value(json!({"name": "cigam_list_services"})).unwrap();
        assert!(p.arguments.is_null());
    }

    #[test]
    fn test_initialize_result_shape() {
        let r = InitializeResult {
            protocol_version: "2024-11-05".into(),
            capabilities: McpServerCapabilities::default(),
            server_info: McpPeerInfo { name: "cigam-mcp".into(), version: Some("0.1.0".into()) },
        };
        let wire = serde_json::to_value(&r).unwrap();
        assert_eq!(wire["protocolVersion"], "2024-11-05");
        assert_eq!(wire["capabilities"]["tools"], json!({}));
        assert_eq!(wire["serverInfo"]["name"], "cigam-mcp");
    }
}
