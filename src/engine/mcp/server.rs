// CIGAM Bridge: MCP Server
//
// Handles initialize / ping / tools/list / tools/call. Each request runs
// on its own task; responses funnel through the single writer task.
// Returns when the input closes and every in-flight request has answered,
// or with an I/O error as soon as the output side is gone.

use super::transport::{read_message, spawn_writer};
use super::types::*;
use crate::atoms::constants::{PROTOCOL_VERSION, SERVER_NAME};
use crate::atoms::error::{CigamError, CigamResult};
use crate::engine::tools::{self, ToolDispatcher};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::task::JoinSet;

pub struct McpServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl McpServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        McpServer { dispatcher: Arc::new(dispatcher) }
    }

    /// Serve on the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> CigamResult<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    pub async fn serve<R, W>(&self, input: R, output: W) -> CigamResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (writer_tx, writer_handle) = spawn_writer(output);
        let mut reader = BufReader::new(input);
        let mut in_flight = JoinSet::new();

        let read_result = loop {
            // Reap finished handlers so the set stays small on long sessions.
            while in_flight.try_join_next().is_some() {}

            let next = tokio::select! {
                biased;
                _ = writer_tx.closed() => {
                    warn!("[mcp] Output closed, no longer reading requests");
                    break Err(CigamError::Io(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "output channel closed",
                    )));
                }
                next = read_message(&mut reader) => next,
            };
            let line = match next {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("[mcp] Input closed, shutting down");
                    break Ok(());
                }
                Err(e) => break Err(e),
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            let tx = writer_tx.clone();
            in_flight.spawn(async move {
                if tx.is_closed() {
                    return;
                }
                let Some(response) = handle_message(&dispatcher, &line).await else {
                    return;
                };
                match serde_json::to_vec(&response) {
                    Ok(bytes) => {
                        if tx.send(bytes).await.is_err() {
                            warn!("[mcp] Writer closed, dropping response id={}", response.id);
                        }
                    }
                    Err(e) => warn!("[mcp] Failed to serialize response: {}", e),
                }
            });
        };

        while in_flight.join_next().await.is_some() {}
        drop(writer_tx);

        match writer_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(CigamError::Io(e)),
            Err(e) => warn!("[mcp] Writer task panicked: {}", e),
        }
        read_result
    }
}

/// Turn one input line into at most one response. Notifications yield `None`.
pub async fn handle_message(dispatcher: &ToolDispatcher, line: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            warn!("[mcp] Unparseable message: {}", e);
            return Some(JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)));
        }
    };

    let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
        Ok(r) => r,
        Err(e) => {
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {}", e)));
        }
    };

    if request.is_notification() {
        debug!("[mcp] Notification: {}", request.method);
        return None;
    }
    let id = request.id.clone().unwrap_or(Value::Null);
    let params = request.params.unwrap_or(Value::Null);

    let response = match request.method.as_str() {
        "initialize" => initialize(params).map(|r| JsonRpcResponse::success(id.clone(), r)),
        "ping" => Ok(JsonRpcResponse::success(id.clone(), json!({}))),
        "tools/list" => serde_json::to_value(ToolsListResult { tools: tools::definitions() })
            .map(|r| JsonRpcResponse::success(id.clone(), r))
            .map_err(|e| (INVALID_REQUEST, e.to_string())),
        "tools/call" => match serde_json::from_value::<ToolCallParams>(params) {
            Ok(call) => {
                let result = dispatcher.execute(&call.name, &call.arguments).await;
                serde_json::to_value(result)
                    .map(|r| JsonRpcResponse::success(id.clone(), r))
                    .map_err(|e| (INVALID_REQUEST, e.to_string()))
            }
            Err(e) => Err((INVALID_PARAMS, format!("Invalid tools/call params: {}", e))),
        },
        other => Err((METHOD_NOT_FOUND, format!("Method not found: {}", other))),
    };

    Some(response.unwrap_or_else(|(code, message)| {
        warn!("[mcp] {} failed: {}", request.method, message);
        JsonRpcResponse::error(id, code, message)
    }))
}

fn initialize(params: Value) -> Result<Value, (i32, String)> {
    let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
    if let Some(client) = &params.client_info {
        info!(
            "[mcp] Client connected: {} {}",
            client.name,
            client.version.as_deref().unwrap_or("")
        );
    }
    let result = InitializeResult {
        protocol_version: params.protocol_version.unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
        capabilities: McpServerCapabilities::default(),
        server_info: McpPeerInfo {
            name: SERVER_NAME.into(),
            version: Some(env!("CARGO_PKG_VERSION").into()),
        },
    };
    serde_json::to_value(result).map_err(|e| (INVALID_REQUEST, e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────
