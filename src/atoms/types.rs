// ── CIGAM Atoms: Data Shapes ───────────────────────────────────────────────
// Transient request/response shapes. Nothing here outlives a single call
// except `Credentials`, which is fixed for the process lifetime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants::{DEFAULT_PRIORITY, DEFAULT_UNIT, ENV_BASE_URL, ENV_PIN};
use super::error::{CigamError, CigamResult};

// ── Credentials ────────────────────────────────────────────────────────────

/// Base address and shared secret for the ERP.
#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub pin: String,
}

impl Credentials {
    /// Validate and normalise the base address and PIN.
    /// A single trailing `/` is stripped from the base address.
    pub fn new(base_url: Option<&str>, pin: Option<&str>) -> CigamResult<Self> {
        let base_url = base_url.map(str::trim).unwrap_or_default();
        let pin = pin.map(str::trim).unwrap_or_default();
        if base_url.is_empty() || pin.is_empty() {
            return Err(CigamError::Config(format!(
                "{} and {} environment variables are required",
                ENV_BASE_URL, ENV_PIN
            )));
        }
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
        Ok(Credentials { base_url: base_url.to_string(), pin: pin.to_string() })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("pin", &"<redacted>")
            .finish()
    }
}

// ── Tool catalog ───────────────────────────────────────────────────────────

/// A single tool advertised through `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool's input.
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        ToolDefinition {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

// ── Tool Result Envelope ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Uniform wrapper returned for every tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Success envelope carrying `payload` as pretty-printed JSON text.
    pub fn success(payload: Value) -> Self {
        ToolCallResult {
            content: vec![ToolContent::Text { text: pretty(&payload) }],
            is_error: false,
        }
    }

    /// Failure envelope carrying `{"error": message}`.
    pub fn failure(message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        ToolCallResult {
            content: vec![ToolContent::Text { text: pretty(&payload) }],
            is_error: true,
        }
    }

    /// Text of the first content block, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ── Requisitions ───────────────────────────────────────────────────────────

/// A requisition line as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionItem {
    pub material_code: String,
    pub quantity: serde_json::Number,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub required_date: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A requisition as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RequisitionRequest {
    pub items: Vec<RequisitionItem>,
    #[serde(default)]
    pub requestor: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Wire shape of a requisition line.
#[derive(Debug, Clone, Serialize)]
pub struct RequisitionLine {
    pub material_code: String,
    pub quantity: serde_json::Number,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<RequisitionItem> for RequisitionLine {
    fn from(item: RequisitionItem) -> Self {
        RequisitionLine {
            material_code: item.material_code,
            quantity: item.quantity,
            unit: non_empty_or(item.unit, DEFAULT_UNIT),
            required_date: item.required_date,
            cost_center: item.cost_center,
            notes: item.notes,
        }
    }
}

/// Wire shape of `POST /api/v1/requisitions`.
#[derive(Debug, Clone, Serialize)]
pub struct RequisitionPayload {
    pub items: Vec<RequisitionLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor: Option<String>,
    pub priority: String,
    pub request_date: String,
}

impl RequisitionPayload {
    /// Build the wire body, stamping `request_date` with the given time.
    pub fn build(request: RequisitionRequest, request_date: String) -> Self {
        RequisitionPayload {
            items: request.items.into_iter().map(RequisitionLine::from).collect(),
            requestor: request.requestor,
            priority: non_empty_or(request.priority, DEFAULT_PRIORITY),
            request_date,
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
