// CIGAM Bridge: Tool Registry & Dispatcher
// Each tool group is a self-contained module with definitions + handlers.
// Names resolve to a `CigamTool` variant; anything else is an unknown
// tool. Every failure is turned into an `isError` envelope here, so
// nothing below this point can reach the protocol layer as a fault.

use crate::atoms::constants::DEFAULT_LIMIT;
use crate::atoms::error::{CigamError, CigamResult};
use crate::atoms::types::{ToolCallResult, ToolDefinition};
use crate::engine::client::CigamClient;
use log::{info, warn};
use serde_json::{json, Map, Value};

pub mod finance;
pub mod inventory;
pub mod purchasing;
pub mod services;

// ── Catalog ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigamTool {
    ListServices,
    GetMaterials,
    GetStock,
    GetPurchaseOrders,
    GetInvoices,
    CreateRequisition,
    GetAccounts,
    CustomQuery,
}

impl CigamTool {
    pub const ALL: [CigamTool; 8] = [
        CigamTool::ListServices,
        CigamTool::GetMaterials,
        CigamTool::GetStock,
        CigamTool::GetPurchaseOrders,
        CigamTool::GetInvoices,
        CigamTool::CreateRequisition,
        CigamTool::GetAccounts,
        CigamTool::CustomQuery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CigamTool::ListServices => "cigam_list_services",
            CigamTool::GetMaterials => "cigam_get_materials",
            CigamTool::GetStock => "cigam_get_stock",
            CigamTool::GetPurchaseOrders => "cigam_get_purchase_orders",
            CigamTool::GetInvoices => "cigam_get_invoices",
            CigamTool::CreateRequisition => "cigam_create_requisition",
            CigamTool::GetAccounts => "cigam_get_accounts",
            CigamTool::CustomQuery => "cigam_custom_query",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Every tool this server advertises, in catalog order.
pub fn definitions() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(services::definitions());
    tools.extend(inventory::definitions());
    tools.extend(purchasing::definitions());
    tools.extend(finance::definitions());
    tools.sort_by_key(|d| {
        CigamTool::from_name(&d.name)
            .and_then(|t| CigamTool::ALL.iter().position(|x| *x == t))
            .unwrap_or(usize::MAX)
    });
    tools
}

// ── Dispatcher ─────────────────────────────────────────────────────────────

pub struct ToolDispatcher {
    client: CigamClient,
}

impl ToolDispatcher {
    pub fn new(client: CigamClient) -> Self {
        ToolDispatcher { client }
    }

    /// Run one tool call. Never fails: errors come back as `isError` envelopes.
    pub async fn execute(&self, name: &str, args: &Value) -> ToolCallResult {
        let args_str = args.to_string();
        info!(
            "[tool] Executing {} args={}",
            name,
            &args_str[..floor_char_boundary(&args_str, 200)]
        );

        let result = match CigamTool::from_name(name) {
            Some(tool) => self.run(tool, args).await,
            None => Err(CigamError::UnknownTool(name.to_string())),
        };

        match result {
            Ok(payload) => ToolCallResult::success(payload),
            Err(e) => {
                warn!("[tool] {} failed: {}", name, e);
                ToolCallResult::failure(e.to_string())
            }
        }
    }

    async fn run(&self, tool: CigamTool, args: &Value) -> CigamResult<Value> {
        let c = &self.client;
        match tool {
            CigamTool::ListServices => Ok(services::list_services()),
            CigamTool::GetMaterials => inventory::get_materials(c, args).await,
            CigamTool::GetStock => inventory::get_stock(c, args).await,
            CigamTool::GetPurchaseOrders => purchasing::get_purchase_orders(c, args).await,
            CigamTool::GetInvoices => finance::get_invoices(c, args).await,
            CigamTool::CreateRequisition => purchasing::create_requisition(c, args).await,
            CigamTool::GetAccounts => finance::get_accounts(c, args).await,
            CigamTool::CustomQuery => services::custom_query(c, args).await,
        }
    }
}

// ── Argument helpers (shared by tool modules) ──────────────────────────────

fn limit_schema() -> Value {
    json!({
        "type": "number",
        "description": "Maximum number of records to return",
        "default": DEFAULT_LIMIT
    })
}

/// `filters` as a map; absent or null is an empty bag.
fn filters_arg(args: &Value) -> CigamResult<Map<String, Value>> {
    match args.get("filters") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(m)) => Ok(m.clone()),
        Some(_) => Err(CigamError::invalid_args("'filters' must be an object")),
    }
}

/// `limit` truncated to a whole number if it is at least 1, else the
/// default page size.
fn limit_arg(args: &Value) -> u64 {
    let limit = &args["limit"];
    limit
        .as_u64()
        .or_else(|| limit.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

fn required_str<'a>(args: &'a Value, key: &str) -> CigamResult<&'a str> {
    optional_str(args, key).ok_or_else(|| CigamError::invalid_args(format!("'{}' is required", key)))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args[key].as_str().filter(|s| !s.is_empty())
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

// ── Tests ──────────────────────────────────────────────────────────────────
