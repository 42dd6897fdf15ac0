// CIGAM Tools: Service Catalog & Passthrough
// cigam_list_services, cigam_custom_query

use super::{optional_str, required_str};
use crate::atoms::error::{CigamError, CigamResult};
use crate::atoms::types::ToolDefinition;
use crate::engine::client::CigamClient;
use serde_json::{json, Map, Value};

/// ERP integration domains and the services each one offers.
const SERVICE_CATALOG: &[(&str, &[&str])] = &[
    ("Compras", &["Material Requisition", "Purchase Orders"]),
    ("Estoque", &["Material Registration", "Stock Movements"]),
    ("Faturamento", &["Invoice Registration", "Order Registration"]),
    ("Financeiro", &["Account Registration", "Contracts"]),
    ("Fiscal", &["Tax Documents", "Fiscal Notes"]),
];

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "cigam_list_services",
            "List all available CIGAM integration services",
            json!({ "type": "object", "properties": {} }),
        ),
        ToolDefinition::new(
            "cigam_custom_query",
            "Execute a custom query to CIGAM API",
            json!({
                "type": "object",
                "properties": {
                    "service": { "type": "string", "description": "Service name/endpoint" },
                    "method": {
                        "type": "string",
                        "description": "HTTP method (GET, POST, PUT, DELETE)",
                        "default": "GET"
                    },
                    "params": { "type": "object", "description": "Query parameters or request body" }
                },
                "required": ["service"]
            }),
        ),
    ]
}

/// Static listing, no backend call.
pub fn list_services() -> Value {
    let services: Vec<Value> = SERVICE_CATALOG
        .iter()
        .map(|(domain, services)| json!({ "domain": domain, "services": services }))
        .collect();
    json!({ "services": services })
}

pub async fn custom_query(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let service = required_str(args, "service")?;
    let method = optional_str(args, "method").unwrap_or("GET");
    let params = match args.get("params") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(m)) => m.clone(),
        Some(_) => return Err(CigamError::invalid_args("'params' must be an object")),
    };
    let result = client.custom_query(service, method, &params).await?;
    Ok(json!({ "result": result }))
}
