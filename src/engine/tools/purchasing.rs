// CIGAM Tools: Purchasing
// cigam_get_purchase_orders, cigam_create_requisition

use super::{filters_arg, limit_arg, limit_schema};
use crate::atoms::error::{CigamError, CigamResult};
use crate::atoms::types::{RequisitionRequest, ToolDefinition};
use crate::engine::client::CigamClient;
use serde_json::{json, Value};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "cigam_get_purchase_orders",
            "Get purchase orders from CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "filters": {
                        "type": "object",
                        "description": "Optional filters for the query",
                        "properties": {
                            "orderNumber": { "type": "string", "description": "Purchase order number" },
                            "supplier": { "type": "string", "description": "Supplier code or name" },
                            "status": { "type": "string", "description": "Order status" },
                            "dateFrom": { "type": "string", "description": "ISO date string for date from filter" },
                            "dateTo": { "type": "string", "description": "ISO date string for date to filter" }
                        }
                    },
                    "limit": limit_schema()
                }
            }),
        ),
        ToolDefinition::new(
            "cigam_create_requisition",
            "Create a purchase requisition in CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "description": "List of items to requisition",
                        "items": {
                            "type": "object",
                            "properties": {
                                "materialCode": { "type": "string", "description": "Material code" },
                                "quantity": { "type": "number", "description": "Quantity to requisition" },
                                "unit": { "type": "string", "description": "Unit of measure" },
                                "requiredDate": { "type": "string", "description": "ISO date string for required date" },
                                "costCenter": { "type": "string", "description": "Cost center code" },
                                "notes": { "type": "string", "description": "Optional notes" }
                            },
                            "required": ["materialCode", "quantity"]
                        }
                    },
                    "requestor": { "type": "string", "description": "Requestor name or code" },
                    "priority": {
                        "type": "string",
                        "description": "Priority level (low, medium, high)",
                        "default": "medium"
                    }
                },
                "required": ["items"]
            }),
        ),
    ]
}

pub async fn get_purchase_orders(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let orders = client.get_purchase_orders(&filters_arg(args)?, limit_arg(args)).await?;
    Ok(json!({ "orders": orders }))
}

pub async fn create_requisition(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    if !args.get("items").is_some_and(Value::is_array) {
        return Err(CigamError::invalid_args("'items' must be an array of requisition items"));
    }
    let request: RequisitionRequest = serde_json::from_value(args.clone())
        .map_err(|e| CigamError::invalid_args(format!("requisition: {}", e)))?;
    let requisition = client.create_requisition(request).await?;
    Ok(json!({ "requisition": requisition }))
}
