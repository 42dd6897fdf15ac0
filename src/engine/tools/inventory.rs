// CIGAM Tools: Inventory
// cigam_get_materials, cigam_get_stock

use super::{filters_arg, limit_arg, limit_schema, optional_str, required_str};
use crate::atoms::error::CigamResult;
use crate::atoms::types::ToolDefinition;
use crate::engine::client::CigamClient;
use serde_json::{json, Value};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "cigam_get_materials",
            "Get materials/products from CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "filters": {
                        "type": "object",
                        "description": "Optional filters for the query",
                        "properties": {
                            "code": { "type": "string", "description": "Material code" },
                            "description": { "type": "string", "description": "Material description" },
                            "modifiedAfter": { "type": "string", "description": "ISO date string for modified after filter" }
                        }
                    },
                    "limit": limit_schema()
                }
            }),
        ),
        ToolDefinition::new(
            "cigam_get_stock",
            "Get stock information from CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "materialCode": { "type": "string", "description": "Material code to get stock for" },
                    "warehouse": { "type": "string", "description": "Optional warehouse code" }
                },
                "required": ["materialCode"]
            }),
        ),
    ]
}

pub async fn get_materials(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let materials = client.get_materials(&filters_arg(args)?, limit_arg(args)).await?;
    Ok(json!({ "materials": materials }))
}

pub async fn get_stock(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let material_code = required_str(args, "materialCode")?;
    let stock = client.get_stock(material_code, optional_str(args, "warehouse")).await?;
    Ok(json!({ "stock": stock }))
}
