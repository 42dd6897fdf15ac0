// CIGAM Tools: Finance
// cigam_get_invoices, cigam_get_accounts

use super::{filters_arg, limit_arg, limit_schema};
use crate::atoms::error::CigamResult;
use crate::atoms::types::ToolDefinition;
use crate::engine::client::CigamClient;
use serde_json::{json, Value};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "cigam_get_invoices",
            "Get invoices from CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "filters": {
                        "type": "object",
                        "description": "Optional filters for the query",
                        "properties": {
                            "invoiceNumber": { "type": "string", "description": "Invoice number" },
                            "customer": { "type": "string", "description": "Customer code or name" },
                            "status": { "type": "string", "description": "Invoice status" },
                            "dateFrom": { "type": "string", "description": "ISO date string for date from filter" },
                            "dateTo": { "type": "string", "description": "ISO date string for date to filter" }
                        }
                    },
                    "limit": limit_schema()
                }
            }),
        ),
        ToolDefinition::new(
            "cigam_get_accounts",
            "Get customer accounts from CIGAM ERP",
            json!({
                "type": "object",
                "properties": {
                    "filters": {
                        "type": "object",
                        "description": "Optional filters for the query",
                        "properties": {
                            "accountCode": { "type": "string", "description": "Account code" },
                            "name": { "type": "string", "description": "Account name" },
                            "taxId": { "type": "string", "description": "Tax ID (CNPJ/CPF)" },
                            "type": { "type": "string", "description": "Account type (customer, supplier, both)" }
                        }
                    },
                    "limit": limit_schema()
                }
            }),
        ),
    ]
}

pub async fn get_invoices(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let invoices = client.get_invoices(&filters_arg(args)?, limit_arg(args)).await?;
    Ok(json!({ "invoices": invoices }))
}

pub async fn get_accounts(client: &CigamClient, args: &Value) -> CigamResult<Value> {
    let accounts = client.get_accounts(&filters_arg(args)?, limit_arg(args)).await?;
    Ok(json!({ "accounts": accounts }))
}
