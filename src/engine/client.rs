// CIGAM Bridge: Domain Operations
//
// The fixed catalog of ERP calls. Each one shapes its parameters and
// makes exactly one request through the injected transport.

use crate::atoms::constants::API_PREFIX;
use crate::atoms::error::{CigamError, CigamResult};
use crate::atoms::types::{Credentials, RequisitionPayload, RequisitionRequest};
use crate::engine::dates::{Clock, SystemClock};
use crate::engine::http::{ApiRequest, HttpTransport, Transport};
use crate::engine::params::build_query_params;
use log::info;
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct CigamClient {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl CigamClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_clock(transport, Arc::new(SystemClock))
    }

    pub fn with_clock(transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        CigamClient { transport, clock }
    }

    /// Production client: reqwest transport + wall clock.
    pub fn connect(credentials: Credentials) -> CigamResult<Self> {
        info!("[cigam] Using ERP at {}", credentials.base_url);
        Ok(Self::new(Arc::new(HttpTransport::new(credentials)?)))
    }

    // ── Listings ───────────────────────────────────────────────────────────

    pub async fn get_materials(&self, filters: &Map<String, Value>, limit: u64) -> CigamResult<Value> {
        self.list("/api/v1/materials", filters, limit).await
    }

    pub async fn get_purchase_orders(&self, filters: &Map<String, Value>, limit: u64) -> CigamResult<Value> {
        self.list("/api/v1/purchase_orders", filters, limit).await
    }

    pub async fn get_invoices(&self, filters: &Map<String, Value>, limit: u64) -> CigamResult<Value> {
        self.list("/api/v1/invoices", filters, limit).await
    }

    pub async fn get_accounts(&self, filters: &Map<String, Value>, limit: u64) -> CigamResult<Value> {
        self.list("/api/v1/accounts", filters, limit).await
    }

    async fn list(&self, path: &str, filters: &Map<String, Value>, limit: u64) -> CigamResult<Value> {
        let mut query = build_query_params(filters);
        query.insert("limit".into(), Value::from(limit));
        self.transport.send(ApiRequest::get(path, query)).await
    }

    // ── Stock ──────────────────────────────────────────────────────────────

    pub async fn get_stock(&self, material_code: &str, warehouse: Option<&str>) -> CigamResult<Value> {
        let mut query = Map::new();
        query.insert("material_code".into(), Value::from(material_code));
        if let Some(w) = warehouse.filter(|w| !w.is_empty()) {
            query.insert("warehouse".into(), Value::from(w));
        }
        self.transport.send(ApiRequest::get("/api/v1/stock", query)).await
    }

    // ── Requisitions ───────────────────────────────────────────────────────

    /// `request_date` is taken from the clock at send time.
    pub async fn create_requisition(&self, request: RequisitionRequest) -> CigamResult<Value> {
        let payload = RequisitionPayload::build(request, self.clock.timestamp());
        info!(
            "[cigam] Creating requisition: {} item(s), priority={}",
            payload.items.len(),
            payload.priority
        );
        let body = serde_json::to_value(&payload)?;
        self.transport.send(ApiRequest::post("/api/v1/requisitions", body)).await
    }

    // ── Passthrough ────────────────────────────────────────────────────────

    /// Arbitrary call. `service` is used as-is when it starts with `/`,
    /// otherwise it is placed under `/api/v1/`. GET and DELETE send
    /// normalized `params` as the query; other methods send them verbatim
    /// as the JSON body.
    pub async fn custom_query(
        &self,
        service: &str,
        method: &str,
        params: &Map<String, Value>,
    ) -> CigamResult<Value> {
        let method = parse_method(method)?;
        let path = service_path(service);
        info!("[cigam] Custom query: {} {}", method, path);

        let request = if method == Method::GET || method == Method::DELETE {
            ApiRequest { method, path, query: build_query_params(params), body: None }
        } else {
            ApiRequest { method, path, query: Map::new(), body: Some(Value::Object(params.clone())) }
        };
        self.transport.send(request).await
    }
}

fn service_path(service: &str) -> String {
    if service.starts_with('/') {
        service.to_string()
    } else {
        format!("{}/{}", API_PREFIX, service)
    }
}

fn parse_method(method: &str) -> CigamResult<Method> {
    let upper = method.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(upper.as_bytes())
        .map_err(|e| CigamError::Request(format!("invalid HTTP method '{}': {}", method, e)))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dates::FixedClock;
    use crate::engine::test_support::RecordingTransport;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn client(transport: &Arc<RecordingTransport>) -> CigamClient {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        CigamClient::with_clock(transport.clone(), Arc::new(clock))
    }

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_stock_without_warehouse() {
        let t = Arc::new(RecordingTransport::replying(json!({"qty": 10})));
        let out = client(&t).get_stock("ABC-1", None).await.unwrap();
        assert_eq!(out, json!({"qty": 10}));

        let req = t.last();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/api/v1/stock");
        assert_eq!(Value::Object(req.query), json!({"material_code": "ABC-1"}));
    }

    #[tokio::test]
    async fn test_stock_with_warehouse() {
        let t = Arc::new(RecordingTransport::replying(json!(null)));
        client(&t).get_stock("ABC-1", Some("W01")).await.unwrap();
        assert_eq!(Value::Object(t.last().query), json!({"material_code": "ABC-1", "warehouse": "W01"}));

        client(&t).get_stock("ABC-1", Some("")).await.unwrap();
        assert!(!t.last().query.contains_key("warehouse"));
    }

    #[tokio::test]
    async fn test_listings_normalize_and_limit() {
        let t = Arc::new(RecordingTransport::replying(json!([])));
        let c = client(&t);
        let filters = map(json!({"orderNumber": "PO-1", "status": "", "dateFrom": "2024-01-01"}));

        c.get_purchase_orders(&filters, 100).await.unwrap();
        let req = t.last();
        assert_eq!(req.path, "/api/v1/purchase_orders");
        assert_eq!(
            Value::Object(req.query),
            json!({"order_number": "PO-1", "date_from": "2024-01-01", "limit": 100})
        );

        c.get_materials(&map(json!({"modifiedAfter": "2024-02-01"})), 5).await.unwrap();
        assert_eq!(t.last().path, "/api/v1/materials");
        assert_eq!(t.last().query["modified_after"], "2024-02-01");
        assert_eq!(t.last().query["limit"], 5);

        c.get_invoices(&Map::new(), 100).await.unwrap();
        assert_eq!(t.last().path, "/api/v1/invoices");

        c.get_accounts(&map(json!({"taxId": "123"})), 100).await.unwrap();
        assert_eq!(t.last().path, "/api/v1/accounts");
        assert_eq!(t.last().query["tax_id"], "123");
        assert_eq!(t.count(), 4);
    }

    #[tokio::test]
    async fn test_requisition_payload() {
        let t = Arc::new(RecordingTransport::replying(json!({"id": 99})));
        let request: RequisitionRequest = serde_json::from_value(json!({
            "items": [{"materialCode": "X1", "quantity": 5}],
            "requestor": "maria"
        }))
        .unwrap();

        let out = client(&t).create_requisition(request).await.unwrap();
        assert_eq!(out["id"], 99);

        let req = t.last();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/api/v1/requisitions");
        assert!(req.query.is_empty());
        assert_eq!(
            req.body.unwrap(),
            json!({
                "items": [{"material_code": "X1", "quantity": 5, "unit": "UN"}],
                "requestor": "maria",
                "priority": "medium",
                "request_date": "2024-06-01T12:00:00.000Z"
            })
        );
    }

    #[tokio::test]
    async fn test_custom_query_get_uses_query() {
        let t = Arc::new(RecordingTransport::replying(json!({})));
        let params = map(json!({"fiscalYear": 2024, "note": null}));
        client(&t).custom_query("ledger_entries", "get", &params).await.unwrap();

        let req = t.last();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/api/v1/ledger_entries");
        assert_eq!(Value::Object(req.query), json!({"fiscal_year": 2024}));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_custom_query_post_uses_raw_body() {
        let t = Arc::new(RecordingTransport::replying(json!({})));
        let params = map(json!({"orderNumber": "A-1"}));
        client(&t).custom_query("/custom/path", "POST", &params).await.unwrap();

        let req = t.last();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/custom/path");
        assert!(req.query.is_empty());
        assert_eq!(req.body.unwrap(), json!({"orderNumber": "A-1"}));
    }

    #[tokio::test]
    async fn test_custom_query_delete_and_default_method() {
        let t = Arc::new(RecordingTransport::replying(json!({})));
        let c = client(&t);
        c.custom_query("items", "delete", &map(json!({"itemId": 3}))).await.unwrap();
        assert_eq!(t.last().method, Method::DELETE);
        assert_eq!(t.last().query["item_id"], 3);

        c.custom_query("items", "", &Map::new()).await.unwrap();
        assert_eq!(t.last().method, Method::GET);
    }

    #[tokio::test]
    async fn test_custom_query_bad_method() {
        let t = Arc::new(RecordingTransport::replying(json!({})));
        let err = client(&t).custom_query("items", "GE T", &Map::new()).await.unwrap_err();
        assert!(matches!(err, CigamError::Request(_)));
        assert_eq!(t.count(), 0);
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let t = Arc::new(RecordingTransport::failing(404, "not found"));
        let err = client(&t).get_materials(&Map::new(), 100).await.unwrap_err();
        assert_eq!(err.to_string(), "CIGAM API Error: 404 - not found");
    }
}
