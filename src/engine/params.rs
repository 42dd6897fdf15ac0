// CIGAM Bridge: Parameter Normalizer
// camelCase filter bags → snake_case query parameters, empties dropped.

use serde_json::{Map, Value};

/// Rewrite `key` by inserting `_` before every ASCII uppercase letter and
/// lowercasing it. `materialCode` → `material_code`.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Whether a filter value carries nothing worth sending.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Build API query parameters from a caller-supplied filter bag.
pub fn build_query_params(filters: &Map<String, Value>) -> Map<String, Value> {
    filters
        .iter()
        .filter(|(_, v)| !is_blank(v))
        .map(|(k, v)| (to_snake_case(k), v.clone()))
        .collect()
}

/// Render a JSON scalar the way it should appear in a query string.
/// Strings go through verbatim; everything else uses its JSON text.
pub fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
