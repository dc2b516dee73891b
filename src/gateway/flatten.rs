//! One-level flattening of enrichment reports.
//!
//! Enrichment responses are a shallow object of named sub-reports. Clients
//! want a single flat record: nested objects are merged into the parent with
//! `<outer>_<inner>` keys and lists become comma-separated strings.

use serde_json::{Map, Value};

/// Placeholder emitted for empty lists.
const EMPTY_LIST: &str = "None";

/// Flatten `value` if it is an object; anything else is returned unchanged.
pub fn flatten(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(flatten_object(map)),
        other => other,
    }
}

/// Flatten one level of nesting. Later keys win on collision.
pub fn flatten_object(map: Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::with_capacity(map.len());

    for (key, value) in map {
        match value {
            Value::Object(nested) => {
                for (inner_key, inner_value) in nested {
                    flat.insert(format!("{}_{}", key, inner_key), inner_value);
                }
            }
            Value::Array(items) => {
                flat.insert(key, Value::String(join_list(&items)));
            }
            other => {
                flat.insert(key, other);
            }
        }
    }

    flat
}

fn join_list(items: &[Value]) -> String {
    if items.is_empty() {
        return EMPTY_LIST.to_string();
    }
    items.iter().map(render).collect::<Vec<_>>().join(", ")
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
