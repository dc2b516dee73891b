//! Removal of upstream credit metadata from response trees.

use serde_json::Value;

/// Remove `field` from every object in `tree`, at any depth.
pub fn strip(mut tree: Value, field: &str) -> Value {
    strip_in_place(&mut tree, field);
    tree
}

/// In-place variant of [`strip`].
pub fn strip_in_place(node: &mut Value, field: &str) {
    match node {
        Value::Object(map) => {
            // swap_remove would reorder the remaining keys
            map.shift_remove(field);
            for value in map.values_mut() {
                if is_container(value) {
                    strip_in_place(value, field);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut().filter(|item| is_container(item)) {
                strip_in_place(item, field);
            }
        }
        _ => {}
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
