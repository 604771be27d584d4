use serde_json::Value;

fn prune_node(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let mut pruned = serde_json::Map::new();
            for (key, entry) in map {
                if let Some(kept) = prune_node(entry) {
                    pruned.insert(key.clone(), kept);
                }
            }
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        Value::Array(items) => {
            let kept: Vec<Value> = items.iter().filter_map(prune_node).collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Array(kept))
            }
        }
        _ => Some(value.clone()),
    }
}

/// Recursively drops nulls and containers that end up empty after pruning.
/// A parameter present but empty vanishes from the query string entirely.
pub fn prune_empty_values(value: &Value) -> Value {
    match prune_node(value) {
        Some(pruned) => pruned,
        None => match value {
            Value::Object(_) => Value::Object(serde_json::Map::new()),
            Value::Array(_) => Value::Array(Vec::new()),
            _ => Value::Null,
        },
    }
}
