use serde_json::{Map, Value};

/// Encodes `value` with object keys in lexical order at every depth, so equal documents
/// give equal bytes whichever map ordering serde_json was built with.
pub fn stable_json_bytes(value: &Value) -> Vec<u8> {
    canonicalize(value).to_string().into_bytes()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries = object.iter().collect::<Vec<_>>();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            let mut out = Map::new();
            for (key, item) in entries {
                out.insert(key.clone(), canonicalize(item));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
#[path = "stable_json_test.rs"]
mod tests;
