use serde_json::Value;

/// Copy of a config payload with one top-level field removed. For probing
/// missing-field validation.
pub fn without_field(config: &Value, field: &str) -> Value {
    let mut copy = config.clone();
    if let Some(map) = copy.as_object_mut() {
        map.remove(field);
    }
    copy
}

/// Copy of a config payload with one top-level field replaced.
pub fn with_field(config: &Value, field: &str, value: impl Into<Value>) -> Value {
    let mut copy = config.clone();
    if let Some(map) = copy.as_object_mut() {
        map.insert(field.to_string(), value.into());
    }
    copy
}
