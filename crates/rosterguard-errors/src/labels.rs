use crate::model::ErrorObj;
use std::collections::BTreeMap;

pub fn labels(err: &ErrorObj) -> BTreeMap<&'static str, String> {
    let mut map = BTreeMap::new();
    map.insert("code", err.code.0.to_string());
    map.insert("kind", err.kind.as_str().to_string());
    map.insert("retryable", err.retryable.as_str().to_string());
    map.insert("severity", err.severity.as_str().to_string());

    if let Some(value) = err.meta.get("policy").and_then(|v| v.as_str()) {
        map.insert("policy", value.to_string());
    }
    if let Some(value) = err.meta.get("route").and_then(|v| v.as_str()) {
        map.insert("route", value.to_string());
    }

    map
}
