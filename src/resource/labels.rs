//! Label keys and label map editing

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Label (and annotation) marking which variant an object represents
pub const VERSION_LABEL: &str = "workflow/version";

/// Merge `delta` into `target`
///
/// Keys absent from `delta` are preserved; keys in both take `delta`'s value.
pub fn merge_labels(target: &mut BTreeMap<String, String>, delta: &BTreeMap<String, String>) {
    for (key, value) in delta {
        target.insert(key.clone(), value.clone());
    }
}

/// Merge `delta` into an optional label map, creating it if absent
pub fn merge_into(target: &mut Option<BTreeMap<String, String>>, delta: &BTreeMap<String, String>) {
    merge_labels(target.get_or_insert_with(BTreeMap::new), delta);
}

/// Merge `delta` into a label map nested in an opaque `spec`
pub fn merge_json_labels(target: &mut Map<String, Value>, delta: &BTreeMap<String, String>) {
    for (key, value) in delta {
        target.insert(key.clone(), Value::String(value.clone()));
    }
}
