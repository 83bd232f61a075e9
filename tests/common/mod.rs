//! Shared utilities for integration tests.

pub mod harness;

/// Builds an import document with one entry per `(title, category)` pair.
#[allow(dead_code)]
pub fn import_document(entries: &[(&str, &str)]) -> String {
    let notes: Vec<serde_json::Value> = entries
        .iter()
        .map(|(title, category)| serde_json::json!({ "title": title, "category": category }))
        .collect();
    serde_json::json!({ "notes": notes }).to_string()
}
