//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`.
//! Role: Shared contract helper for CLI diagnostics (non-error events).
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub cmd: String,
    pub attribute: String,
    pub message: String,
    pub details: Map<String, Value>,
}

impl Notice {
    /// Notice for attribute text that failed JSON validation; the raw text goes in `details.value`.
    pub fn not_json(cmd: &str, attribute: &str, raw: &str) -> Self {
        let mut details = Map::new();
        details.insert("value".to_string(), Value::String(raw.to_string()));
        Self {
            kind: "not-json".to_string(),
            cmd: cmd.to_string(),
            attribute: attribute.to_string(),
            message: "attribute value is not a JSON string; using defaults".to_string(),
            details,
        }
    }
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("attribute".to_string(), json!(notice.attribute));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}
