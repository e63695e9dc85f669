//! Purpose: Provide the runtime JSON decode entrypoints.
//! Exports: `from_str`, `is_json_string`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: `is_json_string` accepts exactly the texts `from_str::<Value>` accepts.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

/// Returns whether `input` is one complete JSON document.
///
/// The text is decoded and the result thrown away; any JSON value counts,
/// not only objects.
pub fn is_json_string(input: &str) -> bool {
    from_str::<Value>(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{from_str, is_json_string};
    use serde_json::Value;

    #[test]
    fn accepts_any_json_value() {
        for text in [r#"{"a":1}"#, "[1,2]", "42", "\"text\"", "null", " true "] {
            assert!(is_json_string(text), "expected json: {text}");
        }
    }

    #[test]
    fn rejects_non_json_text() {
        for text in ["", "not a json string", "{a:1}", "{\"a\":1} trailing", "'x'"] {
            assert!(!is_json_string(text), "expected non-json: {text}");
        }
    }

    #[test]
    fn predicate_agrees_with_value_decode() {
        let shallow = format!("{}0{}", "[".repeat(8), "]".repeat(8));
        assert!(is_json_string(&shallow));

        let deep = format!("{}0{}", "[".repeat(256), "]".repeat(256));
        assert_eq!(is_json_string(&deep), from_str::<Value>(&deep).is_ok());
    }
}
