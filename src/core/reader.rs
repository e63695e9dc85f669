//! Purpose: Read JSON options from one element attribute and merge them over defaults.
//! Exports: `OptionsRequest`, `get_options_from_attribute`.
//! Role: The crate's single user-facing operation; everything else supports it.
//! Invariants: Never fails; every bad input degrades to a copy of the defaults.
//! Invariants: Caller defaults are never mutated; results are fresh maps.
//! Invariants: Parsed keys override defaults; default-only keys survive the merge.
//! Notes: "Missing" diagnostics are gated by `dev`; the non-JSON warning is not.
use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use crate::core::coerce::coerce_options;
use crate::core::target::AttributeTarget;
use crate::core::value::{Options, json_type_name};
use crate::json::parse;

type StringCallback<'a> = Box<dyn FnMut(&str) + 'a>;

/// Parameters for one attribute read.
///
/// Every field has a default: no target, empty attribute name, empty defaults,
/// no numeric keys, no callback, `dev` off.
#[derive(Default)]
pub struct OptionsRequest<'a> {
    target: Option<&'a dyn AttributeTarget>,
    attribute_name: String,
    default_options: Options,
    numeric_values: BTreeSet<String>,
    on_is_string: Option<StringCallback<'a>>,
    dev: bool,
}

impl<'a> OptionsRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: &'a dyn AttributeTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_optional_target(mut self, target: Option<&'a dyn AttributeTarget>) -> Self {
        self.target = target;
        self
    }

    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    pub fn with_default_options(mut self, defaults: Options) -> Self {
        self.default_options = defaults;
        self
    }

    pub fn with_numeric_values<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_values = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Installs a callback that receives the raw attribute text when it is not JSON.
    pub fn with_on_is_string(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.on_is_string = Some(Box::new(callback));
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn default_options(&self) -> &Options {
        &self.default_options
    }

    pub fn numeric_values(&self) -> &BTreeSet<String> {
        &self.numeric_values
    }

    pub fn dev(&self) -> bool {
        self.dev
    }

    pub fn read(&mut self) -> Options {
        get_options_from_attribute(self)
    }
}

impl fmt::Debug for OptionsRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsRequest")
            .field("has_target", &self.target.is_some())
            .field("attribute_name", &self.attribute_name)
            .field("default_options", &self.default_options)
            .field("numeric_values", &self.numeric_values)
            .field("has_on_is_string", &self.on_is_string.is_some())
            .field("dev", &self.dev)
            .finish()
    }
}

/// Reads `request`'s attribute from its target and returns the merged options.
///
/// The request is borrowed mutably only to call the string callback; it can be
/// read again and yields the same result for the same target state.
pub fn get_options_from_attribute(request: &mut OptionsRequest<'_>) -> Options {
    let name = request.attribute_name.as_str();

    let Some(target) = request.target else {
        if request.dev {
            tracing::warn!(attribute = name, "target not found");
        }
        return request.default_options.clone();
    };

    if !target.has_attribute(name) {
        if request.dev {
            tracing::warn!(attribute = name, "attribute not found on target");
        }
        return request.default_options.clone();
    }

    let raw = match target.get_attribute(name) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return request.default_options.clone(),
    };

    if !parse::is_json_string(&raw) {
        match request.on_is_string.as_mut() {
            Some(callback) => callback(&raw),
            None => tracing::warn!(attribute = name, value = %raw, "attribute is not a JSON string"),
        }
        return request.default_options.clone();
    }

    let parsed = match parse::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            if request.dev {
                tracing::warn!(
                    attribute = name,
                    kind = json_type_name(&other),
                    "attribute JSON is not an object; using defaults"
                );
            }
            return request.default_options.clone();
        }
        Err(err) => {
            tracing::warn!(attribute = name, error = %err, "attribute JSON failed to decode");
            return request.default_options.clone();
        }
    };

    let coerced = coerce_options(parsed, &request.numeric_values);
    if request.dev {
        tracing::debug!(attribute = name, keys = coerced.len(), "parsed attribute options");
    }

    let mut merged = request.default_options.clone();
    merged.extend(coerced);
    merged
}

#[cfg(test)]
mod tests {
    use super::OptionsRequest;
    use crate::core::target::AttributeMap;
    use crate::core::value::{OptionValue, Options};
    use std::cell::Cell;

    fn defaults() -> Options {
        let mut options = Options::new();
        options.insert("key".to_string(), OptionValue::from("value"));
        options
    }

    #[test]
    fn empty_request_returns_empty_options() {
        let mut request = OptionsRequest::new();
        assert!(request.read().is_empty());
        assert_eq!(request.attribute_name(), "");
        assert!(!request.dev());
    }

    #[test]
    fn empty_attribute_name_is_looked_up_verbatim() {
        let element = AttributeMap::new().with_attribute("", r#"{"a":"1"}"#);
        let mut request = OptionsRequest::new().with_target(&element);
        assert_eq!(request.read()["a"], OptionValue::from("1"));
    }

    #[test]
    fn callback_is_skipped_for_valid_json() {
        let calls = Cell::new(0);
        let element = AttributeMap::new().with_attribute("data-options", r#"{"x":1}"#);
        let mut request = OptionsRequest::new()
            .with_target(&element)
            .with_attribute_name("data-options")
            .with_on_is_string(|_| calls.set(calls.get() + 1));
        request.read();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn parsed_keys_override_defaults() {
        let element = AttributeMap::new().with_attribute("data-options", r#"{"key":"other"}"#);
        let mut request = OptionsRequest::new()
            .with_target(&element)
            .with_attribute_name("data-options")
            .with_default_options(defaults())
            .with_numeric_values(["width", "height", "width"]);
        assert_eq!(request.numeric_values().len(), 2);
        assert!(request.numeric_values().contains("height"));
        let result = request.read();
        assert_eq!(result.len(), 1);
        assert_eq!(result["key"], OptionValue::from("other"));
        assert_eq!(request.default_options(), &defaults());
    }

    #[test]
    fn non_object_json_keeps_defaults() {
        for raw in ["[1,2,3]", "42", "\"text\"", "null", "true"] {
            let element = AttributeMap::new().with_attribute("data-options", raw);
            let mut request = OptionsRequest::new()
                .with_target(&element)
                .with_attribute_name("data-options")
                .with_default_options(defaults())
                .with_dev(true);
            assert_eq!(request.read(), defaults(), "input {raw}");
        }
    }

    #[test]
    fn debug_output_hides_callback_and_target() {
        let element = AttributeMap::new();
        let request = OptionsRequest::new()
            .with_target(&element)
            .with_on_is_string(|_| {});
        let text = format!("{request:?}");
        assert!(text.contains("has_target: true"));
        assert!(text.contains("has_on_is_string: true"));
    }
}
