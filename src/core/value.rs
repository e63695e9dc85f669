//! Purpose: Define option values and option maps produced by the attribute reader.
//! Exports: `OptionValue`, `Options`, JSON conversion helpers.
//! Role: Input/output shapes shared by the reader, the CLI, and API users.
//! Invariants: Forced floats keep NaN and infinities; JSON values are never rewritten.
//! Invariants: Serializing a non-finite float writes `null`.
//! Invariants: Option maps keep insertion order; decoded objects keep their written order.
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

/// Options keyed by name, iterated in insertion order.
pub type Options = IndexMap<String, OptionValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// A value as decoded from JSON (booleans produced by coercion land here too).
    Json(Value),
    /// A string forced through float parsing; may be NaN.
    Float(f64),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Json(value) => value.as_bool(),
            OptionValue::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Json(value) => value.as_f64(),
            OptionValue::Float(value) => Some(*value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Json(value) => value.as_str(),
            OptionValue::Float(_) => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, OptionValue::Float(value) if value.is_nan())
    }

    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::Json(value) => value.clone(),
            OptionValue::Float(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Json(value) => value.serialize(serializer),
            OptionValue::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Json(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Json(Value::Bool(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Json(Value::String(value))
    }
}

pub fn options_from_json(map: Map<String, Value>) -> Options {
    map.into_iter()
        .map(|(key, value)| (key, OptionValue::Json(value)))
        .collect()
}

/// Strict decode used for caller-supplied defaults: the text must be a JSON object.
pub fn options_from_json_str(input: &str) -> Result<Options, Error> {
    let value: Value = parse::from_str(input).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("invalid options json: {err}"))
            .with_source(err)
    })?;
    match value {
        Value::Object(map) => Ok(options_from_json(map)),
        other => Err(Error::new(ErrorKind::Parse).with_message(format!(
            "options json must be an object, got {}",
            json_type_name(&other)
        ))),
    }
}

pub fn options_to_json(options: &Options) -> Value {
    let map = options
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect::<Map<String, Value>>();
    Value::Object(map)
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
