//! Purpose: Apply the shallow, key-by-key coercion rules to decoded attribute options.
//! Exports: `coerce_options`, `coerce_value`, `parse_float`.
//! Role: Pure helpers used by the reader after the attribute text decodes as an object.
//! Invariants: `"true"`/`"false"` strings win over numeric coercion for every key.
//! Invariants: Only top-level string values change; nested arrays/objects pass through.
//! Invariants: Numeric coercion never fails; text without a numeric prefix yields NaN.
use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::core::value::{OptionValue, Options};

pub fn coerce_options(parsed: Map<String, Value>, numeric_values: &BTreeSet<String>) -> Options {
    parsed
        .into_iter()
        .map(|(key, value)| {
            let is_numeric = numeric_values.contains(&key);
            (key, coerce_value(value, is_numeric))
        })
        .collect()
}

pub fn coerce_value(value: Value, is_numeric: bool) -> OptionValue {
    match value {
        Value::String(text) if text == "false" => OptionValue::Json(Value::Bool(false)),
        Value::String(text) if text == "true" => OptionValue::Json(Value::Bool(true)),
        Value::String(text) if is_numeric && !text.is_empty() => {
            OptionValue::Float(parse_float(&text))
        }
        other => OptionValue::Json(other),
    }
}

/// Parses the longest decimal prefix of `text`, after leading whitespace.
///
/// Mirrors the browser `parseFloat`: `"12px"` is 12, `".5"` is 0.5, `"Infinity"`
/// is infinite, and text with no numeric prefix is NaN.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(is_js_whitespace);
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

// ECMAScript WhiteSpace and LineTerminator; narrower than `char::is_whitespace` (no U+0085).
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::{coerce_options, coerce_value, parse_float};
    use crate::core::value::OptionValue;
    use serde_json::{Value, json};
    use std::collections::BTreeSet;

    fn numeric(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn boolean_strings_become_booleans() {
        assert_eq!(coerce_value(json!("true"), false), OptionValue::from(true));
        assert_eq!(coerce_value(json!("false"), false), OptionValue::from(false));
        // Case matters.
        assert_eq!(coerce_value(json!("True"), false), OptionValue::from("True"));
    }

    #[test]
    fn boolean_strings_win_over_numeric_keys() {
        assert_eq!(coerce_value(json!("true"), true), OptionValue::from(true));
        assert_eq!(coerce_value(json!("false"), true), OptionValue::from(false));
    }

    #[test]
    fn numeric_keys_parse_non_empty_strings_only() {
        assert_eq!(coerce_value(json!("123.45"), true), OptionValue::Float(123.45));
        assert_eq!(coerce_value(json!(""), true), OptionValue::from(""));
        assert_eq!(coerce_value(json!(7), true), OptionValue::Json(json!(7)));
        assert_eq!(coerce_value(json!(null), true), OptionValue::Json(Value::Null));
        assert!(coerce_value(json!("abc"), true).is_nan());
    }

    #[test]
    fn nested_values_are_not_traversed() {
        let parsed = json!({"inner": {"flag": "true"}, "list": ["false"], "n": "3"});
        let Value::Object(map) = parsed else {
            panic!("object literal");
        };
        let options = coerce_options(map, &numeric(&["n"]));
        assert_eq!(options["inner"], OptionValue::Json(json!({"flag": "true"})));
        assert_eq!(options["list"], OptionValue::Json(json!(["false"])));
        assert_eq!(options["n"], OptionValue::Float(3.0));
    }

    #[test]
    fn parse_float_uses_longest_numeric_prefix() {
        let cases = [
            ("42", 42.0),
            ("  -7.25", -7.25),
            ("12px", 12.0),
            (".5", 0.5),
            ("5.", 5.0),
            ("+3", 3.0),
            ("1e3", 1000.0),
            ("2E-2", 0.02),
            ("1e", 1.0),
            ("1e+", 1.0),
            ("2.75.5", 2.75),
            ("\n\t8", 8.0),
            ("\u{a0}\u{3000}\u{feff}9", 9.0),
            ("\u{2028}\u{b}1.5", 1.5),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_float(text), expected, "input {text:?}");
        }
    }

    #[test]
    fn parse_float_handles_infinity_and_garbage() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
        for text in ["abc", " ", ".", "-", "+.", "e5", "inf", "NaN", "infinity", "\u{85}5"] {
            assert!(parse_float(text).is_nan(), "input {text:?}");
        }
    }
}
