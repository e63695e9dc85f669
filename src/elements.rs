//! Purpose: Build attribute targets for the CLI from flags or an element-set file.
//! Exports: `parse_attr_flag`, `element_from_flags`, `ElementSet`.
//! Role: Keep CLI target construction separate from command dispatch.
//! Invariants: Element-set files map element ids to string-valued attribute maps.
//! Invariants: An unknown element id is an absent target, never an error.

use std::collections::BTreeMap;
use std::path::Path;

use attropts::api::{AttributeMap, Error, ErrorKind};
use attropts::json::parse;

/// Splits `NAME=VALUE` at the first `=`; the value may be empty or contain `=`.
pub(crate) fn parse_attr_flag(flag: &str) -> Result<(String, String), Error> {
    let Some((name, value)) = flag.split_once('=') else {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("invalid --attr '{flag}'"))
            .with_hint("Use --attr NAME=VALUE, e.g. --attr 'data-options={\"a\":1}'."));
    };
    if name.is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("--attr name must not be empty")
            .with_hint("Use --attr NAME=VALUE."));
    }
    Ok((name.to_string(), value.to_string()))
}

pub(crate) fn element_from_flags(flags: &[String]) -> Result<AttributeMap, Error> {
    let mut element = AttributeMap::new();
    for flag in flags {
        let (name, value) = parse_attr_flag(flag)?;
        element.set_attribute(name, value);
    }
    Ok(element)
}

#[derive(Debug, Default)]
pub(crate) struct ElementSet {
    elements: BTreeMap<String, AttributeMap>,
}

impl ElementSet {
    pub(crate) fn from_json_str(input: &str) -> Result<Self, Error> {
        let raw: BTreeMap<String, BTreeMap<String, String>> =
            parse::from_str(input).map_err(|err| {
                Error::new(ErrorKind::Parse)
                    .with_message(format!("invalid element set: {err}"))
                    .with_hint("Expected {\"<id>\": {\"<attribute>\": \"<value>\"}}.")
                    .with_source(err)
            })?;
        let elements = raw
            .into_iter()
            .map(|(id, attributes)| (id, AttributeMap::from(attributes)))
            .collect();
        Ok(Self { elements })
    }

    pub(crate) fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == std::io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message("failed to read element set")
                .with_path(path)
                .with_source(err)
        })?;
        Self::from_json_str(&text).map_err(|err| err.with_path(path))
    }

    pub(crate) fn get(&self, id: &str) -> Option<&AttributeMap> {
        self.elements.get(id)
    }
}
