//! Purpose: Define the stable public Rust API boundary for attropts.
//! Exports: Reader entrypoints, value shapes, the target capability, and errors.
//! Role: Public, additive-only surface; callers should not need `core` paths.
//! Invariants: Everything needed to read options from an attribute is re-exported here.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::reader::{OptionsRequest, get_options_from_attribute};
pub use crate::core::target::{AttributeMap, AttributeTarget};
pub use crate::core::value::{
    OptionValue, Options, options_from_json, options_from_json_str, options_to_json,
};
pub use crate::json::parse::is_json_string;
