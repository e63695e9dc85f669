//! Purpose: Library crate behind the `attropts` CLI and its integration tests.
//! Exports: `api` (stable surface), `core` (reader, coercion, values, errors), `json`, `notice`.
//! Role: Reads JSON options from an element attribute and merges them over defaults.
//! Invariants: The reader never fails; failures degrade to the caller's defaults.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod json;
pub mod notice;
