//! Purpose: Internal JSON parsing boundary shared by the reader, helpers, and CLI.
//! Exports: `parse` module with decode helpers and the JSON-text predicate.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Attribute text and CLI inputs are decoded through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
