// Core modules implementing attribute reading, coercion, value shapes, and error modeling.
pub mod coerce;
pub mod error;
pub mod reader;
pub mod target;
pub mod value;
