//! Rendering of outline documents to JSON, and schema validation.

mod json;
mod schema;

pub use json::{to_json, write_outline, JsonFormat};
pub use schema::{validate_outline_json, validate_outline_value};
