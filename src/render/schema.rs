//! Validation of JSON text against the outline schema.
//!
//! ```text
//! { "title": string,
//!   "outline": [ { "level": "H1"|"H2"|"H3", "text": string, "page": integer >= 1 } ] }
//! ```
//!
//! Both objects are closed: unknown keys are violations.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::OutlineDocument;

/// Parse and validate JSON text, returning the document it describes.
pub fn validate_outline_json(json: &str) -> Result<OutlineDocument> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::schema("$", format!("invalid JSON: {}", e)))?;
    validate_outline_value(&value)?;
    serde_json::from_value(value).map_err(|e| Error::schema("$", e.to_string()))
}

/// Validate a parsed JSON value.
pub fn validate_outline_value(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| Error::schema("$", "expected an object"))?;
    check_keys(root, "$", &["title", "outline"])?;

    if !root["title"].is_string() {
        return Err(Error::schema("$.title", "expected a string"));
    }
    let outline = root["outline"]
        .as_array()
        .ok_or_else(|| Error::schema("$.outline", "expected an array"))?;

    for (i, item) in outline.iter().enumerate() {
        let path = format!("$.outline[{}]", i);
        let entry = item
            .as_object()
            .ok_or_else(|| Error::schema(path.as_str(), "expected an object"))?;
        check_keys(entry, &path, &["level", "text", "page"])?;

        match entry["level"].as_str() {
            Some("H1" | "H2" | "H3") => {}
            _ => {
                return Err(Error::schema(
                    format!("{}.level", path),
                    "expected \"H1\", \"H2\" or \"H3\"",
                ))
            }
        }
        if !entry["text"].is_string() {
            return Err(Error::schema(format!("{}.text", path), "expected a string"));
        }
        match entry["page"].as_u64() {
            Some(page) if page >= 1 => {}
            _ => {
                return Err(Error::schema(
                    format!("{}.page", path),
                    "expected an integer >= 1",
                ))
            }
        }
    }
    Ok(())
}

fn check_keys(object: &Map<String, Value>, path: &str, required: &[&str]) -> Result<()> {
    if let Some(missing) = required.iter().find(|k| !object.contains_key(**k)) {
        return Err(Error::schema(path, format!("missing required key \"{}\"", missing)));
    }
    if let Some(extra) = object.keys().find(|k| !required.contains(&k.as_str())) {
        return Err(Error::schema(path, format!("unexpected key \"{}\"", extra)));
    }
    Ok(())
}
