//! Data model shared by the extraction, classification and rendering stages.
//!
//! Engines produce [`Page`]s of [`Line`]s; the pipeline turns them into an
//! [`OutlineDocument`] of [`OutlineEntry`] records.

mod document;
mod page;

pub use document::{HeadingLevel, OutlineDocument, OutlineEntry};
pub use page::{collapse_whitespace, Line, Page};
