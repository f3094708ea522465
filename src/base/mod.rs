//! Foundation types for the hierarchy engine.
//!
//! - [`FileId`] - document identifiers
//! - [`TextRange`], [`TextSize`] - source spans
//! - [`FilePosition`] - a caret inside a document
//! - [`LineCol`], [`LineIndex`] - line/column conversion
//!
//! This module has NO dependencies on other modules of the crate.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{FilePosition, LineCol, LineIndex, TextRange, TextSize};
