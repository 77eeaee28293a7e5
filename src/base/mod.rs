//! Foundation types for the phlint analysis core.
//!
//! - [`FileId`] - Lightweight handles for source files
//! - [`TextRange`], [`TextSize`] - Byte positions in source text
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other phlint modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};
