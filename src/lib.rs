//! # phlint-base
//!
//! Core library for PHP token scanning, namespace import resolution, and
//! automatic import rewrites.
//!
//! The crate answers one question about a PHP-like source file: which
//! references to built-in (standard-library) functions are not backed by a
//! `use function` import in their namespace scope, and what is the minimal
//! text rewrite that fixes each of them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch    → multi-file driver (FileSet, parallel per-file passes)
//!   ↓
//! analyze  → per-file pipeline: lex → partition → classify → plan → apply
//!   ↓
//! plan     → rewrite planner (per-scope state machine), apply → splicer
//!   ↓
//! classify → built-in call-site classification
//!   ↓
//! imports  → per-scope import tables     builtins → static registry
//!   ↓
//! scope    → namespace scope partitioner
//!   ↓
//! lexer    → logos-based tokenizer
//!   ↓
//! base     → primitives (FileId, TextRange, LineIndex)
//! ```
//!
//! The core is pure and synchronous: all source text is pre-loaded, no I/O
//! happens below `batch`, and the only process-wide state is the read-only
//! built-in function registry.

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Tokenizer: PHP-like token stream with exact byte ranges
pub mod lexer;

/// Namespace scope partitioning over the token stream
pub mod scope;

/// Static registry of PHP built-in function names
pub mod builtins;

/// Per-scope `use function` import tables
pub mod imports;

/// Classification of identifier references as built-in call sites
pub mod classify;

/// Rewrite planning: per-scope edit collection and finalization
pub mod plan;

/// Edit application: atomic, non-overlapping text splices
pub mod apply;

/// Diagnostic records and collection
pub mod diagnostics;

/// Per-file analysis entry point
pub mod analyze;

/// Multi-file batch driver
pub mod batch;

// Re-export the surface most hosts need.
pub use analyze::{analyze, Analysis, AnalyzeOptions};
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
