//! Diagnostics — rule violations and tokenizer faults.
//!
//! This is the only contract the core exposes per identified issue: a
//! code, a human-readable message, a location, and whether the issue has
//! an automatic fix in the current pass.

use std::sync::Arc;

use crate::base::{LineCol, TextRange};

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// Stable codes for everything this rule can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Bare call to a built-in with no import in scope.
    Import,
    /// Qualified call to a built-in with no import in scope; the fix both
    /// removes the qualifier and inserts the import.
    ImportFqn,
    /// Qualified call to a built-in already imported under the identical
    /// fully-qualified form.
    RedundantFqn,
    /// Qualified call to an excluded built-in; the qualifier is disallowed.
    ExcludeRedundantFqn,
    /// Import declared for an excluded built-in.
    ExcludeImported,
    /// Qualified call in a file without a namespace: no import mechanism
    /// applies, the qualifier is always redundant.
    NoNamespace,
    /// Tokenizer failure; analysis of the file stopped early.
    LexError,
}

impl DiagnosticCode {
    /// The code string as reported to hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::Import => "Import",
            DiagnosticCode::ImportFqn => "ImportFQN",
            DiagnosticCode::RedundantFqn => "RedundantFQN",
            DiagnosticCode::ExcludeRedundantFqn => "ExcludeRedundantFQN",
            DiagnosticCode::ExcludeImported => "ExcludeImported",
            DiagnosticCode::NoNamespace => "NoNamespace",
            DiagnosticCode::LexError => "LexError",
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: Arc<str>,
    /// Byte range of the offending text.
    pub range: TextRange,
    /// Line/column of the range start.
    pub position: LineCol,
    /// Whether the current pass planned an automatic fix for this issue.
    pub fixable: bool,
}

impl Diagnostic {
    /// Create a fixable error diagnostic.
    pub fn fixable(
        code: DiagnosticCode,
        message: impl Into<Arc<str>>,
        range: TextRange,
        position: LineCol,
    ) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            range,
            position,
            fixable: true,
        }
    }

    /// Create a report-only error diagnostic.
    pub fn error(
        code: DiagnosticCode,
        message: impl Into<Arc<str>>,
        range: TextRange,
        position: LineCol,
    ) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            range,
            position,
            fixable: false,
        }
    }
}

/// Collects diagnostics during one file's analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics carrying a planned fix.
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.fixable).count()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
