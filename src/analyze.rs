//! Whole-file analysis.
//!
//! Runs the full pipeline over one source text: tokenize, partition into
//! scopes, build each scope's import table, classify every identifier,
//! feed candidates to the per-scope planners in source order, then apply
//! the combined changesets. A tokenizer fault aborts after reporting; an
//! overlap fault drops the rewrite but keeps the diagnostics.

use rustc_hash::FxHashSet;

use crate::apply;
use crate::base::{LineIndex, TextRange};
use crate::classify::{classify, Candidate, Classification};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector};
use crate::imports::{build_imports, ImportKind, ImportTable};
use crate::lexer::{lex, TokenKind};
use crate::plan::{Changeset, ScopePlanner};
use crate::scope::partition;

/// Knobs for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Function names that must not be imported. Bare calls to these are
    /// compliant; qualified calls and imports of them are violations.
    /// Stored lowercase.
    pub exclude: FxHashSet<String>,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from excluded names, normalizing to lowercase.
    pub fn with_exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exclude: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

/// The outcome of analyzing one file.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// All diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// The rewritten source; `None` when no fix was planned or the rewrite
    /// was dropped.
    pub rewritten: Option<String>,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze one file's source text.
pub fn analyze(source: &str, options: &AnalyzeOptions) -> Analysis {
    let lines = LineIndex::new(source);
    let (stream, lex_error) = lex(source);

    if let Some(err) = lex_error {
        tracing::warn!(%err, "tokenizer fault, analysis stopped");
        let offset = err.offset();
        return Analysis {
            diagnostics: vec![Diagnostic::error(
                DiagnosticCode::LexError,
                err.to_string(),
                TextRange::empty(offset),
                lines.line_col(offset),
            )],
            rewritten: None,
        };
    }

    let tree = partition(&stream);
    let mut collector = DiagnosticCollector::new();

    let tables: Vec<ImportTable> = tree
        .iter()
        .map(|scope| build_imports(&stream, &tree, scope.id, ImportKind::Function))
        .collect();
    let mut planners: Vec<ScopePlanner<'_>> = tree
        .iter()
        .zip(tables.iter())
        .map(|(scope, imports)| ScopePlanner::new(scope, imports, &options.exclude))
        .collect();

    for planner in &mut planners {
        planner.open(&stream, &lines, &mut collector);
    }

    for idx in 0..stream.len() {
        if stream.kind(idx) != Some(TokenKind::Identifier) {
            continue;
        }
        let scope = tree.scope_of(idx);
        let candidate = match classify(&stream, idx) {
            Classification::BareBuiltin => Candidate {
                token: idx,
                scope,
                qualifier: None,
            },
            Classification::QualifiedBuiltin { qualifier } => Candidate {
                token: idx,
                scope,
                qualifier: Some(qualifier),
            },
            Classification::NotACall | Classification::MemberOrDefinition => continue,
        };
        planners[scope.0 as usize].on_candidate(&stream, &lines, &candidate, &mut collector);
    }

    let changesets: Vec<Changeset> = planners
        .into_iter()
        .map(|planner| planner.finalize(&stream))
        .collect();

    let mut diagnostics = collector.take();
    diagnostics.sort_by_key(|d| (d.range.start(), d.range.end()));

    let rewritten = if changesets.iter().all(Changeset::is_empty) {
        None
    } else {
        match apply::apply(source, &changesets) {
            Ok(text) => Some(text),
            Err(fault) => {
                tracing::error!(%fault, "planned edits overlap, rewrite dropped");
                None
            }
        }
    };

    tracing::debug!(
        diagnostics = diagnostics.len(),
        rewrote = rewritten.is_some(),
        "analysis finished"
    );
    Analysis {
        diagnostics,
        rewritten,
    }
}
