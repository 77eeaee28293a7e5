//! Rewrite planning.
//!
//! One [`ScopePlanner`] runs per scope and walks the state machine
//! `Empty → Collecting → Finalizing → Emitted`. Candidates are fed in
//! source order; the changeset is only lowered once every candidate in the
//! scope has been seen, so the import block is complete, deduplicated, and
//! sorted before its single insertion point is computed.
//!
//! Edits are pure values. Nothing here touches the source text; the
//! [`crate::apply`] module performs the splices, which keeps planning and
//! application independently testable.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{LineIndex, TextRange, TextSize};
use crate::classify::Candidate;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector};
use crate::imports::ImportTable;
use crate::lexer::{TokenKind, TokenStream};
use crate::scope::{Scope, ScopeId};

/// A planned edit, still symbolic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Import `name` into `scope`; all inserts for one scope are lowered
    /// into a single text block at finalization.
    InsertImport { scope: ScopeId, name: SmolStr },
    /// Delete a byte range verbatim.
    DeleteRange { range: TextRange },
}

/// A concrete text splice: replace `range` with `replacement`.
///
/// Deletions have an empty replacement; insertions have an empty range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: TextRange,
    pub replacement: String,
}

impl Splice {
    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }

    pub fn insert(at: TextSize, replacement: String) -> Self {
        Self {
            range: TextRange::empty(at),
            replacement,
        }
    }
}

/// The atomically-applied group of text edits for one scope.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    pub scope: ScopeId,
    pub splices: Vec<Splice>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }
}

/// Planner lifecycle. `Emitted` is terminal: a finalized scope can never
/// collect again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlannerState {
    Empty,
    Collecting,
    Finalizing,
    Emitted,
}

/// Plans the rewrite for a single scope.
pub struct ScopePlanner<'a> {
    scope: &'a Scope,
    imports: &'a ImportTable,
    exclude: &'a FxHashSet<String>,
    state: PlannerState,
    ops: Vec<EditOp>,
    /// Names planned for import in this scope; sorted and deduplicated by
    /// construction.
    pending: BTreeSet<SmolStr>,
}

impl<'a> ScopePlanner<'a> {
    pub fn new(scope: &'a Scope, imports: &'a ImportTable, exclude: &'a FxHashSet<String>) -> Self {
        Self {
            scope,
            imports,
            exclude,
            state: PlannerState::Empty,
            ops: Vec::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Scope-open check: an import already declared for an excluded name
    /// is a first-class fault, fixed by deleting the whole declaration.
    pub fn open(
        &mut self,
        stream: &TokenStream,
        lines: &LineIndex,
        collector: &mut DiagnosticCollector,
    ) {
        for entry in self.imports.iter() {
            if !self.exclude.contains(&entry.fqn.to_ascii_lowercase()) {
                continue;
            }
            let Some(decl) = stream.get(entry.decl_token) else {
                continue;
            };
            let Some(range) = delete_range_for_statement(stream, entry.decl_token, entry.end_token)
            else {
                continue;
            };

            collector.add(Diagnostic::fixable(
                DiagnosticCode::ExcludeImported,
                format!("Function {} cannot be imported", entry.fqn),
                decl.range,
                lines.line_col(decl.range.start()),
            ));
            self.push(EditOp::DeleteRange { range });
        }
    }

    /// Feed one classified candidate, in source order.
    pub fn on_candidate(
        &mut self,
        stream: &TokenStream,
        lines: &LineIndex,
        candidate: &Candidate,
        collector: &mut DiagnosticCollector,
    ) {
        debug_assert!(
            matches!(self.state, PlannerState::Empty | PlannerState::Collecting),
            "candidate fed to a finalized planner"
        );
        debug_assert_eq!(candidate.scope, self.scope.id);

        let Some(token) = stream.get(candidate.token) else {
            return;
        };
        let name = token.text_lower();
        let position = lines.line_col(token.range.start());

        match candidate.qualifier {
            Some(qualifier) => {
                let Some(qualifier_range) = stream.get(qualifier).map(|t| t.range) else {
                    return;
                };

                if self.scope.is_global() {
                    collector.add(Diagnostic::fixable(
                        DiagnosticCode::NoNamespace,
                        format!(
                            "FQN for PHP internal function \"{name}\" is not needed here, \
                             file does not have defined namespace"
                        ),
                        token.range,
                        position,
                    ));
                    self.push(EditOp::DeleteRange { range: qualifier_range });
                } else if self.exclude.contains(name.as_str()) {
                    collector.add(Diagnostic::fixable(
                        DiagnosticCode::ExcludeRedundantFqn,
                        format!("FQN for PHP internal function \"{name}\" is not allowed here"),
                        token.range,
                        position,
                    ));
                    self.push(EditOp::DeleteRange { range: qualifier_range });
                } else if let Some(entry) = self.imports.get(&name) {
                    // Imported under a different FQN: the qualifier is
                    // meaningful and stays.
                    if entry.is_identity() {
                        collector.add(Diagnostic::fixable(
                            DiagnosticCode::RedundantFqn,
                            format!(
                                "FQN for PHP internal function \"{name}\" is not needed here, \
                                 function is already imported"
                            ),
                            token.range,
                            position,
                        ));
                        self.push(EditOp::DeleteRange { range: qualifier_range });
                    }
                } else if self.pending.contains(&name) {
                    // An earlier candidate already planned this import.
                    collector.add(Diagnostic::fixable(
                        DiagnosticCode::RedundantFqn,
                        format!(
                            "FQN for PHP internal function \"{name}\" is not needed here, \
                             function is already imported"
                        ),
                        token.range,
                        position,
                    ));
                    self.push(EditOp::DeleteRange { range: qualifier_range });
                } else {
                    collector.add(Diagnostic::fixable(
                        DiagnosticCode::ImportFqn,
                        format!("PHP internal function \"{name}\" must be imported"),
                        token.range,
                        position,
                    ));
                    self.push(EditOp::DeleteRange { range: qualifier_range });
                    self.plan_import(name);
                }
            }
            None => {
                // Bare calls in the global scope resolve to the built-in
                // already; excluded names are meant to be called bare.
                if self.scope.is_global() || self.exclude.contains(name.as_str()) {
                    return;
                }
                if self.imports.contains(&name) || self.pending.contains(&name) {
                    return;
                }
                collector.add(Diagnostic::fixable(
                    DiagnosticCode::Import,
                    format!("PHP internal function \"{name}\" must be imported"),
                    token.range,
                    position,
                ));
                self.plan_import(name);
            }
        }
    }

    /// Close the scope: lower collected ops into one atomic changeset.
    ///
    /// Consuming `self` makes re-entry into `Collecting` impossible.
    pub fn finalize(mut self, stream: &TokenStream) -> Changeset {
        self.state = PlannerState::Finalizing;

        let mut splices = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            if let EditOp::DeleteRange { range } = op {
                splices.push(Splice::delete(*range));
            }
        }

        if !self.pending.is_empty() {
            let mut block = String::new();
            for name in &self.pending {
                block.push_str("\nuse function ");
                block.push_str(name);
                block.push(';');
            }
            // The token just before the body is the `{` of a braced
            // declaration or the `;` of a statement declaration.
            let at = stream
                .get(self.scope.body.saturating_sub(1))
                .map(|t| t.range.end())
                .unwrap_or_else(|| TextSize::from(0));
            splices.push(Splice::insert(at, block));
        }

        self.state = PlannerState::Emitted;
        Changeset {
            scope: self.scope.id,
            splices,
        }
    }

    /// Names planned for import so far (sorted).
    pub fn pending_imports(&self) -> impl Iterator<Item = &SmolStr> {
        self.pending.iter()
    }

    fn plan_import(&mut self, name: SmolStr) {
        self.push(EditOp::InsertImport {
            scope: self.scope.id,
            name: name.clone(),
        });
        self.pending.insert(name);
    }

    fn push(&mut self, op: EditOp) {
        self.state = PlannerState::Collecting;
        self.ops.push(op);
    }
}

/// Byte range deleting a whole statement plus its trailing line break.
fn delete_range_for_statement(
    stream: &TokenStream,
    first: usize,
    last: usize,
) -> Option<TextRange> {
    let start = stream.get(first)?.range.start();
    let mut end = stream.get(last)?.range.end();

    // Swallow the following whitespace up to and including its first line
    // break, so deleting the statement doesn't leave a blank line.
    if let Some(next) = stream.get(last + 1) {
        if next.kind == TokenKind::Whitespace {
            let advance = match next.text.find('\n') {
                Some(pos) => pos + 1,
                None => next.text.len(),
            };
            end += TextSize::from(advance as u32);
        }
    }
    Some(TextRange::new(start, end))
}
