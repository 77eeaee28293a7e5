//! Per-scope import tables.
//!
//! `build_imports` scans one scope's own span for `use` declarations of a
//! given kind and produces an immutable table keyed by the binding short
//! name (the alias when present, the trailing path segment otherwise,
//! lowercased). The scan is a pure read: nothing downstream ever mutates a
//! table, which keeps scope isolation trivially true.
//!
//! Only statement-level declarations count. Closure capture lists
//! (`function () use ($x)`), trait `use` inside class bodies, and grouped
//! declarations (`use Foo\{a, b};`) are not import candidates for this
//! rule and are skipped.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::lexer::{TokenKind, TokenStream};
use crate::scope::{ScopeId, ScopeTree};

/// Which kind of symbol a `use` declaration imports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// `use function foo;`
    Function,
    /// `use Foo\Bar;`
    Class,
    /// `use const FOO;`
    Constant,
}

/// One import declaration binding a short name within a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// The binding name, lowercase (alias when the declaration has one).
    pub short_name: SmolStr,
    /// The declared fully-qualified name, verbatim minus any leading `\`.
    pub fqn: SmolStr,
    /// Token index of the `use` keyword.
    pub decl_token: usize,
    /// Token index of the terminating `;`.
    pub end_token: usize,
}

impl ImportEntry {
    /// Whether the declaration imports the name from the global namespace
    /// under its own name (`use function strlen;`).
    pub fn is_identity(&self) -> bool {
        self.fqn.eq_ignore_ascii_case(&self.short_name)
    }
}

/// Import declarations of one kind within one scope, in declaration order.
///
/// Short names are case-insensitively unique: when a scope declares the
/// same short name twice, the later declaration overrides the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    entries: IndexMap<SmolStr, ImportEntry>,
}

impl ImportTable {
    pub fn get(&self, short_name: &str) -> Option<&ImportEntry> {
        self.entries.get(short_name)
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.entries.contains_key(short_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the import table of `kind` for one scope.
///
/// Scans only the scope's own top brace level; nested blocks and child
/// scopes are skipped.
pub fn build_imports(
    stream: &TokenStream,
    tree: &ScopeTree,
    scope_id: ScopeId,
    kind: ImportKind,
) -> ImportTable {
    let scope = tree.get(scope_id);
    let mut entries: IndexMap<SmolStr, ImportEntry> = IndexMap::new();

    let mut depth = 0usize;
    let mut idx = scope.body;
    while idx < scope.end {
        // Tokens belonging to a child scope are that scope's business.
        if tree.scope_of(idx) != scope_id {
            idx += 1;
            continue;
        }
        match stream.kind(idx) {
            Some(TokenKind::OpenBrace) => depth += 1,
            Some(TokenKind::CloseBrace) => {
                if depth == 0 {
                    // The scope's own closing brace.
                    break;
                }
                depth -= 1;
            }
            Some(TokenKind::Use) if depth == 0 => {
                // `function () use ($x)` is a capture list, not an import.
                let is_capture = stream
                    .prev_non_trivia(idx)
                    .is_some_and(|p| stream.kind(p) == Some(TokenKind::CloseParen));
                if !is_capture {
                    if let Some((entry, decl_kind, next)) = parse_use(stream, idx) {
                        if decl_kind == kind {
                            entries.insert(entry.short_name.clone(), entry);
                        }
                        idx = next;
                        continue;
                    }
                }
            }
            _ => {}
        }
        idx += 1;
    }

    ImportTable { entries }
}

/// Parse one `use` declaration starting at `use_idx`.
///
/// Returns the entry, the declaration's kind, and the index to resume
/// scanning from. Grouped and comma-separated declarations yield `None`
/// after skipping to their terminator.
fn parse_use(stream: &TokenStream, use_idx: usize) -> Option<(ImportEntry, ImportKind, usize)> {
    let mut cursor = stream.next_non_trivia(use_idx)?;

    let kind = match stream.kind(cursor)? {
        TokenKind::Function => {
            cursor = stream.next_non_trivia(cursor)?;
            ImportKind::Function
        }
        TokenKind::Const => {
            cursor = stream.next_non_trivia(cursor)?;
            ImportKind::Constant
        }
        _ => ImportKind::Class,
    };

    let mut segments: Vec<SmolStr> = Vec::new();
    let mut alias: Option<SmolStr> = None;

    loop {
        let token = stream.get(cursor)?;
        match token.kind {
            TokenKind::Backslash => {}
            TokenKind::Identifier => segments.push(token.text.clone()),
            TokenKind::As => {
                let alias_idx = stream.next_non_trivia(cursor)?;
                let alias_token = stream.get(alias_idx)?;
                if alias_token.kind != TokenKind::Identifier {
                    return None;
                }
                alias = Some(alias_token.text.clone());
                cursor = alias_idx;
            }
            TokenKind::Semicolon => break,
            // Group syntax or a compound statement: not a candidate.
            TokenKind::OpenBrace | TokenKind::Comma => {
                return None;
            }
            _ => return None,
        }
        cursor = stream.next_non_trivia(cursor)?;
    }

    let last = segments.last()?;
    let short = alias.as_ref().unwrap_or(last);
    let entry = ImportEntry {
        short_name: SmolStr::new(short.to_ascii_lowercase()),
        fqn: SmolStr::new(segments.join("\\")),
        decl_token: use_idx,
        end_token: cursor,
    };
    Some((entry, kind, cursor + 1))
}
