//! Namespace scope partitioning.
//!
//! PHP files have exactly one global scope plus one scope per `namespace`
//! declaration. A braced declaration (`namespace Foo { ... }`) closes at
//! its matching brace; a statement declaration (`namespace Foo;`) closes at
//! the next namespace declaration or end of stream. Import declarations
//! bind within one namespace scope only, which is why every candidate
//! reference is attributed to exactly one scope here before any
//! classification happens.

use std::fmt;

use smol_str::SmolStr;

use crate::lexer::{TokenKind, TokenStream};

/// Identifier for a scope within one file's scope tree.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The global scope is always id 0.
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn is_global(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// One namespace scope, measured in token indices.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    /// `None` only for the global scope.
    pub parent: Option<ScopeId>,
    /// Index of the first token of the scope (the `namespace` keyword for
    /// namespace scopes, 0 for the global scope).
    pub start: usize,
    /// One past the last token of the scope.
    pub end: usize,
    /// Index of the first body token, past the `{` or the `;` of the
    /// declaration. Import insertion happens at the token just before this.
    pub body: usize,
    /// Whether the declaration has a brace-delimited body.
    pub has_block: bool,
    /// Declared namespace name, when one was parseable.
    pub name: Option<SmolStr>,
}

impl Scope {
    pub fn is_global(&self) -> bool {
        self.id.is_global()
    }

    /// Whether a token index falls inside this scope's span.
    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx < self.end
    }
}

/// The scope tree for one file: the global scope at index 0, namespace
/// scopes (its children) after it, in source order.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    /// All scopes in source order, global first.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // there is always a global scope
    }

    /// Whether the file declares any namespace at all.
    pub fn has_namespaces(&self) -> bool {
        self.scopes.len() > 1
    }

    /// The innermost scope containing a token index.
    pub fn scope_of(&self, idx: usize) -> ScopeId {
        // Namespace scopes don't nest, so the first hit is the answer.
        self.scopes[1..]
            .iter()
            .find(|s| s.contains(idx))
            .map(|s| s.id)
            .unwrap_or(ScopeId::GLOBAL)
    }
}

/// Partition a token stream into its scope tree.
///
/// Linear scan: each `namespace` declaration closes the previous
/// statement-form scope (if one is open) and opens a new scope. A file
/// with no namespace declarations yields exactly the global scope spanning
/// the whole file.
pub fn partition(stream: &TokenStream) -> ScopeTree {
    let mut scopes = vec![Scope {
        id: ScopeId::GLOBAL,
        parent: None,
        start: 0,
        end: stream.len(),
        body: 0,
        has_block: false,
        name: None,
    }];

    let mut idx = 0;
    while idx < stream.len() {
        if stream.kind(idx) != Some(TokenKind::Namespace) {
            idx += 1;
            continue;
        }
        // `\namespace` or `Foo\namespace` is the relative-namespace
        // operator, not a declaration.
        if let Some(prev) = stream.prev_non_trivia(idx) {
            if stream.kind(prev) == Some(TokenKind::Backslash) {
                idx += 1;
                continue;
            }
        }

        let decl_start = idx;
        let mut name = String::new();
        let mut cursor = idx;

        // Collect the dotted name up to `;` or `{`.
        let (body, has_block) = loop {
            let Some(next) = stream.next_non_trivia(cursor) else {
                break (stream.len(), false);
            };
            match stream.kind(next) {
                Some(TokenKind::Identifier | TokenKind::Backslash) => {
                    if let Some(token) = stream.get(next) {
                        name.push_str(&token.text);
                    }
                    cursor = next;
                }
                Some(TokenKind::Semicolon) => break (next + 1, false),
                Some(TokenKind::OpenBrace) => break (next + 1, true),
                // Malformed declaration: treat as statement form
                // starting right here.
                _ => break (next, false),
            }
        };

        // A statement-form scope that is still open ends where this
        // declaration begins.
        if let Some(open) = scopes.last_mut().filter(|s| !s.is_global() && s.end == stream.len() && !s.has_block)
        {
            if open.end > decl_start {
                open.end = decl_start;
            }
        }

        let end = if has_block {
            matching_close_brace(stream, body).unwrap_or(stream.len())
        } else {
            // Provisional: runs to end of stream unless a later
            // declaration shortens it above.
            stream.len()
        };

        let id = ScopeId::new(scopes.len() as u32);
        scopes.push(Scope {
            id,
            parent: Some(ScopeId::GLOBAL),
            start: decl_start,
            end,
            body,
            has_block,
            name: (!name.is_empty()).then(|| SmolStr::new(&name)),
        });

        idx = body.max(idx + 1);
    }

    ScopeTree { scopes }
}

/// Index one past the `}` matching the block whose body starts at `body`.
fn matching_close_brace(stream: &TokenStream, body: usize) -> Option<usize> {
    let mut depth = 0usize;
    for idx in body..stream.len() {
        match stream.kind(idx) {
            Some(TokenKind::OpenBrace) => depth += 1,
            Some(TokenKind::CloseBrace) => {
                if depth == 0 {
                    return Some(idx + 1);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
