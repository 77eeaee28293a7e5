//! Classification of identifier references as built-in call sites.
//!
//! Given an identifier token, decide whether it is a genuine call to a
//! built-in function and, if so, whether the call is fully qualified.
//! Method calls, static calls, constructor calls, and function
//! *definitions* that happen to share a built-in's name are all excluded:
//! in those positions the identifier denotes something other than a bare
//! call to the global built-in.
//!
//! Checks run cheapest first: the call parenthesis and registry lookups
//! are O(1), the preceding-token walk only happens for tokens that passed
//! both.

use crate::builtins;
use crate::lexer::{TokenKind, TokenStream};
use crate::scope::ScopeId;

/// What an identifier token turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not a call to a built-in at all (no call parenthesis, or not a
    /// known built-in name).
    NotACall,
    /// A method, static, or constructor call, or a function definition,
    /// sharing a built-in's name. Never rewritten.
    MemberOrDefinition,
    /// `\strlen(...)`: a built-in call behind an explicit global
    /// qualifier. Carries the qualifier's token index.
    QualifiedBuiltin { qualifier: usize },
    /// `strlen(...)`: a built-in call by bare short name.
    BareBuiltin,
}

/// A classified built-in call site, attributed to its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Token index of the function name.
    pub token: usize,
    /// The scope the reference resolves in.
    pub scope: ScopeId,
    /// Token index of the leading `\` for fully qualified references.
    pub qualifier: Option<usize>,
}

impl Candidate {
    pub fn is_fully_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

/// Classify the identifier token at `idx`.
pub fn classify(stream: &TokenStream, idx: usize) -> Classification {
    let Some(token) = stream.get(idx) else {
        return Classification::NotACall;
    };
    if token.kind != TokenKind::Identifier {
        return Classification::NotACall;
    }

    // 1. A call site must be followed by `(`.
    let followed_by_paren = stream
        .next_non_trivia(idx)
        .is_some_and(|n| stream.kind(n) == Some(TokenKind::OpenParen));
    if !followed_by_paren {
        return Classification::NotACall;
    }

    // 2. The name must be a known built-in.
    if !builtins::is_builtin(&token.text_lower()) {
        return Classification::NotACall;
    }

    // 3. Look past an optional qualifier: a definition keyword,
    //    constructor keyword, access marker, or identifier segment before
    //    the name means this is not a bare call to the global built-in.
    if let Some(prev) = stream.prev_non_trivia_skipping_separators(idx) {
        if matches!(
            stream.kind(prev),
            Some(
                TokenKind::Function
                    | TokenKind::New
                    | TokenKind::Identifier
                    | TokenKind::DoubleColon
                    | TokenKind::Arrow
                    | TokenKind::NullsafeArrow
            )
        ) {
            return Classification::MemberOrDefinition;
        }
    }

    // 4. A directly preceding separator marks the reference fully
    //    qualified.
    match stream.prev_non_trivia(idx) {
        Some(prev) if stream.kind(prev) == Some(TokenKind::Backslash) => {
            Classification::QualifiedBuiltin { qualifier: prev }
        }
        _ => Classification::BareBuiltin,
    }
}
