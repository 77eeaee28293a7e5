//! Token kinds for the PHP-like token stream.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::TextRange;

/// The kind of a single token.
///
/// PHP keywords are case-insensitive, so the keyword patterns ignore ASCII
/// case. Operators that the classifier never inspects individually are
/// lumped into [`TokenKind::Op`]; the ones that drive classification
/// (`->`, `?->`, `::`, `\`) get their own kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    #[token("namespace", ignore(ascii_case))]
    Namespace,
    #[token("use", ignore(ascii_case))]
    Use,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("new", ignore(ascii_case))]
    New,
    #[token("as", ignore(ascii_case))]
    As,

    // Names
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Literals
    #[regex(r"0[xXbBoO][0-9a-fA-F_]+")]
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    // Structure
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("\\")]
    Backslash,

    // Access markers the classifier cares about
    #[token("::", priority = 10)]
    DoubleColon,
    #[token("->", priority = 10)]
    Arrow,
    #[token("?->", priority = 12)]
    NullsafeArrow,

    // Everything else operator-shaped
    #[regex(r"[+\-*/%=<>!&|^~.?:@]+", priority = 1)]
    Op,

    // Tags
    #[token("<?php")]
    #[token("<?=")]
    OpenTag,
    #[token("?>", priority = 10)]
    CloseTag,

    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"(//|#)[^\n]*", priority = 10)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 10)]
    BlockComment,

    // Recovery kinds. The patterns match the opening of an unterminated
    // construct; the lexer stretches the token to end of input and records
    // the failure.
    #[regex(r#""([^"\\]|\\.)*"#, priority = 1)]
    #[regex(r"'([^'\\]|\\.)*", priority = 1)]
    BadString,
    #[regex(r"/\*([^*]|\*+[^*/])*\**", priority = 3)]
    BadComment,
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    /// Whitespace and comments: skipped when walking for the
    /// "next/previous meaningful token".
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::BadComment
        )
    }

    /// Member-access and static-access markers (`->`, `?->`, `::`).
    pub fn is_access_marker(self) -> bool {
        matches!(
            self,
            TokenKind::Arrow | TokenKind::NullsafeArrow | TokenKind::DoubleColon
        )
    }
}

/// A single token with its verbatim text and byte range.
///
/// Immutable once produced; the whole pipeline shares tokens read-only
/// through the [`super::TokenStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim source text covered by `range`.
    pub text: SmolStr,
    /// Byte range in the original source.
    pub range: TextRange,
    /// 0-indexed line of the token start.
    pub line: u32,
}

impl Token {
    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// The token text lowercased, as PHP name resolution sees it.
    pub fn text_lower(&self) -> SmolStr {
        if self.text.chars().all(|c| !c.is_ascii_uppercase()) {
            self.text.clone()
        } else {
            SmolStr::new(self.text.to_ascii_lowercase())
        }
    }
}
