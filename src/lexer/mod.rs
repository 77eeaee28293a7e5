//! Tokenizer for PHP-like source text.
//!
//! The lexer produces a token sequence that covers the entire input with no
//! gaps: whitespace and comments are tokens too, so every byte of the
//! original text is accounted for and splice offsets computed downstream
//! are exact.
//!
//! Malformed input never aborts the pass. An unterminated string or block
//! comment is recovered at end of file: the remainder becomes a single
//! `BadString`/`BadComment` token and the failure is surfaced as a
//! [`LexError`] value next to the (partial but well-formed) stream.

pub mod token;

pub use token::{Token, TokenKind};

use logos::Logos;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{LineCol, LineIndex, TextRange, TextSize};

/// Tokenization failure, anchored at the byte where recovery started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal at {position}")]
    UnterminatedString { position: LineCol, offset: TextSize },
    #[error("unterminated block comment at {position}")]
    UnterminatedComment { position: LineCol, offset: TextSize },
}

impl LexError {
    /// The byte offset where the malformed construct starts.
    pub fn offset(&self) -> TextSize {
        match *self {
            LexError::UnterminatedString { offset, .. } => offset,
            LexError::UnterminatedComment { offset, .. } => offset,
        }
    }
}

/// Lazy token iterator over one source text.
///
/// Restartable by construction: the lexer holds no state beyond its
/// position, so a fresh `Lexer::new(source)` replays the same sequence.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, TokenKind>,
    lines: LineIndex,
    error: Option<LexError>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
            error: None,
            done: false,
        }
    }

    /// The error encountered so far, if any. Only meaningful once the
    /// iterator has been driven past the failure point.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        let range = TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32));
        Token {
            kind,
            text: SmolStr::new(&self.source[start..end]),
            range,
            line: self.lines.line_of(range.start()),
        }
    }

    /// Consume the rest of the input as one recovery token.
    fn recover_to_eof(&mut self, kind: TokenKind, start: usize, error: LexError) -> Token {
        self.error = Some(error);
        self.done = true;
        self.make_token(kind, start, self.source.len())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let result = self.inner.next()?;
        let span = self.inner.span();

        let offset = TextSize::from(span.start as u32);
        match result {
            Ok(TokenKind::BadString) => Some(self.recover_to_eof(
                TokenKind::BadString,
                span.start,
                LexError::UnterminatedString {
                    position: self.lines.line_col(offset),
                    offset,
                },
            )),
            Ok(TokenKind::BadComment) => Some(self.recover_to_eof(
                TokenKind::BadComment,
                span.start,
                LexError::UnterminatedComment {
                    position: self.lines.line_col(offset),
                    offset,
                },
            )),
            Ok(kind) => Some(self.make_token(kind, span.start, span.end)),
            // Unreachable with the current patterns (`Unknown` catches any
            // byte), kept for totality.
            Err(()) => Some(self.make_token(TokenKind::Unknown, span.start, span.end)),
        }
    }
}

/// An immutable, indexable token sequence for one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    pub fn kind(&self, idx: usize) -> Option<TokenKind> {
        self.tokens.get(idx).map(|t| t.kind)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Index of the first non-trivia token strictly after `idx`.
    pub fn next_non_trivia(&self, idx: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, t)| !t.is_trivia())
            .map(|(i, _)| i)
    }

    /// Index of the last non-trivia token strictly before `idx`.
    pub fn prev_non_trivia(&self, idx: usize) -> Option<usize> {
        self.tokens[..idx]
            .iter()
            .rposition(|t| !t.is_trivia())
    }

    /// Like [`Self::prev_non_trivia`], additionally skipping namespace
    /// separators. Used by the classifier to look past a qualifier.
    pub fn prev_non_trivia_skipping_separators(&self, idx: usize) -> Option<usize> {
        self.tokens[..idx]
            .iter()
            .rposition(|t| !t.is_trivia() && t.kind != TokenKind::Backslash)
    }
}

/// Tokenize a whole file.
///
/// Always returns a stream covering the entire input; the error, when
/// present, explains why the tail of the stream is a recovery token.
pub fn lex(source: &str) -> (TokenStream, Option<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    for token in &mut lexer {
        tokens.push(token);
    }
    let error = lexer.error().cloned();
    (TokenStream { tokens }, error)
}
