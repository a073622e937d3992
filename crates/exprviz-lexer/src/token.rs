//! Token types for the exprviz lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the arithmetic expression
//! grammar and [`Token`], which pairs a kind with a source [`Span`].

use exprviz_types::Span;
use std::fmt;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, carrying the source lexeme: `42`, `3.14`.
    ///
    /// The lexeme (not a parsed value) is kept so that tree leaves can be
    /// labeled with the literal's exact text and the evaluator can decide
    /// integer vs. float from the text itself.
    Number(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(lexeme) => write!(f, "{lexeme}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}
