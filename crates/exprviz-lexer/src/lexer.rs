//! Core exprviz lexer — converts expression text to a token stream.
//!
//! Features:
//! - the four arithmetic operators, parentheses, and numeric literals
//!   (decimal integers and floats)
//! - error recovery: collects up to 20 errors instead of stopping at the first
//! - every token carries a 1-based [`Span`]; the stream always ends with
//!   [`TokenKind::Eof`]
//!
//! Anything outside the grammar — `^`, `%`, letters — is reported as an
//! unsupported operator/character with the offending source line attached.

use exprviz_types::{CompileError, CompileErrors, ErrorCode, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// The exprviz lexer.
pub struct Lexer<'src> {
    /// The full source text as bytes.
    source: &'src [u8],
    /// Source file for error reporting.
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
    /// Collected errors.
    errors: CompileErrors,
}

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    /// Errors encountered during lexing.
    pub errors: CompileErrors,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            source_file,
            pos: 0,
            line: 1,
            col: 1,
            errors: CompileErrors::empty(),
        }
    }

    /// Lex the entire input into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();

        loop {
            if self.errors.has_errors() && self.errors.total_errors >= exprviz_types::MAX_ERRORS {
                break;
            }

            match self.scan_token() {
                Some(token) => {
                    let is_eof = token.kind == TokenKind::Eof;
                    tokens.push(token);
                    if is_eof {
                        break;
                    }
                }
                // Error already reported; keep scanning for recovery
                None => continue,
            }
        }

        // Ensure token stream always ends with Eof
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, self.current_span()));
        }

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.start_line).unwrap_or("").to_string();
        self.errors.push_error(CompileError::new(
            &self.source_file.name,
            code,
            message,
            span,
            source_line,
        ));
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token. Returns `None` when an error was reported and the
    /// offending character was skipped.
    fn scan_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        if self.at_end() {
            return Some(Token::new(TokenKind::Eof, self.current_span()));
        }

        let start_line = self.line;
        let start_col = self.col;
        let ch = self.peek().unwrap_or(0);

        let kind = match ch {
            b'0'..=b'9' => return self.scan_number(),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => {
                self.advance();
                let span = self.span_from(start_line, start_col);
                self.emit_error(
                    ErrorCode::UNSUPPORTED_OPERATOR,
                    format!("unsupported character '{}'", ch as char),
                    span,
                );
                return None;
            }
        };

        self.advance();
        Some(Token::new(kind, self.span_from(start_line, start_col)))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.advance();
        }
    }

    /// Scan a numeric literal: digits with at most one decimal point.
    ///
    /// A trailing letter or a second decimal point makes the whole lexeme
    /// a malformed number (`1.2.3`, `12abc`) rather than two tokens.
    fn scan_number(&mut self) -> Option<Token> {
        let start_line = self.line;
        let start_col = self.col;
        let start_pos = self.pos;

        while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
            self.advance();
        }
        // Letters glued to a number are part of the (bad) lexeme
        let mut malformed_tail = false;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'.') {
            malformed_tail = true;
            self.advance();
        }

        let lexeme = std::str::from_utf8(&self.source[start_pos..self.pos])
            .unwrap_or("")
            .to_string();
        let span = self.span_from(start_line, start_col);

        if malformed_tail || lexeme.parse::<f64>().is_err() {
            self.emit_error(
                ErrorCode::INVALID_NUMBER,
                format!("malformed number '{lexeme}'"),
                span,
            );
            return None;
        }

        Some(Token::new(TokenKind::Number(lexeme), span))
    }
}
