//! Expression parsing with standard infix precedence.
//!
//! Grammar (lowest → highest):
//!
//! ```text
//! expr   := term { ("+" | "-") term }
//! term   := factor { ("*" | "/") factor }
//! factor := Number | "(" expr ")"
//! ```
//!
//! All binary operators are left-associative. There are no unary operators:
//! `-3` is a parse error, as is anything else outside this grammar.

use exprviz_lexer::token::TokenKind;
use exprviz_types::ast::*;
use exprviz_types::ErrorCode;

use crate::parser::Parser;

impl<'src> Parser<'src> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_add()
    }

    /// `expr = term { ("+" | "-") term }`
    fn parse_add(&mut self) -> Option<Expr> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Some(left)
    }

    /// `term = factor { ("*" | "/") factor }`
    fn parse_mul(&mut self) -> Option<Expr> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Some(left)
    }

    /// `factor = Number | "(" expr ")"`
    fn parse_primary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        match self.peek_kind().clone() {
            TokenKind::Number(lexeme) => {
                self.advance();
                Some(Expr::new(ExprKind::NumberLit(lexeme), start))
            }
            TokenKind::LParen => {
                self.advance(); // eat `(`
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ErrorCode::UNCLOSED_PAREN)?;
                let span = start.merge(self.previous_span());
                Some(Expr::new(ExprKind::Paren(Box::new(inner)), span))
            }
            _ => {
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    format!("expected expression, got '{}'", self.peek_kind()),
                );
                None
            }
        }
    }
}
