//! exprviz lexer: converts expression text into a token stream.

mod lexer;
pub mod token;

pub use lexer::{LexResult, Lexer};
pub use token::{Token, TokenKind};
