//! Character stream to token stream (spec §4.1, "Lexer").

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{keyword_kind_for, Token, TokenKind};
