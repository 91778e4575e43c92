//! Token-slice cursor the builder advances over.
//!
//! Grounded on the teacher's own `Parser` (`tokens: Vec<Token>, position:
//! usize`): a flat index into an already-fully-lexed slice, advanced by
//! each constructor as it consumes tokens, rather than the two-value
//! `(node, tokensConsumed)` pair spec.md describes — the pair and a
//! mutated cursor index are the same information, and a cursor reads more
//! naturally in Rust's `&mut self` style.

use spacec_lex::{Token, TokenKind};
use spacec_util::error::ParseError;
use spacec_util::Span;

pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`, else fail.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.is(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consume the current token if it matches `kind`; report whether it did.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        if self.is(TokenKind::Eof) {
            ParseError::UnexpectedEof { expected }
        } else {
            ParseError::UnexpectedToken {
                found: self.current().text.clone(),
                expected,
                span: self.span(),
            }
        }
    }
}
