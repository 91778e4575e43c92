//! Top-level entry point: tokens in, a single root `Runnable` tree out.

use spacec_lex::{Token, TokenKind};
use spacec_util::error::ParseError;
use spacec_util::Span;

use crate::node::{NodeKind, ParseNode};
use crate::stmt::parse_statement;
use crate::stream::TokenStream;

/// Builds the program's parse tree from an already-lexed token slice
/// (spec §4.2: "a top-level loop inspects the current token and dispatches
/// to a constructor for each statement form").
pub fn parse_program(tokens: &[Token]) -> Result<ParseNode, ParseError> {
    let span = tokens
        .first()
        .map(|t| t.span)
        .unwrap_or(Span::synthetic(1, 1));
    let mut stream = TokenStream::new(tokens);
    let mut statements = Vec::new();
    while !stream.is(TokenKind::Eof) {
        statements.push(parse_statement(&mut stream)?);
    }
    Ok(ParseNode::new(NodeKind::Runnable, span).with_details(statements))
}
