//! Type-annotation syntax: a base name followed by zero or more `[]`
//! array-dimension suffixes. Resolving that name to a `BaseKind` (built-in
//! vs. class reference vs. external) is the analyzer's job (spec §4.3.3);
//! the builder only records the syntax.

use spacec_lex::TokenKind;
use spacec_util::error::ParseError;

use crate::node::{NodeKind, ParseNode};
use crate::stream::TokenStream;

pub fn parse_type_annotation(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    let name = stream.expect(TokenKind::Identifier, "a type name")?;
    let mut dims = Vec::new();
    while stream.is(TokenKind::LBracket) {
        let dim_span = stream.span();
        stream.advance();
        stream.expect(TokenKind::RBracket, "']' closing an array-dimension suffix")?;
        dims.push(ParseNode::new(NodeKind::ArrayDim, dim_span));
    }
    Ok(ParseNode::new(NodeKind::Type, span)
        .with_value(name.text)
        .with_details(dims))
}
