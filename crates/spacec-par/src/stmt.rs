//! Statement construction (spec §4.2.4): one constructor per statement
//! form, dispatched from the current token the way the teacher's own
//! `parse_stmt` dispatches on `Token::Let`/`If`/`While`/…

use spacec_lex::TokenKind;
use spacec_util::error::ParseError;
use spacec_util::Span;

use crate::expr::{parse_condition_chain, parse_expression};
use crate::node::{NodeKind, ParseNode};
use crate::stream::TokenStream;
use crate::types::parse_type_annotation;

/// Dispatches on the current token to the matching statement constructor.
/// Falls through to an expression statement (assignment, compound
/// assignment, or a bare call) when nothing else claims the token, mirroring
/// the teacher's own statement-dispatch fallback.
pub fn parse_statement(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    match stream.kind() {
        TokenKind::KwGlobal | TokenKind::KwSecure | TokenKind::KwPrivate => {
            parse_modified_statement(stream)
        }
        TokenKind::KwVar | TokenKind::KwConst => parse_var_or_const(stream, None),
        TokenKind::KwIf => parse_if(stream),
        TokenKind::KwElse => parse_else(stream),
        TokenKind::KwCheck => parse_check(stream),
        TokenKind::KwWhile => parse_while(stream),
        TokenKind::KwDo => parse_do(stream),
        TokenKind::KwFor => parse_for(stream),
        TokenKind::KwTry => parse_try(stream),
        TokenKind::KwCatch => parse_catch(stream),
        TokenKind::KwReturn => parse_return(stream),
        TokenKind::KwBreak => parse_break(stream),
        TokenKind::KwContinue => parse_continue(stream),
        TokenKind::KwEnum => parse_enum(stream),
        TokenKind::KwInclude => parse_include(stream),
        TokenKind::KwClass => parse_class(stream, None),
        TokenKind::KwFunction => parse_function(stream, None),
        TokenKind::KwThis
            if stream.peek_kind(1) == TokenKind::Colon
                && stream.peek_kind(2) == TokenKind::Colon =>
        {
            parse_constructor(stream)
        }
        _ => parse_expression_statement(stream),
    }
}

/// `{ stmt* }`, the body of every scope-introducing construct.
pub fn parse_block(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.expect(TokenKind::LBrace, "'{'")?;
    let mut statements = Vec::new();
    while !stream.is(TokenKind::RBrace) && !stream.is(TokenKind::Eof) {
        statements.push(parse_statement(stream)?);
    }
    stream.expect(TokenKind::RBrace, "'}'")?;
    Ok(ParseNode::new(NodeKind::Runnable, span).with_details(statements))
}

/// A modifier keyword (`global`/`secure`/`private`) ahead of `var`, `const`,
/// `function`, or `class`.
fn parse_modified_statement(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    let text = stream.current().text.clone();
    stream.advance();
    match stream.kind() {
        TokenKind::KwVar | TokenKind::KwConst => parse_var_or_const(stream, Some((text, span))),
        TokenKind::KwFunction => parse_function(stream, Some((text, span))),
        TokenKind::KwClass => parse_class(stream, Some((text, span))),
        _ => Err(stream.unexpected("'var', 'const', 'function', or 'class' after a modifier")),
    }
}

/// Builds the `Modifier` node every declaration carries in `left`. Absent a
/// modifier keyword this is still emitted, with an empty `value` meaning
/// package-global, so every declaration kind has one consistent slot.
fn build_modifier(modifier: Option<(String, Span)>, fallback_span: Span) -> ParseNode {
    match modifier {
        Some((text, span)) => ParseNode::leaf(NodeKind::Modifier, text, span),
        None => ParseNode::new(NodeKind::Modifier, fallback_span),
    }
}

/// `[modifier] (var|const) name:Type [= expr];`. The declared `NodeKind` is
/// picked by inspecting the parsed initializer's own kind rather than by any
/// bespoke parsing path, since `parse_expression` already builds array
/// literals, ternaries, and constructor calls uniformly.
fn parse_var_or_const(
    stream: &mut TokenStream,
    modifier: Option<(String, Span)>,
) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    let is_const = stream.is(TokenKind::KwConst);
    stream.advance(); // var | const
    let name = stream.expect(TokenKind::Identifier, "a variable name")?;
    stream.expect(TokenKind::Colon, "':' before a type annotation")?;
    let ty = parse_type_annotation(stream)?;
    let initializer = if stream.eat(TokenKind::Assign) {
        Some(parse_expression(stream)?)
    } else {
        None
    };
    stream.expect(TokenKind::Semicolon, "';'")?;

    let kind = if is_const {
        NodeKind::Constant
    } else {
        match initializer.as_ref().map(|node| node.kind) {
            Some(NodeKind::ArrayLiteral) => NodeKind::ArrayVariable,
            Some(NodeKind::Ternary) => NodeKind::ConditionalVariable,
            Some(NodeKind::ConstructorCall) => NodeKind::InstanceVariable,
            _ => NodeKind::Variable,
        }
    };

    let mut node = ParseNode::new(kind, span)
        .with_value(name.text)
        .with_left(build_modifier(modifier, span))
        .with_details(vec![ty]);
    if let Some(init) = initializer {
        node = node.with_right(init);
    }
    Ok(node)
}

fn parse_if(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // if
    stream.expect(TokenKind::LParen, "'('")?;
    let condition = parse_condition_chain(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::If, span)
        .with_left(condition)
        .with_right(body))
}

/// `else` alone, or `else if (...) {...}`; adjacency to a preceding `if`/
/// `else if` sibling is checked by the analyzer, not here (spec §4.3.7).
fn parse_else(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // else
    if stream.eat(TokenKind::KwIf) {
        stream.expect(TokenKind::LParen, "'('")?;
        let condition = parse_condition_chain(stream)?;
        stream.expect(TokenKind::RParen, "')'")?;
        let body = parse_block(stream)?;
        Ok(ParseNode::new(NodeKind::ElseIf, span)
            .with_left(condition)
            .with_right(body))
    } else {
        let body = parse_block(stream)?;
        Ok(ParseNode::new(NodeKind::Else, span).with_right(body))
    }
}

/// `check (expr is Type) {...}`. Spec §4.2 gives no grammar for `check`/`is`
/// beyond the keywords and the `Is` scope kind it implies (§4.3.1); modeled
/// on `if`'s condition+body shape since `check` is itself a conditional,
/// narrowed to the `is`-expression form `parse_condition_leaf` now accepts.
fn parse_check(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // check
    stream.expect(TokenKind::LParen, "'('")?;
    let condition = parse_condition_chain(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::Is, span)
        .with_left(condition)
        .with_right(body))
}

fn parse_while(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // while
    stream.expect(TokenKind::LParen, "'('")?;
    let condition = parse_condition_chain(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::While, span)
        .with_left(condition)
        .with_right(body))
}

fn parse_do(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // do
    let body = parse_block(stream)?;
    stream.expect(TokenKind::KwWhile, "'while'")?;
    stream.expect(TokenKind::LParen, "'('")?;
    let condition = parse_condition_chain(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(ParseNode::new(NodeKind::Do, span)
        .with_left(condition)
        .with_right(body))
}

/// `for (init; cond; step) {...}`. `details[0]` is the condition,
/// `details[1]` the step expression, `left` the initializer, `right` the
/// body (spec §4.2.4).
fn parse_for(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // for
    stream.expect(TokenKind::LParen, "'('")?;
    let initializer = parse_var_or_const(stream, None)?;
    let condition = parse_condition_chain(stream)?;
    stream.expect(TokenKind::Semicolon, "';'")?;
    let step = parse_assignment(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::For, span)
        .with_left(initializer)
        .with_right(body)
        .with_details(vec![condition, step]))
}

fn parse_try(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // try
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::Try, span).with_right(body))
}

/// `catch (param) {...}`; the catch parameter occupies `details[0]` (its
/// one-entry param list, per spec §4.3.1), body in `right`.
fn parse_catch(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // catch
    stream.expect(TokenKind::LParen, "'('")?;
    let param = parse_parameter(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::Catch, span)
        .with_details(vec![param])
        .with_right(body))
}

/// `return [expr];` — the expression form is whatever `parse_expression`
/// built (constructor call, ternary, array literal, or a plain term), per
/// spec §4.2.4's "constructor-call, conditional-expression, array-
/// initializer, and term" contract.
fn parse_return(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // return
    let mut node = ParseNode::new(NodeKind::Return, span);
    if !stream.is(TokenKind::Semicolon) {
        node = node.with_left(parse_expression(stream)?);
    }
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(node)
}

fn parse_break(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // break
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(ParseNode::new(NodeKind::Break, span))
}

fn parse_continue(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // continue
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(ParseNode::new(NodeKind::Continue, span))
}

/// `enum Name { a [: n], b, ... }`. Omitted values auto-assign from 0, or
/// from the last explicit value + 1 — the Open Question resolution
/// recorded in SPEC_FULL.md/DESIGN.md.
fn parse_enum(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // enum
    let name = stream.expect(TokenKind::Identifier, "an enum name")?;
    stream.expect(TokenKind::LBrace, "'{'")?;

    let mut enumerators = Vec::new();
    let mut next_value: i64 = 0;
    if !stream.is(TokenKind::RBrace) {
        loop {
            let entry_span = stream.span();
            let entry_name = stream.expect(TokenKind::Identifier, "an enumerator name")?;

            let (value_text, value_span) = if stream.eat(TokenKind::Colon) {
                let value_tok =
                    stream.expect(TokenKind::IntegerLiteral, "an enumerator's explicit value")?;
                next_value = value_tok.text.parse().unwrap_or(next_value);
                (value_tok.text, value_tok.span)
            } else {
                (next_value.to_string(), entry_span)
            };
            next_value += 1;

            let value_node = ParseNode::leaf(NodeKind::Value, value_text, value_span);
            enumerators.push(
                ParseNode::new(NodeKind::Enumerator, entry_span)
                    .with_value(entry_name.text)
                    .with_right(value_node),
            );

            if !stream.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    stream.expect(TokenKind::RBrace, "'}'")?;
    Ok(ParseNode::new(NodeKind::Enum, span)
        .with_value(name.text)
        .with_details(enumerators))
}

/// `include a.b.c;` — the dotted path becomes a left-deep member-access
/// tree under the include node, same shape as any other access chain.
fn parse_include(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // include
    let first = stream.expect(TokenKind::Identifier, "a module name")?;
    let mut display = first.text.clone();
    let mut path = ParseNode::leaf(NodeKind::Identifier, first.text, first.span);

    while stream.is(TokenKind::Dot) {
        let dot_span = stream.span();
        stream.advance();
        let segment = stream.expect(TokenKind::Identifier, "a module path segment")?;
        display.push('.');
        display.push_str(&segment.text);
        let segment_node = ParseNode::leaf(NodeKind::Identifier, segment.text, segment.span);
        path = ParseNode::new(NodeKind::MemberAccess, dot_span)
            .with_value(".")
            .with_left(path)
            .with_right(segment_node);
    }
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(ParseNode::new(NodeKind::Include, span)
        .with_value(display)
        .with_left(path))
}

/// `[modifier] class Name [extends Parent] [with Iface, ...] {...}`.
fn parse_class(
    stream: &mut TokenStream,
    modifier: Option<(String, Span)>,
) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // class
    let name = stream.expect(TokenKind::Identifier, "a class name")?;

    let mut details = Vec::new();
    if stream.eat(TokenKind::KwExtends) {
        let parent_span = stream.span();
        let parent = stream.expect(TokenKind::Identifier, "a parent class name")?;
        details.push(ParseNode::leaf(NodeKind::Inheritance, parent.text, parent_span));
    }
    if stream.eat(TokenKind::KwWith) {
        loop {
            let iface_span = stream.span();
            let iface = stream.expect(TokenKind::Identifier, "an interface name")?;
            details.push(ParseNode::leaf(NodeKind::Interface, iface.text, iface_span));
            if !stream.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    let body = parse_block(stream)?;

    Ok(ParseNode::new(NodeKind::Class, span)
        .with_value(name.text)
        .with_left(build_modifier(modifier, span))
        .with_right(body)
        .with_details(details))
}

/// `this::constructor(params) {...}`. `::` is two adjacent `Colon` tokens —
/// the language's operator set (spec §6) has no dedicated double-colon
/// lexeme. `details[0]` is a `ConstructorParamMarker` distinguishing this
/// parameter list from a regular function's for overload resolution (spec
/// §4.2.4 "Constructors"), followed by the actual parameters.
fn parse_constructor(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // this
    stream.expect(TokenKind::Colon, "':' in 'this::constructor'")?;
    stream.expect(TokenKind::Colon, "':' in 'this::constructor'")?;
    stream.expect(TokenKind::KwConstructor, "'constructor'")?;
    stream.expect(TokenKind::LParen, "'('")?;

    let mut details = vec![ParseNode::new(NodeKind::ConstructorParamMarker, span)];
    if !stream.is(TokenKind::RParen) {
        loop {
            details.push(parse_parameter(stream)?);
            if !stream.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;
    Ok(ParseNode::new(NodeKind::Constructor, span)
        .with_right(body)
        .with_details(details))
}

/// `[modifier] function:RetType name(params) {...}`. `details[0]` is the
/// `ReturnType`, the rest are `Parameter`s.
fn parse_function(
    stream: &mut TokenStream,
    modifier: Option<(String, Span)>,
) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    stream.advance(); // function
    stream.expect(TokenKind::Colon, "':' before a function's return type")?;
    let ret_span = stream.span();
    let ret_ty = parse_type_annotation(stream)?;
    let return_type = ParseNode::new(NodeKind::ReturnType, ret_span).with_details(vec![ret_ty]);

    let name = stream.expect(TokenKind::Identifier, "a function name")?;
    stream.expect(TokenKind::LParen, "'('")?;
    let mut details = vec![return_type];
    if !stream.is(TokenKind::RParen) {
        loop {
            details.push(parse_parameter(stream)?);
            if !stream.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    stream.expect(TokenKind::RParen, "')'")?;
    let body = parse_block(stream)?;

    Ok(ParseNode::new(NodeKind::Function, span)
        .with_value(name.text)
        .with_left(build_modifier(modifier, span))
        .with_right(body)
        .with_details(details))
}

/// `name:Type`, shared by function parameters, constructor parameters, and
/// catch's single parameter.
fn parse_parameter(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let span = stream.span();
    let name = stream.expect(TokenKind::Identifier, "a parameter name")?;
    stream.expect(TokenKind::Colon, "':' before a parameter's type")?;
    let ty = parse_type_annotation(stream)?;
    Ok(ParseNode::new(NodeKind::Parameter, span)
        .with_value(name.text)
        .with_details(vec![ty]))
}

/// A bare expression, optionally followed by `=`/`+=`/`-=`/`*=`/`/=` and a
/// right-hand side — shared between expression statements and `for`'s step
/// expression, since both need assignment without a surrounding statement
/// keyword.
fn parse_assignment(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let target = parse_expression(stream)?;
    let op = match stream.kind() {
        TokenKind::Assign => Some("="),
        TokenKind::PlusEq => Some("+="),
        TokenKind::MinusEq => Some("-="),
        TokenKind::StarEq => Some("*="),
        TokenKind::SlashEq => Some("/="),
        _ => None,
    };
    if let Some(op) = op {
        let span = stream.span();
        stream.advance();
        let value = parse_expression(stream)?;
        Ok(ParseNode::new(NodeKind::BinaryOp, span)
            .with_value(op)
            .with_left(target)
            .with_right(value))
    } else {
        Ok(target)
    }
}

/// A plain assignment, compound assignment, or bare call used as a
/// statement — generalized from the teacher's own expression-statement
/// fallback, which folds assignment into the same dispatch rather than
/// giving it a dedicated statement keyword.
fn parse_expression_statement(stream: &mut TokenStream) -> Result<ParseNode, ParseError> {
    let node = parse_assignment(stream)?;
    stream.expect(TokenKind::Semicolon, "';'")?;
    Ok(node)
}
