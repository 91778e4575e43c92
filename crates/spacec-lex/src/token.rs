//! Token model (spec §3).

use spacec_util::Span;

/// The closed set of lexeme categories the lexer recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharArrayLiteral,

    // Keywords
    KwVar,
    KwConst,
    KwFunction,
    KwClass,
    KwThis,
    KwConstructor,
    KwNew,
    KwIf,
    KwElse,
    KwWhile,
    KwDo,
    KwFor,
    KwTry,
    KwCatch,
    KwReturn,
    KwBreak,
    KwContinue,
    KwEnum,
    KwInclude,
    KwExport,
    KwExtends,
    KwWith,
    KwCheck,
    KwIs,
    KwTrue,
    KwFalse,
    KwNull,
    KwAnd,
    KwOr,
    KwGlobal,
    KwSecure,
    KwPrivate,

    // Punctuation
    Semicolon,
    Comma,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PlusPlus,
    MinusMinus,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    /// `->`, the class-accessor operator (spec §4.3.4 / §4.2.3).
    Arrow,
    FatArrow,
    Question,
    /// Standalone `&`, only produced when not immediately joining an
    /// identifier (see `Lexer::lex_ampersand`).
    Ampersand,

    Eof,
}

impl TokenKind {
    pub const fn is_keyword(self) -> bool {
        keyword_text(self).is_some()
    }
}

/// A classified lexeme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn column(&self) -> u32 {
        self.span.column
    }
}

/// Reverse mapping from keyword kind back to its reserved-word spelling,
/// used both to classify identifiers during lexing and (in tests) to
/// round-trip a kind back to source text.
const fn keyword_text(kind: TokenKind) -> Option<&'static str> {
    use TokenKind::*;
    Some(match kind {
        KwVar => "var",
        KwConst => "const",
        KwFunction => "function",
        KwClass => "class",
        KwThis => "this",
        KwConstructor => "constructor",
        KwNew => "new",
        KwIf => "if",
        KwElse => "else",
        KwWhile => "while",
        KwDo => "do",
        KwFor => "for",
        KwTry => "try",
        KwCatch => "catch",
        KwReturn => "return",
        KwBreak => "break",
        KwContinue => "continue",
        KwEnum => "enum",
        KwInclude => "include",
        KwExport => "export",
        KwExtends => "extends",
        KwWith => "with",
        KwCheck => "check",
        KwIs => "is",
        KwTrue => "true",
        KwFalse => "false",
        KwNull => "null",
        KwAnd => "and",
        KwOr => "or",
        KwGlobal => "global",
        KwSecure => "secure",
        KwPrivate => "private",
        _ => return None,
    })
}

/// Classify an identifier's text as a keyword, if it exactly matches a
/// reserved word (spec §4.1 "Keyword classification").
pub fn keyword_kind_for(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "var" => KwVar,
        "const" => KwConst,
        "function" => KwFunction,
        "class" => KwClass,
        "this" => KwThis,
        "constructor" => KwConstructor,
        "new" => KwNew,
        "if" => KwIf,
        "else" => KwElse,
        "while" => KwWhile,
        "do" => KwDo,
        "for" => KwFor,
        "try" => KwTry,
        "catch" => KwCatch,
        "return" => KwReturn,
        "break" => KwBreak,
        "continue" => KwContinue,
        "enum" => KwEnum,
        "include" => KwInclude,
        "export" => KwExport,
        "extends" => KwExtends,
        "with" => KwWith,
        "check" => KwCheck,
        "is" => KwIs,
        "true" => KwTrue,
        "false" => KwFalse,
        "null" => KwNull,
        "and" => KwAnd,
        "or" => KwOr,
        "global" => KwGlobal,
        "secure" => KwSecure,
        "private" => KwPrivate,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_kind_round_trips_through_its_text() {
        let kinds = [
            TokenKind::KwVar,
            TokenKind::KwConst,
            TokenKind::KwFunction,
            TokenKind::KwClass,
            TokenKind::KwThis,
            TokenKind::KwConstructor,
            TokenKind::KwNew,
            TokenKind::KwIf,
            TokenKind::KwElse,
            TokenKind::KwWhile,
            TokenKind::KwDo,
            TokenKind::KwFor,
            TokenKind::KwTry,
            TokenKind::KwCatch,
            TokenKind::KwReturn,
            TokenKind::KwBreak,
            TokenKind::KwContinue,
            TokenKind::KwEnum,
            TokenKind::KwInclude,
            TokenKind::KwExport,
            TokenKind::KwExtends,
            TokenKind::KwWith,
            TokenKind::KwCheck,
            TokenKind::KwIs,
            TokenKind::KwTrue,
            TokenKind::KwFalse,
            TokenKind::KwNull,
            TokenKind::KwAnd,
            TokenKind::KwOr,
            TokenKind::KwGlobal,
            TokenKind::KwSecure,
            TokenKind::KwPrivate,
        ];
        for kind in kinds {
            let text = keyword_text(kind).unwrap();
            assert_eq!(keyword_kind_for(text), Some(kind));
        }
    }

    #[test]
    fn non_keyword_identifier_is_not_classified() {
        assert_eq!(keyword_kind_for("variable"), None);
        assert_eq!(keyword_kind_for("Foo"), None);
    }
}
