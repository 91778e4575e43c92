//! Fatal error types.
//!
//! These are the non-recoverable half of spec §7's error table: conditions
//! that stop a phase outright rather than accumulating as a [`crate::Diagnostic`].
//! Lexer errors carry their own variant set so `spacec-lex` doesn't need to
//! depend on `spacec-par`'s error type and vice versa; [`FrontEndError`] is
//! the union `spacec-front` returns from its single entry point.

use thiserror::Error;

use crate::span::Span;

/// Fatal lexer conditions (spec §4.1 "Errors").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {0:?}")]
    UnterminatedString(Span),

    #[error("unterminated block comment starting at {0:?}")]
    UnterminatedComment(Span),

    #[error("unrecognized character {character:?} at {span:?}")]
    UnknownCharacter { character: char, span: Span },

    #[error("token exceeds the maximum length of {max} bytes at {span:?}")]
    TokenTooLong { span: Span, max: usize },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString(s) => *s,
            LexError::UnterminatedComment(s) => *s,
            LexError::UnknownCharacter { span, .. } => *span,
            LexError::TokenTooLong { span, .. } => *span,
        }
    }
}

/// Fatal parse-tree builder conditions.
///
/// The distilled grammar in spec §4.2 assumes well-formed recursive
/// descent, but a real token stream can still run out mid-construct (a
/// truncated file, a dangling `if` with no body); a production front end
/// needs somewhere to report that rather than panicking or indexing out of
/// bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token {found:?}, expected {expected} at {span:?}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
}

/// The top-level fatal error `spacec-front::compile` can return.
#[derive(Debug, Error)]
pub enum FrontEndError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Never constructed on the normal path — Rust aborts the process on
    /// genuine allocation failure rather than returning an error the
    /// library could catch. The variant exists purely so this `Result`'s
    /// shape matches spec §6's exit-code table (0 = success, non-zero =
    /// fatal lexer error or allocation failure) without pretending to
    /// handle OOM gracefully.
    #[error("allocation failure")]
    AllocationFailure,
}
