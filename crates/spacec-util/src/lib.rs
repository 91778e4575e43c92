//! spacec-util - shared foundation types for the spacec front end.
//!
//! This crate holds the pieces every other `spacec-*` crate needs but none
//! of them own exclusively: source positions (`span`), the diagnostic model
//! (`diagnostic`), shared fatal error types (`error`), and the small
//! `Config` struct that carries the one implementation-defined knob the
//! lexer and parser need.
//!
//! The crate is written for a single-threaded, single-pass pipeline (see
//! spec §5): nothing here is `Sync`, and nothing needs to be.

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCategory, Handler, Level};
pub use error::{FrontEndError, LexError, ParseError};
pub use span::Span;

/// Implementation-defined knobs for the lexer and parse-tree builder.
///
/// Spec §6 requires a maximum token length of at least 1024 bytes; every
/// other phase currently has no configurable behavior, so this struct stays
/// intentionally small rather than anticipating options nothing calls for
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum byte length of a single token (string/char literals included).
    pub max_token_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_token_len: 1024,
        }
    }
}
