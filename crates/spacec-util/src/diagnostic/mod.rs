//! Diagnostic model: categories, severities, and rendering.
//!
//! Diagnostics are data, not control flow (spec §9): a [`Handler`] simply
//! accumulates them as they're discovered during analysis, and nothing in
//! this crate ever aborts a walk because one was emitted. Fatal conditions
//! (unterminated string, OOM, …) are a different, `Result`-based path — see
//! [`crate::error`].

mod builder;
mod codes;
mod level;

pub use builder::{format_diagnostic, DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCategory;
pub use level::Level;

use std::cell::RefCell;

use crate::span::Span;

/// A single recoverable diagnostic: what category it belongs to, a
/// human-readable message, and where in the source it was found.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
    pub span: Span,
    pub level: Level,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, message: impl Into<String>, span: Span) -> Self {
        Self {
            category,
            message: message.into(),
            span,
            level: Level::Error,
        }
    }
}

/// Accumulates diagnostics emitted during a single analysis run.
///
/// One `Handler` is created per [`crate::Config`]-driven pipeline run and
/// threaded by mutable reference through the lexer/parser/analyzer; it owns
/// no source text itself (see [`format_diagnostic`], which takes the source
/// buffer at render time instead).
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the accumulated diagnostics, in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_accumulates_in_order() {
        let handler = Handler::new();
        handler.emit(Diagnostic::new(
            DiagnosticCategory::NotDefined,
            "x is not defined",
            Span::new(0, 1, 1, 1),
        ));
        handler.emit(Diagnostic::new(
            DiagnosticCategory::TypeMismatch,
            "expected INTEGER, got STRING",
            Span::new(5, 6, 1, 6),
        ));

        let diags = handler.into_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].category, DiagnosticCategory::NotDefined);
        assert_eq!(diags[1].category, DiagnosticCategory::TypeMismatch);
    }
}
