//! Fluent diagnostic construction and source-excerpt rendering.

use super::{Diagnostic, DiagnosticCategory, Handler, Level};
use crate::span::Span;

/// Fluent builder for a [`Diagnostic`].
///
/// ```
/// use spacec_util::diagnostic::{DiagnosticBuilder, DiagnosticCategory, Handler};
/// use spacec_util::Span;
///
/// let handler = Handler::new();
/// DiagnosticBuilder::new(DiagnosticCategory::NotDefined, "`x` is not defined")
///     .span(Span::new(0, 1, 1, 1))
///     .emit(&handler);
/// assert_eq!(handler.len(), 1);
/// ```
pub struct DiagnosticBuilder {
    category: DiagnosticCategory,
    message: String,
    span: Span,
    level: Level,
}

impl DiagnosticBuilder {
    pub fn new(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            span: Span::new(0, 0, 1, 1),
            level: Level::Error,
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            category: self.category,
            message: self.message,
            span: self.span,
            level: self.level,
        }
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit(self.build());
    }
}

/// The source excerpt and caret underline shown below a rendered
/// diagnostic, matching spec §6's "print the source line containing the
/// token and a caret underline of length equal to the token text".
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    pub line: String,
    pub line_number: u32,
    pub start_column: u32,
    pub underline_len: usize,
}

impl SourceSnippet {
    /// Extract the snippet for `span` out of the full source buffer.
    pub fn from_source(source: &str, span: Span) -> Self {
        let line = source
            .lines()
            .nth(span.line.saturating_sub(1) as usize)
            .unwrap_or("")
            .to_string();
        SourceSnippet {
            line,
            line_number: span.line,
            start_column: span.column,
            underline_len: span.len().max(1),
        }
    }
}

/// Render a diagnostic as `category: message` followed by the offending
/// source line and a caret underline anchored at the token's column.
/// Color escapes are deliberately not emitted here — per §6 they "must be
/// suppressible", and the simplest way to guarantee that is to never
/// produce them in the first place and let a terminal-aware caller colorize
/// the plain-text category/message itself.
pub fn format_diagnostic(diagnostic: &Diagnostic, source: &str) -> String {
    let snippet = SourceSnippet::from_source(source, diagnostic.span);
    let gutter = format!("{} | ", snippet.line_number);
    let caret_offset = gutter.len() + snippet.start_column.saturating_sub(1) as usize;
    let caret = "^".repeat(snippet.underline_len);

    format!(
        "{level}[{category}]: {message}\n{gutter}{line}\n{pad:>width$}{caret}",
        level = diagnostic.level,
        category = diagnostic.category.exception_name(),
        message = diagnostic.message,
        gutter = gutter,
        line = snippet.line,
        pad = "",
        width = caret_offset,
        caret = caret,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_source_line_and_caret() {
        let source = "var a:int = \"hi\";\n";
        let diag = Diagnostic::new(
            DiagnosticCategory::TypeMismatch,
            "expected INTEGER, got STRING",
            Span::new(13, 17, 1, 14),
        );
        let rendered = format_diagnostic(&diag, source);
        assert!(rendered.contains("TypeMismatchException"));
        assert!(rendered.contains("var a:int = \"hi\";"));
        assert!(rendered.contains("^^^^"));
    }
}
