//! Diagnostic category codes.
//!
//! One variant per recoverable error category in spec §7. Each carries a
//! stable `E00NN` code so tooling built on top of this crate can key off a
//! string rather than matching on the Rust enum directly.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    AlreadyDefined,
    NotDefined,
    TypeMismatch,
    StatementMisplacement,
    WrongAccessor,
    WrongArgument,
    Modifier,
    NoSuchArrayDimension,
}

impl DiagnosticCategory {
    /// The `E00NN` code used in rendered output.
    pub const fn code(self) -> &'static str {
        match self {
            DiagnosticCategory::AlreadyDefined => "E0001",
            DiagnosticCategory::NotDefined => "E0002",
            DiagnosticCategory::TypeMismatch => "E0003",
            DiagnosticCategory::StatementMisplacement => "E0004",
            DiagnosticCategory::WrongAccessor => "E0005",
            DiagnosticCategory::WrongArgument => "E0006",
            DiagnosticCategory::Modifier => "E0007",
            DiagnosticCategory::NoSuchArrayDimension => "E0008",
        }
    }

    /// The exception-style name spec §7 uses in its table, e.g.
    /// `TypeMismatchException`.
    pub const fn exception_name(self) -> &'static str {
        match self {
            DiagnosticCategory::AlreadyDefined => "AlreadyDefinedException",
            DiagnosticCategory::NotDefined => "NotDefinedException",
            DiagnosticCategory::TypeMismatch => "TypeMismatchException",
            DiagnosticCategory::StatementMisplacement => "StatementMisplacementException",
            DiagnosticCategory::WrongAccessor => "WrongAccessorException",
            DiagnosticCategory::WrongArgument => "WrongArgumentException",
            DiagnosticCategory::Modifier => "ModifierException",
            DiagnosticCategory::NoSuchArrayDimension => "NoSuchArrayDimensionException",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exception_name())
    }
}
