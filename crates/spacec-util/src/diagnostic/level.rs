//! Diagnostic severity.

use std::fmt;

/// How severe a diagnostic is.
///
/// Spec §7 only ever produces `Error`-level diagnostics (there are no
/// warnings in this language), but the level still exists as a closed enum
/// rather than a bare bool so a future `Note`/`Help` attached to an error
/// (e.g. "previous declaration was here") has somewhere to live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Note,
}

impl Level {
    pub const fn is_error(self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
        }
    }
}
