//! Error type shared by the mode enums.

use std::fmt;

/// Returned when a mode name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError {
    /// Which enum was being parsed ("dither mode", "color mode")
    pub kind: &'static str,
    /// The rejected input
    pub name: String,
}

impl fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.name)
    }
}

impl std::error::Error for UnknownModeError {}
