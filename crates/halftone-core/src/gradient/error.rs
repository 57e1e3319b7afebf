//! Error type for gradient edits.

use std::fmt;

/// Error returned by gradient construction and stop editing.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientError {
    /// A gradient needs at least two stops
    TooFewStops {
        /// Number of stops that would remain
        count: usize,
    },
    /// No stop exists at the given insertion-order index
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of stops in the gradient
        len: usize,
    },
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientError::TooFewStops { count } => {
                write!(f, "gradient needs at least 2 stops, got {}", count)
            }
            GradientError::IndexOutOfRange { index, len } => {
                write!(f, "stop index {} out of range ({} stops)", index, len)
            }
        }
    }
}

impl std::error::Error for GradientError {}
