//! Gradient model: positioned color stops and ramp evaluation.

mod error;
mod gradient;

pub use error::GradientError;
pub use gradient::{Gradient, GradientStop, Ramp, MAX_POSITION, MIN_POSITION};
