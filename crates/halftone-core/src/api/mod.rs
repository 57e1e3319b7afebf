//! Public entry point: [`Halftoner`] and its per-frame [`FrameInputs`].

mod halftoner;

pub use halftoner::{FrameInputs, Halftoner};
