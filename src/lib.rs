//! Halftone Studio
//!
//! Real-time halftone rendering around [`halftone_core`]: media sources,
//! a raster surface, SVG frame export, shareable settings codes and an
//! HTTP API. This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod media;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
