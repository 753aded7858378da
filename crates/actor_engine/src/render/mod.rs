//! Rendering seam
//!
//! The engine renders through the [`RenderSurface`] trait; actual drawing is
//! supplied by a backend.

pub mod surface;
pub mod commands;

pub use surface::{RenderSurface, RenderError};
pub use commands::{DrawCommand, RecordingSurface};
