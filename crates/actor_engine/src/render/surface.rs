//! Render surface abstraction
//!
//! The engine issues a fixed sequence per frame: `clear`, then `blit` /
//! `fill_rect` for every sprite in draw-list order, then `present`. Backends
//! implement [`RenderSurface`] to turn those calls into real rendering.

use thiserror::Error;

use crate::assets::Texture;
use crate::foundation::math::{Color, Rect};

/// Drawing target for one frame
pub trait RenderSurface {
    /// Clear the whole target to a color
    fn clear(&mut self, color: Color);

    /// Fill a rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw (a region of) a texture into `dest`, rotated clockwise by
    /// `angle_degrees` around the destination center
    fn blit(&mut self, texture: &Texture, source: Option<Rect>, dest: Rect, angle_degrees: f32);

    /// Show the finished frame.
    ///
    /// An error here means the renderer is no longer usable and the frame
    /// loop ends.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The device or window backing the surface is gone
    #[error("Render device lost: {0}")]
    DeviceLost(String),

    /// Any other backend failure
    #[error("Render backend error: {0}")]
    Backend(String),
}
