//! # Recorded Draw Commands
//!
//! A [`RenderSurface`] that stores every call as a [`DrawCommand`] instead of
//! drawing. Headless runs use it to log frames and tests use it to assert on
//! exactly what was drawn and in which order.

use crate::assets::Texture;
use crate::foundation::math::{Color, Rect};
use crate::render::surface::{RenderError, RenderSurface};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Target cleared
    Clear(Color),

    /// Solid rectangle
    FillRect {
        /// Filled area
        rect: Rect,
        /// Fill color
        color: Color,
    },

    /// Texture drawn
    Blit {
        /// Name the texture was loaded under
        texture: String,
        /// Source region, `None` for the whole texture
        source: Option<Rect>,
        /// Destination rectangle
        dest: Rect,
        /// Clockwise rotation in degrees
        angle_degrees: f32,
    },

    /// Frame presented
    Present,
}

impl DrawCommand {
    /// Texture name for blit commands
    pub fn texture_name(&self) -> Option<&str> {
        match self {
            Self::Blit { texture, .. } => Some(texture),
            _ => None,
        }
    }
}

/// Surface that records calls per frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    current: Vec<DrawCommand>,
    frames: Vec<Vec<DrawCommand>>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    /// Create an empty recording surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `present` fail once `frames` frames have been presented
    pub fn failing_after(frames: usize) -> Self {
        Self {
            fail_after: Some(frames),
            ..Self::default()
        }
    }

    /// All presented frames, oldest first
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Texture names blitted in the last presented frame, in draw order
    pub fn last_frame_textures(&self) -> Vec<String> {
        self.last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(DrawCommand::texture_name)
            .map(str::to_owned)
            .collect()
    }

    /// Number of presented frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.current.push(DrawCommand::FillRect { rect, color });
    }

    fn blit(&mut self, texture: &Texture, source: Option<Rect>, dest: Rect, angle_degrees: f32) {
        self.current.push(DrawCommand::Blit {
            texture: texture.name().to_string(),
            source,
            dest,
            angle_degrees,
        });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if self.fail_after.is_some_and(|limit| self.frames.len() >= limit) {
            return Err(RenderError::DeviceLost("recording surface closed".to_string()));
        }
        self.current.push(DrawCommand::Present);
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}
