//! Math utilities and types
//!
//! Provides the 2D math types used by actors and sprites.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Position, uniform scale and rotation of an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Center position in screen space
    pub position: Vec2,

    /// Uniform scale (1.0 for 100%)
    pub scale: f32,

    /// Rotation angle in radians
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Create a transform at the given position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the scale (builder style)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the rotation in radians (builder style)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation converted to degrees, as render backends usually expect
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Rectangle of the given unscaled size centered on this transform
    pub fn centered_rect(&self, width: f32, height: f32) -> Rect {
        let w = width * self.scale;
        let h = height * self.scale;
        Rect::new(self.position.x - w / 2.0, self.position.y - h / 2.0, w, h)
    }
}

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque black, the frame clear color
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Create a color from components
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as an array
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
