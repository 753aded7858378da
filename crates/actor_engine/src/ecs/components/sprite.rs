//! Single-texture sprite
//!
//! Draws its texture centered on the owner, scaled by the owner's scale and
//! rotated by the owner's rotation. Also the shared state embedded by every
//! other sprite variant.

use std::sync::Arc;

use crate::assets::TextureHandle;
use crate::ecs::component::{Component, Sprite};
use crate::foundation::math::Transform2D;
use crate::render::RenderSurface;

/// Draw order given to sprites that do not choose one
pub const DEFAULT_DRAW_ORDER: i32 = 100;

/// Textured sprite
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    texture: Option<TextureHandle>,
    draw_order: i32,
    tex_width: u32,
    tex_height: u32,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl SpriteComponent {
    /// Create a sprite with no texture
    pub fn new(draw_order: i32) -> Self {
        Self {
            texture: None,
            draw_order,
            tex_width: 0,
            tex_height: 0,
        }
    }

    /// Set the texture (builder style)
    pub fn with_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.set_texture(texture);
        self
    }

    /// Replace the texture, caching its size. `None` makes the sprite
    /// invisible.
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        let (width, height) = texture
            .as_ref()
            .map_or((0, 0), |texture| (texture.width(), texture.height()));
        self.tex_width = width;
        self.tex_height = height;
        self.texture = texture;
    }

    /// Current texture
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Whether the current texture is `texture`
    pub fn shows(&self, texture: &TextureHandle) -> bool {
        self.texture.as_ref().is_some_and(|current| Arc::ptr_eq(current, texture))
    }

    /// Draw order
    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    /// Store a new draw order. The world keeps the draw list in step; see
    /// [`World::set_draw_order`](crate::ecs::World::set_draw_order).
    pub(crate) fn set_draw_order(&mut self, draw_order: i32) {
        self.draw_order = draw_order;
    }

    /// Cached texture width
    pub fn tex_width(&self) -> u32 {
        self.tex_width
    }

    /// Cached texture height
    pub fn tex_height(&self) -> u32 {
        self.tex_height
    }

    /// Blit the texture centered on the owner. No-op without a texture.
    pub fn draw(&self, surface: &mut dyn RenderSurface, owner: &Transform2D) {
        let Some(texture) = &self.texture else {
            return;
        };
        let dest = owner.centered_rect(self.tex_width as f32, self.tex_height as f32);
        // Clockwise on screen
        surface.blit(texture, None, dest, -owner.rotation_degrees());
    }
}

impl Component for SpriteComponent {
    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }

    fn as_sprite_mut(&mut self) -> Option<&mut dyn Sprite> {
        Some(self)
    }
}

impl Sprite for SpriteComponent {
    fn sprite(&self) -> &SpriteComponent {
        self
    }

    fn sprite_mut(&mut self) -> &mut SpriteComponent {
        self
    }
}
