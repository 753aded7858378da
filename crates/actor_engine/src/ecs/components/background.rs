//! Horizontally scrolling, multi-layer background
//!
//! Each layer is a screen-sized texture with its own offset and speed. A
//! layer is drawn twice, at `offset` and at `offset + width`, so it tiles
//! seamlessly while the offset wraps within one screen width.

use crate::assets::TextureHandle;
use crate::ecs::actor::ActorContext;
use crate::ecs::component::{Component, Sprite};
use crate::ecs::components::sprite::SpriteComponent;
use crate::foundation::math::{Rect, Transform2D, Vec2};
use crate::render::RenderSurface;

/// Draw order given to new backgrounds, behind default sprites
pub const DEFAULT_BG_DRAW_ORDER: i32 = 10;

/// One scrolling layer
#[derive(Debug, Clone)]
pub struct BgLayer {
    texture: Option<TextureHandle>,
    offset: f32,
    speed: f32,
}

impl BgLayer {
    /// Layer texture
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Horizontal offset, always in `(-width, 0]`
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Scroll speed in units per second (negative scrolls left)
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// Scrolling background sprite
#[derive(Debug, Clone)]
pub struct BgSpriteComponent {
    sprite: SpriteComponent,
    layers: Vec<BgLayer>,
    screen_size: Vec2,
}

impl Default for BgSpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_BG_DRAW_ORDER)
    }
}

impl BgSpriteComponent {
    /// Create a background covering a 1024x768 screen
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            layers: Vec::new(),
            screen_size: Vec2::new(1024.0, 768.0),
        }
    }

    /// Set the screen size layers are stretched to (builder style)
    pub fn with_screen_size(mut self, screen_size: Vec2) -> Self {
        self.screen_size = screen_size;
        self
    }

    /// Append a layer, drawn above the ones added before it.
    ///
    /// Returns the layer index.
    pub fn add_layer(&mut self, texture: Option<TextureHandle>, speed: f32) -> usize {
        self.layers.push(BgLayer {
            texture,
            offset: 0.0,
            speed,
        });
        self.layers.len() - 1
    }

    /// Append a layer (builder style)
    pub fn with_layer(mut self, texture: Option<TextureHandle>, speed: f32) -> Self {
        self.add_layer(texture, speed);
        self
    }

    /// Change a layer's speed. Returns `false` for an unknown index.
    pub fn set_layer_speed(&mut self, index: usize, speed: f32) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.speed = speed;
                true
            }
            None => false,
        }
    }

    /// All layers, back to front
    pub fn layers(&self) -> &[BgLayer] {
        &self.layers
    }

    /// Screen size layers are drawn at
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}

/// Normalize an offset into `(-width, 0]`
fn wrap_offset(offset: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    let wrapped = offset.rem_euclid(width);
    if wrapped > 0.0 {
        wrapped - width
    } else {
        0.0
    }
}

impl Component for BgSpriteComponent {
    fn update(&mut self, _ctx: &mut ActorContext<'_>, delta_time: f32) {
        let width = self.screen_size.x;
        for layer in &mut self.layers {
            layer.offset = wrap_offset(layer.offset + layer.speed * delta_time, width);
        }
    }

    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }

    fn as_sprite_mut(&mut self) -> Option<&mut dyn Sprite> {
        Some(self)
    }
}

impl Sprite for BgSpriteComponent {
    fn sprite(&self) -> &SpriteComponent {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut SpriteComponent {
        &mut self.sprite
    }

    fn draw(&self, surface: &mut dyn RenderSurface, owner: &Transform2D) {
        let (width, height) = (self.screen_size.x, self.screen_size.y);
        let left = owner.position.x - width / 2.0;
        let top = owner.position.y - height / 2.0;

        for layer in &self.layers {
            let Some(texture) = &layer.texture else {
                continue;
            };
            for shift in [layer.offset, layer.offset + width] {
                surface.blit(texture, None, Rect::new(left + shift, top, width, height), 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageData, Texture};
    use crate::ecs::tests::run_detached;
    use crate::render::{DrawCommand, RecordingSurface};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn layer_texture(name: &str) -> Option<TextureHandle> {
        Some(Arc::new(Texture::new(name, ImageData::solid_color(2, 2, [0, 0, 0, 255]))))
    }

    fn step(bg: &mut BgSpriteComponent, delta_time: f32) {
        run_detached(&mut Transform2D::default(), |ctx| bg.update(ctx, delta_time));
    }

    #[test]
    fn test_wrap_offset() {
        assert_relative_eq!(wrap_offset(-3.2, 1024.0), -3.2, epsilon = 1e-3);
        assert_relative_eq!(wrap_offset(-1030.0, 1024.0), -6.0, epsilon = 1e-3);
        assert_relative_eq!(wrap_offset(10.0, 1024.0), -1014.0, epsilon = 1e-3);
        assert_eq!(wrap_offset(-1024.0, 1024.0), 0.0);
        assert_eq!(wrap_offset(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_layers_scroll_independently() {
        let mut bg = BgSpriteComponent::default()
            .with_layer(layer_texture("Farback01.png"), -100.0)
            .with_layer(layer_texture("Stars.png"), -200.0);

        step(&mut bg, 0.5);

        assert_relative_eq!(bg.layers()[0].offset(), -50.0);
        assert_relative_eq!(bg.layers()[1].offset(), -100.0);
    }

    #[test]
    fn test_offset_stays_within_one_screen() {
        let mut bg = BgSpriteComponent::default().with_layer(layer_texture("Stars.png"), -200.0);

        for _ in 0..1000 {
            step(&mut bg, 0.05);
            let offset = bg.layers()[0].offset();
            assert!(offset > -1024.0 && offset <= 0.0, "offset {offset} out of range");
        }
    }

    #[test]
    fn test_each_layer_drawn_twice() {
        let mut bg = BgSpriteComponent::default()
            .with_layer(layer_texture("Farback01.png"), -100.0)
            .with_layer(None, -50.0)
            .with_layer(layer_texture("Stars.png"), -200.0);
        step(&mut bg, 0.5);

        let owner = Transform2D::from_position(Vec2::new(512.0, 384.0));
        let mut surface = RecordingSurface::new();
        bg.draw(&mut surface, &owner);
        surface.present().unwrap();

        let dests: Vec<(String, Rect)> = surface
            .last_frame()
            .unwrap()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Blit { texture, dest, .. } => Some((texture.clone(), *dest)),
                _ => None,
            })
            .collect();

        assert_eq!(
            dests,
            vec![
                ("Farback01.png".to_string(), Rect::new(-50.0, 0.0, 1024.0, 768.0)),
                ("Farback01.png".to_string(), Rect::new(974.0, 0.0, 1024.0, 768.0)),
                ("Stars.png".to_string(), Rect::new(-100.0, 0.0, 1024.0, 768.0)),
                ("Stars.png".to_string(), Rect::new(924.0, 0.0, 1024.0, 768.0)),
            ]
        );
    }
}
