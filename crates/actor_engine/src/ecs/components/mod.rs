//! Built-in components
//!
//! Sprite variants share a [`SpriteComponent`] for their draw order and
//! texture. [`LifetimeComponent`] is plain per-frame logic.

pub mod animated_sprite;
pub mod background;
pub mod lifetime;
pub mod sprite;
pub mod tile_map;

pub use animated_sprite::{AnimSpriteComponent, AnimationError, AnimationSwitch, DEFAULT_ANIM_FPS};
pub use background::{BgLayer, BgSpriteComponent, DEFAULT_BG_DRAW_ORDER};
pub use lifetime::LifetimeComponent;
pub use sprite::{SpriteComponent, DEFAULT_DRAW_ORDER};
pub use tile_map::{TileMapComponent, DEFAULT_TILE_SIZE};
