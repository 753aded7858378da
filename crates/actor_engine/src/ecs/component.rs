//! Component and sprite capability traits
//!
//! A component is a unit of per-frame behavior owned by exactly one actor.
//! Components that also render implement [`Sprite`] and expose it through
//! [`Component::as_sprite`]; the world keeps those in its draw list.

use std::any::Any;

use crate::ecs::actor::ActorContext;
use crate::ecs::components::SpriteComponent;
use crate::foundation::math::Transform2D;
use crate::input::KeyboardState;
use crate::render::RenderSurface;

/// Update order given to components that do not override it
pub const DEFAULT_UPDATE_ORDER: i32 = 100;

/// Downcasting support for trait objects
pub trait AsAny {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to an actor and updated once per frame.
///
/// Within one actor, components run in ascending [`update_order`]; ties keep
/// attachment order. The order is read once when the component is attached.
///
/// [`update_order`]: Component::update_order
pub trait Component: AsAny {
    /// Advance the component by `delta_time` seconds
    fn update(&mut self, _ctx: &mut ActorContext<'_>, _delta_time: f32) {}

    /// React to this frame's keyboard snapshot
    fn process_input(&mut self, _ctx: &mut ActorContext<'_>, _keys: &KeyboardState) {}

    /// Position in the owner's update sequence (lower runs first)
    fn update_order(&self) -> i32 {
        DEFAULT_UPDATE_ORDER
    }

    /// The sprite capability, for components that draw
    fn as_sprite(&self) -> Option<&dyn Sprite> {
        None
    }

    /// Mutable sprite capability
    fn as_sprite_mut(&mut self) -> Option<&mut dyn Sprite> {
        None
    }
}

/// Drawing capability of a component.
///
/// Every sprite variant embeds a [`SpriteComponent`] holding the shared
/// state (draw order, texture). Variants that draw something other than a
/// single centered texture override [`draw`](Sprite::draw).
pub trait Sprite {
    /// Shared sprite state
    fn sprite(&self) -> &SpriteComponent;

    /// Mutable shared sprite state
    fn sprite_mut(&mut self) -> &mut SpriteComponent;

    /// Painter's-algorithm key (lower is drawn first, further back)
    fn draw_order(&self) -> i32 {
        self.sprite().draw_order()
    }

    /// Draw at the owner's transform
    fn draw(&self, surface: &mut dyn RenderSurface, owner: &Transform2D) {
        self.sprite().draw(surface, owner);
    }
}
