//! Frame-level scenario tests for the world, plus shared test helpers

mod frame_scenarios;

use std::sync::Arc;

use crate::assets::{ImageData, Texture};
use crate::ecs::actor::{Actor, ActorContext, ActorState};
use crate::ecs::component::Component;
use crate::ecs::components::SpriteComponent;
use crate::ecs::world::World;
use crate::foundation::math::Transform2D;
use crate::input::KeyboardState;

/// Run `f` with a context whose owner lives in a throwaway world
pub(crate) fn run_detached<R>(transform: &mut Transform2D, f: impl FnOnce(&mut ActorContext<'_>) -> R) -> R {
    let mut world = World::new();
    let id = world.add_actor(Actor::new());
    let mut state = ActorState::Active;
    let mut ctx = ActorContext::new(id, transform, &mut state, &mut world);
    f(&mut ctx)
}

/// Component running a closure every update
pub(crate) struct OnUpdate<F>(F);

impl<F> Component for OnUpdate<F>
where
    F: FnMut(&mut ActorContext<'_>, f32) + 'static,
{
    fn update(&mut self, ctx: &mut ActorContext<'_>, delta_time: f32) {
        (self.0)(ctx, delta_time);
    }
}

pub(crate) fn on_update<F>(f: F) -> OnUpdate<F>
where
    F: FnMut(&mut ActorContext<'_>, f32) + 'static,
{
    OnUpdate(f)
}

/// Component running a closure on every input snapshot
pub(crate) struct OnInput<F>(F);

impl<F> Component for OnInput<F>
where
    F: FnMut(&mut ActorContext<'_>, &KeyboardState) + 'static,
{
    fn process_input(&mut self, ctx: &mut ActorContext<'_>, keys: &KeyboardState) {
        (self.0)(ctx, keys);
    }
}

pub(crate) fn on_input<F>(f: F) -> OnInput<F>
where
    F: FnMut(&mut ActorContext<'_>, &KeyboardState) + 'static,
{
    OnInput(f)
}

/// Sprite with a 16x16 texture of the given name
pub(crate) fn textured(name: &str, draw_order: i32) -> SpriteComponent {
    let texture = Texture::new(name, ImageData::solid_color(16, 16, [255; 4]));
    SpriteComponent::new(draw_order).with_texture(Some(Arc::new(texture)))
}
