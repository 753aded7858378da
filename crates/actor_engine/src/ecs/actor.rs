//! # Actors
//!
//! An actor is a scene object: a transform, a lifecycle state and an ordered
//! set of components it exclusively owns. Game-specific logic that belongs to
//! the actor itself rather than to a reusable component goes in an
//! [`ActorBehavior`].
//!
//! Actors are handed to the [`World`] by value and addressed afterwards
//! through their [`ActorId`].

use crate::ecs::component::{Component, Sprite};
use crate::ecs::world::World;
use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::{Transform2D, Vec2};
use crate::input::KeyboardState;

/// Lifecycle state of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    /// Updated every frame
    #[default]
    Active,
    /// Kept in the world and drawn, but not updated
    Paused,
    /// Removed and destroyed at the end of the frame. Terminal.
    Dead,
}

/// Apply a state transition. `Dead` is terminal; leaving it is refused.
fn transition(current: &mut ActorState, next: ActorState) -> bool {
    if *current == ActorState::Dead && next != ActorState::Dead {
        log::warn!("Ignoring transition out of Dead to {:?}", next);
        return false;
    }
    *current = next;
    true
}

/// Per-actor logic run before the actor's components each frame
pub trait ActorBehavior {
    /// Actor-specific update
    fn update_actor(&mut self, _ctx: &mut ActorContext<'_>, _delta_time: f32) {}

    /// Actor-specific input handling
    fn actor_input(&mut self, _ctx: &mut ActorContext<'_>, _keys: &KeyboardState) {}
}

/// What a component or behavior sees of its owner while running.
///
/// The owner is checked out of the world for the duration of the call, so
/// `world` can be used freely to spawn, inspect or remove other actors. The
/// owner itself is reached through this context only.
pub struct ActorContext<'a> {
    id: ActorId,
    transform: &'a mut Transform2D,
    state: &'a mut ActorState,
    world: &'a mut World,
}

impl<'a> ActorContext<'a> {
    pub(crate) fn new(
        id: ActorId,
        transform: &'a mut Transform2D,
        state: &'a mut ActorState,
        world: &'a mut World,
    ) -> Self {
        Self {
            id,
            transform,
            state,
            world,
        }
    }

    /// Handle of the owning actor
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Owner's transform
    pub fn transform(&self) -> &Transform2D {
        &*self.transform
    }

    /// Mutable owner transform
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut *self.transform
    }

    /// Owner's position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Move the owner
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// Owner's lifecycle state
    pub fn state(&self) -> ActorState {
        *self.state
    }

    /// Change the owner's state. Returns `false` if the owner is already dead.
    pub fn set_state(&mut self, state: ActorState) -> bool {
        transition(self.state, state)
    }

    /// The world the owner lives in
    pub fn world(&self) -> &World {
        &*self.world
    }

    /// Mutable world access
    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    /// Add a new actor to the world.
    ///
    /// The new actor joins the active set after the current pass, so it is
    /// first updated on the next frame.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.world.add_actor(actor)
    }
}

/// A component plus its bookkeeping inside an actor
struct ComponentEntry {
    id: ComponentId,
    order: i32,
    component: Box<dyn Component>,
}

/// Scene object owning a transform, a state and components
pub struct Actor {
    name: String,
    transform: Transform2D,
    state: ActorState,
    components: Vec<ComponentEntry>,
    next_component_id: u32,
    behavior: Option<Box<dyn ActorBehavior>>,
    sprites_added: Vec<ComponentId>,
    sprites_removed: Vec<ComponentId>,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor {
    /// Create an active actor at the origin with no components
    pub fn new() -> Self {
        Self {
            name: String::from("actor"),
            transform: Transform2D::default(),
            state: ActorState::Active,
            components: Vec::new(),
            next_component_id: 0,
            behavior: None,
            sprites_added: Vec::new(),
            sprites_removed: Vec::new(),
        }
    }

    /// Set the name used in log output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the starting position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the starting scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Set the starting rotation in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Attach actor-specific logic
    pub fn with_behavior(mut self, behavior: impl ActorBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Attach a component (builder style)
    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.add_component(Box::new(component));
        self
    }

    /// Name used in log output
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current transform
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Mutable transform
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Move the actor
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// Current uniform scale
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Change the uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
    }

    /// Current rotation in radians
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    /// Change the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = rotation;
    }

    /// Lifecycle state
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Change the lifecycle state.
    ///
    /// Setting `Dead` again is a no-op; any transition out of `Dead` is
    /// refused and returns `false`.
    pub fn set_state(&mut self, state: ActorState) -> bool {
        transition(&mut self.state, state)
    }

    /// Whether the actor has been marked dead
    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    /// Attach a component, returning its id within this actor.
    ///
    /// The component is placed before the first component with a strictly
    /// greater update order. For an actor already in a world, go through
    /// [`World::add_component`] so a sprite is drawn from the next render.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId::new(self.next_component_id);
        self.next_component_id += 1;

        let order = component.update_order();
        if component.as_sprite().is_some() {
            self.sprites_added.push(id);
        }

        let index = self.components.partition_point(|entry| entry.order <= order);
        self.components.insert(index, ComponentEntry { id, order, component });
        id
    }

    /// Detach a component, handing it back. `None` if it is not attached.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self.components.iter().position(|entry| entry.id == id)?;
        let entry = self.components.remove(index);
        if entry.component.as_sprite().is_some() {
            self.sprites_added.retain(|added| *added != id);
            self.sprites_removed.push(id);
        }
        Some(entry.component)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component ids in update order
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().map(|entry| entry.id)
    }

    /// Component by id
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.entry(id).map(|entry| entry.component.as_ref())
    }

    /// Mutable component by id
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.components
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| entry.component.as_mut())
    }

    /// Component by id, downcast to its concrete type
    pub fn component_as<T: Component + 'static>(&self, id: ComponentId) -> Option<&T> {
        let component = self.component(id)?;
        component.as_any().downcast_ref::<T>()
    }

    /// Mutable component by id, downcast to its concrete type
    pub fn component_as_mut<T: Component + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        let component = self.component_mut(id)?;
        component.as_any_mut().downcast_mut::<T>()
    }

    /// First component of a concrete type
    pub fn find_component<T: Component + 'static>(&self) -> Option<&T> {
        self.components.iter().find_map(|entry| {
            let component: &dyn Component = entry.component.as_ref();
            component.as_any().downcast_ref::<T>()
        })
    }

    /// Sprite capability of a component
    pub fn sprite(&self, id: ComponentId) -> Option<&dyn Sprite> {
        self.entry(id)?.component.as_sprite()
    }

    /// Mutable sprite capability of a component
    pub fn sprite_mut(&mut self, id: ComponentId) -> Option<&mut dyn Sprite> {
        self.component_mut(id)?.as_sprite_mut()
    }

    /// Ids of components that are sprites, in update order
    pub fn sprite_ids(&self) -> Vec<ComponentId> {
        self.components
            .iter()
            .filter(|entry| entry.component.as_sprite().is_some())
            .map(|entry| entry.id)
            .collect()
    }

    /// Run one frame of updates: the behavior first, then every component in
    /// update order. Does nothing unless the actor is `Active`.
    pub fn update(&mut self, id: ActorId, world: &mut World, delta_time: f32) {
        if self.state != ActorState::Active {
            return;
        }

        let mut ctx = ActorContext::new(id, &mut self.transform, &mut self.state, world);
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.update_actor(&mut ctx, delta_time);
        }
        for entry in &mut self.components {
            entry.component.update(&mut ctx, delta_time);
        }
    }

    /// Deliver a keyboard snapshot: components first, then the behavior.
    /// Does nothing unless the actor is `Active`.
    pub fn process_input(&mut self, id: ActorId, world: &mut World, keys: &KeyboardState) {
        if self.state != ActorState::Active {
            return;
        }

        let mut ctx = ActorContext::new(id, &mut self.transform, &mut self.state, world);
        for entry in &mut self.components {
            entry.component.process_input(&mut ctx, keys);
        }
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.actor_input(&mut ctx, keys);
        }
    }

    /// Sprites attached and detached since the world last looked
    pub(crate) fn take_sprite_changes(&mut self) -> (Vec<ComponentId>, Vec<ComponentId>) {
        (
            std::mem::take(&mut self.sprites_added),
            std::mem::take(&mut self.sprites_removed),
        )
    }

    pub(crate) fn has_sprite_changes(&self) -> bool {
        !self.sprites_added.is_empty() || !self.sprites_removed.is_empty()
    }

    fn entry(&self, id: ComponentId) -> Option<&ComponentEntry> {
        self.components.iter().find(|entry| entry.id == id)
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("state", &self.state)
            .field("components", &self.components.len())
            .finish()
    }
}
