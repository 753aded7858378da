//! # World
//!
//! Owns every actor, the active/pending split and the draw list, and drives
//! the per-frame passes.
//!
//! ## Deferred mutation
//!
//! While an input or update pass is running the world is `updating`: actors
//! added during the pass go to `pending` and join `active` once the pass ends,
//! so they are first updated on the following frame. Removal is immediate and
//! order-preserving; an actor removed from inside a pass is skipped for the
//! rest of it.
//!
//! ## Checkout
//!
//! During its own update an actor is taken out of storage and handed a
//! `&mut World` through its [`ActorContext`](crate::ecs::actor::ActorContext).
//! Its slot stays reserved, so lookups of that id report
//! [`WorldError::ActorBusy`] until it is put back.
//!
//! ## Dead actors
//!
//! Actors found `Dead` after the update pass leave `active` but stay resident
//! until [`World::end_frame`], so they are drawn on the frame they died and
//! never updated again.

use thiserror::Error;

use crate::ecs::actor::Actor;
use crate::ecs::component::{Component, Sprite};
use crate::ecs::draw_list::DrawList;
use crate::foundation::collections::{ActorId, ComponentId, SlotMap, SpriteKey};
use crate::foundation::math::Color;
use crate::input::KeyboardState;
use crate::render::{RenderError, RenderSurface};

/// Structural misuse of the world
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// No actor with this id exists (never added or already destroyed)
    #[error("Actor {0:?} not found")]
    ActorNotFound(ActorId),

    /// The actor is checked out for its own update
    #[error("Actor {0:?} is busy in its own update")]
    ActorBusy(ActorId),

    /// The actor has no such component
    #[error("Actor {actor:?} has no component {component:?}")]
    ComponentNotFound {
        /// Owning actor
        actor: ActorId,
        /// Missing component
        component: ComponentId,
    },

    /// The component does not draw
    #[error("Component {0:?} is not a sprite")]
    NotASprite(SpriteKey),

    /// The sprite is already in the draw list
    #[error("Sprite {0:?} is already registered")]
    SpriteAlreadyRegistered(SpriteKey),
}

/// Actor storage and frame driver
#[derive(Default)]
pub struct World {
    // `None` while the actor is checked out for its own update
    actors: SlotMap<ActorId, Option<Actor>>,
    active: Vec<ActorId>,
    pending: Vec<ActorId>,
    dying: Vec<ActorId>,
    draw_list: DrawList,
    // Draw-order changes for sprites whose actor was checked out
    deferred_orders: Vec<(SpriteKey, i32)>,
    updating: bool,
    snapshot: Vec<ActorId>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an input or update pass is in progress
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Take ownership of an actor.
    ///
    /// Goes to `pending` during a pass, `active` otherwise. Sprites the actor
    /// already carries are registered immediately.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        log::debug!(
            "Adding actor '{}' with {} component(s){}",
            actor.name(),
            actor.component_count(),
            if self.updating { " (pending)" } else { "" }
        );

        let id = self.actors.insert(Some(actor));
        if self.updating {
            self.pending.push(id);
        } else {
            self.active.push(id);
        }
        self.sync_sprites(id);
        id
    }

    /// Take an actor out of the world, handing it back.
    ///
    /// Its sprites leave the draw list. Returns `None` if the id is unknown,
    /// or if the actor is removing itself mid-update; in that case it is
    /// dropped as soon as its update returns.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        if !self.actors.contains_key(id) {
            return None;
        }

        remove_id(&mut self.active, id);
        remove_id(&mut self.pending, id);
        remove_id(&mut self.dying, id);
        self.draw_list.remove_actor(id);
        self.deferred_orders.retain(|(key, _)| key.actor != id);

        self.actors.remove(id).flatten()
    }

    /// Remove and drop an actor with all of its components.
    ///
    /// Returns `false` if there was no such actor.
    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        if !self.actors.contains_key(id) {
            return false;
        }
        if let Some(actor) = self.remove_actor(id) {
            log::debug!("Destroyed actor '{}'", actor.name());
        }
        true
    }

    /// Whether the id refers to a live actor (including one mid-update)
    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    /// Actor by id. `None` if unknown or checked out.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)?.as_ref()
    }

    /// Mutable actor by id.
    ///
    /// Components attached through the returned reference are registered
    /// for drawing at the end of the next update; use
    /// [`add_component`](Self::add_component) to register at once.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)?.as_mut()
    }

    /// Number of live actors
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Actors updated each frame, in update order
    pub fn active_actors(&self) -> &[ActorId] {
        &self.active
    }

    /// Actors added during the current pass
    pub fn pending_actors(&self) -> &[ActorId] {
        &self.pending
    }

    /// Attach a component to an actor in the world, registering it for
    /// drawing if it is a sprite
    pub fn add_component(&mut self, id: ActorId, component: Box<dyn Component>) -> Result<ComponentId, WorldError> {
        let component_id = self.resident_mut(id)?.add_component(component);
        self.sync_sprites(id);
        Ok(component_id)
    }

    /// Detach a component, handing it back. No-op if either is absent.
    pub fn remove_component(&mut self, id: ActorId, component: ComponentId) -> Option<Box<dyn Component>> {
        let removed = match self.resident_mut(id) {
            Ok(actor) => actor.remove_component(component),
            Err(e) => {
                log::debug!("Cannot remove component {:?}: {}", component, e);
                return None;
            }
        };
        self.sync_sprites(id);
        removed
    }

    /// Insert a sprite into the draw list at its current draw order
    pub fn register_sprite(&mut self, key: SpriteKey) -> Result<(), WorldError> {
        let order = self.sprite_of(key)?.draw_order();
        if !self.draw_list.insert(key, order) {
            return Err(WorldError::SpriteAlreadyRegistered(key));
        }
        Ok(())
    }

    /// Take a sprite out of the draw list. Returns `false` if it was not in it.
    pub fn unregister_sprite(&mut self, key: SpriteKey) -> bool {
        self.draw_list.remove(key).is_some()
    }

    /// Change a sprite's draw order, moving it within the draw list.
    ///
    /// The sprite lands after any others already at `order`. An actor may
    /// change its own sprites' order during its update; the sprite itself
    /// picks up the new value when the update returns.
    ///
    /// For a sprite that is not in the draw list only the stored order
    /// changes; it takes effect at the next [`register_sprite`](Self::register_sprite).
    pub fn set_draw_order(&mut self, key: SpriteKey, order: i32) -> Result<(), WorldError> {
        match self.actors.get_mut(key.actor) {
            None => return Err(WorldError::ActorNotFound(key.actor)),
            Some(None) => {
                if !self.draw_list.contains(key) {
                    return Err(WorldError::ActorBusy(key.actor));
                }
                self.deferred_orders.retain(|(deferred, _)| *deferred != key);
                self.deferred_orders.push((key, order));
            }
            Some(Some(actor)) => {
                if actor.component(key.component).is_none() {
                    return Err(WorldError::ComponentNotFound {
                        actor: key.actor,
                        component: key.component,
                    });
                }
                let sprite = actor
                    .sprite_mut(key.component)
                    .ok_or(WorldError::NotASprite(key))?;
                sprite.sprite_mut().set_draw_order(order);
            }
        }
        if !self.draw_list.reorder(key, order) {
            log::debug!("Sprite {:?} not drawn; order {} applies when registered", key, order);
        }
        Ok(())
    }

    /// Registered draw order of a sprite
    pub fn draw_order(&self, key: SpriteKey) -> Option<i32> {
        self.draw_list.order_of(key)
    }

    /// The draw list, back to front
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Deliver a keyboard snapshot to every active actor.
    ///
    /// Runs as a pass: actors added meanwhile are deferred.
    pub fn process_input(&mut self, keys: &KeyboardState) {
        self.run_pass(|actor, id, world| actor.process_input(id, world, keys));
    }

    /// Update every active actor, then promote pending actors and retire
    /// dead ones.
    pub fn update(&mut self, delta_time: f32) {
        // Actors retired last frame if end_frame was skipped
        self.end_frame();

        self.run_pass(|actor, id, world| actor.update(id, world, delta_time));
        self.promote_pending();
        self.retire_dead();
        self.sync_all_sprites();
    }

    /// Clear to black, draw every registered sprite back to front, present
    pub fn render(&self, surface: &mut dyn RenderSurface) -> Result<(), RenderError> {
        surface.clear(Color::BLACK);
        for key in self.draw_list.keys() {
            let Some(actor) = self.actor(key.actor) else {
                continue;
            };
            if let Some(sprite) = actor.sprite(key.component) {
                sprite.draw(surface, actor.transform());
            }
        }
        surface.present()
    }

    /// Destroy the actors retired by the last update
    pub fn end_frame(&mut self) {
        for id in std::mem::take(&mut self.dying) {
            self.destroy_actor(id);
        }
    }

    /// One full simulation frame: input, update, render, then destruction of
    /// actors that died this frame
    pub fn run_frame(
        &mut self,
        keys: &KeyboardState,
        delta_time: f32,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), RenderError> {
        self.process_input(keys);
        self.update(delta_time);
        let presented = self.render(surface);
        self.end_frame();
        presented
    }

    /// Destroy every actor and empty the draw list
    pub fn clear(&mut self) {
        let count = self.actors.len();
        self.actors.clear();
        self.active.clear();
        self.pending.clear();
        self.dying.clear();
        self.draw_list.clear();
        self.deferred_orders.clear();
        if count > 0 {
            log::info!("Destroyed {} actor(s)", count);
        }
    }

    fn run_pass(&mut self, mut visit: impl FnMut(&mut Actor, ActorId, &mut World)) {
        let was_updating = std::mem::replace(&mut self.updating, true);

        let mut snapshot = std::mem::take(&mut self.snapshot);
        snapshot.clear();
        snapshot.extend_from_slice(&self.active);

        for &id in &snapshot {
            // Skips actors removed earlier in this pass
            let Some(mut actor) = self.actors.get_mut(id).and_then(Option::take) else {
                continue;
            };
            visit(&mut actor, id, self);
            self.check_in(id, actor);
        }

        self.snapshot = snapshot;
        self.updating = was_updating;
    }

    fn check_in(&mut self, id: ActorId, mut actor: Actor) {
        let Some(slot) = self.actors.get_mut(id) else {
            log::debug!("Destroyed actor '{}' (removed during its update)", actor.name());
            return;
        };

        self.deferred_orders.retain(|(key, order)| {
            if key.actor != id {
                return true;
            }
            if let Some(sprite) = actor.sprite_mut(key.component) {
                sprite.sprite_mut().set_draw_order(*order);
            }
            false
        });

        *slot = Some(actor);
        self.sync_sprites(id);
    }

    fn promote_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        log::debug!("Promoting {} pending actor(s)", self.pending.len());
        let pending = std::mem::take(&mut self.pending);
        self.active.extend(pending);
    }

    fn retire_dead(&mut self) {
        let actors = &self.actors;
        let dying = &mut self.dying;
        self.active.retain(|id| {
            let dead = actors
                .get(*id)
                .and_then(Option::as_ref)
                .is_some_and(Actor::is_dead);
            if dead {
                dying.push(*id);
            }
            !dead
        });
    }

    fn sync_sprites(&mut self, id: ActorId) {
        let Some(Some(actor)) = self.actors.get_mut(id) else {
            return;
        };
        let (added, removed) = actor.take_sprite_changes();
        for component in removed {
            self.draw_list.remove(SpriteKey::new(id, component));
        }
        for component in added {
            if let Some(sprite) = actor.sprite(component) {
                self.draw_list.insert(SpriteKey::new(id, component), sprite.draw_order());
            }
        }
    }

    fn sync_all_sprites(&mut self) {
        let changed: Vec<ActorId> = self
            .actors
            .iter()
            .filter_map(|(id, slot)| match slot {
                Some(actor) if actor.has_sprite_changes() => Some(id),
                _ => None,
            })
            .collect();
        for id in changed {
            self.sync_sprites(id);
        }
    }

    fn resident_mut(&mut self, id: ActorId) -> Result<&mut Actor, WorldError> {
        match self.actors.get_mut(id) {
            None => Err(WorldError::ActorNotFound(id)),
            Some(None) => Err(WorldError::ActorBusy(id)),
            Some(Some(actor)) => Ok(actor),
        }
    }

    fn sprite_of(&self, key: SpriteKey) -> Result<&dyn Sprite, WorldError> {
        let actor = match self.actors.get(key.actor) {
            None => return Err(WorldError::ActorNotFound(key.actor)),
            Some(None) => return Err(WorldError::ActorBusy(key.actor)),
            Some(Some(actor)) => actor,
        };
        let component = actor
            .component(key.component)
            .ok_or(WorldError::ComponentNotFound {
                actor: key.actor,
                component: key.component,
            })?;
        component.as_sprite().ok_or(WorldError::NotASprite(key))
    }
}

/// Remove the first occurrence of `id`, keeping the order of the rest
fn remove_id(list: &mut Vec<ActorId>, id: ActorId) {
    if let Some(index) = list.iter().position(|entry| *entry == id) {
        list.remove(index);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("actors", &self.actors.len())
            .field("active", &self.active.len())
            .field("pending", &self.pending.len())
            .field("sprites", &self.draw_list.len())
            .field("updating", &self.updating)
            .finish()
    }
}
