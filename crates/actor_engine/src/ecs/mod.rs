//! Actor/component scene model
//!
//! A [`World`] owns [`Actor`]s, each owning an ordered list of
//! [`Component`]s. Components that draw are tracked in the world's
//! [`DrawList`].

pub mod actor;
pub mod component;
pub mod components;
pub mod draw_list;
pub mod world;

#[cfg(test)]
pub(crate) mod tests;

pub use actor::{Actor, ActorBehavior, ActorContext, ActorState};
pub use component::{AsAny, Component, Sprite, DEFAULT_UPDATE_ORDER};
pub use draw_list::{DrawEntry, DrawList};
pub use world::{World, WorldError};
