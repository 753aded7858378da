//! Lifetime Component
//!
//! Marks its owner dead once a duration has elapsed. A non-positive duration
//! never expires.

use crate::ecs::actor::{ActorContext, ActorState};
use crate::ecs::component::Component;

/// Kills the owning actor after a fixed time
#[derive(Debug, Clone, Copy)]
pub struct LifetimeComponent {
    /// How long the owner lives, in seconds
    pub duration: f32,
    /// Time lived so far, in seconds
    pub elapsed: f32,
}

impl LifetimeComponent {
    /// Create a lifetime of `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Whether the lifetime has run out
    pub fn is_expired(&self) -> bool {
        if self.duration <= 0.0 {
            false
        } else {
            self.elapsed >= self.duration
        }
    }

    /// Seconds left
    pub fn remaining(&self) -> f32 {
        if self.duration <= 0.0 {
            f32::INFINITY
        } else {
            (self.duration - self.elapsed).max(0.0)
        }
    }
}

impl Component for LifetimeComponent {
    fn update(&mut self, ctx: &mut ActorContext<'_>, delta_time: f32) {
        self.elapsed += delta_time;
        if self.is_expired() && ctx.state() != ActorState::Dead {
            log::debug!("Lifetime of {:.2}s expired", self.duration);
            ctx.set_state(ActorState::Dead);
        }
    }
}
