//! Handle types for stable references into world-owned storage

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to an actor owned by the world.
    ///
    /// Handles of destroyed actors never alias a live actor, so stale handles
    /// resolve to nothing instead of the wrong actor.
    pub struct ActorId;
}

/// Identifier of a component, unique within its owning actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Create a component id from a raw value
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw id value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Reference to a sprite component: owning actor plus component id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    /// Actor owning the sprite
    pub actor: ActorId,
    /// Sprite component within that actor
    pub component: ComponentId,
}

impl SpriteKey {
    /// Create a new sprite key
    pub const fn new(actor: ActorId, component: ComponentId) -> Self {
        Self { actor, component }
    }
}
