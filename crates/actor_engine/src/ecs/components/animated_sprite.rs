//! Frame-based sprite animation
//!
//! Holds named frame sequences and advances a fractional frame counter by
//! `fps * dt` each update. The counter wraps modulo the sequence length and
//! the frame shown is its floor.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::assets::TextureHandle;
use crate::ecs::actor::ActorContext;
use crate::ecs::component::{Component, Sprite};
use crate::ecs::components::sprite::{SpriteComponent, DEFAULT_DRAW_ORDER};

/// Playback rate given to new animated sprites
pub const DEFAULT_ANIM_FPS: f32 = 24.0;

/// What happens to the frame counter when switching animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSwitch {
    /// Start the new animation from its first frame
    #[default]
    Restart,
    /// Keep the counter, wrapped to the new sequence length
    Continue,
}

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// No animation registered under that name
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    /// Tried to register an animation without frames
    #[error("Animation {0} has no frames")]
    EmptyAnimation(String),
}

/// Sprite cycling through named frame sequences
#[derive(Debug, Clone)]
pub struct AnimSpriteComponent {
    sprite: SpriteComponent,
    animations: HashMap<String, Vec<TextureHandle>>,
    current: Option<String>,
    frame: f32,
    fps: f32,
    switch: AnimationSwitch,
}

impl Default for AnimSpriteComponent {
    fn default() -> Self {
        Self::new(DEFAULT_DRAW_ORDER)
    }
}

impl AnimSpriteComponent {
    /// Create an animated sprite with no animations
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            animations: HashMap::new(),
            current: None,
            frame: 0.0,
            fps: DEFAULT_ANIM_FPS,
            switch: AnimationSwitch::default(),
        }
    }

    /// Set the playback rate (builder style)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the switch policy (builder style)
    pub fn with_switch_policy(mut self, switch: AnimationSwitch) -> Self {
        self.switch = switch;
        self
    }

    /// Register (or replace) a named frame sequence.
    ///
    /// The first animation registered starts playing immediately.
    pub fn add_animation(&mut self, name: impl Into<String>, frames: Vec<TextureHandle>) -> Result<(), AnimationError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(AnimationError::EmptyAnimation(name));
        }

        let replaces_current = self.current.as_deref() == Some(name.as_str());
        self.animations.insert(name.clone(), frames);

        if self.current.is_none() || replaces_current {
            self.current = Some(name);
            self.frame = 0.0;
            self.show_current_frame();
        }
        Ok(())
    }

    /// Switch to a named animation.
    ///
    /// Switching to the animation already playing changes nothing. Otherwise
    /// the frame counter follows the switch policy.
    pub fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        let Some(frames) = self.animations.get(name) else {
            return Err(AnimationError::UnknownAnimation(name.to_string()));
        };
        if self.current.as_deref() == Some(name) {
            return Ok(());
        }

        self.frame = match self.switch {
            AnimationSwitch::Restart => 0.0,
            AnimationSwitch::Continue => wrap_frame(self.frame, frames.len()),
        };
        log::debug!("Switching animation to {}", name);
        self.current = Some(name.to_string());
        self.show_current_frame();
        Ok(())
    }

    /// Name of the animation playing
    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Index of the frame shown
    pub fn current_frame_index(&self) -> Option<usize> {
        self.current.as_ref()?;
        Some(self.frame.floor() as usize)
    }

    /// Fractional frame counter
    pub fn frame_counter(&self) -> f32 {
        self.frame
    }

    /// Playback rate in frames per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Change the playback rate
    pub fn set_fps(&mut self, fps: f32) {
        self.fps = fps;
    }

    /// Switch policy
    pub fn switch_policy(&self) -> AnimationSwitch {
        self.switch
    }

    /// Registered animation names
    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    fn current_frames(&self) -> Option<&[TextureHandle]> {
        let name = self.current.as_ref()?;
        self.animations.get(name).map(Vec::as_slice)
    }

    fn show_current_frame(&mut self) {
        let texture = self
            .current_frames()
            .and_then(|frames| frames.get(self.frame.floor() as usize))
            .map(Arc::clone);
        self.sprite.set_texture(texture);
    }
}

/// Wrap a frame counter into `[0, length)`.
///
/// `rem_euclid` of a tiny negative value rounds up to exactly `length`.
fn wrap_frame(counter: f32, length: usize) -> f32 {
    let length = length as f32;
    let wrapped = counter.rem_euclid(length);
    if wrapped >= length {
        0.0
    } else {
        wrapped
    }
}

impl Component for AnimSpriteComponent {
    fn update(&mut self, _ctx: &mut ActorContext<'_>, delta_time: f32) {
        let Some(length) = self.current_frames().map(<[TextureHandle]>::len) else {
            return;
        };

        self.frame = wrap_frame(self.frame + self.fps * delta_time, length);
        self.show_current_frame();
    }

    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }

    fn as_sprite_mut(&mut self) -> Option<&mut dyn Sprite> {
        Some(self)
    }
}

impl Sprite for AnimSpriteComponent {
    fn sprite(&self) -> &SpriteComponent {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut SpriteComponent {
        &mut self.sprite
    }
}
