//! # Actor Engine
//!
//! A small 2D game engine built around a fixed-cadence frame loop, actors
//! that own ordered components, and sprites drawn back to front by draw
//! order.
//!
//! ## Features
//!
//! - **Actor/Component model**: actors own prioritized components and an
//!   optional behavior hook
//! - **Deferred mutation**: actors spawned mid-update join on the next frame
//! - **Draw-ordered sprites**: static, animated, scrolling-background and
//!   tile-map sprites
//! - **Frame pacing**: minimum frame interval with clamped delta time
//! - **Texture cache**: memoized texture loading with pluggable loaders
//! - **Backend seam**: windowing and rendering behind a trait, with a
//!   headless backend for tests and tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use actor_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn load(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let texture = engine.assets_mut().get_texture("Assets/Ship.png");
//!         let ship = Actor::new()
//!             .with_position(Vec2::new(100.0, 384.0))
//!             .with_component(SpriteComponent::new(150).with_texture(texture));
//!         engine.world_mut().add_actor(ship);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::new("My Game");
//!     let mut backend = HeadlessBackend::new(ScriptedInput::idle(60));
//!     Engine::run(config, &mut MyApp, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_precision_loss
)]

pub mod core;

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod render;

mod application;
mod backend;
mod engine;

pub use application::{AppError, Application};
pub use backend::{Backend, HeadlessBackend};
pub use crate::core::config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetCache, AssetError, Texture, TextureHandle, TextureLoader},
        config::Config,
        core::config::{AssetConfig, LoggingConfig, TimingConfig, WindowConfig},
        ecs::{
            components::{
                AnimSpriteComponent, AnimationSwitch, BgSpriteComponent, LifetimeComponent, SpriteComponent,
                TileMapComponent,
            },
            Actor, ActorBehavior, ActorContext, ActorState, Component, Sprite, World, WorldError,
        },
        foundation::{
            collections::{ActorId, ComponentId, SpriteKey},
            math::{Transform2D, Vec2},
            time::FramePacer,
        },
        input::{InputSnapshot, InputSource, KeyCode, KeyboardState, ScriptedInput},
        render::{RecordingSurface, RenderError, RenderSurface},
        AppError, Application, Backend, Engine, EngineConfig, EngineError, HeadlessBackend,
    };
}
