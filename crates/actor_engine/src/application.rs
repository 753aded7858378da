//! Application trait and lifecycle management

use thiserror::Error;

use crate::assets::{AssetError, TileMapError};
use crate::config::ConfigError;
use crate::ecs::components::AnimationError;
use crate::ecs::WorldError;
use crate::engine::Engine;

/// Application lifecycle trait
///
/// Implement this trait to build a game on the engine. The engine owns the
/// frame loop; the application sets up the world and may hook each frame.
pub trait Application {
    /// Load the application
    ///
    /// Called once after the backend is up and before the first frame. Load
    /// textures and add the initial actors here.
    fn load(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Per-frame hook
    ///
    /// Called every frame before the world processes input and updates.
    /// An error ends the frame loop.
    fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the frame loop ends, while the world and asset
    /// cache are still populated.
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Tile map data error
    #[error("Tile map error: {0}")]
    TileMap(#[from] TileMapError),

    /// Animation setup error
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Structural world error
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
