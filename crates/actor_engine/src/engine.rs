//! Core engine implementation
//!
//! [`Engine::run`] drives the whole lifecycle:
//!
//! 1. initialize the backend (a failure skips straight to teardown)
//! 2. [`Application::load`]
//! 3. frame loop until the input source asks to quit or presenting fails
//! 4. [`Application::cleanup`]
//! 5. teardown: destroy all actors, release textures, shut the backend down
//!
//! Each frame polls input, waits out the frame pacer, runs the application
//! hook, then lets the world process input, update, render and sweep.

use thiserror::Error;

use crate::application::{AppError, Application};
use crate::assets::{AssetCache, AssetError, TextureLoader};
use crate::backend::Backend;
use crate::config::ConfigError;
use crate::core::config::EngineConfig;
use crate::ecs::World;
use crate::foundation::time::{Clock, FramePacer, SystemClock};
use crate::render::RenderError;

/// Main engine struct
///
/// Owns the world, the texture cache and frame timing.
pub struct Engine {
    world: World,
    assets: AssetCache,
    pacer: FramePacer,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine for '{}'", config.window.title);

        let assets = AssetCache::new(&config.assets);
        let pacer = Self::pacer_for(&config, Box::new(SystemClock::new()));

        Ok(Self {
            world: World::new(),
            assets,
            pacer,
            config,
            running: false,
        })
    }

    /// Replace the frame clock (builder style)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.pacer = Self::pacer_for(&self.config, clock);
        self
    }

    /// Replace the texture loader (builder style)
    pub fn with_texture_loader(mut self, loader: Box<dyn TextureLoader>) -> Self {
        self.assets = AssetCache::with_loader(&self.config.assets, loader);
        self
    }

    /// Create an engine and run `app` on `backend` until it quits
    pub fn run<A: Application, B: Backend>(config: EngineConfig, app: &mut A, backend: &mut B) -> Result<(), EngineError> {
        Self::new(config)?.run_with(app, backend)
    }

    /// Run `app` on `backend` until it quits
    pub fn run_with<A: Application, B: Backend>(&mut self, app: &mut A, backend: &mut B) -> Result<(), EngineError> {
        if let Err(e) = backend.initialize(&self.config.window) {
            log::error!("Backend initialization failed: {}", e);
            self.teardown(backend);
            return Err(EngineError::InitializationFailed(e.to_string()));
        }

        if let Err(e) = app.load(self) {
            log::error!("Application failed to load: {}", e);
            app.cleanup(self);
            self.teardown(backend);
            return Err(EngineError::Application(e));
        }

        log::info!("Starting main loop...");
        self.pacer.reset();
        self.running = true;

        let mut result = Ok(());
        while self.running {
            if let Err(e) = self.run_frame(app, backend) {
                log::error!("Frame loop stopped: {}", e);
                result = Err(e);
                break;
            }
        }
        self.running = false;

        log::info!(
            "Main loop finished after {} frame(s), {:.1} average FPS",
            self.pacer.frame_count(),
            self.pacer.average_fps()
        );
        app.cleanup(self);
        self.teardown(backend);
        result
    }

    /// Run a single frame
    pub fn run_frame<A: Application, B: Backend>(&mut self, app: &mut A, backend: &mut B) -> Result<(), EngineError> {
        let input = backend.poll_input();
        if input.wants_exit() {
            log::info!("Quit requested");
            self.running = false;
        }

        let delta_time = self.pacer.tick();
        app.update(self, delta_time)?;

        self.world.run_frame(&input.keys, delta_time, backend)?;
        Ok(())
    }

    /// Stop the frame loop after the current frame
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the texture cache
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Get mutable access to the texture cache
    pub fn assets_mut(&mut self) -> &mut AssetCache {
        &mut self.assets
    }

    /// Frame timing and statistics
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Configuration the engine was created with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn pacer_for(config: &EngineConfig, clock: Box<dyn Clock>) -> FramePacer {
        FramePacer::with_clock(clock).with_limits(config.timing.min_frame(), config.timing.max_delta_secs)
    }

    fn teardown<B: Backend>(&mut self, backend: &mut B) {
        self.world.clear();
        self.assets.shutdown();
        backend.shutdown();
        log::info!("Engine shutdown complete");
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Asset system error
    #[error("Asset system error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}
