//! Ship demo
//!
//! Runs the side-scrolling scene on the headless backend with a scripted
//! flight path, then reports how many frames were rendered.

use std::path::Path;

use actor_engine::foundation::logging::parse_level;
use actor_engine::prelude::*;
use ship_demo::{PlaceholderLoader, ShipDemo};

const CONFIG_PATH: &str = "ship_demo.toml";

/// Scripted flight: idle, sweep right, dive, climb back and drift left
fn flight_script() -> ScriptedInput {
    ScriptedInput::idle(30)
        .then_hold(&[KeyCode::D], 90)
        .then_hold(&[KeyCode::D, KeyCode::S], 45)
        .then_hold(&[KeyCode::W], 90)
        .then_hold(&[KeyCode::A], 60)
        .then_hold(&[], 60)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = if Path::new(CONFIG_PATH).exists() {
        EngineConfig::load_from_file(CONFIG_PATH)?
    } else {
        EngineConfig::new("Ship Demo")
    };

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(parse_level(&config.logging.level))
        .parse_default_env()
        .init();

    log::info!("Starting ship demo");

    let mut backend = HeadlessBackend::new(flight_script());
    let mut app = ShipDemo::default();

    let result = Engine::new(config)
        .map(|engine| engine.with_texture_loader(Box::new(PlaceholderLoader::new())))
        .and_then(|mut engine| engine.run_with(&mut app, &mut backend));

    match result {
        Ok(()) => {
            log::info!(
                "Ship demo completed: {} frames rendered",
                backend.surface().frame_count()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Ship demo failed: {}", e);
            Err(e.into())
        }
    }
}
