//! Demo application: ship, parallax stars, a skeleton and passing comets

use actor_engine::ecs::components::{DEFAULT_ANIM_FPS, DEFAULT_BG_DRAW_ORDER};
use actor_engine::prelude::*;

use crate::comets::CometSpawner;
use crate::ship::create_ship;

const SCREEN: Vec2 = Vec2::new(1024.0, 768.0);
const BG_SCROLL_SPEED: f32 = -200.0;

const WALK: &str = "Skeleton Walk";
const JUMP: &str = "Skeleton Jump";

/// Side-scrolling demo scene
#[derive(Debug)]
pub struct ShipDemo {
    skeleton: Option<(ActorId, ComponentId)>,
    switch_every: f32,
    switch_timer: f32,
    comet_seed: u64,
}

impl ShipDemo {
    /// Create the demo; `comet_seed` fixes the comet pattern
    pub fn new(comet_seed: u64) -> Self {
        Self {
            skeleton: None,
            switch_every: 3.0,
            switch_timer: 0.0,
            comet_seed,
        }
    }

    /// Seconds between skeleton animation switches
    pub fn with_switch_interval(mut self, seconds: f32) -> Self {
        self.switch_every = seconds;
        self
    }

    /// Skeleton actor and its animation component, once loaded
    pub fn skeleton(&self) -> Option<(ActorId, ComponentId)> {
        self.skeleton
    }

    fn load_background(engine: &mut Engine) -> Result<(), AppError> {
        let stars = engine.assets_mut().try_get_texture("Assets/Stars.png")?;
        let far = engine.assets_mut().try_get_texture("Assets/Farback01.png")?;

        let background = BgSpriteComponent::new(DEFAULT_BG_DRAW_ORDER)
            .with_screen_size(SCREEN)
            .with_layer(Some(far), BG_SCROLL_SPEED * 0.5)
            .with_layer(Some(stars), BG_SCROLL_SPEED);

        let actor = Actor::new()
            .with_name("background")
            .with_position(Vec2::new(512.0, 384.0))
            .with_component(background);
        engine.world_mut().add_actor(actor);
        Ok(())
    }

    fn load_skeleton(engine: &mut Engine) -> Result<(ActorId, ComponentId), AppError> {
        let assets = engine.assets_mut();
        let walk = (1..=6)
            .map(|i| assets.try_get_texture(&format!("Assets/Skeleton/Character{i:02}.png")))
            .collect::<Result<Vec<_>, _>>()?;
        let jump = (7..=15)
            .map(|i| assets.try_get_texture(&format!("Assets/Skeleton/Character{i:02}.png")))
            .collect::<Result<Vec<_>, _>>()?;

        let mut anim = AnimSpriteComponent::new(100).with_fps(DEFAULT_ANIM_FPS);
        anim.add_animation(WALK, walk)?;
        anim.add_animation(JUMP, jump)?;

        let mut actor = Actor::new()
            .with_name("skeleton")
            .with_position(Vec2::new(400.0, 184.0))
            .with_scale(1.5);
        let component = actor.add_component(Box::new(anim));
        let id = engine.world_mut().add_actor(actor);
        Ok((id, component))
    }

    fn load_tiles(engine: &mut Engine) -> Result<(), AppError> {
        let tile_set = engine.assets_mut().try_get_texture("Assets/Tiles.png")?;
        let mut tiles = TileMapComponent::new(20).with_tile_set(Some(tile_set));
        if let Err(err) = tiles.load_map("Assets/MapLayer1.csv") {
            log::info!("Skipping tile layer: {}", err);
        }

        let actor = Actor::new().with_name("tiles").with_component(tiles);
        engine.world_mut().add_actor(actor);
        Ok(())
    }

    fn toggle_skeleton(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let Some((id, component)) = self.skeleton else {
            return Ok(());
        };
        let Some(anim) = engine
            .world_mut()
            .actor_mut(id)
            .and_then(|actor| actor.component_as_mut::<AnimSpriteComponent>(component))
        else {
            self.skeleton = None;
            return Ok(());
        };

        let next = if anim.current_animation() == Some(WALK) { JUMP } else { WALK };
        anim.play(next)?;
        log::debug!("Skeleton now playing {}", next);
        Ok(())
    }
}

impl Default for ShipDemo {
    fn default() -> Self {
        Self::new(0x5eed)
    }
}

impl Application for ShipDemo {
    fn load(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Loading ship demo scene");

        Self::load_background(engine)?;
        Self::load_tiles(engine)?;

        let ship = create_ship(engine.assets_mut())?;
        engine.world_mut().add_actor(ship);

        self.skeleton = Some(Self::load_skeleton(engine)?);

        let comet = engine.assets_mut().get_texture("Assets/Comet.png");
        let spawner = Actor::new()
            .with_name("comet spawner")
            .with_component(CometSpawner::new(comet, self.comet_seed));
        engine.world_mut().add_actor(spawner);

        log::info!(
            "Scene ready: {} actors, {} sprites, {} textures",
            engine.world().actor_count(),
            engine.world().draw_list().len(),
            engine.assets().len()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        if self.switch_every <= 0.0 {
            return Ok(());
        }

        self.switch_timer += delta_time;
        if self.switch_timer >= self.switch_every {
            self.switch_timer -= self.switch_every;
            self.toggle_skeleton(engine)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Ship demo finished after {} frames ({:.1} FPS average)",
            engine.pacer().frame_count(),
            engine.pacer().average_fps()
        );
        self.skeleton = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::PlaceholderLoader;
    use actor_engine::foundation::time::ManualClock;

    fn engine() -> Engine {
        Engine::new(EngineConfig::new("ship demo test"))
            .unwrap()
            .with_clock(Box::new(ManualClock::new()))
            .with_texture_loader(Box::new(PlaceholderLoader::new()))
    }

    #[test]
    fn test_load_builds_scene() {
        let mut engine = engine();
        let mut app = ShipDemo::default();

        app.load(&mut engine).unwrap();

        // background, tiles, ship, skeleton, spawner
        assert_eq!(engine.world().actor_count(), 5);
        assert!(engine.assets().contains("Assets/Stars.png"));
        assert!(engine.assets().contains("Assets/Skeleton/Character15.png"));

        let (id, component) = app.skeleton().unwrap();
        let anim = engine
            .world()
            .actor(id)
            .unwrap()
            .component_as::<AnimSpriteComponent>(component)
            .unwrap();
        assert_eq!(anim.current_animation(), Some(WALK));
    }

    #[test]
    fn test_background_behind_ship() {
        let mut engine = engine();
        ShipDemo::default().load(&mut engine).unwrap();

        let orders: Vec<i32> = engine.world().draw_list().iter().map(|entry| entry.order).collect();
        assert_eq!(orders.first(), Some(&DEFAULT_BG_DRAW_ORDER));
        assert!(orders.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_skeleton_switches_animation() {
        let mut engine = engine();
        let mut app = ShipDemo::default().with_switch_interval(1.0);
        app.load(&mut engine).unwrap();
        let (id, component) = app.skeleton().unwrap();
        let playing = |engine: &Engine| {
            engine
                .world()
                .actor(id)
                .and_then(|actor| actor.component_as::<AnimSpriteComponent>(component))
                .and_then(|anim| anim.current_animation().map(str::to_string))
        };

        app.update(&mut engine, 0.5).unwrap();
        assert_eq!(playing(&engine).as_deref(), Some(WALK));

        app.update(&mut engine, 0.5).unwrap();
        assert_eq!(playing(&engine).as_deref(), Some(JUMP));

        app.update(&mut engine, 1.0).unwrap();
        assert_eq!(playing(&engine).as_deref(), Some(WALK));
    }

    #[test]
    fn test_missing_skeleton_is_forgotten() {
        let mut engine = engine();
        let mut app = ShipDemo::default().with_switch_interval(1.0);
        app.load(&mut engine).unwrap();
        let (id, _) = app.skeleton().unwrap();

        engine.world_mut().destroy_actor(id);
        app.update(&mut engine, 1.0).unwrap();

        assert!(app.skeleton().is_none());
    }

    #[test]
    fn test_runs_headless() {
        let mut engine = engine();
        let mut backend = HeadlessBackend::new(ScriptedInput::idle(10).then_hold(&[KeyCode::D], 10));

        engine.run_with(&mut ShipDemo::default(), &mut backend).unwrap();

        assert_eq!(backend.surface().frame_count(), 21);
        assert!(backend.is_shut_down());
        assert_eq!(engine.world().actor_count(), 0);
    }
}
