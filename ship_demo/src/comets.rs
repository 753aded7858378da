//! Comets drifting across the screen
//!
//! A [`CometSpawner`] sits on an invisible actor and spawns a comet at a
//! fixed interval. Comets are created mid-update, so they join the world on
//! the following frame, and a [`LifetimeComponent`] retires each one.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use actor_engine::prelude::*;

/// Draw order for comets, in front of the ship
pub const COMET_DRAW_ORDER: i32 = 120;

const SPAWN_X: f32 = 1056.0;
const SPAWN_Y_RANGE: std::ops::Range<f32> = 25.0..743.0;

/// Moves its owner by a constant velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Units per second
    pub velocity: Vector2<f32>,
}

impl Component for Drift {
    fn update(&mut self, ctx: &mut ActorContext<'_>, delta_time: f32) {
        let pos = ctx.position() + self.velocity * delta_time;
        ctx.set_position(pos);
    }
}

/// Periodically spawns short-lived comets
#[derive(Debug)]
pub struct CometSpawner {
    texture: Option<TextureHandle>,
    interval: f32,
    lifetime: f32,
    speed_range: std::ops::Range<f32>,
    timer: f32,
    spawned: u32,
    rng: StdRng,
}

impl CometSpawner {
    /// Spawner using `texture`, seeded for reproducible runs
    pub fn new(texture: Option<TextureHandle>, seed: u64) -> Self {
        Self {
            texture,
            interval: 1.5,
            lifetime: 6.0,
            speed_range: 150.0..350.0,
            timer: 0.0,
            spawned: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seconds between comets
    pub fn with_interval(mut self, interval: f32) -> Self {
        self.interval = interval;
        self
    }

    /// Seconds each comet lives
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Comets spawned so far
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    fn make_comet(&mut self) -> Actor {
        let y = self.rng.gen_range(SPAWN_Y_RANGE);
        let speed = self.rng.gen_range(self.speed_range.clone());
        let spin = self.rng.gen_range(0.0..std::f32::consts::TAU);

        Actor::new()
            .with_name(format!("comet-{}", self.spawned))
            .with_position(Vec2::new(SPAWN_X, y))
            .with_rotation(spin)
            .with_component(SpriteComponent::new(COMET_DRAW_ORDER).with_texture(self.texture.clone()))
            .with_component(Drift {
                velocity: Vector2::new(-speed, 0.0),
            })
            .with_component(LifetimeComponent::new(self.lifetime))
    }
}

impl Component for CometSpawner {
    fn update(&mut self, ctx: &mut ActorContext<'_>, delta_time: f32) {
        if self.interval <= 0.0 {
            return;
        }

        self.timer += delta_time;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            let comet = self.make_comet();
            let id = ctx.spawn(comet);
            self.spawned += 1;
            log::debug!("Spawned comet {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawner_world(spawner: CometSpawner) -> (World, ActorId) {
        let mut world = World::new();
        let id = world.add_actor(Actor::new().with_name("spawner").with_component(spawner));
        (world, id)
    }

    fn spawned(world: &World, id: ActorId) -> u32 {
        world.actor(id).unwrap().find_component::<CometSpawner>().unwrap().spawned()
    }

    #[test]
    fn test_comet_joins_next_frame() {
        let (mut world, id) = spawner_world(CometSpawner::new(None, 7).with_interval(0.5).with_lifetime(10.0));

        world.update(0.25);
        assert_eq!(world.actor_count(), 1);

        world.update(0.25);
        assert_eq!(spawned(&world, id), 1);
        assert_eq!(world.actor_count(), 2);
        assert_eq!(world.active_actors().len(), 2);

        let comet = world.active_actors().iter().copied().find(|&other| other != id).unwrap();
        let start = world.actor(comet).unwrap().position();
        assert_eq!(start.x, SPAWN_X);
        assert!(SPAWN_Y_RANGE.contains(&start.y));

        world.update(0.25);
        assert!(world.actor(comet).unwrap().position().x < SPAWN_X);
    }

    #[test]
    fn test_comets_expire() {
        let (mut world, id) = spawner_world(CometSpawner::new(None, 7).with_interval(0.5).with_lifetime(0.5));

        for _ in 0..4 {
            world.update(0.25);
        }
        world.end_frame();

        assert_eq!(spawned(&world, id), 2);
        assert_eq!(world.actor_count(), 2);
    }

    #[test]
    fn test_comets_are_drawn() {
        let texture = std::sync::Arc::new(Texture::new(
            "Assets/Comet.png",
            actor_engine::assets::ImageData::solid_color(8, 8, [200, 200, 255, 255]),
        ));
        let (mut world, _) = spawner_world(CometSpawner::new(Some(texture), 1).with_interval(0.1));

        world.update(0.1);

        assert_eq!(world.draw_list().len(), 1);
        let mut surface = RecordingSurface::new();
        world.render(&mut surface).unwrap();
        assert_eq!(surface.last_frame_textures(), vec!["Assets/Comet.png"]);
    }

    #[test]
    fn test_zero_interval_never_spawns() {
        let (mut world, id) = spawner_world(CometSpawner::new(None, 3).with_interval(0.0));

        world.update(1.0);

        assert_eq!(spawned(&world, id), 0);
    }

    #[test]
    fn test_same_seed_same_comets() {
        let mut a = CometSpawner::new(None, 42);
        let mut b = CometSpawner::new(None, 42);

        for _ in 0..3 {
            assert_eq!(a.make_comet().position(), b.make_comet().position());
        }
    }
}
