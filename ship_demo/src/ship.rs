//! Player ship
//!
//! WASD moves the ship at a fixed speed; it is kept inside the left half of
//! the screen.

use actor_engine::prelude::*;

/// Movement speed in units per second
pub const SHIP_SPEED: f32 = 250.0;

/// Lowest allowed position
pub const SHIP_MIN: Vec2 = Vec2::new(25.0, 25.0);

/// Highest allowed position
pub const SHIP_MAX: Vec2 = Vec2::new(500.0, 743.0);

/// Where the ship starts
pub const SHIP_START: Vec2 = Vec2::new(100.0, 384.0);

const SHIP_FRAMES: [&str; 4] = [
    "Assets/Ship01.png",
    "Assets/Ship02.png",
    "Assets/Ship03.png",
    "Assets/Ship04.png",
];

/// Keyboard-driven movement for the ship actor
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Ship {
    right_speed: f32,
    down_speed: f32,
}

impl Ship {
    /// Current velocity from the last input pass
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.right_speed, self.down_speed)
    }
}

impl ActorBehavior for Ship {
    fn update_actor(&mut self, ctx: &mut ActorContext<'_>, delta_time: f32) {
        let pos = ctx.position();
        let x = (pos.x + self.right_speed * delta_time).clamp(SHIP_MIN.x, SHIP_MAX.x);
        let y = (pos.y + self.down_speed * delta_time).clamp(SHIP_MIN.y, SHIP_MAX.y);
        ctx.set_position(Vec2::new(x, y));
    }

    fn actor_input(&mut self, _ctx: &mut ActorContext<'_>, keys: &KeyboardState) {
        self.right_speed = 0.0;
        self.down_speed = 0.0;

        if keys.is_pressed(KeyCode::D) {
            self.right_speed += SHIP_SPEED;
        }
        if keys.is_pressed(KeyCode::A) {
            self.right_speed -= SHIP_SPEED;
        }
        if keys.is_pressed(KeyCode::S) {
            self.down_speed += SHIP_SPEED;
        }
        if keys.is_pressed(KeyCode::W) {
            self.down_speed -= SHIP_SPEED;
        }
    }
}

/// Build the ship actor with its flight animation
pub fn create_ship(assets: &mut AssetCache) -> Result<Actor, AppError> {
    let frames = SHIP_FRAMES
        .iter()
        .map(|name| assets.try_get_texture(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut anim = AnimSpriteComponent::new(100);
    anim.add_animation("Ship Fly", frames)?;

    Ok(Actor::new()
        .with_name("ship")
        .with_position(SHIP_START)
        .with_scale(1.5)
        .with_behavior(Ship::default())
        .with_component(anim))
}
