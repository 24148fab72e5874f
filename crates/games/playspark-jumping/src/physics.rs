use serde::{Deserialize, Serialize};

use playspark_core::game_trait::{KeyState, Point, Rect};
use playspark_core::program::JumpingProgram;

/// Character box edge length in pixels.
pub const CHARACTER_SIZE: f32 = 40.0;
/// How far below a platform top the character's feet may sink and still land.
const PLATFORM_LAND_TOLERANCE: f32 = 10.0;
/// Axis distance within which a collectible is picked up.
pub const PICKUP_REACH: f32 = 30.0;
/// Below this y the character has fallen off the world and is respawned.
const FALL_RESPAWN_Y: f32 = 600.0;

/// The player-controlled box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
}

impl Character {
    pub fn new(start: Point) -> Self {
        Self {
            x: start.x,
            y: start.y,
            velocity_y: 0.0,
            on_ground: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, CHARACTER_SIZE, CHARACTER_SIZE)
    }
}

/// Whether the character's feet are inside the landing band of `platform`.
fn lands_on(c: &Character, platform: &Rect) -> bool {
    let feet = c.y + CHARACTER_SIZE;
    c.x < platform.x + platform.width
        && c.x + CHARACTER_SIZE > platform.x
        && feet >= platform.y
        && feet < platform.y + platform.height + PLATFORM_LAND_TOLERANCE
}

/// Advance the character by one frame: gravity, walking, jumping, landing.
pub fn tick_character(c: &mut Character, keys: &KeyState, program: &JumpingProgram) {
    if !c.on_ground {
        c.velocity_y += program.gravity;
    }

    let speed = program.player_speed as f32;
    if keys.left() {
        c.x -= speed;
    }
    if keys.right() {
        c.x += speed;
    }
    if keys.space() && c.on_ground {
        c.velocity_y = program.jump_power as f32;
        c.on_ground = false;
    }

    c.y += c.velocity_y;

    c.on_ground = false;
    for platform in &program.platforms {
        if lands_on(c, platform) {
            c.y = platform.y - CHARACTER_SIZE;
            c.velocity_y = 0.0;
            c.on_ground = true;
        }
    }

    if c.y > FALL_RESPAWN_Y {
        *c = Character::new(program.start);
    }
}
