use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::game_type::GameType;

/// Core trait every generated mini-game implements.
///
/// The host owns the frame loop, keyboard state and pointer events; the
/// game only handles its own rules and drawing.
pub trait MiniGame: Send {
    /// Display metadata for the play screen.
    fn metadata(&self) -> GameMetadata;

    /// Which optional entry points the host may call.
    fn capabilities(&self) -> Capabilities;

    /// Advance host-clock timers (delayed effects). Called every frame,
    /// regardless of capabilities.
    fn tick_timers(&mut self, _dt: f32) {}

    /// Called once per frame before `render` for simulation-driven games.
    fn update(&mut self, _dt: f32, _keys: &KeyState) {}

    /// Draw the current state. Always called.
    fn render(&self, frame: &mut Frame);

    fn handle_click(&mut self, _x: f32, _y: f32) {}

    fn handle_mouse_down(&mut self, _x: f32, _y: f32) {}

    fn handle_mouse_move(&mut self, _x: f32, _y: f32) {}

    fn handle_mouse_up(&mut self) {}

    /// Whether the win condition has been reached.
    fn is_complete(&self) -> bool;

    /// Current score shown to the player.
    fn score(&self) -> u32;

    /// Snapshot of the mutable `game` state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the mutable state with a snapshot from `serialize_state`.
    fn apply_state(&mut self, state: &[u8]);
}

/// Game metadata for the play screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub game_type: GameType,
    pub name: String,
    pub description: String,
}

/// The fixed capability surface a game exposes to the host.
///
/// `game` and `render` are always present and so are not flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub update: bool,
    pub handle_click: bool,
    pub handle_mouse_down: bool,
    pub handle_mouse_move: bool,
    pub handle_mouse_up: bool,
}

impl Capabilities {
    /// Surface for a given game type.
    pub fn for_type(game_type: GameType) -> Self {
        match game_type {
            GameType::Jumping | GameType::Collection | GameType::Racing | GameType::Adventure => {
                Self {
                    update: true,
                    ..Self::default()
                }
            },
            GameType::Puzzle => Self {
                handle_click: true,
                ..Self::default()
            },
            GameType::Creative => Self {
                handle_click: true,
                handle_mouse_down: true,
                handle_mouse_move: true,
                handle_mouse_up: true,
                ..Self::default()
            },
        }
    }

    /// Entry-point names as the host sees them.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec!["game", "render"];
        for (present, name) in [
            (self.update, "update"),
            (self.handle_click, "handleClick"),
            (self.handle_mouse_down, "handleMouseDown"),
            (self.handle_mouse_move, "handleMouseMove"),
            (self.handle_mouse_up, "handleMouseUp"),
        ] {
            if present {
                names.push(name);
            }
        }
        names
    }
}

/// Keyboard state toggled by the host on key down/up, keyed by DOM key name
/// (`"ArrowLeft"`, `" "` ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    keys: HashMap<String, bool>,
}

impl KeyState {
    pub fn set(&mut self, key: &str, down: bool) {
        self.keys.insert(key.to_string(), down);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn left(&self) -> bool {
        self.is_down("ArrowLeft")
    }

    pub fn right(&self) -> bool {
        self.is_down("ArrowRight")
    }

    pub fn up(&self) -> bool {
        self.is_down("ArrowUp")
    }

    pub fn down(&self) -> bool {
        self.is_down("ArrowDown")
    }

    pub fn space(&self) -> bool {
        self.is_down(" ")
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict AABB overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.width && y > self.y && y < self.y + self.height
    }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both axis distances below `reach`: the pickup test every game uses.
    pub fn near(&self, x: f32, y: f32, reach: f32) -> bool {
        (self.x - x).abs() < reach && (self.y - y).abs() < reach
    }
}

/// Generates the `serialize_state` / `apply_state` pair shared by all games.
///
/// Requires the implementing struct to have a `state: $StateType` field.
#[macro_export]
macro_rules! mini_game_state_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }
    };
}
