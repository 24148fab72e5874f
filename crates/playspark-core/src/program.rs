//! Typed game programs.
//!
//! A [`GameProgram`] is what the generator hands to the execution host: one
//! variant per canned game, carrying every tunable the game reads at start.
//! Serialized to JSON it is the program blob a browser host instantiates.

use serde::{Deserialize, Serialize};

use crate::game_trait::{Capabilities, Point, Rect};
use crate::game_type::GameType;

/// Player speed tier picked in the construction wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedTier {
    /// Read a tier from a wizard label such as "⚡ Super Fast".
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("slow") {
            Self::Slow
        } else if lower.contains("fast") {
            Self::Fast
        } else {
            Self::Normal
        }
    }

    /// Horizontal pixels per frame.
    pub fn player_speed(self) -> i32 {
        match self {
            Self::Slow => 2,
            Self::Normal => 3,
            Self::Fast => 6,
        }
    }

    /// Initial vertical velocity of a jump (negative is up).
    pub fn jump_power(self) -> i32 {
        match self {
            Self::Slow => -12,
            Self::Normal => -15,
            Self::Fast => -18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpingProgram {
    pub player_speed: i32,
    pub jump_power: i32,
    pub gravity: f32,
    pub character_color: String,
    pub platform_color: String,
    pub background: String,
    pub collectible_color: String,
    /// Player start; the player is a 40×40 box.
    pub start: Point,
    pub platforms: Vec<Rect>,
    pub collectibles: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionProgram {
    pub character_color: String,
    pub background: String,
    /// Pickup colors, assigned round-robin by pickup index.
    pub item_colors: Vec<String>,
    pub item_count: u32,
    pub step: f32,
    pub start: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacingProgram {
    pub car_color: String,
    pub background: String,
    pub car: Rect,
    pub horizontal_step: f32,
    pub vertical_step: f32,
    /// Track band drawn across the canvas.
    pub track: Rect,
    /// Decorative 40×40 blocks; they never stop the car.
    pub obstacles: Vec<Point>,
    pub finish: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleProgram {
    pub background: String,
    pub card_colors: Vec<String>,
    /// Card color indices in board order, shuffled at generation.
    pub deck: Vec<u8>,
    pub mismatch_revert_ms: u32,
    pub pairs_to_win: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeProgram {
    pub canvas_color: String,
    pub palette: Vec<String>,
    pub brush_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureProgram {
    pub player_color: String,
    pub goal_color: String,
    pub background: String,
    pub player: Rect,
    pub speed: f32,
    pub goal: Rect,
    pub obstacles: Vec<Rect>,
    pub treasures: Vec<Point>,
}

/// One of the six canned games, fully parameterized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gameType", rename_all = "lowercase")]
pub enum GameProgram {
    Jumping(JumpingProgram),
    Collection(CollectionProgram),
    Racing(RacingProgram),
    Puzzle(PuzzleProgram),
    Creative(CreativeProgram),
    Adventure(AdventureProgram),
}

impl GameProgram {
    pub fn game_type(&self) -> GameType {
        match self {
            Self::Jumping(_) => GameType::Jumping,
            Self::Collection(_) => GameType::Collection,
            Self::Racing(_) => GameType::Racing,
            Self::Puzzle(_) => GameType::Puzzle,
            Self::Creative(_) => GameType::Creative,
            Self::Adventure(_) => GameType::Adventure,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(self.game_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_tiers_from_wizard_labels() {
        assert_eq!(SpeedTier::from_label("🐌 Slow and Steady"), SpeedTier::Slow);
        assert_eq!(SpeedTier::from_label("⚡ Super Fast"), SpeedTier::Fast);
        assert_eq!(SpeedTier::from_label("🚶 Just Right"), SpeedTier::Normal);
        assert_eq!(SpeedTier::from_label(""), SpeedTier::Normal);
    }

    #[test]
    fn tier_numbers() {
        assert_eq!(
            (SpeedTier::Slow.player_speed(), SpeedTier::Slow.jump_power()),
            (2, -12)
        );
        assert_eq!(
            (SpeedTier::Normal.player_speed(), SpeedTier::Normal.jump_power()),
            (3, -15)
        );
        assert_eq!(
            (SpeedTier::Fast.player_speed(), SpeedTier::Fast.jump_power()),
            (6, -18)
        );
    }

    #[test]
    fn program_json_is_tagged_by_game_type() {
        let program = GameProgram::Creative(CreativeProgram {
            canvas_color: "#FFFFFF".to_string(),
            palette: vec!["#000000".to_string()],
            brush_size: 5.0,
        });
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["gameType"], "creative");
        assert_eq!(json["brushSize"], 5.0);

        let back: GameProgram = serde_json::from_value(json).unwrap();
        assert_eq!(back.game_type(), GameType::Creative);
        assert!(back.capabilities().handle_mouse_down);
    }
}
