//! Program generator: interpretation (+ optional wizard choices) in, one of the
//! six canned game programs out.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::construction::GameData;
use crate::game_trait::{Point, Rect};
use crate::game_type::GameType;
use crate::interpreter::GameInterpretation;
use crate::program::{
    AdventureProgram, CollectionProgram, CreativeProgram, GameProgram, JumpingProgram,
    PuzzleProgram, RacingProgram, SpeedTier,
};

const PICKUP_COLORS: [&str; 3] = ["#FFD700", "#FF6B6B", "#4ECDC4"];
const EXTRA_SWATCHES: [&str; 4] = ["#FFD700", "#FF6B6B", "#4ECDC4", "#96CEB4"];
const DEFAULT_CARD_COLORS: [&str; 4] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4"];
const DEFAULT_COLLECTIBLE_COLOR: &str = "#FFD700";

/// Wizard label fragment → value tables. First matching fragment wins.
const CHARACTER_COLORS: &[(&str, &str)] = &[
    ("frog", "#32CD32"),
    ("bunny", "#FF69B4"),
    ("kangaroo", "#4169E1"),
];
const THEME_BACKGROUNDS: &[(&str, &str)] = &[
    ("forest", "#E6FFE6"),
    ("house", "#FFF5EE"),
    ("space", "#1A1A40"),
];
const COLLECTIBLE_COLORS: &[(&str, &str)] = &[
    ("star", "#FFD700"),
    ("apple", "#FF4500"),
    ("gem", "#00CED1"),
];
const VEHICLE_COLORS: &[(&str, &str)] = &[
    ("car", "#FF0000"),
    ("bus", "#FFD700"),
    ("helicopter", "#4169E1"),
];
const CARD_THEMES: &[(&str, [&str; 4])] = &[
    ("rainbow", DEFAULT_CARD_COLORS),
    ("candy", ["#FF69B4", "#FFB347", "#B19CD9", "#77DD77"]),
    ("flower", ["#FFB7C5", "#E6E6FA", "#FFFACD", "#98FB98"]),
];
const BRUSH_SIZES: &[(&str, f32)] = &[("small", 3.0), ("medium", 5.0), ("big", 10.0)];
const CANVAS_COLORS: &[(&str, &str)] = &[
    ("white", "#FFFFFF"),
    ("starry", "#0B1030"),
    ("ocean", "#DFF6FF"),
];

/// A generated game, ready for the execution host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGame {
    pub id: String,
    pub config: GameInterpretation,
    pub game_code: GameProgram,
    /// Entry points the host may call on `game_code`.
    pub capabilities: Vec<String>,
    pub instructions: String,
}

/// Look up a wizard choice in a fragment table, case-insensitively.
fn lookup<T: Copy>(custom: Option<&GameData>, key: &str, table: &[(&str, T)]) -> Option<T> {
    let label = custom?.get(key)?.to_lowercase();
    table
        .iter()
        .find(|(fragment, _)| label.contains(fragment))
        .map(|(_, v)| *v)
}

fn owned(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

/// Generate with the thread-local random source.
pub fn generate(interp: &GameInterpretation, custom: Option<&GameData>) -> GeneratedGame {
    generate_with(interp, custom, &mut rand::rng())
}

/// Generate a game. `rng` is only used to shuffle the puzzle deck.
pub fn generate_with<R: Rng + ?Sized>(
    interp: &GameInterpretation,
    custom: Option<&GameData>,
    rng: &mut R,
) -> GeneratedGame {
    let program = match interp.game_type {
        GameType::Jumping => jumping(interp, custom),
        GameType::Collection => collection(interp),
        GameType::Racing => racing(interp, custom),
        GameType::Puzzle => puzzle(interp, custom, rng),
        GameType::Creative => creative(interp, custom),
        GameType::Adventure => adventure(interp),
    };

    let game = GeneratedGame {
        id: format!("game_{}", uuid::Uuid::new_v4().simple()),
        capabilities: program
            .capabilities()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        instructions: instructions(interp),
        config: interp.clone(),
        game_code: program,
    };
    tracing::info!(
        id = %game.id,
        game_type = %interp.game_type,
        customized = custom.is_some(),
        "generated game"
    );
    game
}

pub fn instructions(interp: &GameInterpretation) -> String {
    let character = &interp.character;
    let objective = &interp.objective;
    match interp.game_type {
        GameType::Jumping => format!(
            "Use the arrow keys to move {character} and press SPACE to jump! {objective}"
        ),
        GameType::Collection => {
            format!("Move {character} with arrow keys to collect items! {objective}")
        },
        GameType::Racing => {
            format!("Use arrow keys to drive {character} and race to the finish! {objective}")
        },
        GameType::Puzzle => {
            format!("{character} says: Click on items to match them up! {objective}")
        },
        GameType::Creative => format!(
            "{character} says: Click and drag to create art! Use different colors to make something beautiful!"
        ),
        GameType::Adventure => {
            format!("Use arrow keys to move {character} around and explore! {objective}")
        },
    }
}

fn jumping(interp: &GameInterpretation, custom: Option<&GameData>) -> GameProgram {
    let tier = custom
        .and_then(|c| c.get("speed"))
        .map(|label| SpeedTier::from_label(label))
        .unwrap_or_default();
    let colors = &interp.colors;

    GameProgram::Jumping(JumpingProgram {
        player_speed: tier.player_speed(),
        jump_power: tier.jump_power(),
        gravity: 0.8,
        character_color: lookup(custom, "character", CHARACTER_COLORS)
            .unwrap_or(colors.primary.as_str())
            .to_string(),
        platform_color: colors.secondary.clone(),
        background: lookup(custom, "theme", THEME_BACKGROUNDS)
            .unwrap_or(colors.background.as_str())
            .to_string(),
        collectible_color: lookup(custom, "collectible", COLLECTIBLE_COLORS)
            .unwrap_or(DEFAULT_COLLECTIBLE_COLOR)
            .to_string(),
        start: Point::new(50.0, 300.0),
        platforms: vec![
            Rect::new(0.0, 350.0, 200.0, 20.0),
            Rect::new(250.0, 300.0, 150.0, 20.0),
            Rect::new(450.0, 250.0, 150.0, 20.0),
        ],
        collectibles: vec![Point::new(300.0, 270.0), Point::new(500.0, 220.0)],
    })
}

fn collection(interp: &GameInterpretation) -> GameProgram {
    GameProgram::Collection(CollectionProgram {
        character_color: interp.colors.primary.clone(),
        background: interp.colors.background.clone(),
        item_colors: owned(&PICKUP_COLORS),
        item_count: 8,
        step: 4.0,
        start: Point::new(200.0, 200.0),
    })
}

fn racing(interp: &GameInterpretation, custom: Option<&GameData>) -> GameProgram {
    GameProgram::Racing(RacingProgram {
        car_color: lookup(custom, "vehicle", VEHICLE_COLORS)
            .unwrap_or(interp.colors.primary.as_str())
            .to_string(),
        background: interp.colors.background.clone(),
        car: Rect::new(275.0, 350.0, 50.0, 30.0),
        horizontal_step: 5.0,
        vertical_step: 3.0,
        track: Rect::new(0.0, 380.0, 600.0, 40.0),
        obstacles: vec![
            Point::new(200.0, 340.0),
            Point::new(400.0, 340.0),
            Point::new(100.0, 340.0),
        ],
        finish: Rect::new(550.0, 300.0, 50.0, 100.0),
    })
}

fn puzzle<R: Rng + ?Sized>(
    interp: &GameInterpretation,
    custom: Option<&GameData>,
    rng: &mut R,
) -> GameProgram {
    let card_colors = lookup(custom, "colorTheme", CARD_THEMES).unwrap_or(DEFAULT_CARD_COLORS);
    // four copies of each of the four colors
    let mut deck: Vec<u8> = (0..16).map(|i| i / 4).collect();
    deck.shuffle(rng);

    GameProgram::Puzzle(PuzzleProgram {
        background: interp.colors.background.clone(),
        card_colors: owned(&card_colors),
        deck,
        mismatch_revert_ms: 1000,
        pairs_to_win: 8,
    })
}

fn creative(interp: &GameInterpretation, custom: Option<&GameData>) -> GameProgram {
    let mut palette = vec![interp.colors.primary.clone(), interp.colors.secondary.clone()];
    palette.extend(owned(&EXTRA_SWATCHES));

    GameProgram::Creative(CreativeProgram {
        canvas_color: lookup(custom, "canvas", CANVAS_COLORS)
            .unwrap_or("#FFFFFF")
            .to_string(),
        palette,
        brush_size: lookup(custom, "brushSize", BRUSH_SIZES).unwrap_or(5.0),
    })
}

fn adventure(interp: &GameInterpretation) -> GameProgram {
    GameProgram::Adventure(AdventureProgram {
        player_color: interp.colors.primary.clone(),
        goal_color: interp.colors.secondary.clone(),
        background: interp.colors.background.clone(),
        player: Rect::new(50.0, 200.0, 30.0, 30.0),
        speed: 3.0,
        goal: Rect::new(520.0, 180.0, 40.0, 40.0),
        obstacles: vec![
            Rect::new(150.0, 150.0, 30.0, 80.0),
            Rect::new(250.0, 100.0, 100.0, 30.0),
            Rect::new(400.0, 200.0, 30.0, 100.0),
        ],
        treasures: vec![
            Point::new(200.0, 50.0),
            Point::new(350.0, 150.0),
            Point::new(450.0, 50.0),
        ],
    })
}
