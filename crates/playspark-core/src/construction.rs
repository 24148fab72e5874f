//! Step-by-step construction wizard.
//!
//! The wizard is stateless on the server: the caller echoes `game_data` back
//! on every step, and [`Wizard::advance`] is a pure reducer from
//! `(step, choice, game_data)` to the next prompt or to completion.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_type::GameType;

/// Choices accumulated so far, keyed by step property ("character", "speed" ...).
pub type GameData = BTreeMap<String, String>;

/// One question of a wizard.
#[derive(Debug)]
pub struct StepDef {
    pub step: u32,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub property: &'static str,
}

const JUMPING_STEPS: &[StepDef] = &[
    StepDef {
        step: 1,
        question: "What should your character look like?",
        options: &["🐸 Green Frog", "🐰 Pink Bunny", "🦘 Blue Kangaroo"],
        property: "character",
    },
    StepDef {
        step: 2,
        question: "Where should your character play?",
        options: &["🌳 Forest", "🏠 House", "🌙 Space"],
        property: "theme",
    },
    StepDef {
        step: 3,
        question: "How fast should your character move?",
        options: &["🐌 Slow and Steady", "⚡ Super Fast", "🚶 Just Right"],
        property: "speed",
    },
    StepDef {
        step: 4,
        question: "What should your character collect?",
        options: &["⭐ Golden Stars", "🍎 Tasty Apples", "💎 Shiny Gems"],
        property: "collectible",
    },
];

const RACING_STEPS: &[StepDef] = &[
    StepDef {
        step: 1,
        question: "What should you drive?",
        options: &["🚗 Red Car", "🚌 School Bus", "🚁 Helicopter"],
        property: "vehicle",
    },
    StepDef {
        step: 2,
        question: "Where should you race?",
        options: &["🏁 Race Track", "🌆 City Streets", "🏔️ Mountain Road"],
        property: "track",
    },
    StepDef {
        step: 3,
        question: "What obstacles should you avoid?",
        options: &["🚧 Orange Cones", "🪨 Big Rocks", "🌊 Water Puddles"],
        property: "obstacles",
    },
    StepDef {
        step: 4,
        question: "How should you win?",
        options: &["🏁 Reach the Finish", "⏰ Beat the Timer", "🏆 Collect Most Points"],
        property: "winCondition",
    },
];

const PUZZLE_STEPS: &[StepDef] = &[
    StepDef {
        step: 1,
        question: "What colors should you match?",
        options: &["🌈 Rainbow Colors", "🍬 Candy Colors", "🌸 Flower Colors"],
        property: "colorTheme",
    },
    StepDef {
        step: 2,
        question: "How many cards should you match?",
        options: &["🔢 Easy (8 cards)", "🔢 Medium (12 cards)", "🔢 Hard (16 cards)"],
        property: "difficulty",
    },
    StepDef {
        step: 3,
        question: "What shape should the cards be?",
        options: &["⬜ Square Cards", "🔴 Round Cards", "⭐ Star Cards"],
        property: "cardShape",
    },
    StepDef {
        step: 4,
        question: "What happens when you match?",
        options: &["✨ Sparkle Effect", "🎵 Happy Sound", "🎉 Celebration"],
        property: "matchEffect",
    },
];

const CREATIVE_STEPS: &[StepDef] = &[
    StepDef {
        step: 1,
        question: "What should you draw with?",
        options: &["🖌️ Paint Brush", "✏️ Pencil", "🖍️ Crayon"],
        property: "tool",
    },
    StepDef {
        step: 2,
        question: "What colors do you want?",
        options: &["🌈 All Colors", "🎨 Bright Colors", "🌸 Soft Colors"],
        property: "palette",
    },
    StepDef {
        step: 3,
        question: "How big should your brush be?",
        options: &["🔹 Small Brush", "🔸 Medium Brush", "🔶 Big Brush"],
        property: "brushSize",
    },
    StepDef {
        step: 4,
        question: "What should you draw on?",
        options: &["📄 White Paper", "🌌 Starry Sky", "🌊 Ocean Scene"],
        property: "canvas",
    },
];

/// Serializable view of a step, as sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepData {
    pub step: u32,
    pub question: String,
    pub options: Vec<String>,
    pub property: String,
}

impl From<&StepDef> for StepData {
    fn from(def: &StepDef) -> Self {
        Self {
            step: def.step,
            question: def.question.to_string(),
            options: def.options.iter().map(|o| o.to_string()).collect(),
            property: def.property.to_string(),
        }
    }
}

/// Wizard overview attached to a voice-processing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionOverview {
    pub steps: Vec<StepData>,
    pub current_step: u32,
    pub total_steps: u32,
}

/// Result of answering one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Next {
        next_step: u32,
        step_data: StepData,
        game_data: GameData,
        progress: String,
    },
    Completed {
        game_data: GameData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    UnknownGameType(String),
    StepOutOfRange { step: i64, total: u32 },
    AlreadyCompleted,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGameType(t) => write!(f, "unknown game type {t:?}"),
            Self::StepOutOfRange { step, total } => {
                write!(f, "step {step} is outside 1..={total}")
            },
            Self::AlreadyCompleted => write!(f, "construction already completed"),
        }
    }
}

impl std::error::Error for ConstructionError {}

/// The wizard used for a requested game type.
#[derive(Debug, Clone, Copy)]
pub struct Wizard {
    /// Type the caller asked for.
    pub requested: GameType,
    /// Type the finished game is built as.
    pub builds: GameType,
    steps: &'static [StepDef],
}

impl Wizard {
    /// Collection and adventure ideas have no wizard of their own; they borrow
    /// the jumping wizard and are built as jumping games.
    pub fn for_type(requested: GameType) -> Self {
        let (builds, steps) = match requested {
            GameType::Racing => (GameType::Racing, RACING_STEPS),
            GameType::Puzzle => (GameType::Puzzle, PUZZLE_STEPS),
            GameType::Creative => (GameType::Creative, CREATIVE_STEPS),
            GameType::Jumping | GameType::Collection | GameType::Adventure => {
                (GameType::Jumping, JUMPING_STEPS)
            },
        };
        Self {
            requested,
            builds,
            steps,
        }
    }

    /// Resolve a wizard from a client-supplied type name. Unknown names are rejected.
    pub fn parse(game_type: &str) -> Result<Self, ConstructionError> {
        game_type
            .parse::<GameType>()
            .map(Self::for_type)
            .map_err(|e| ConstructionError::UnknownGameType(e.0))
    }

    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn steps(&self) -> &'static [StepDef] {
        self.steps
    }

    pub fn step(&self, step: i64) -> Result<&'static StepDef, ConstructionError> {
        let total = self.total_steps();
        if step < 1 || step > i64::from(total) {
            return Err(ConstructionError::StepOutOfRange { step, total });
        }
        Ok(&self.steps[(step - 1) as usize])
    }

    pub fn overview(&self) -> ConstructionOverview {
        ConstructionOverview {
            steps: self.steps.iter().map(StepData::from).collect(),
            current_step: 1,
            total_steps: self.total_steps(),
        }
    }

    /// Record `choice` for `step` and move on.
    ///
    /// Choices are stored verbatim even when they are not one of the listed
    /// options; spoken answers rarely match a label exactly.
    pub fn advance(
        &self,
        step: i64,
        choice: &str,
        mut game_data: GameData,
    ) -> Result<StepOutcome, ConstructionError> {
        let def = self.step(step)?;
        game_data.insert(def.property.to_string(), choice.to_string());

        let total = self.total_steps();
        if def.step < total {
            let next = &self.steps[def.step as usize];
            Ok(StepOutcome::Next {
                next_step: next.step,
                step_data: next.into(),
                game_data,
                progress: format!("Step {} of {total}", next.step),
            })
        } else {
            Ok(StepOutcome::Completed { game_data })
        }
    }
}

/// Typed wizard state for callers that keep the flow in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionState {
    AwaitingStep { step: u32, choices: GameData },
    Completed { choices: GameData },
}

impl ConstructionState {
    pub fn start() -> Self {
        Self::AwaitingStep {
            step: 1,
            choices: GameData::new(),
        }
    }

    /// Answer the current step. A completed flow cannot be re-entered.
    pub fn answer(self, wizard: &Wizard, choice: &str) -> Result<Self, ConstructionError> {
        match self {
            Self::Completed { .. } => Err(ConstructionError::AlreadyCompleted),
            Self::AwaitingStep { step, choices } => {
                match wizard.advance(i64::from(step), choice, choices)? {
                    StepOutcome::Next {
                        next_step,
                        game_data,
                        ..
                    } => Ok(Self::AwaitingStep {
                        step: next_step,
                        choices: game_data,
                    }),
                    StepOutcome::Completed { game_data } => Ok(Self::Completed {
                        choices: game_data,
                    }),
                }
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
