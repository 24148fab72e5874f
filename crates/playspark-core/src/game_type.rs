use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six canned game shapes an idea can be mapped to.
///
/// Declaration order matters: the interpreter breaks score ties in favor of
/// the type declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Jumping,
    Collection,
    Racing,
    Puzzle,
    Creative,
    Adventure,
}

impl GameType {
    /// All game types in declaration order.
    pub const ALL: [GameType; 6] = [
        GameType::Jumping,
        GameType::Collection,
        GameType::Racing,
        GameType::Puzzle,
        GameType::Creative,
        GameType::Adventure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jumping => "jumping",
            Self::Collection => "collection",
            Self::Racing => "racing",
            Self::Puzzle => "puzzle",
            Self::Creative => "creative",
            Self::Adventure => "adventure",
        }
    }

    /// Whether the game is driven by pointer handlers instead of a per-frame update.
    pub fn is_pointer_driven(self) -> bool {
        matches!(self, Self::Puzzle | Self::Creative)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known game type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGameType(pub String);

impl fmt::Display for UnknownGameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownGameType {}

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownGameType(s.to_string()))
    }
}

/// Difficulty tier. Ideas are always interpreted as `Easy` today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}
