use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use playspark_core::construction::GameData;
use playspark_core::game_type::GameType;
use playspark_core::generator::GeneratedGame;
use playspark_core::interpreter::GameInterpretation;

/// Everything kept about a game: the interpretation it came from, any wizard
/// choices, and the playable game itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(flatten)]
    pub interpretation: GameInterpretation,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_data: Option<GameData>,
    pub game: GeneratedGame,
}

/// A game idea before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameIdea {
    pub transcript: String,
    pub game_type: GameType,
    pub game_config: GameConfig,
    pub created_at: String,
}

/// A stored game idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameIdea {
    pub id: u64,
    pub transcript: String,
    pub game_type: GameType,
    pub game_config: GameConfig,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "game store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage port for game ideas. Callers serialize access through a lock;
/// ids are assigned by the store, start at 1, and only ever grow.
pub trait GameStore: Send + Sync {
    fn create(&mut self, idea: NewGameIdea) -> Result<GameIdea, StoreError>;

    fn get(&self, id: u64) -> Result<Option<GameIdea>, StoreError>;

    /// Up to `limit` ideas, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<GameIdea>, StoreError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory, bounded store. Evicts the oldest idea once full.
pub struct MemoryStore {
    ideas: BTreeMap<u64, GameIdea>,
    next_id: u64,
    max_stored: usize,
}

impl MemoryStore {
    pub fn new(max_stored: usize) -> Self {
        Self {
            ideas: BTreeMap::new(),
            next_id: 1,
            max_stored,
        }
    }
}

impl GameStore for MemoryStore {
    fn create(&mut self, idea: NewGameIdea) -> Result<GameIdea, StoreError> {
        let id = self.next_id;
        self.next_id += 1;
        let stored = GameIdea {
            id,
            transcript: idea.transcript,
            game_type: idea.game_type,
            game_config: idea.game_config,
            created_at: idea.created_at,
        };
        self.ideas.insert(id, stored.clone());
        while self.ideas.len() > self.max_stored {
            self.ideas.pop_first();
        }
        Ok(stored)
    }

    fn get(&self, id: u64) -> Result<Option<GameIdea>, StoreError> {
        Ok(self.ideas.get(&id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<GameIdea>, StoreError> {
        Ok(self.ideas.values().rev().take(limit).cloned().collect())
    }

    fn len(&self) -> usize {
        self.ideas.len()
    }
}
