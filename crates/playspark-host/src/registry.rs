use std::collections::HashMap;
use std::fmt;

use playspark_core::game_trait::MiniGame;
use playspark_core::game_type::GameType;
use playspark_core::program::GameProgram;

/// Factory building a game from its program. Returns `None` if handed a
/// program of another type.
type GameFactory = fn(&GameProgram) -> Option<Box<dyn MiniGame>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The game module for this type was not compiled in.
    GameUnavailable(GameType),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::GameUnavailable(t) => write!(f, "no game module available for {t}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Registry mapping game types to the compiled-in game modules.
pub struct GameRegistry {
    factories: HashMap<GameType, GameFactory>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "jumping")]
        self.factories.insert(GameType::Jumping, |program| match program {
            GameProgram::Jumping(p) => Some(Box::new(playspark_jumping::JumpingGame::new(p))),
            _ => None,
        });
        #[cfg(feature = "collection")]
        self.factories.insert(GameType::Collection, |program| match program {
            GameProgram::Collection(p) => {
                Some(Box::new(playspark_collection::CollectionGame::new(p)))
            },
            _ => None,
        });
        #[cfg(feature = "racing")]
        self.factories.insert(GameType::Racing, |program| match program {
            GameProgram::Racing(p) => Some(Box::new(playspark_racing::RacingGame::new(p))),
            _ => None,
        });
        #[cfg(feature = "puzzle")]
        self.factories.insert(GameType::Puzzle, |program| match program {
            GameProgram::Puzzle(p) => Some(Box::new(playspark_puzzle::PuzzleGame::new(p))),
            _ => None,
        });
        #[cfg(feature = "creative")]
        self.factories.insert(GameType::Creative, |program| match program {
            GameProgram::Creative(p) => Some(Box::new(playspark_creative::CreativeGame::new(p))),
            _ => None,
        });
        #[cfg(feature = "adventure")]
        self.factories.insert(GameType::Adventure, |program| match program {
            GameProgram::Adventure(p) => {
                Some(Box::new(playspark_adventure::AdventureGame::new(p)))
            },
            _ => None,
        });
    }

    /// Types with a compiled-in game module, in declaration order.
    pub fn available(&self) -> Vec<GameType> {
        GameType::ALL
            .into_iter()
            .filter(|t| self.factories.contains_key(t))
            .collect()
    }

    /// Build a fresh game instance for `program`.
    pub fn instantiate(&self, program: &GameProgram) -> Result<Box<dyn MiniGame>, HostError> {
        let game_type = program.game_type();
        self.factories
            .get(&game_type)
            .and_then(|factory| factory(program))
            .ok_or(HostError::GameUnavailable(game_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::test_helpers::seeded_game;

    #[test]
    fn every_type_is_registered_by_default() {
        let registry = GameRegistry::new();
        assert_eq!(registry.available(), GameType::ALL.to_vec());
    }

    #[test]
    fn instantiates_matching_game() {
        let registry = GameRegistry::new();
        for t in GameType::ALL {
            let program = seeded_game(t, 7).game_code;
            let game = registry.instantiate(&program).unwrap();
            assert_eq!(game.metadata().game_type, t);
            assert_eq!(game.capabilities(), program.capabilities());
        }
    }

    #[test]
    fn missing_module_is_an_error() {
        let mut registry = GameRegistry::new();
        registry.factories.remove(&GameType::Racing);
        let program = seeded_game(GameType::Racing, 7).game_code;
        let err = registry.instantiate(&program).err().unwrap();
        assert_eq!(err, HostError::GameUnavailable(GameType::Racing));
        assert_eq!(err.to_string(), "no game module available for racing");
    }
}
