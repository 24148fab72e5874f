pub mod physics;

use serde::{Deserialize, Serialize};

use playspark_core::frame::Frame;
use playspark_core::game_trait::{Capabilities, GameMetadata, KeyState, MiniGame, Point};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::JumpingProgram;

use physics::{CHARACTER_SIZE, Character, PICKUP_REACH, tick_character};

/// Points per collected pickup.
const PICKUP_POINTS: u32 = 10;

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpingState {
    pub character: Character,
    /// Pickups still on the board.
    pub collectibles: Vec<Point>,
    pub score: u32,
}

/// Side-scrolling-free platform hopper: walk, jump, grab every pickup.
pub struct JumpingGame {
    program: JumpingProgram,
    state: JumpingState,
}

impl JumpingGame {
    pub fn new(program: &JumpingProgram) -> Self {
        Self {
            state: JumpingState {
                character: Character::new(program.start),
                collectibles: program.collectibles.clone(),
                score: 0,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &JumpingState {
        &self.state
    }

    fn collect_pickups(&mut self) {
        let c = &self.state.character;
        let before = self.state.collectibles.len();
        self.state
            .collectibles
            .retain(|p| !p.near(c.x, c.y, PICKUP_REACH));
        let taken = (before - self.state.collectibles.len()) as u32;
        if taken > 0 {
            self.state.score += taken * PICKUP_POINTS;
            tracing::debug!(score = self.state.score, "pickup collected");
        }
    }
}

impl MiniGame for JumpingGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Jumping,
            name: "Platform Jumper".to_string(),
            description: "Hop across the platforms and grab every pickup".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Jumping)
    }

    fn update(&mut self, _dt: f32, keys: &KeyState) {
        tick_character(&mut self.state.character, keys, &self.program);
        self.collect_pickups();
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.background);

        for p in &self.program.platforms {
            frame.fill_rect(p.x, p.y, p.width, p.height, &self.program.platform_color);
        }

        for c in &self.state.collectibles {
            frame.fill_circle(c.x, c.y, 10.0, &self.program.collectible_color);
        }

        let c = &self.state.character;
        frame.fill_rect(
            c.x,
            c.y,
            CHARACTER_SIZE,
            CHARACTER_SIZE,
            &self.program.character_color,
        );

        frame.score_text("Score", self.state.score);
    }

    fn is_complete(&self) -> bool {
        self.state.collectibles.is_empty()
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    mini_game_state_boilerplate!(state_type: JumpingState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::program::GameProgram;
    use playspark_core::test_helpers::*;

    fn make_game() -> JumpingGame {
        match seeded_game(GameType::Jumping, 1).game_code {
            GameProgram::Jumping(p) => JumpingGame::new(&p),
            other => panic!("expected jumping program, got {other:?}"),
        }
    }

    #[test]
    fn contract_tests() {
        let mut game = make_game();
        contract_fresh_game_renders(&game);
        contract_capabilities_match_type(&game);
        contract_state_roundtrip_preserves(&mut game);
        contract_bad_state_ignored(&mut game);
    }

    #[test]
    fn settles_on_ground_platform() {
        let mut game = make_game();
        run_updates(&mut game, &KeyState::default(), 30);
        let c = &game.state().character;
        assert!(c.on_ground);
        assert_eq!(c.y, 310.0);
    }

    #[test]
    fn holding_right_moves_by_player_speed() {
        let mut game = make_game();
        run_updates(&mut game, &KeyState::default(), 30);
        run_updates(&mut game, &keys_down(&["ArrowRight"]), 10);
        // default tier walks 3px per frame
        assert_eq!(game.state().character.x, 80.0);
    }

    #[test]
    fn touching_a_pickup_scores_ten() {
        let mut game = make_game();
        game.state.character.x = 295.0;
        game.state.character.y = 260.0;
        game.update(1.0 / 60.0, &KeyState::default());
        assert_eq!(game.score(), 10);
        assert_eq!(game.state().collectibles.len(), 1);
        assert!(!game.is_complete());
    }

    #[test]
    fn complete_when_all_pickups_taken() {
        let mut game = make_game();
        for target in [(300.0, 270.0), (500.0, 220.0)] {
            game.state.character.x = target.0;
            game.state.character.y = target.1;
            game.update(1.0 / 60.0, &KeyState::default());
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), 20);
    }

    #[test]
    fn render_draws_platforms_pickups_and_score() {
        let game = make_game();
        let frame = render_frame(&game);
        // background + 3 platforms + 2 pickups + character + score text
        assert_eq!(frame.commands.len(), 8);
        assert_eq!(frame.texts(), vec!["Score: 0"]);
    }
}
