use serde::{Deserialize, Serialize};

use playspark_core::frame::{CANVAS_HEIGHT, CANVAS_WIDTH, Frame};
use playspark_core::game_trait::{Capabilities, GameMetadata, KeyState, MiniGame, Point, Rect};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::AdventureProgram;

const TREASURE_REACH: f32 = 25.0;
const TREASURE_POINTS: u32 = 100;
const GOAL_REACH: f32 = 30.0;
const TREASURE_RADIUS: f32 = 12.0;
const OBSTACLE_COLOR: &str = "#8B4513";
const TREASURE_COLOR: &str = "#FFD700";

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventureState {
    pub player: Rect,
    /// Treasures not yet picked up.
    pub treasures: Vec<Point>,
    pub score: u32,
    pub won: bool,
}

/// Explore around the walls, grab treasure, reach the goal.
pub struct AdventureGame {
    program: AdventureProgram,
    state: AdventureState,
}

impl AdventureGame {
    pub fn new(program: &AdventureProgram) -> Self {
        Self {
            state: AdventureState {
                player: program.player,
                treasures: program.treasures.clone(),
                score: 0,
                won: false,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &AdventureState {
        &self.state
    }

    /// Candidate position after one step, clamped to the canvas.
    fn step_target(&self, keys: &KeyState) -> Rect {
        let speed = self.program.speed;
        let mut next = self.state.player;
        if keys.left() {
            next.x -= speed;
        }
        if keys.right() {
            next.x += speed;
        }
        if keys.up() {
            next.y -= speed;
        }
        if keys.down() {
            next.y += speed;
        }
        next.x = next.x.clamp(0.0, CANVAS_WIDTH - next.width);
        next.y = next.y.clamp(0.0, CANVAS_HEIGHT - next.height);
        next
    }
}

impl MiniGame for AdventureGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Adventure,
            name: "Great Adventure".to_string(),
            description: "Find the treasure and reach the goal".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Adventure)
    }

    fn update(&mut self, _dt: f32, keys: &KeyState) {
        let next = self.step_target(keys);
        // a blocked step is dropped whole, not slid along the wall
        if !self.program.obstacles.iter().any(|o| next.overlaps(o)) {
            self.state.player = next;
        }

        let p = self.state.player;
        let before = self.state.treasures.len();
        self.state
            .treasures
            .retain(|t| !t.near(p.x, p.y, TREASURE_REACH));
        self.state.score += (before - self.state.treasures.len()) as u32 * TREASURE_POINTS;

        let goal = Point::new(self.program.goal.x, self.program.goal.y);
        if !self.state.won && goal.near(p.x, p.y, GOAL_REACH) {
            self.state.won = true;
            tracing::info!(score = self.state.score, "adventure complete");
        }
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.background);

        for o in &self.program.obstacles {
            frame.fill_rect(o.x, o.y, o.width, o.height, OBSTACLE_COLOR);
        }
        for t in &self.state.treasures {
            frame.fill_circle(t.x + 10.0, t.y + 10.0, TREASURE_RADIUS, TREASURE_COLOR);
        }

        let g = self.program.goal;
        frame.fill_rect(g.x, g.y, g.width, g.height, &self.program.goal_color);
        let p = self.state.player;
        frame.fill_rect(p.x, p.y, p.width, p.height, &self.program.player_color);

        frame.score_text("Score", self.state.score);
        if self.state.won {
            frame.banner("Adventure Complete! 🎯");
        }
    }

    fn is_complete(&self) -> bool {
        self.state.won
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    mini_game_state_boilerplate!(state_type: AdventureState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::program::GameProgram;
    use playspark_core::test_helpers::*;

    fn make_game() -> AdventureGame {
        match seeded_game(GameType::Adventure, 1).game_code {
            GameProgram::Adventure(p) => AdventureGame::new(&p),
            other => panic!("expected adventure program, got {other:?}"),
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
    fn walls_block_movement() {
        let mut game = make_game();
        // player at x=50, first wall starts at x=150
        run_updates(&mut game, &keys_down(&["ArrowRight"]), 60);
        let p = game.state().player;
        assert_eq!(p.x, 119.0);
        assert!(p.x + p.width <= 150.0);
    }

    #[test]
    fn clamped_to_canvas() {
        let mut game = make_game();
        run_updates(&mut game, &keys_down(&["ArrowLeft", "ArrowDown"]), 200);
        assert_eq!(game.state().player.x, 0.0);
        assert_eq!(game.state().player.y, 370.0);
    }

    #[test]
    fn treasure_scores_hundred_once() {
        let mut game = make_game();
        game.state.player.x = 190.0;
        game.state.player.y = 45.0;
        run_updates(&mut game, &KeyState::default(), 3);
        assert_eq!(game.score(), 100);
        assert_eq!(game.state().treasures.len(), 2);
    }

    #[test]
    fn reaching_goal_completes() {
        let mut game = make_game();
        game.state.player.x = 500.0;
        game.state.player.y = 170.0;
        assert!(!game.is_complete());
        run_updates(&mut game, &KeyState::default(), 1);
        assert!(game.is_complete());
        assert!(render_frame(&game).texts().contains(&"Adventure Complete! 🎯"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_inside_a_wall(moves in proptest::collection::vec(0u8..16, 1..300)) {
                let mut game = make_game();
                for m in moves {
                    let mut keys = KeyState::default();
                    keys.set("ArrowLeft", m & 1 != 0);
                    keys.set("ArrowRight", m & 2 != 0);
                    keys.set("ArrowUp", m & 4 != 0);
                    keys.set("ArrowDown", m & 8 != 0);
                    game.update(1.0 / 60.0, &keys);
                    let p = game.state().player;
                    prop_assert!(!game.program.obstacles.iter().any(|o| p.overlaps(o)));
                    prop_assert!((0.0..=CANVAS_WIDTH - p.width).contains(&p.x));
                    prop_assert!((0.0..=CANVAS_HEIGHT - p.height).contains(&p.y));
                }
            }
        }
    }
}
