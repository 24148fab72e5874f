use rand::Rng;
use serde::{Deserialize, Serialize};

use playspark_core::frame::{CANVAS_HEIGHT, CANVAS_WIDTH, Frame};
use playspark_core::game_trait::{Capabilities, GameMetadata, KeyState, MiniGame, Point};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::CollectionProgram;

/// Player box edge length.
const PLAYER_SIZE: f32 = 30.0;
const PICKUP_RADIUS: f32 = 10.0;
const PICKUP_REACH: f32 = 25.0;
const PICKUP_POINTS: u32 = 5;
/// Pickups spawn at least this far from every canvas edge.
const SPAWN_MARGIN: f32 = 25.0;

/// A pickup still on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub at: Point,
    pub color: String,
}

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionState {
    pub player: Point,
    pub pickups: Vec<Pickup>,
    pub score: u32,
}

/// Walk around the field and scoop up every pickup.
pub struct CollectionGame {
    program: CollectionProgram,
    state: CollectionState,
}

/// Scatter `program.item_count` pickups over the field, colors round-robin.
pub fn scatter_pickups<R: Rng + ?Sized>(program: &CollectionProgram, rng: &mut R) -> Vec<Pickup> {
    (0..program.item_count as usize)
        .map(|i| Pickup {
            at: Point::new(
                rng.random_range(SPAWN_MARGIN..CANVAS_WIDTH - SPAWN_MARGIN),
                rng.random_range(SPAWN_MARGIN..CANVAS_HEIGHT - SPAWN_MARGIN),
            ),
            color: program
                .item_colors
                .get(i % program.item_colors.len().max(1))
                .cloned()
                .unwrap_or_else(|| "#FFD700".to_string()),
        })
        .collect()
}

impl CollectionGame {
    /// Start a round with pickups placed by the thread-local random source.
    pub fn new(program: &CollectionProgram) -> Self {
        Self::with_rng(program, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(program: &CollectionProgram, rng: &mut R) -> Self {
        Self::with_pickups(program, scatter_pickups(program, rng))
    }

    /// Start a round with a fixed pickup layout.
    pub fn with_pickups(program: &CollectionProgram, pickups: Vec<Pickup>) -> Self {
        Self {
            state: CollectionState {
                player: program.start,
                pickups,
                score: 0,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }
}

impl MiniGame for CollectionGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Collection,
            name: "Treasure Collector".to_string(),
            description: "Roam the field and collect everything".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Collection)
    }

    fn update(&mut self, _dt: f32, keys: &KeyState) {
        let step = self.program.step;
        let p = &mut self.state.player;
        if keys.left() {
            p.x -= step;
        }
        if keys.right() {
            p.x += step;
        }
        if keys.up() {
            p.y -= step;
        }
        if keys.down() {
            p.y += step;
        }
        p.x = p.x.clamp(0.0, CANVAS_WIDTH - PLAYER_SIZE);
        p.y = p.y.clamp(0.0, CANVAS_HEIGHT - PLAYER_SIZE);

        let player = *p;
        let before = self.state.pickups.len();
        self.state
            .pickups
            .retain(|item| !item.at.near(player.x, player.y, PICKUP_REACH));
        let taken = (before - self.state.pickups.len()) as u32;
        if taken > 0 {
            self.state.score += taken * PICKUP_POINTS;
            if self.state.pickups.is_empty() {
                tracing::info!(score = self.state.score, "collection round complete");
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.background);

        for item in &self.state.pickups {
            frame.fill_circle(item.at.x, item.at.y, PICKUP_RADIUS, &item.color);
        }

        let p = self.state.player;
        frame.fill_rect(p.x, p.y, PLAYER_SIZE, PLAYER_SIZE, &self.program.character_color);
        frame.score_text("Score", self.state.score);

        if self.is_complete() {
            frame.banner("You Win! 🎉");
        }
    }

    fn is_complete(&self) -> bool {
        self.state.pickups.is_empty()
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    mini_game_state_boilerplate!(state_type: CollectionState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::program::GameProgram;
    use playspark_core::test_helpers::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn program() -> CollectionProgram {
        match seeded_game(GameType::Collection, 1).game_code {
            GameProgram::Collection(p) => p,
            other => panic!("expected collection program, got {other:?}"),
        }
    }

    fn pickup(x: f32, y: f32) -> Pickup {
        Pickup {
            at: Point::new(x, y),
            color: "#FFD700".to_string(),
        }
    }

    #[test]
    fn contract_tests() {
        let mut game = CollectionGame::with_rng(&program(), &mut StdRng::seed_from_u64(9));
        contract_fresh_game_renders(&game);
        contract_capabilities_match_type(&game);
        contract_state_roundtrip_preserves(&mut game);
        contract_bad_state_ignored(&mut game);
    }

    #[test]
    fn scatter_places_item_count_inside_margins() {
        let p = program();
        let items = scatter_pickups(&p, &mut StdRng::seed_from_u64(4));
        assert_eq!(items.len(), 8);
        for item in &items {
            assert!((25.0..575.0).contains(&item.at.x));
            assert!((25.0..375.0).contains(&item.at.y));
        }
        assert_eq!(items[0].color, p.item_colors[0]);
        assert_eq!(items[3].color, p.item_colors[0]);
    }

    #[test]
    fn layout_is_scattered_per_instance_not_per_program() {
        let p = program();
        let a = CollectionGame::with_rng(&p, &mut StdRng::seed_from_u64(1));
        let b = CollectionGame::with_rng(&p, &mut StdRng::seed_from_u64(2));
        let again = CollectionGame::with_rng(&p, &mut StdRng::seed_from_u64(1));
        assert_ne!(a.state().pickups, b.state().pickups);
        assert_eq!(a.state().pickups, again.state().pickups);
        // the program only carries the count
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["itemCount"], 8);
        assert!(json.get("pickups").is_none());
    }

    #[test]
    fn walking_steps_four_pixels() {
        let mut game = CollectionGame::with_pickups(&program(), vec![pickup(550.0, 350.0)]);
        run_updates(&mut game, &keys_down(&["ArrowRight", "ArrowDown"]), 5);
        assert_eq!(game.state().player, Point::new(220.0, 220.0));
    }

    #[test]
    fn player_is_clamped_to_canvas() {
        let mut game = CollectionGame::with_pickups(&program(), vec![pickup(550.0, 50.0)]);
        run_updates(&mut game, &keys_down(&["ArrowLeft", "ArrowDown"]), 200);
        assert_eq!(game.state().player, Point::new(0.0, 370.0));
    }

    #[test]
    fn pickups_score_five_and_win_banner_shows() {
        let mut game = CollectionGame::with_pickups(
            &program(),
            vec![pickup(210.0, 200.0), pickup(500.0, 300.0)],
        );
        run_updates(&mut game, &KeyState::default(), 1);
        assert_eq!(game.score(), 5);
        assert!(!game.is_complete());

        game.state.player = Point::new(495.0, 290.0);
        run_updates(&mut game, &KeyState::default(), 1);
        assert_eq!(game.score(), 10);
        assert!(game.is_complete());
        assert!(render_frame(&game).texts().contains(&"You Win! 🎉"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn player_stays_on_canvas(moves in proptest::collection::vec(0u8..16, 1..300)) {
                let mut game = CollectionGame::with_pickups(&program(), vec![pickup(-100.0, -100.0)]);
                for m in moves {
                    let mut keys = KeyState::default();
                    keys.set("ArrowLeft", m & 1 != 0);
                    keys.set("ArrowRight", m & 2 != 0);
                    keys.set("ArrowUp", m & 4 != 0);
                    keys.set("ArrowDown", m & 8 != 0);
                    game.update(1.0 / 60.0, &keys);
                    let p = game.state().player;
                    prop_assert!((0.0..=570.0).contains(&p.x));
                    prop_assert!((0.0..=370.0).contains(&p.y));
                }
            }
        }
    }
}
