use serde::{Deserialize, Serialize};

use playspark_core::frame::Frame;
use playspark_core::game_trait::{Capabilities, GameMetadata, MiniGame, Rect};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::PuzzleProgram;

const COLUMNS: usize = 4;
const CELL: f32 = 100.0;
const CARD_SIZE: f32 = 80.0;
const BOARD_LEFT: f32 = 100.0;
const BOARD_TOP: f32 = 50.0;
const FACE_DOWN_COLOR: &str = "#DDD";

/// One card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Index into the program's card colors.
    pub color: u8,
    pub flipped: bool,
    pub matched: bool,
}

/// A mismatched pair waiting to be turned back face down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRevert {
    pub cards: (usize, usize),
    pub remaining_ms: f32,
}

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleState {
    pub cards: Vec<Card>,
    /// Face-up cards of the pair being built (zero or one entry between clicks).
    pub selected: Vec<usize>,
    pub pending: Vec<PendingRevert>,
    pub matches: u32,
    pub clicks: u32,
}

/// Memory match: flip two cards, keep them if the colors agree.
pub struct PuzzleGame {
    program: PuzzleProgram,
    state: PuzzleState,
}

/// Where card `index` is drawn.
pub fn card_rect(index: usize) -> Rect {
    let col = (index % COLUMNS) as f32;
    let row = (index / COLUMNS) as f32;
    Rect::new(
        BOARD_LEFT + col * CELL,
        BOARD_TOP + row * CELL,
        CARD_SIZE,
        CARD_SIZE,
    )
}

impl PuzzleGame {
    pub fn new(program: &PuzzleProgram) -> Self {
        let cards = program
            .deck
            .iter()
            .map(|&color| Card {
                color,
                flipped: false,
                matched: false,
            })
            .collect();
        Self {
            state: PuzzleState {
                cards,
                selected: Vec::new(),
                pending: Vec::new(),
                matches: 0,
                clicks: 0,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Card under the pointer, if any. Gaps between cards hit nothing.
    fn card_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.state.cards.len()).find(|&i| {
            let r = card_rect(i);
            x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
        })
    }

    fn card_color(&self, card: &Card) -> &str {
        self.program
            .card_colors
            .get(usize::from(card.color))
            .map(String::as_str)
            .unwrap_or(FACE_DOWN_COLOR)
    }
}

impl MiniGame for PuzzleGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Puzzle,
            name: "Memory Match".to_string(),
            description: "Flip the cards and find every matching pair".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Puzzle)
    }

    fn tick_timers(&mut self, dt: f32) {
        let elapsed_ms = dt * 1000.0;
        let cards = &mut self.state.cards;
        self.state.pending.retain_mut(|p| {
            p.remaining_ms -= elapsed_ms;
            if p.remaining_ms > 0.0 {
                return true;
            }
            for i in [p.cards.0, p.cards.1] {
                if let Some(card) = cards.get_mut(i) {
                    card.flipped = false;
                }
            }
            false
        });
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.background);

        for (i, card) in self.state.cards.iter().enumerate() {
            let r = card_rect(i);
            let color = if card.flipped || card.matched {
                self.card_color(card)
            } else {
                FACE_DOWN_COLOR
            };
            frame.fill_rect(r.x, r.y, r.width, r.height, color);
            frame.stroke_rect(r.x, r.y, r.width, r.height, "#000", 1.0);
        }

        frame.score_text(
            "Matches",
            format!("{}/{}", self.state.matches, self.program.pairs_to_win),
        );
        frame.text(10.0, 60.0, format!("Clicks: {}", self.state.clicks), 20, "#000");

        if self.is_complete() {
            frame.banner("Perfect! 🧩");
        }
    }

    fn handle_click(&mut self, x: f32, y: f32) {
        let Some(index) = self.card_at(x, y) else {
            return;
        };
        let card = &mut self.state.cards[index];
        if card.matched || card.flipped {
            return;
        }

        card.flipped = true;
        self.state.selected.push(index);
        self.state.clicks += 1;

        if let [first, second] = self.state.selected[..] {
            if self.state.cards[first].color == self.state.cards[second].color {
                self.state.cards[first].matched = true;
                self.state.cards[second].matched = true;
                self.state.matches += 1;
                tracing::debug!(matches = self.state.matches, "pair matched");
            } else {
                self.state.pending.push(PendingRevert {
                    cards: (first, second),
                    remaining_ms: self.program.mismatch_revert_ms as f32,
                });
            }
            self.state.selected.clear();
        }
    }

    fn is_complete(&self) -> bool {
        self.state.matches >= self.program.pairs_to_win
    }

    fn score(&self) -> u32 {
        self.state.matches
    }

    mini_game_state_boilerplate!(state_type: PuzzleState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::frame::DrawCommand;
    use playspark_core::program::GameProgram;
    use playspark_core::test_helpers::*;

    fn program() -> PuzzleProgram {
        match seeded_game(GameType::Puzzle, 1).game_code {
            GameProgram::Puzzle(p) => p,
            other => panic!("expected puzzle program, got {other:?}"),
        }
    }

    /// A board with a known layout: colors 0,0,1,1,2,2,... in order.
    fn ordered_game() -> PuzzleGame {
        let mut p = program();
        p.deck = (0..16).map(|i| (i / 2 % 4) as u8).collect();
        PuzzleGame::new(&p)
    }

    fn click_card(game: &mut PuzzleGame, index: usize) {
        let r = card_rect(index);
        game.handle_click(r.x + 40.0, r.y + 40.0);
    }

    #[test]
    fn contract_tests() {
        let mut game = PuzzleGame::new(&program());
        contract_fresh_game_renders(&game);
        contract_capabilities_match_type(&game);
        contract_state_roundtrip_preserves(&mut game);
        contract_bad_state_ignored(&mut game);
    }

    #[test]
    fn card_rects_follow_board_layout() {
        assert_eq!(card_rect(0), Rect::new(100.0, 50.0, 80.0, 80.0));
        assert_eq!(card_rect(5), Rect::new(200.0, 150.0, 80.0, 80.0));
        assert_eq!(card_rect(15), Rect::new(400.0, 350.0, 80.0, 80.0));
    }

    #[test]
    fn matching_pair_stays_face_up() {
        let mut game = ordered_game();
        click_card(&mut game, 0);
        click_card(&mut game, 1);
        assert_eq!(game.state().matches, 1);
        assert!(game.state().cards[0].matched && game.state().cards[1].matched);
        assert_eq!(game.state().clicks, 2);
        assert!(game.state().pending.is_empty());
    }

    #[test]
    fn mismatch_reverts_after_one_second() {
        let mut game = ordered_game();
        click_card(&mut game, 0);
        click_card(&mut game, 2);
        assert!(game.state().cards[2].flipped);

        game.tick_timers(0.5);
        assert!(game.state().cards[0].flipped, "still showing at 500ms");

        game.tick_timers(0.5);
        assert!(!game.state().cards[0].flipped);
        assert!(!game.state().cards[2].flipped);
        assert!(game.state().pending.is_empty());
    }

    #[test]
    fn clicks_on_face_up_cards_and_gaps_are_ignored() {
        let mut game = ordered_game();
        click_card(&mut game, 0);
        click_card(&mut game, 0);
        game.handle_click(190.0, 60.0);
        game.handle_click(20.0, 20.0);
        assert_eq!(game.state().clicks, 1);
        assert_eq!(game.state().selected, vec![0]);
    }

    #[test]
    fn eight_pairs_is_perfect() {
        let mut game = ordered_game();
        for i in 0..16 {
            click_card(&mut game, i);
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), 8);
        let frame = render_frame(&game);
        let texts = frame.texts();
        assert!(texts.contains(&"Matches: 8/8"));
        assert!(texts.contains(&"Clicks: 16"));
        assert!(texts.contains(&"Perfect! 🧩"));
    }

    #[test]
    fn face_down_cards_hide_their_color() {
        let game = ordered_game();
        let frame = render_frame(&game);
        let hidden = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if color == FACE_DOWN_COLOR))
            .count();
        assert_eq!(hidden, 16);
    }
}
