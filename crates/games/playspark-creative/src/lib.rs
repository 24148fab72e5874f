use serde::{Deserialize, Serialize};

use playspark_core::frame::Frame;
use playspark_core::game_trait::{Capabilities, GameMetadata, MiniGame, Rect};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::CreativeProgram;

/// Vertical band holding the palette swatches and the clear button.
const TOOLBAR_TOP: f32 = 360.0;
const TOOLBAR_BOTTOM: f32 = 390.0;
const SWATCH_LEFT: f32 = 10.0;
const SWATCH_PITCH: f32 = 40.0;
const SWATCH_SIZE: f32 = 30.0;
const CLEAR_BUTTON: Rect = Rect::new(300.0, 360.0, 70.0, 30.0);
const HINT: &str = "Click and drag to draw! Pick colors below.";

/// One pointer-down..pointer-up drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub size: f32,
    pub points: Vec<(f32, f32)>,
}

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeState {
    pub strokes: Vec<Stroke>,
    pub current_color: String,
    pub brush_size: f32,
    pub drawing: bool,
}

/// Free drawing canvas with a color strip and a clear button.
pub struct CreativeGame {
    program: CreativeProgram,
    state: CreativeState,
}

impl CreativeGame {
    pub fn new(program: &CreativeProgram) -> Self {
        Self {
            state: CreativeState {
                strokes: Vec::new(),
                current_color: program
                    .palette
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "#000".to_string()),
                brush_size: program.brush_size,
                drawing: false,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &CreativeState {
        &self.state
    }

    /// Palette slot under `x`, if the pointer is over the swatch strip.
    fn swatch_at(&self, x: f32) -> Option<usize> {
        let slot = ((x - SWATCH_LEFT) / SWATCH_PITCH).floor();
        if slot < 0.0 {
            return None;
        }
        let slot = slot as usize;
        (slot < self.program.palette.len()).then_some(slot)
    }
}

impl MiniGame for CreativeGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Creative,
            name: "Art Studio".to_string(),
            description: "Draw anything you like".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Creative)
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.canvas_color);

        for stroke in &self.state.strokes {
            if stroke.points.len() > 1 {
                frame.polyline(stroke.points.clone(), &stroke.color, stroke.size, false);
            }
        }

        for (i, color) in self.program.palette.iter().enumerate() {
            let x = SWATCH_LEFT + i as f32 * SWATCH_PITCH;
            frame.fill_rect(x, TOOLBAR_TOP, SWATCH_SIZE, SWATCH_SIZE, color);
            if *color == self.state.current_color {
                frame.stroke_rect(x, TOOLBAR_TOP, SWATCH_SIZE, SWATCH_SIZE, "#000", 3.0);
            }
        }

        let b = CLEAR_BUTTON;
        frame.fill_rect(b.x, b.y, b.width, b.height, "#EEE");
        frame.text(315.0, 380.0, "Clear", 16, "#000");

        frame.text(10.0, 20.0, HINT, 14, "#666");
    }

    fn handle_click(&mut self, x: f32, y: f32) {
        if y > TOOLBAR_TOP && y < TOOLBAR_BOTTOM {
            if let Some(slot) = self.swatch_at(x) {
                self.state.current_color = self.program.palette[slot].clone();
            }
            if x > CLEAR_BUTTON.x && x < CLEAR_BUTTON.x + CLEAR_BUTTON.width {
                self.state.strokes.clear();
                tracing::debug!("canvas cleared");
            }
        }
    }

    fn handle_mouse_down(&mut self, x: f32, y: f32) {
        self.state.drawing = true;
        self.state.strokes.push(Stroke {
            color: self.state.current_color.clone(),
            size: self.state.brush_size,
            points: vec![(x, y)],
        });
    }

    fn handle_mouse_move(&mut self, x: f32, y: f32) {
        if !self.state.drawing {
            return;
        }
        if let Some(stroke) = self.state.strokes.last_mut() {
            stroke.points.push((x, y));
        }
    }

    fn handle_mouse_up(&mut self) {
        self.state.drawing = false;
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn score(&self) -> u32 {
        0
    }

    mini_game_state_boilerplate!(state_type: CreativeState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use playspark_core::frame::DrawCommand;
    use playspark_core::program::GameProgram;
    use playspark_core::test_helpers::*;

    fn program() -> CreativeProgram {
        match seeded_game(GameType::Creative, 1).game_code {
            GameProgram::Creative(p) => p,
            other => panic!("expected creative program, got {other:?}"),
        }
    }

    fn drag(game: &mut CreativeGame, points: &[(f32, f32)]) {
        let (x, y) = points[0];
        game.handle_mouse_down(x, y);
        for &(x, y) in &points[1..] {
            game.handle_mouse_move(x, y);
        }
        game.handle_mouse_up();
    }

    #[test]
    fn contract_tests() {
        let mut game = CreativeGame::new(&program());
        drag(&mut game, &[(50.0, 50.0), (60.0, 60.0)]);
        contract_capabilities_match_type(&game);
        contract_state_roundtrip_preserves(&mut game);
        contract_bad_state_ignored(&mut game);
        contract_fresh_game_renders(&CreativeGame::new(&program()));
    }

    #[test]
    fn drag_builds_one_polyline() {
        let mut game = CreativeGame::new(&program());
        drag(&mut game, &[(50.0, 50.0), (60.0, 55.0), (70.0, 65.0)]);
        assert_eq!(game.state().strokes.len(), 1);
        assert_eq!(game.state().strokes[0].points.len(), 3);
        assert_eq!(game.state().strokes[0].size, 5.0);

        let frame = render_frame(&game);
        let lines: Vec<_> = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .collect();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn moves_without_button_draw_nothing() {
        let mut game = CreativeGame::new(&program());
        game.handle_mouse_move(10.0, 10.0);
        drag(&mut game, &[(50.0, 50.0), (60.0, 60.0)]);
        game.handle_mouse_move(90.0, 90.0);
        assert_eq!(game.state().strokes[0].points, vec![(50.0, 50.0), (60.0, 60.0)]);
    }

    #[test]
    fn palette_click_picks_color() {
        let p = program();
        let mut game = CreativeGame::new(&p);
        game.handle_click(10.0 + 2.0 * 40.0 + 5.0, 375.0);
        assert_eq!(game.state().current_color, p.palette[2]);
        drag(&mut game, &[(50.0, 50.0), (60.0, 60.0)]);
        assert_eq!(game.state().strokes[0].color, p.palette[2]);
    }

    #[test]
    fn clicks_outside_strip_keep_color() {
        let p = program();
        let mut game = CreativeGame::new(&p);
        game.handle_click(95.0, 200.0);
        game.handle_click(5.0, 375.0);
        game.handle_click(290.0, 375.0);
        assert_eq!(game.state().current_color, p.palette[0]);
    }

    #[test]
    fn clear_zone_wipes_strokes() {
        let mut game = CreativeGame::new(&program());
        drag(&mut game, &[(50.0, 50.0), (60.0, 60.0)]);
        drag(&mut game, &[(80.0, 50.0), (90.0, 60.0)]);
        game.handle_click(335.0, 375.0);
        assert!(game.state().strokes.is_empty());
    }

    #[test]
    fn toolbar_and_hint_always_drawn() {
        let frame = render_frame(&CreativeGame::new(&program()));
        assert_eq!(frame.texts(), vec!["Clear", HINT]);
        assert!(!CreativeGame::new(&program()).is_complete());
    }
}
