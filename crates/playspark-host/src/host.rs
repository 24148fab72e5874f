use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use playspark_core::frame::Frame;
use playspark_core::game_trait::{Capabilities, KeyState, MiniGame};
use playspark_core::program::GameProgram;

use crate::registry::{GameRegistry, HostError};

/// Input forwarded from the page, JSON-tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    Click { x: f32, y: f32 },
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
}

/// Drives one game instance: owns its key state, forwards pointer input the
/// game declared, and produces a frame per tick.
///
/// Game code that panics is contained. The host logs the failure, stops
/// calling into the game, and keeps returning the last good frame.
pub struct GameHost {
    game: Box<dyn MiniGame>,
    /// Read once up front so a faulted game is never asked again.
    name: String,
    capabilities: Capabilities,
    keys: KeyState,
    last_frame: Frame,
    faulted: bool,
}

impl GameHost {
    pub fn new(game: Box<dyn MiniGame>) -> Self {
        let capabilities = game.capabilities();
        let name = game.metadata().name;
        Self {
            game,
            name,
            capabilities,
            keys: KeyState::default(),
            last_frame: Frame::default(),
            faulted: false,
        }
    }

    pub fn from_program(registry: &GameRegistry, program: &GameProgram) -> Result<Self, HostError> {
        let game = registry.instantiate(program)?;
        tracing::info!(game_type = %program.game_type(), "game loaded");
        Ok(Self::new(game))
    }

    pub fn game(&self) -> &dyn MiniGame {
        self.game.as_ref()
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.set(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.set(key, false);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        if self.capabilities.handle_click {
            self.guarded("handleClick", |g| g.handle_click(x, y));
        }
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        if self.capabilities.handle_mouse_down {
            self.guarded("handleMouseDown", |g| g.handle_mouse_down(x, y));
        }
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.capabilities.handle_mouse_move {
            self.guarded("handleMouseMove", |g| g.handle_mouse_move(x, y));
        }
    }

    pub fn mouse_up(&mut self) {
        if self.capabilities.handle_mouse_up {
            self.guarded("handleMouseUp", |g| g.handle_mouse_up());
        }
    }

    pub fn dispatch(&mut self, event: &HostEvent) {
        match event {
            HostEvent::KeyDown { key } => self.key_down(key),
            HostEvent::KeyUp { key } => self.key_up(key),
            HostEvent::Click { x, y } => self.click(*x, *y),
            HostEvent::MouseDown { x, y } => self.mouse_down(*x, *y),
            HostEvent::MouseMove { x, y } => self.mouse_move(*x, *y),
            HostEvent::MouseUp => self.mouse_up(),
        }
    }

    /// Run one frame: timers, then `update` when the game has one, then
    /// `render` into a fresh frame.
    pub fn frame(&mut self, dt: f32) -> &Frame {
        if self.faulted {
            return &self.last_frame;
        }

        let game = &mut self.game;
        let keys = &self.keys;
        let has_update = self.capabilities.update;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            game.tick_timers(dt);
            if has_update {
                game.update(dt, keys);
            }
            let mut frame = Frame::default();
            game.render(&mut frame);
            frame
        }));

        match outcome {
            Ok(frame) => self.last_frame = frame,
            Err(_) => self.fault("frame"),
        }
        &self.last_frame
    }

    fn guarded(&mut self, entry_point: &'static str, f: impl FnOnce(&mut dyn MiniGame)) {
        if self.faulted {
            return;
        }
        let game = self.game.as_mut();
        if panic::catch_unwind(AssertUnwindSafe(|| f(game))).is_err() {
            self.fault(entry_point);
        }
    }

    fn fault(&mut self, entry_point: &'static str) {
        self.faulted = true;
        tracing::error!(
            entry_point,
            game = %self.name,
            "game code panicked, keeping last frame"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use playspark_core::frame::DrawCommand;
    use playspark_core::game_trait::GameMetadata;
    use playspark_core::game_type::GameType;
    use playspark_core::test_helpers::seeded_game;

    fn host_for(game_type: GameType) -> GameHost {
        let program = seeded_game(game_type, 3).game_code;
        GameHost::from_program(&GameRegistry::new(), &program).unwrap()
    }

    /// Draws one rect, then panics once `frames` reaches `explode_at`.
    /// Only answers `metadata` once.
    struct Exploding {
        frames: u32,
        explode_at: u32,
        metadata_calls: Cell<u32>,
    }

    impl Exploding {
        fn boxed(explode_at: u32) -> Box<Self> {
            Box::new(Self {
                frames: 0,
                explode_at,
                metadata_calls: Cell::new(0),
            })
        }
    }

    impl MiniGame for Exploding {
        fn metadata(&self) -> GameMetadata {
            let calls = self.metadata_calls.get() + 1;
            self.metadata_calls.set(calls);
            if calls > 1 {
                panic!("metadata asked twice");
            }
            GameMetadata {
                game_type: GameType::Jumping,
                name: "Exploding".to_string(),
                description: String::new(),
            }
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::for_type(GameType::Jumping)
        }

        fn update(&mut self, _dt: f32, _keys: &KeyState) {
            self.frames += 1;
            if self.frames >= self.explode_at {
                panic!("boom");
            }
        }

        fn render(&self, frame: &mut Frame) {
            frame.fill_rect(self.frames as f32, 0.0, 1.0, 1.0, "#000");
        }

        fn handle_click(&mut self, _x: f32, _y: f32) {
            panic!("clicks are not supported");
        }

        fn is_complete(&self) -> bool {
            false
        }

        fn score(&self) -> u32 {
            self.frames
        }

        fn serialize_state(&self) -> Vec<u8> {
            Vec::new()
        }

        fn apply_state(&mut self, _state: &[u8]) {}
    }

    #[test]
    fn keyboard_drives_update() {
        let mut host = host_for(GameType::Adventure);
        let before = host.game().serialize_state();
        host.key_down("ArrowDown");
        host.frame(1.0 / 60.0);
        host.key_up("ArrowDown");
        assert!(!host.keys().down());
        assert_ne!(host.game().serialize_state(), before);
    }

    #[test]
    fn pointer_input_needs_capability() {
        let mut host = host_for(GameType::Jumping);
        let before = host.game().serialize_state();
        host.click(140.0, 90.0);
        host.mouse_down(10.0, 10.0);
        host.mouse_up();
        assert_eq!(host.game().serialize_state(), before);
        assert!(!host.is_faulted());
    }

    #[test]
    fn puzzle_clicks_reach_the_game() {
        let mut host = host_for(GameType::Puzzle);
        host.click(140.0, 90.0);
        let frame = host.frame(1.0 / 60.0);
        assert!(frame.texts().contains(&"Clicks: 1"));
    }

    #[test]
    fn puzzle_has_no_update_but_timers_run() {
        let mut host = host_for(GameType::Puzzle);
        // flip two cards; whichever way they land, a second of frames settles them
        host.click(140.0, 90.0);
        host.click(240.0, 90.0);
        for _ in 0..61 {
            host.frame(1.0 / 60.0);
        }
        let face_up = host
            .frame(1.0 / 60.0)
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if color != "#DDD"))
            .count();
        // background plus either zero or two matched cards
        assert!(face_up == 1 || face_up == 3, "got {face_up}");
    }

    #[test]
    fn creative_drag_via_events() {
        let mut host = host_for(GameType::Creative);
        let events: Vec<HostEvent> = serde_json::from_str(
            r#"[
                {"type": "mouseDown", "x": 50, "y": 50},
                {"type": "mouseMove", "x": 80, "y": 60},
                {"type": "mouseUp"}
            ]"#,
        )
        .unwrap();
        for e in &events {
            host.dispatch(e);
        }
        let frame = host.frame(1.0 / 60.0);
        assert!(
            frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Polyline { .. }))
        );
    }

    #[test]
    fn panic_in_frame_keeps_last_good_frame() {
        let mut host = GameHost::new(Exploding::boxed(3));
        host.frame(0.016);
        let good = host.frame(0.016).clone();
        assert!(!host.is_faulted());

        let after = host.frame(0.016).clone();
        assert!(host.is_faulted());
        assert_eq!(after, good);

        // faulted hosts stop calling into the game
        assert_eq!(host.frame(0.016), &good);
        assert_eq!(host.game().score(), 3);
    }

    #[test]
    fn panic_in_handler_is_contained() {
        let mut host = GameHost::new(Exploding::boxed(100));
        // jumping capabilities: clicks are not forwarded at all
        host.click(1.0, 1.0);
        assert!(!host.is_faulted());

        host.capabilities.handle_click = true;
        host.click(1.0, 1.0);
        assert!(host.is_faulted());
    }

    #[test]
    fn fault_logging_does_not_call_back_into_the_game() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut host = GameHost::new(Exploding::boxed(1));
            host.frame(0.016);
            assert!(host.is_faulted());
        });
    }

    #[test]
    fn key_events_from_json() {
        let event: HostEvent = serde_json::from_str(r#"{"type":"keyDown","key":" "}"#).unwrap();
        let mut host = host_for(GameType::Jumping);
        host.dispatch(&event);
        assert!(host.keys().space());
    }
}
