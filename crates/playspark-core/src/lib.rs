pub mod catalog;
pub mod construction;
pub mod frame;
pub mod game_trait;
pub mod game_type;
pub mod generator;
pub mod interpreter;
pub mod program;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::frame::Frame;
    use crate::game_trait::{KeyState, MiniGame};
    use crate::game_type::GameType;
    use crate::generator::{GeneratedGame, generate_with};
    use crate::interpreter::interpret_as;

    /// Generate a game of the given type with a pinned random source.
    pub fn seeded_game(game_type: GameType, seed: u64) -> GeneratedGame {
        let mut rng = StdRng::seed_from_u64(seed);
        let interp = interpret_as(game_type, "a frog in the forest", &mut rng);
        generate_with(&interp, None, &mut rng)
    }

    /// Key state with the given keys held down.
    pub fn keys_down(keys: &[&str]) -> KeyState {
        let mut state = KeyState::default();
        for key in keys {
            state.set(key, true);
        }
        state
    }

    /// Run `n` update ticks of 1/60 s with the given keys held.
    pub fn run_updates(game: &mut dyn MiniGame, keys: &KeyState, n: usize) {
        for _ in 0..n {
            game.tick_timers(1.0 / 60.0);
            game.update(1.0 / 60.0, keys);
        }
    }

    /// Render into a fresh default-sized frame.
    pub fn render_frame(game: &dyn MiniGame) -> Frame {
        let mut frame = Frame::default();
        game.render(&mut frame);
        frame
    }

    // ================================================================
    // MiniGame contract tests
    // ================================================================
    // Every game crate calls these from its own #[cfg(test)] module with a
    // freshly constructed instance.

    /// A fresh game is not complete, scores zero, and renders something.
    pub fn contract_fresh_game_renders(game: &dyn MiniGame) {
        assert!(!game.is_complete(), "fresh game must not be complete");
        assert_eq!(game.score(), 0, "fresh game must start at zero");
        let frame = render_frame(game);
        assert!(
            !frame.commands.is_empty(),
            "render() must draw at least the background"
        );
    }

    /// Metadata and capabilities agree with the game type's fixed surface.
    pub fn contract_capabilities_match_type(game: &dyn MiniGame) {
        let meta = game.metadata();
        assert_eq!(
            game.capabilities(),
            crate::game_trait::Capabilities::for_type(meta.game_type),
            "capabilities must match the surface for {}",
            meta.game_type
        );
        assert!(!meta.name.is_empty());
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn MiniGame) {
        let a = game.serialize_state();
        assert!(!a.is_empty(), "serialize_state() must not be empty");
        game.apply_state(&a);
        let b = game.serialize_state();
        assert_eq!(a, b, "state must survive a serialize/apply roundtrip");
    }

    /// Garbage state bytes are ignored rather than corrupting the game.
    pub fn contract_bad_state_ignored(game: &mut dyn MiniGame) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(before, game.serialize_state());
    }
}
