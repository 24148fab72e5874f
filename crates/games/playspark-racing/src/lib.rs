use serde::{Deserialize, Serialize};

use playspark_core::frame::{CANVAS_HEIGHT, CANVAS_WIDTH, Frame};
use playspark_core::game_trait::{Capabilities, GameMetadata, KeyState, MiniGame, Rect};
use playspark_core::game_type::GameType;
use playspark_core::mini_game_state_boilerplate;
use playspark_core::program::RacingProgram;

const OBSTACLE_SIZE: f32 = 40.0;
const OBSTACLE_COLOR: &str = "#8B4513";
const TRACK_COLOR: &str = "#666";
const LANE_COLOR: &str = "#FFF";
const FINISH_COLOR: &str = "#FFD700";

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacingState {
    pub car: Rect,
    pub finished: bool,
}

/// Drive the car right until it crosses the finish line.
pub struct RacingGame {
    program: RacingProgram,
    state: RacingState,
}

impl RacingGame {
    pub fn new(program: &RacingProgram) -> Self {
        Self {
            state: RacingState {
                car: program.car,
                finished: false,
            },
            program: program.clone(),
        }
    }

    pub fn state(&self) -> &RacingState {
        &self.state
    }
}

impl MiniGame for RacingGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            game_type: GameType::Racing,
            name: "Speedy Racer".to_string(),
            description: "Race along the track to the finish line".to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::for_type(GameType::Racing)
    }

    fn update(&mut self, _dt: f32, keys: &KeyState) {
        if self.state.finished {
            return;
        }

        let (h, v) = (self.program.horizontal_step, self.program.vertical_step);
        let car = &mut self.state.car;
        // each move only applies while the car stays strictly inside the canvas
        if keys.left() && car.x - h > 0.0 {
            car.x -= h;
        }
        if keys.right() && car.x + h < CANVAS_WIDTH - car.width {
            car.x += h;
        }
        if keys.up() && car.y - v > 0.0 {
            car.y -= v;
        }
        if keys.down() && car.y + v < CANVAS_HEIGHT - car.height {
            car.y += v;
        }

        if car.x + car.width > self.program.finish.x {
            self.state.finished = true;
            tracing::info!("race finished");
        }
    }

    fn render(&self, frame: &mut Frame) {
        frame.background(&self.program.background);

        let t = self.program.track;
        frame.fill_rect(t.x, t.y, t.width, t.height, TRACK_COLOR);
        let lane_y = t.y + t.height / 2.0;
        frame.polyline(vec![(t.x, lane_y), (t.x + t.width, lane_y)], LANE_COLOR, 2.0, true);

        for o in &self.program.obstacles {
            frame.fill_rect(o.x, o.y, OBSTACLE_SIZE, OBSTACLE_SIZE, OBSTACLE_COLOR);
        }

        let f = self.program.finish;
        frame.fill_rect(f.x, f.y, f.width, f.height, FINISH_COLOR);

        let car = self.state.car;
        frame.fill_rect(car.x, car.y, car.width, car.height, &self.program.car_color);

        if self.state.finished {
            frame.banner("You Win! 🏁");
        }
    }

    fn is_complete(&self) -> bool {
        self.state.finished
    }

    fn score(&self) -> u32 {
        u32::from(self.state.finished)
    }

    mini_game_state_boilerplate!(state_type: RacingState);
}
