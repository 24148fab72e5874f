use serde::{Deserialize, Serialize};

/// Default canvas width used by every generated game.
pub const CANVAS_WIDTH: f32 = 600.0;
/// Default canvas height used by every generated game.
pub const CANVAS_HEIGHT: f32 = 400.0;

/// A single paint operation. A browser-side painter replays these in order
/// onto a 2D canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
        line_width: f32,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: String,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: u32,
        color: String,
        centered: bool,
    },
    /// Dashed or solid line through the given points.
    Polyline {
        points: Vec<(f32, f32)>,
        color: String,
        width: f32,
        dashed: bool,
    },
}

/// One rendered frame: the canvas size plus its draw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Fill the whole canvas.
    pub fn background(&mut self, color: &str) {
        let (w, h) = (self.width, self.height);
        self.fill_rect(0.0, 0.0, w, h, color);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &str,
        line_width: f32,
    ) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
            line_width,
        });
    }

    pub fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            x,
            y,
            radius,
            color: color.to_string(),
        });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, size: u32, color: &str) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            size,
            color: color.to_string(),
            centered: false,
        });
    }

    pub fn polyline(&mut self, points: Vec<(f32, f32)>, color: &str, width: f32, dashed: bool) {
        self.commands.push(DrawCommand::Polyline {
            points,
            color: color.to_string(),
            width,
            dashed,
        });
    }

    /// Standard score readout in the top-left corner.
    pub fn score_text(&mut self, label: &str, value: impl std::fmt::Display) {
        self.text(10.0, 30.0, format!("{label}: {value}"), 20, "#000");
    }

    /// Dim the canvas and print a centered banner (win screens).
    pub fn banner(&mut self, message: &str) {
        let (w, h) = (self.width, self.height);
        self.fill_rect(0.0, 0.0, w, h, "rgba(0,0,0,0.7)");
        self.commands.push(DrawCommand::Text {
            x: w / 2.0,
            y: h / 2.0,
            text: message.to_string(),
            size: 48,
            color: "#FFF".to_string(),
            centered: true,
        });
    }

    /// Text of every `Text` command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
