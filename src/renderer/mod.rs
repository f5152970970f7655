//! Scene description for a frontend to draw
//!
//! The simulation works in meters; everything here is in canvas pixels with
//! y growing downward. A frontend only has to draw the commands in order.

mod scene;

pub use scene::{build_editor_scene, build_scene};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// RGBA color
pub type Color = [f32; 4];

/// Color palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.02, 0.02, 0.05, 1.0];
    pub const BOARD: Color = [0.85, 0.8, 0.7, 1.0];
    pub const SEGMENT: Color = [0.3, 0.3, 0.4, 1.0];
    pub const BALL: Color = [0.9, 0.2, 0.2, 1.0];
    pub const GOAL: Color = [0.2, 0.8, 0.4, 1.0];
    pub const ITEM: Color = [0.9, 0.85, 0.3, 1.0];
    /// Where the ball touches the segment it rolls on
    pub const CONTACT: Color = [1.0, 1.0, 1.0, 0.8];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BANNER: Color = [1.0, 0.4, 0.2, 1.0];
    /// In-progress editor drag
    pub const PREVIEW: Color = [0.4, 0.7, 1.0, 0.6];
}

/// One primitive, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled convex polygon
    Polygon { points: Vec<DVec2>, color: Color },
    Line {
        start: DVec2,
        end: DVec2,
        width: f64,
        color: Color,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    /// Image stretched over the square at `top_left` with side `size`
    Image {
        name: String,
        top_left: DVec2,
        size: f64,
    },
    Text {
        text: String,
        pos: DVec2,
        size: f64,
        color: Color,
    },
}

/// A full frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub clear: Color,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            clear: colors::BACKGROUND,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Text commands in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
