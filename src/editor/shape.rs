//! Shapes drawn by dragging in the editor

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::map::{CircleData, LineData, MapData, RectData};

/// What a drag creates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Rect,
    Line,
    Ball,
    Goal,
    Item,
}

impl EditMode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            EditMode::Rect => EditMode::Line,
            EditMode::Line => EditMode::Ball,
            EditMode::Ball => EditMode::Goal,
            EditMode::Goal => EditMode::Item,
            EditMode::Item => EditMode::Rect,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Rect => "Rect",
            EditMode::Line => "Line",
            EditMode::Ball => "Ball",
            EditMode::Goal => "Goal",
            EditMode::Item => "Item",
        }
    }
}

/// A committed map element, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle { lx: f64, ly: f64, rx: f64, ry: f64 },
    Segment { start: DVec2, end: DVec2 },
    Ball { center: DVec2, radius: f64 },
    GoalLine { y: f64 },
    Item { center: DVec2, radius: f64 },
}

impl Shape {
    /// Build the shape for a drag from `start` to `end` (pixels).
    ///
    /// Circles span the drag as a diameter; the goal takes the start height.
    pub fn from_drag(mode: EditMode, start: DVec2, end: DVec2, pixel_per_meter: f64) -> Self {
        let s = start / pixel_per_meter;
        let e = end / pixel_per_meter;
        let center = (s + e) / 2.0;
        let radius = s.distance(e) / 2.0;

        match mode {
            EditMode::Rect => Shape::Rectangle {
                lx: s.x.min(e.x),
                ly: s.y.min(e.y),
                rx: s.x.max(e.x),
                ry: s.y.max(e.y),
            },
            EditMode::Line => Shape::Segment { start: s, end: e },
            EditMode::Ball => Shape::Ball { center, radius },
            EditMode::Goal => Shape::GoalLine { y: s.y },
            EditMode::Item => Shape::Item { center, radius },
        }
    }
}

impl MapData {
    /// Add a shape: the board, ball and goal are replaced, segments and
    /// items accumulate
    pub fn apply(&mut self, shape: Shape) {
        match shape {
            Shape::Rectangle { lx, ly, rx, ry } => self.rect = RectData { lx, ly, rx, ry },
            Shape::Segment { start, end } => self.lines.push(LineData {
                sx: start.x,
                sy: start.y,
                gx: end.x,
                gy: end.y,
            }),
            Shape::Ball { center, radius } => {
                self.ball = CircleData {
                    x: center.x,
                    y: center.y,
                    r: radius,
                }
            }
            Shape::GoalLine { y } => self.goal_y = y,
            Shape::Item { center, radius } => self.items.push(CircleData {
                x: center.x,
                y: center.y,
                r: radius,
            }),
        }
    }
}
