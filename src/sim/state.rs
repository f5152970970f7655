//! Board and entity state
//!
//! `BoardState` owns everything static in the maze (board frame, segments,
//! goal line, items). The ball lives next to it in `Level` so the session
//! can reset both together.

use glam::DVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, rotate_point};
use crate::assets::{ItemCatalog, VisualHandle};
use crate::consts::CANVAS_SIZE;
use crate::map::{CircleData, LineData, MapData, RectData};

/// The rotatable frame, stored as its unrotated rectangle plus the
/// cumulative rotation about its own center
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub lx: f64,
    pub ly: f64,
    pub rx: f64,
    pub ry: f64,
    /// Cumulative rotation (radians)
    pub theta: f64,
}

impl Board {
    pub fn new(lx: f64, ly: f64, rx: f64, ry: f64) -> Self {
        Self {
            lx,
            ly,
            rx,
            ry,
            theta: 0.0,
        }
    }

    /// Center of the unrotated rectangle (rotation pivot)
    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.lx + self.rx) / 2.0, (self.ly + self.ry) / 2.0)
    }

    /// Corners in drawing order, rotated by the cumulative angle
    pub fn corners(&self) -> [DVec2; 4] {
        let center = self.center();
        [
            DVec2::new(self.lx, self.ly),
            DVec2::new(self.lx, self.ry),
            DVec2::new(self.rx, self.ry),
            DVec2::new(self.rx, self.ly),
        ]
        .map(|corner| rotate_point(corner, center, self.theta))
    }
}

/// The player's ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Ball {
    /// A ball at rest
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            radius,
        }
    }
}

/// Horizontal threshold whose crossing ends an attempt (never rotated)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalLine {
    pub y: f64,
}

/// A reward collectible drifting along the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: DVec2,
    pub radius: f64,
    /// Points deducted from the remaining score when caught
    pub reward: i32,
    /// Opaque image reference owned by the renderer
    pub visual: VisualHandle,
}

/// Static maze contents plus the board rotation and item drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Pixels per meter (fixed once loaded)
    pub pixel_per_meter: f64,
    /// Gravity (m/s², positive = downward)
    pub gravity: f64,
    pub board: Board,
    /// Obstacles, identity is the index
    pub segments: Vec<Segment>,
    pub goal: GoalLine,
    pub items: Vec<Item>,
    /// Item drift speed (m/s along +x)
    pub item_drift_speed: f64,
    /// Canvas width in pixels, used for item wrap-around
    pub canvas_width: f64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            pixel_per_meter: 0.0,
            gravity: 0.0,
            board: Board::default(),
            segments: Vec::new(),
            goal: GoalLine::default(),
            items: Vec::new(),
            item_drift_speed: 0.0,
            canvas_width: CANVAS_SIZE,
        }
    }
}

impl BoardState {
    /// Tilt the board by `angular_velocity * dt` and carry every segment
    /// along by that increment. Returns the increment so the caller can
    /// apply the same correction to the ball.
    pub fn tilt(&mut self, angular_velocity: f64, dt: f64) -> f64 {
        let delta = angular_velocity * dt;
        self.board.theta += delta;

        // Segments hold live coordinates: only the delta is applied
        let center = self.board.center();
        for segment in &mut self.segments {
            segment.rotate(center, delta);
        }
        delta
    }

    /// Rotate an outside point (the ball) with the board's last increment
    pub fn apply_board_rotation_to(&self, point: DVec2, delta_angle: f64) -> DVec2 {
        rotate_point(point, self.board.center(), delta_angle)
    }

    /// Canvas width in meters
    pub fn view_width(&self) -> f64 {
        if self.pixel_per_meter > 0.0 {
            self.canvas_width / self.pixel_per_meter
        } else {
            f64::INFINITY
        }
    }

    /// Move every item along +x and wrap it to the left edge once it has
    /// fully left the canvas. Y never changes.
    pub fn drift_items(&mut self, dt: f64) {
        let width = self.view_width();
        for item in &mut self.items {
            item.pos.x += self.item_drift_speed * dt;
            if item.pos.x >= width + item.radius {
                item.pos.x = -item.radius;
            }
        }
    }
}

/// A loaded map: the board contents plus the ball's starting state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub board: BoardState,
    pub ball: Ball,
}

impl Level {
    /// Build the simulation state from a parsed map. Each item draws its
    /// image and reward from `catalog` using `rng`.
    pub fn from_map(map: &MapData, catalog: &ItemCatalog, rng: &mut Pcg32) -> Self {
        let items = map
            .items
            .iter()
            .map(|c| {
                let (visual, reward) = catalog.assign(rng);
                Item {
                    pos: DVec2::new(c.x, c.y),
                    radius: c.r,
                    reward,
                    visual,
                }
            })
            .collect();

        let board = BoardState {
            pixel_per_meter: map.pixel_per_meter,
            gravity: map.gravity,
            board: Board::new(map.rect.lx, map.rect.ly, map.rect.rx, map.rect.ry),
            segments: map
                .lines
                .iter()
                .map(|l| Segment::new(DVec2::new(l.sx, l.sy), DVec2::new(l.gx, l.gy)))
                .collect(),
            goal: GoalLine { y: map.goal_y },
            items,
            item_drift_speed: map.item_drift_speed,
            canvas_width: CANVAS_SIZE,
        };

        Self {
            board,
            ball: Ball::new(DVec2::new(map.ball.x, map.ball.y), map.ball.r),
        }
    }

    /// Serializable snapshot of the current positions
    pub fn to_map(&self) -> MapData {
        let b = &self.board;
        MapData {
            pixel_per_meter: b.pixel_per_meter,
            gravity: b.gravity,
            ball: CircleData {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                r: self.ball.radius,
            },
            rect: RectData {
                lx: b.board.lx,
                ly: b.board.ly,
                rx: b.board.rx,
                ry: b.board.ry,
            },
            lines: b
                .segments
                .iter()
                .map(|s| LineData {
                    sx: s.start.x,
                    sy: s.start.y,
                    gx: s.end.x,
                    gy: s.end.y,
                })
                .collect(),
            goal_y: b.goal.y,
            item_drift_speed: b.item_drift_speed,
            items: b
                .items
                .iter()
                .map(|i| CircleData {
                    x: i.pos.x,
                    y: i.pos.y,
                    r: i.radius,
                })
                .collect(),
        }
    }
}
