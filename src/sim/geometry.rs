//! Point/segment geometry for the tilting board
//!
//! Everything is in board meters with the origin at the top-left of the
//! canvas and y growing downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A static line obstacle, stored in live (already rotated) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Rotate both endpoints about `pivot`
    pub fn rotate(&mut self, pivot: DVec2, angle: f64) {
        self.start = rotate_point(self.start, pivot, angle);
        self.end = rotate_point(self.end, pivot, angle);
    }

    /// Unit direction from the visually upper endpoint (smaller y) to the
    /// lower one. `None` for a zero-length segment.
    ///
    /// Endpoints at equal height keep their stored order.
    pub fn downhill_direction(&self) -> Option<DVec2> {
        let (upper, lower) = if self.start.y > self.end.y {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        (lower - upper).try_normalize()
    }
}

/// Distance from `point` to the closest point of `segment`.
///
/// When the projection falls outside the segment the nearer endpoint is
/// used; a zero-length segment behaves as a single point.
pub fn distance_to_segment(point: DVec2, segment: &Segment) -> f64 {
    let s = segment.start;
    let e = segment.end;

    if (e - s).dot(point - s) <= 0.0 {
        return point.distance(s);
    }
    if (s - e).dot(point - e) <= 0.0 {
        return point.distance(e);
    }
    (e - s).perp_dot(point - s).abs() / segment.length()
}

/// Closest point of `segment` to `point` (clamped projection)
pub fn closest_point(point: DVec2, segment: &Segment) -> DVec2 {
    let line = segment.end - segment.start;
    let len_sq = line.length_squared();
    if len_sq == 0.0 {
        return segment.start;
    }
    let t = ((point - segment.start).dot(line) / len_sq).clamp(0.0, 1.0);
    segment.start + line * t
}

/// Rotate `point` about `pivot` by `angle` radians
#[inline]
pub fn rotate_point(point: DVec2, pivot: DVec2, angle: f64) -> DVec2 {
    pivot + DVec2::from_angle(angle).rotate(point - pivot)
}
