//! Contact and overlap queries
//!
//! The ball only ever interacts with the single nearest segment; items and
//! the goal are simple overlap tests. All searches run in sequence order so
//! results are deterministic by index.

use glam::DVec2;

use super::geometry::{Segment, distance_to_segment};
use super::state::{Ball, GoalLine, Item};

/// Nearest segment to a point: `(index, distance)`.
///
/// Ties keep the lower index (strict comparison), so a ball equidistant
/// from two walls always resolves against the first one.
pub fn nearest_segment(point: DVec2, segments: &[Segment]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, segment) in segments.iter().enumerate() {
        let dist = distance_to_segment(point, segment);
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// First item (by index) overlapping the ball
pub fn first_item_hit<'a>(ball: &Ball, items: &'a [Item]) -> Option<&'a Item> {
    items
        .iter()
        .find(|item| ball.pos.distance(item.pos) <= ball.radius + item.radius)
}

/// Whether the ball overlaps any item
pub fn hit_item(ball: &Ball, items: &[Item]) -> bool {
    first_item_hit(ball, items).is_some()
}

/// Reward of the first overlapping item, 0 if none
pub fn hit_item_reward(ball: &Ball, items: &[Item]) -> i32 {
    first_item_hit(ball, items).map_or(0, |item| item.reward)
}

/// Whether the ball's lower edge has passed the goal line
#[inline]
pub fn hit_goal(ball: &Ball, goal: &GoalLine) -> bool {
    ball.pos.y + ball.radius > goal.y
}
