//! Ball motion: free fall or rolling along the nearest segment
//!
//! The ball is a point with a velocity; there is no friction, restitution
//! or spin. Each step picks one mode from the nearest-segment distance.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::nearest_segment;
use super::geometry::Segment;
use super::state::Ball;

/// Physics mode chosen for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// No segment within the ball radius
    FreeFall,
    /// Velocity constrained to this segment's direction
    Rolling { segment: usize },
}

/// Advance the ball by one step of `dt` seconds.
///
/// Gravity points along +y (y grows downward toward the goal).
pub fn step_ball(ball: &mut Ball, segments: &[Segment], gravity: f64, dt: f64) -> Contact {
    let touching = nearest_segment(ball.pos, segments)
        .filter(|&(_, dist)| dist <= ball.radius)
        .and_then(|(idx, _)| segments[idx].downhill_direction().map(|dir| (idx, dir)));

    let contact = match touching {
        Some((idx, dir)) => {
            ball.vel = roll_velocity(ball.vel, dir, gravity, dt);
            Contact::Rolling { segment: idx }
        }
        None => {
            ball.vel += DVec2::new(0.0, gravity * dt);
            Contact::FreeFall
        }
    };

    ball.pos += ball.vel * dt;
    contact
}

/// Snap `vel` onto the slope `dir` (upper-to-lower unit vector), keeping the
/// speed and the current sense of travel, then add the slope's share of
/// gravity.
pub fn roll_velocity(vel: DVec2, dir: DVec2, gravity: f64, dt: f64) -> DVec2 {
    let speed = vel.length();
    let snapped = if vel.dot(dir) > 0.0 {
        dir * speed
    } else {
        -dir * speed
    };
    snapped + dir * gravity * dt * dir.y
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.8;

    fn floor_at(y: f64) -> Segment {
        Segment::new(DVec2::new(0.0, y), DVec2::new(20.0, y))
    }

    #[test]
    fn test_free_fall_from_rest() {
        let mut ball = Ball::new(DVec2::new(5.0, 1.0), 0.5);
        let contact = step_ball(&mut ball, &[], G, 0.1);
        assert_eq!(contact, Contact::FreeFall);
        assert_eq!(ball.vel, DVec2::new(0.0, G * 0.1));
    }

    #[test]
    fn test_free_fall_far_from_segment() {
        // Nearest segment 2 m away, radius 0.5
        let mut ball = Ball::new(DVec2::new(5.0, 3.0), 0.5);
        let contact = step_ball(&mut ball, &[floor_at(5.0)], 9.8, 0.1);
        assert_eq!(contact, Contact::FreeFall);
        assert!((ball.vel.y - 0.98).abs() < 1e-12);
        assert_eq!(ball.vel.x, 0.0);
        assert!((ball.pos.y - (3.0 + 0.098)).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_on_flat_floor_turns_horizontal() {
        // 0.3 m above a floor at y=5 with a 0.5 m radius, falling
        let mut ball = Ball::new(DVec2::new(5.0, 4.7), 0.5);
        ball.vel = DVec2::new(0.0, 2.0);
        let contact = step_ball(&mut ball, &[floor_at(5.0)], G, 1.0 / 60.0);
        assert_eq!(contact, Contact::Rolling { segment: 0 });
        let dir = ball.vel.normalize();
        assert!((dir.x.abs() - 1.0).abs() < 1e-12);
        assert!(dir.y.abs() < 1e-12);
        // Speed is kept
        assert!((ball.vel.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_keeps_sense_and_accelerates() {
        // Slope going down to the right, 3-4-5 triangle
        let slope = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(8.0, 6.0));
        let dir = DVec2::new(0.8, 0.6);
        let dt = 0.05;

        // Moving downhill
        let mut ball = Ball::new(DVec2::new(4.0, 3.0), 0.5);
        ball.vel = dir * 2.0;
        step_ball(&mut ball, &[slope], G, dt);
        assert!(ball.vel.dot(dir) > 0.0);
        let expected = 2.0 + G * dt * 0.6;
        assert!((ball.vel.length() - expected).abs() < 1e-12);

        // Moving uphill decelerates but keeps heading uphill
        let mut ball = Ball::new(DVec2::new(4.0, 3.0), 0.5);
        ball.vel = -dir * 2.0;
        step_ball(&mut ball, &[slope], G, dt);
        assert!(ball.vel.dot(dir) < 0.0);
        let expected = 2.0 - G * dt * 0.6;
        assert!((ball.vel.length() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stored_endpoint_order_does_not_matter() {
        let a = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(8.0, 6.0));
        let b = Segment::new(DVec2::new(8.0, 6.0), DVec2::new(0.0, 0.0));
        let mut ball_a = Ball::new(DVec2::new(4.0, 3.0), 0.5);
        let mut ball_b = ball_a;
        ball_a.vel = DVec2::new(1.0, 0.0);
        ball_b.vel = DVec2::new(1.0, 0.0);
        step_ball(&mut ball_a, &[a], G, 0.1);
        step_ball(&mut ball_b, &[b], G, 0.1);
        assert!((ball_a.vel - ball_b.vel).length() < 1e-12);
    }

    #[test]
    fn test_equidistant_segments_use_first() {
        // Flat segment first, steep one second, both 0.4 m away
        let flat = Segment::new(DVec2::new(0.0, 5.4), DVec2::new(10.0, 5.4));
        let steep = Segment::new(DVec2::new(5.4, 0.0), DVec2::new(5.4, 10.0));
        let mut ball = Ball::new(DVec2::new(5.0, 5.0), 0.5);
        ball.vel = DVec2::new(1.0, 0.0);
        let contact = step_ball(&mut ball, &[flat, steep], G, 0.01);
        assert_eq!(contact, Contact::Rolling { segment: 0 });
        assert!(ball.vel.y.abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_segment_falls_freely() {
        let dot = Segment::new(DVec2::new(5.0, 5.2), DVec2::new(5.0, 5.2));
        let mut ball = Ball::new(DVec2::new(5.0, 5.0), 0.5);
        let contact = step_ball(&mut ball, &[dot], G, 0.1);
        assert_eq!(contact, Contact::FreeFall);
        assert!(ball.vel.is_finite());
    }
}
