//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as a `dt` argument
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform device access

pub mod attempt;
pub mod collision;
pub mod dynamics;
pub mod geometry;
pub mod state;
pub mod tick;

pub use attempt::{AttemptState, GamePhase, Outcome, Rules};
pub use collision::{first_item_hit, hit_goal, hit_item, hit_item_reward, nearest_segment};
pub use dynamics::{Contact, roll_velocity, step_ball};
pub use geometry::{Segment, closest_point, distance_to_segment, rotate_point};
pub use state::{Ball, Board, BoardState, GoalLine, Item, Level};
pub use tick::{GameEvent, Session, TickInput, Tilt, tick};
