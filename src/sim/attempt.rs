//! Life, score and attempt phase
//!
//! Pure bookkeeping: every transition is a total function of the current
//! `AttemptState` and the two collision predicates. The session applies the
//! side effects (resetting the ball and board, restarting the countdown).

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_LIFE, INITIAL_SCORE};

/// Current phase of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frozen board with a visible countdown
    Countdown,
    /// Active physics
    Playing,
    /// Score reached zero (terminal until reset)
    Cleared,
    /// Goal reached with lives to spare; the next tick counts down again.
    /// The retry already restored the level, so a full reset is not offered.
    RetryPending,
    /// Goal reached on the last life (terminal until reset)
    GameOver,
}

impl GamePhase {
    /// Phases that accept the explicit reset action
    pub fn accepts_reset(&self) -> bool {
        matches!(self, GamePhase::Cleared | GamePhase::GameOver)
    }
}

/// Starting values restored on every full reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub initial_life: u32,
    pub initial_score: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_life: INITIAL_LIFE,
            initial_score: INITIAL_SCORE,
        }
    }
}

/// What a Playing tick resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep playing
    Continue,
    /// Score reached zero
    Cleared,
    /// Goal reached, board must be restored and the countdown restarted
    Retry,
    /// Goal reached on the last life
    GameOver,
}

/// Life/score bookkeeping for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    /// Remaining retries
    pub life: u32,
    /// Reward points still needed to clear (cleared at <= 0)
    pub score: i32,
    /// An item was caught during the current attempt
    pub caught_item: bool,
    pub phase: GamePhase,
}

impl AttemptState {
    pub fn new(rules: &Rules) -> Self {
        Self {
            life: rules.initial_life,
            score: rules.initial_score,
            caught_item: false,
            phase: GamePhase::Countdown,
        }
    }

    /// Restore the starting values and count down again
    pub fn reset(&mut self, rules: &Rules) {
        *self = Self::new(rules);
    }

    /// Count an item pickup. Only the first pickup of an attempt scores.
    /// Returns the reward applied.
    pub fn catch_item(&mut self, reward: i32) -> Option<i32> {
        if self.caught_item {
            return None;
        }
        self.score -= reward;
        self.caught_item = true;
        Some(reward)
    }

    /// Resolve the end-of-attempt checks for one Playing tick.
    ///
    /// Clearing takes priority over reaching the goal. A retry costs a life
    /// only when no item was caught during the attempt.
    pub fn resolve(&mut self, goal_hit: bool) -> Outcome {
        if self.score <= 0 {
            self.phase = GamePhase::Cleared;
            return Outcome::Cleared;
        }
        if !goal_hit {
            return Outcome::Continue;
        }
        if self.life > 1 {
            if !self.caught_item {
                self.life -= 1;
            }
            self.caught_item = false;
            self.phase = GamePhase::RetryPending;
            Outcome::Retry
        } else {
            self.phase = GamePhase::GameOver;
            Outcome::GameOver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> AttemptState {
        let mut state = AttemptState::new(&Rules::default());
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_initial_values() {
        let state = AttemptState::new(&Rules::default());
        assert_eq!(state.life, 4);
        assert_eq!(state.score, 3);
        assert!(!state.caught_item);
        assert_eq!(state.phase, GamePhase::Countdown);
    }

    #[test]
    fn test_item_scores_once_per_attempt() {
        let mut state = playing();
        assert_eq!(state.catch_item(2), Some(2));
        assert_eq!(state.catch_item(2), None);
        assert_eq!(state.score, 1);
        // Score still positive: keep playing
        assert_eq!(state.resolve(false), Outcome::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_clear_when_score_reaches_zero() {
        let mut state = playing();
        state.catch_item(3);
        assert_eq!(state.resolve(true), Outcome::Cleared);
        assert_eq!(state.phase, GamePhase::Cleared);
        // Clearing won over the goal: no life spent
        assert_eq!(state.life, 4);
    }

    #[test]
    fn test_goal_without_item_costs_life() {
        let mut state = playing();
        assert_eq!(state.resolve(true), Outcome::Retry);
        assert_eq!(state.life, 3);
        assert_eq!(state.phase, GamePhase::RetryPending);
    }

    #[test]
    fn test_caught_item_protects_life() {
        let mut state = playing();
        state.catch_item(1);
        assert_eq!(state.resolve(true), Outcome::Retry);
        assert_eq!(state.life, 4);
        assert!(!state.caught_item);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut state = playing();
        state.life = 1;
        assert_eq!(state.resolve(true), Outcome::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.life, 1);
    }

    #[test]
    fn test_last_life_with_item_is_still_game_over() {
        let mut state = playing();
        state.life = 1;
        state.catch_item(1);
        assert_eq!(state.resolve(true), Outcome::GameOver);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = playing();
        state.life = 1;
        state.score = -1;
        state.caught_item = true;
        state.phase = GamePhase::GameOver;
        state.reset(&Rules::default());
        assert_eq!(state, AttemptState::new(&Rules::default()));
    }

    #[test]
    fn test_reset_allowed_phases() {
        assert!(GamePhase::Cleared.accepts_reset());
        assert!(GamePhase::GameOver.accepts_reset());
        assert!(!GamePhase::RetryPending.accepts_reset());
        assert!(!GamePhase::Playing.accepts_reset());
        assert!(!GamePhase::Countdown.accepts_reset());
    }
}
