//! Per-frame session update
//!
//! One call to `tick` runs to completion between two frame waits: reset and
//! quit handling, the countdown, the end-of-attempt checks and finally the
//! physics step. Physics always advances by the clock's clamped delta.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::attempt::{AttemptState, GamePhase, Outcome, Rules};
use super::collision::{hit_goal, hit_item, hit_item_reward};
use super::dynamics::{Contact, step_ball};
use super::state::{Ball, BoardState, Level};
use crate::assets::ItemCatalog;
use crate::map::MapData;
use crate::platform::{Clock, Key, KeyboardState};
use crate::settings::Settings;

/// Board tilt requested for a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tilt {
    #[default]
    None,
    /// Counter-clockwise on screen
    Left,
    /// Clockwise on screen
    Right,
}

impl Tilt {
    /// Sign of the angular velocity (y-down frame)
    pub fn sign(self) -> f64 {
        match self {
            Tilt::None => 0.0,
            Tilt::Left => -1.0,
            Tilt::Right => 1.0,
        }
    }
}

/// Input signals for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held tilt direction
    pub tilt: Tilt,
    /// Reset request (edge-triggered)
    pub retry: bool,
    /// Quit request (edge-triggered)
    pub quit: bool,
}

impl TickInput {
    /// Map the keyboard to game signals. Left wins when both arrows are held.
    pub fn from_keyboard(keys: &KeyboardState) -> Self {
        let tilt = if keys.is_push(Key::Left) {
            Tilt::Left
        } else if keys.is_push(Key::Right) {
            Tilt::Right
        } else {
            Tilt::None
        };
        Self {
            tilt,
            retry: keys.is_click(Key::Space),
            quit: keys.is_click(Key::Escape),
        }
    }
}

/// Things that happened during a tick, for HUD/audio/logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CountdownFinished,
    ItemCaught { reward: i32 },
    Cleared,
    /// Attempt ended at the goal; `life` is what remains
    Retry { life: u32 },
    GameOver,
    Reset,
    QuitRequested,
}

/// One play session: the loaded level, its live copy and the rules state
#[derive(Debug, Clone)]
pub struct Session {
    /// State restored on every retry
    pub initial: Level,
    pub board: BoardState,
    pub ball: Ball,
    pub attempt: AttemptState,
    pub rules: Rules,
    /// Tilt speed (rad/s)
    pub tilt_speed: f64,
    pub countdown_seconds: f64,
    /// Time since the current countdown started
    pub clock: Clock,
    /// Contact mode of the last physics step
    pub last_contact: Option<Contact>,
}

impl Session {
    pub fn new(mut level: Level, settings: &Settings) -> Self {
        level.board.canvas_width = settings.canvas_size;
        let rules = settings.rules();
        Self {
            board: level.board.clone(),
            ball: level.ball,
            initial: level,
            attempt: AttemptState::new(&rules),
            rules,
            tilt_speed: settings.tilt_speed,
            countdown_seconds: settings.countdown_seconds,
            clock: Clock::new(),
            last_contact: None,
        }
    }

    /// Build a session from a parsed map, assigning item assets with the
    /// configured seed
    pub fn from_map(map: &MapData, settings: &Settings, catalog: &ItemCatalog) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.rng_seed);
        Self::new(Level::from_map(map, catalog, &mut rng), settings)
    }

    /// Put the ball and board back to the loaded state and restart the
    /// countdown. Life and score are untouched.
    pub fn restore_level(&mut self) {
        self.board = self.initial.board.clone();
        self.ball = self.initial.ball;
        self.clock.init();
        self.last_contact = None;
    }

    /// Full reset: level, life, score and countdown
    pub fn reset(&mut self) {
        self.restore_level();
        self.attempt.reset(&self.rules);
        log::info!(
            "Session reset (life {}, score {})",
            self.attempt.life,
            self.attempt.score
        );
    }

    /// Live positions as a level, e.g. to write them back out as a map
    pub fn current_level(&self) -> Level {
        Level {
            board: self.board.clone(),
            ball: self.ball,
        }
    }

    /// Whole seconds left on the countdown, `None` outside the countdown
    pub fn countdown_remaining(&self) -> Option<u32> {
        match self.attempt.phase {
            GamePhase::Countdown | GamePhase::RetryPending => {
                let left = (self.countdown_seconds - self.clock.elapsed()).ceil();
                Some(left.max(0.0) as u32)
            }
            _ => None,
        }
    }

    /// Advance the board and ball by one step.
    ///
    /// The ball is rotated with the board before its contact is resolved,
    /// otherwise it would sink into a segment that just swung under it.
    pub fn step_physics(&mut self, tilt: Tilt, dt: f64) -> Contact {
        let delta = self.board.tilt(tilt.sign() * self.tilt_speed, dt);
        self.board.drift_items(dt);
        self.ball.pos = self.board.apply_board_rotation_to(self.ball.pos, delta);

        let contact = step_ball(&mut self.ball, &self.board.segments, self.board.gravity, dt);
        self.last_contact = Some(contact);
        contact
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        events.push(GameEvent::QuitRequested);
        return events;
    }

    if input.retry && session.attempt.phase.accepts_reset() {
        session.reset();
        events.push(GameEvent::Reset);
        return events;
    }

    // A pending retry already restored the level; it just counts down again
    if session.attempt.phase == GamePhase::RetryPending {
        session.attempt.phase = GamePhase::Countdown;
    }

    match session.attempt.phase {
        GamePhase::Countdown => {
            session.clock.advance(dt);
            if session.clock.elapsed() > session.countdown_seconds {
                session.attempt.phase = GamePhase::Playing;
                log::debug!("Countdown finished");
                events.push(GameEvent::CountdownFinished);
                // The ball starts moving on the frame the countdown ends
                session.step_physics(input.tilt, session.clock.delta());
            }
        }
        GamePhase::Playing => {
            session.clock.advance(dt);

            if hit_item(&session.ball, &session.board.items) {
                let reward = hit_item_reward(&session.ball, &session.board.items);
                if let Some(reward) = session.attempt.catch_item(reward) {
                    log::debug!("Item caught (reward {})", reward);
                    events.push(GameEvent::ItemCaught { reward });
                }
            }

            let goal = hit_goal(&session.ball, &session.board.goal);
            match session.attempt.resolve(goal) {
                Outcome::Continue => {
                    session.step_physics(input.tilt, session.clock.delta());
                }
                Outcome::Cleared => {
                    log::debug!("Cleared with {} lives left", session.attempt.life);
                    events.push(GameEvent::Cleared);
                }
                Outcome::Retry => {
                    session.restore_level();
                    log::debug!("Goal reached, {} lives left", session.attempt.life);
                    events.push(GameEvent::Retry {
                        life: session.attempt.life,
                    });
                }
                Outcome::GameOver => {
                    log::debug!("Game over");
                    events.push(GameEvent::GameOver);
                }
            }
        }
        // Display states: physics stays frozen until reset
        GamePhase::Cleared | GamePhase::GameOver | GamePhase::RetryPending => {}
    }

    events
}
