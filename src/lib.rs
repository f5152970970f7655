//! Tilt Maze - A rotatable-board rolling ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, ball physics, retry rules)
//! - `map`: Text map format shared by the editor and the simulator
//! - `editor`: Map authoring model (shapes, modes, undo history)
//! - `renderer`: Pixel-space scene description for a drawing backend
//! - `platform`: Input edge detection and externally-driven clock
//! - `settings`: Data-driven tuning and item catalog

pub mod assets;
pub mod editor;
pub mod error;
pub mod map;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{ItemCatalog, VisualHandle};
pub use error::{MapError, SettingsError};
pub use map::MapData;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canvas size in pixels (square window, origin top-left, y down)
    pub const CANVAS_SIZE: f64 = 800.0;

    /// Fixed step used by the headless driver (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Board tilt speed (radians per second while a tilt key is held)
    pub const TILT_SPEED: f64 = 0.5;
    /// Countdown before each attempt starts moving
    pub const COUNTDOWN_SECONDS: f64 = 2.0;

    /// Retries granted at the start of a run
    pub const INITIAL_LIFE: u32 = 4;
    /// Reward points needed to clear
    pub const INITIAL_SCORE: i32 = 3;

    /// Editor defaults
    pub const EDITOR_PIXEL_PER_METER: f64 = 50.0;
    pub const EDITOR_GRAVITY: f64 = 9.8;
    pub const EDITOR_ITEM_DRIFT_SPEED: f64 = 2.0;
    pub const EDITOR_HISTORY_CAPACITY: usize = 2;

    /// Decimal places written for every real value in a map file
    pub const MAP_PRECISION: usize = 6;
}
