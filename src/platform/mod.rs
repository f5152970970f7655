//! Platform abstraction layer
//!
//! The core never reads devices or the wall clock. Frontends feed raw key
//! and mouse state into these trackers once per frame and a measured frame
//! time into the `Clock`.

pub mod input;
pub mod time;

pub use input::{Key, KeyboardState, MouseButton, MouseState};
pub use time::Clock;
