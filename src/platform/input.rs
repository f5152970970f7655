//! Key and mouse edge detection
//!
//! Each tracker keeps the previous and current frame so callers can ask for
//! "just pressed" (edge) or "held" (level) without touching device state.

use std::collections::HashSet;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Keys the game and editor react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
    Z,
    Backspace,
    W,
}

/// Keyboard snapshot pair
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    previous: HashSet<Key>,
    current: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with the keys currently held
    pub fn update(&mut self, held: impl IntoIterator<Item = Key>) {
        self.previous = std::mem::take(&mut self.current);
        self.current.extend(held);
    }

    /// Pressed this frame but not the last one
    pub fn is_click(&self, key: Key) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    /// Held this frame
    pub fn is_push(&self, key: Key) -> bool {
        self.current.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons {
    left: bool,
    right: bool,
}

impl Buttons {
    fn get(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
        }
    }
}

/// Mouse buttons and pointer position (pixels)
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    previous: Buttons,
    current: Buttons,
    position: DVec2,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame
    pub fn update(&mut self, left: bool, right: bool, position: DVec2) {
        self.previous = self.current;
        self.current = Buttons { left, right };
        self.position = position;
    }

    /// Pressed this frame
    pub fn is_click(&self, button: MouseButton) -> bool {
        self.current.get(button) && !self.previous.get(button)
    }

    /// Released this frame
    pub fn is_release(&self, button: MouseButton) -> bool {
        !self.current.get(button) && self.previous.get(button)
    }

    /// Held this frame
    pub fn is_push(&self, button: MouseButton) -> bool {
        self.current.get(button)
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_click_is_edge_triggered() {
        let mut keys = KeyboardState::new();
        keys.update([Key::Space]);
        assert!(keys.is_click(Key::Space));
        assert!(keys.is_push(Key::Space));

        keys.update([Key::Space]);
        assert!(!keys.is_click(Key::Space));
        assert!(keys.is_push(Key::Space));

        keys.update(Vec::<Key>::new());
        assert!(!keys.is_push(Key::Space));
    }

    #[test]
    fn test_mouse_click_and_release() {
        let mut mouse = MouseState::new();
        mouse.update(true, false, DVec2::new(10.0, 20.0));
        assert!(mouse.is_click(MouseButton::Left));
        assert!(!mouse.is_release(MouseButton::Left));

        mouse.update(true, false, DVec2::new(30.0, 40.0));
        assert!(!mouse.is_click(MouseButton::Left));
        assert!(mouse.is_push(MouseButton::Left));

        mouse.update(false, true, DVec2::new(50.0, 60.0));
        assert!(mouse.is_release(MouseButton::Left));
        assert!(mouse.is_click(MouseButton::Right));
        assert_eq!(mouse.position(), DVec2::new(50.0, 60.0));
    }
}
