//! Externally driven clock

/// Seconds since the last `init()` plus the last frame's delta
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    elapsed: f64,
    delta: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart counting from zero
    pub fn init(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
    }

    /// Record one frame of `dt` seconds (negative values are ignored)
    pub fn advance(&mut self, dt: f64) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta;
    }

    /// Seconds since `init()`
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds covered by the last `advance()`
    pub fn delta(&self) -> f64 {
        self.delta
    }
}
