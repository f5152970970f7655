//! Bounded undo history
//!
//! Every committed edit pushes a snapshot. Undo drops the newest snapshot
//! and returns the one below it; the last remaining snapshot is a floor and
//! is never popped.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    snapshots: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> EditHistory<T> {
    /// History holding `initial`, keeping at most `capacity` snapshots
    /// (at least one)
    pub fn new(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial);
        Self {
            snapshots,
            capacity,
        }
    }

    /// Record a committed state, evicting the oldest beyond capacity
    pub fn push(&mut self, snapshot: T) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Drop the newest snapshot if another remains below it, and return the
    /// snapshot now on top
    pub fn pop_or_keep_floor(&mut self) -> &T {
        if self.snapshots.len() >= 2 {
            self.snapshots.pop_back();
        }
        self.current()
    }

    /// Newest snapshot
    pub fn current(&self) -> &T {
        // Never empty: constructed with one snapshot and pops stop at one
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Snapshots held, including the floor
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}
