//! Keyboard state tracking
//!
//! Browser key events arrive asynchronously; the simulation only ever sees a
//! snapshot of which keys are held at the start of a tick.

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Held-key state
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyboard {
    left: bool,
    right: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Drop all held keys (window blur never delivers keyup)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
        }
    }

    /// Snapshot for one simulation tick
    pub fn snapshot(&self, idle_mode: bool) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            idle_mode,
        }
    }
}
