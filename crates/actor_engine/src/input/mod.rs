//! Input snapshots and the input source seam
//!
//! The engine does not talk to input devices. Each frame it asks an
//! [`InputSource`] for an [`InputSnapshot`]: whether quit was requested and
//! which keys are currently held. The snapshot is passed untouched to actor
//! and component input handlers; mapping keys to actions is up to them.

use std::collections::{HashSet, VecDeque};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Q key
    Q,
    /// E key
    E,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Set of keys held down at snapshot time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Empty keyboard state
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard state with the given keys held
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            pressed: keys.into_iter().collect(),
        }
    }

    /// Mark a key as held or released
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Whether the key is held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether no key is held
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

/// Everything the engine reads from the input source in one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// The platform asked the application to exit
    pub quit_requested: bool,
    /// Keys held at poll time
    pub keys: KeyboardState,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and no quit request
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            quit_requested: false,
            keys: KeyboardState::with_keys(keys),
        }
    }

    /// Snapshot requesting quit
    pub fn quit() -> Self {
        Self {
            quit_requested: true,
            keys: KeyboardState::default(),
        }
    }

    /// Whether the frame loop should stop after this frame
    pub fn wants_exit(&self) -> bool {
        self.quit_requested || self.keys.is_pressed(KeyCode::Escape)
    }
}

/// Source of per-frame input, implemented by platform backends
pub trait InputSource {
    /// Drain pending platform events and return the current snapshot
    fn poll_input(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of snapshots, then requests quit.
///
/// Used by tests and headless runs in place of a window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    /// Create from a list of snapshots, one per frame
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` frames with no keys held
    pub fn idle(count: usize) -> Self {
        Self::new(std::iter::repeat(InputSnapshot::default()).take(count))
    }

    /// Append `count` frames holding the given keys
    pub fn then_hold(mut self, keys: &[KeyCode], count: usize) -> Self {
        let snapshot = InputSnapshot::with_keys(keys.iter().copied());
        self.frames.extend(std::iter::repeat(snapshot).take(count));
        self
    }

    /// Frames left before the script requests quit
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_else(InputSnapshot::quit)
    }
}
