//! Pressed-key bookkeeping.
//!
//! The sampler only remembers the latest state of each key; the simulation
//! reads it once per tick through a `TickInput` snapshot.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::KeyCode;

/// Default hold window for terminals that never report key releases.
/// OS key repeat runs at ≥ 15 Hz, so a held key refreshes well inside it.
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(130);

/// The three actions the simulation cares about, sampled for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    pressed: HashMap<KeyCode, bool>,
    /// Game time of the latest press or repeat, per key.
    last_seen: HashMap<KeyCode, Duration>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press (or auto-repeat) of `key` at game time `at`.
    pub fn press(&mut self, key: KeyCode, at: Duration) {
        self.pressed.insert(key, true);
        self.last_seen.insert(key, at);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.insert(key, false);
    }

    /// Absent keys read as not pressed.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }

    /// Release every key whose last press is older than `window`.
    ///
    /// Only needed on terminals that report presses but never releases.
    pub fn release_stale(&mut self, now: Duration, window: Duration) {
        for (key, pressed) in self.pressed.iter_mut() {
            if !*pressed {
                continue;
            }
            let fresh = self
                .last_seen
                .get(key)
                .map(|&seen| now.saturating_sub(seen) <= window)
                .unwrap_or(false);
            if !fresh {
                *pressed = false;
            }
        }
    }
}

/// Key bindings for the three semantic actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub fire: Vec<KeyCode>,
}

impl Default for Controls {
    fn default() -> Self {
        Controls {
            left: vec![KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            right: vec![KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            fire: vec![KeyCode::Char(' ')],
        }
    }
}

impl Controls {
    pub fn sample(&self, sampler: &InputSampler) -> TickInput {
        let any = |keys: &[KeyCode]| keys.iter().any(|&k| sampler.is_pressed(k));
        TickInput {
            left: any(&self.left),
            right: any(&self.right),
            fire: any(&self.fire),
        }
    }
}
