//! One game session: world state, input, RNG and tuning in a single owner.
//!
//! The binary feeds key events in and calls `step` once per display frame,
//! followed by a render.  `step` keeps being called after game over; the
//! engine simply stops changing anything.

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::input::{Controls, InputSampler, TickInput};

pub struct Game<R: Rng> {
    state: GameState,
    sampler: InputSampler,
    controls: Controls,
    config: GameConfig,
    rng: R,
    /// Set once the "formation wiped out" message has been logged.
    cleared_reported: bool,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Game {
            state: init_state(&config),
            sampler: InputSampler::new(),
            controls: Controls::default(),
            config,
            rng,
            cleared_reported: false,
        }
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn key_pressed(&mut self, key: KeyCode, now: Duration) {
        self.sampler.press(key, now);
    }

    pub fn key_released(&mut self, key: KeyCode) {
        self.sampler.release(key);
    }

    /// Legacy-terminal fallback: forget keys not refreshed within `window`.
    pub fn expire_keys(&mut self, now: Duration, window: Duration) {
        self.sampler.release_stale(now, window);
    }

    pub fn sampled_input(&self) -> TickInput {
        self.controls.sample(&self.sampler)
    }

    /// Run one simulation tick at game time `now`.
    pub fn step(&mut self, now: Duration) {
        let input = self.sampled_input();
        let was_playing = self.state.ship.alive;
        self.state = tick(&self.state, &input, now, &self.config, &mut self.rng);

        if was_playing && !self.state.ship.alive {
            log::info!("game over at {:.2}s", now.as_secs_f64());
        }
        if !self.cleared_reported && self.state.alive_enemies().next().is_none() {
            self.cleared_reported = true;
            log::info!("formation wiped out at {:.2}s", now.as_secs_f64());
        }
    }
}
