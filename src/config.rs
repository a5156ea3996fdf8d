//! Game tuning — every constant the simulation reads.
//!
//! The defaults reproduce the classic arcade layout.  A JSON file may override
//! any subset of fields; missing fields fall back to the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Playfield ────────────────────────────────────────────────────────────
    pub field_width: f64,
    pub field_height: f64,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_width: f64,
    pub ship_height: f64,
    pub ship_speed: f64,
    /// Distance from the bottom of the field to the ship's top edge.
    pub ship_bottom_offset: f64,
    pub fire_cooldown_ms: u64,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub projectile_width: f64,
    pub projectile_height: f64,
    pub player_projectile_speed: f64,
    pub enemy_projectile_speed: f64,
    /// How far past the top/bottom edge a projectile may travel before pruning.
    pub prune_margin: f64,

    // ── Enemy formation ──────────────────────────────────────────────────────
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f64,
    pub enemy_height: f64,
    pub grid_origin_x: f64,
    pub grid_origin_y: f64,
    pub grid_spacing_x: f64,
    pub grid_spacing_y: f64,
    pub formation_step: f64,
    pub formation_drop: f64,
    pub enemy_fire_interval_ms: u64,

    // ── Driver ───────────────────────────────────────────────────────────────
    pub frames_per_second: u32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 600.0,
            field_height: 500.0,
            ship_width: 30.0,
            ship_height: 40.0,
            ship_speed: 5.0,
            ship_bottom_offset: 60.0,
            fire_cooldown_ms: 300,
            projectile_width: 6.0,
            projectile_height: 12.0,
            player_projectile_speed: 6.0,
            enemy_projectile_speed: 4.0,
            prune_margin: 20.0,
            enemy_rows: 3,
            enemy_cols: 6,
            enemy_width: 40.0,
            enemy_height: 30.0,
            grid_origin_x: 80.0,
            grid_origin_y: 60.0,
            grid_spacing_x: 70.0,
            grid_spacing_y: 60.0,
            formation_step: 1.2,
            formation_drop: 20.0,
            enemy_fire_interval_ms: 1000,
            frames_per_second: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let others = [
            ("ship_speed", self.ship_speed),
            ("ship_bottom_offset", self.ship_bottom_offset),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("prune_margin", self.prune_margin),
            ("grid_origin_x", self.grid_origin_x),
            ("grid_origin_y", self.grid_origin_y),
            ("grid_spacing_x", self.grid_spacing_x),
            ("grid_spacing_y", self.grid_spacing_y),
            ("formation_step", self.formation_step),
            ("formation_drop", self.formation_drop),
        ];
        for (name, value) in others {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.ship_width > self.field_width {
            return Err(ConfigError::Invalid(format!(
                "ship_width {} exceeds field_width {}",
                self.ship_width, self.field_width
            )));
        }
        if self.ship_bottom_offset > self.field_height {
            return Err(ConfigError::Invalid(format!(
                "ship_bottom_offset {} exceeds field_height {}",
                self.ship_bottom_offset, self.field_height
            )));
        }
        // Movement guards test the pre-move position, so the ship only lands
        // exactly on both edges when every step is a whole multiple of speed.
        if self.ship_speed > 0.0 {
            let travel = self.field_width - self.ship_width;
            let start = self.ship_start_x();
            if !is_multiple(travel, self.ship_speed) || !is_multiple(start, self.ship_speed) {
                return Err(ConfigError::Invalid(format!(
                    "ship_speed {} must evenly divide the travel range {travel} \
                     and the start offset {start}",
                    self.ship_speed
                )));
            }
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::Invalid(
                "frames_per_second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Ship's initial left edge: horizontally centred.
    pub fn ship_start_x(&self) -> f64 {
        self.field_width / 2.0 - self.ship_width / 2.0
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    pub fn enemy_fire_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_fire_interval_ms)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second
    }
}

fn is_multiple(value: f64, step: f64) -> bool {
    let steps = value / step;
    (steps - steps.round()).abs() < 1e-9
}
