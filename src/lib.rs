//! Rocket Defense — a ship holds off a descending enemy formation.
//!
//! Modules, leaves first:
//! - `entities`: pure data records and the world state
//! - `config`: tunable constants, loadable from JSON
//! - `input`: pressed-key bookkeeping and per-tick input snapshots
//! - `compute`: the deterministic per-tick simulation
//! - `driver`: glues sampler, engine and RNG together for the frame loop
//! - `display`: terminal projection of the world state

pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod input;

pub use config::{ConfigError, GameConfig};
pub use driver::Game;
pub use entities::GameState;
