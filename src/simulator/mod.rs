//! Balance simulator for Monte Carlo analysis.
//!
//! Plays many simulated characters through dungeon runs and arena ladders
//! to check:
//! - How often a dungeon is cleared at its entry level
//! - Where arena ratings settle after a season
//! - How much gold a session earns
//!
//! All game rules go through [`GameEngine`](crate::core::engine::GameEngine),
//! so results match real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{prepare_character, run_simulation, run_simulation_with, RunStats};
