//! Simulation configuration.

use crate::character::CharacterClass;
use crate::dungeon::data::{FOREST_CRYPT, FROZEN_CAVERN};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated characters
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level every simulated character is raised to before playing
    pub level: u32,

    pub class: CharacterClass,

    /// Dungeon attempted once per run (None = skip dungeons)
    pub dungeon_id: Option<String>,

    /// Arena matches played per run
    pub arena_matches: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            level: 5,
            class: CharacterClass::Warrior,
            dungeon_id: Some(FOREST_CRYPT.to_string()),
            arena_matches: 20,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Arena only, long ladder
    pub fn arena_ladder(matches: u32) -> Self {
        Self {
            num_runs: 100,
            dungeon_id: None,
            arena_matches: matches,
            ..Default::default()
        }
    }

    /// Dungeon only, at the dungeon's entry level
    pub fn dungeon_sweep(dungeon_id: &str, level: u32) -> Self {
        Self {
            num_runs: 200,
            level,
            dungeon_id: Some(dungeon_id.to_string()),
            arena_matches: 0,
            ..Default::default()
        }
    }

    /// The hardest built-in dungeon at its minimum level
    pub fn frozen_cavern_entry() -> Self {
        Self::dungeon_sweep(FROZEN_CAVERN, 10)
    }
}
