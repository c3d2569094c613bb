//! Multi-floor dungeon runs with HP carried between fights.

pub mod data;
pub mod logic;
pub mod types;

pub use data::DungeonCatalog;
pub use logic::*;
pub use types::*;
