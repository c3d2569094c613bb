//! Rated PvP ladder against generated opponents.

pub mod logic;
pub mod opponent;
pub mod types;

pub use logic::*;
pub use opponent::*;
pub use types::*;
