//! Combat system: combatants, status effects, and turn resolution.

pub mod logic;
pub mod status;
pub mod types;

pub use logic::*;
pub use status::*;
pub use types::*;
