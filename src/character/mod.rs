//! Characters: stats, classes, derived combat stats, progression, prestige.

pub mod attributes;
pub mod class;
pub mod derived_stats;
pub mod energy;
pub mod prestige;
pub mod progression;
pub mod types;

pub use attributes::*;
pub use class::*;
pub use derived_stats::*;
pub use energy::*;
pub use prestige::*;
pub use progression::*;
pub use types::*;
