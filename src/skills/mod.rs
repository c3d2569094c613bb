//! Class skill trees, unlock rules, and bonus aggregation.

pub mod logic;
pub mod tree;
pub mod types;

pub use logic::*;
pub use tree::*;
pub use types::*;
