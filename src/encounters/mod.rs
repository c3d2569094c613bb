//! Enemy templates, the bestiary, and encounter generation.

pub mod bestiary;
pub mod logic;
pub mod types;

pub use bestiary::*;
pub use logic::*;
pub use types::*;
