//! Item system: types, inventory, equipment, loot, crafting, and built-in content.

pub mod catalog;
pub mod crafting;
pub mod equipment;
pub mod inventory;
pub mod loot;
pub mod types;

pub use crafting::*;
pub use equipment::*;
pub use inventory::*;
pub use loot::*;
pub use types::*;
