//! Mindquest - combat resolution and character progression engine.
//!
//! Turns completed real-world tasks into RPG progress: characters fight
//! level-scaled encounters, climb a rated arena ladder, spend energy on
//! multi-floor dungeons, craft gear from gathered materials, unlock skills,
//! and prestige. Every rule is a pure function over serializable state;
//! [`GameEngine`] bundles them behind one facade.

pub mod arena;
pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod simulator;
pub mod skills;

pub use crate::core::config::EngineConfig;
pub use crate::core::engine::GameEngine;
pub use crate::core::error::{ContentError, EngineError, EngineResult};
