//! Engine core: balance constants, configuration, errors, and the facade.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::{ContentError, EngineError, EngineResult};
