//! Engine configuration.

use super::constants::*;
use super::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Tunable knobs for a [`GameEngine`](super::engine::GameEngine).
///
/// Every field has a default, so a host can deserialize a partial JSON
/// document and only override what it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Elo K factor for arena rating changes
    pub arena_k_factor: f64,

    /// Floor on the magnitude of a rating change
    pub arena_min_rating_change: i32,

    /// Number of arena matches kept in history
    pub match_history_cap: usize,

    /// Level a character must reach before prestiging
    pub prestige_level_requirement: u32,

    /// Rounds after which a stalled battle counts as a defeat
    pub max_battle_turns: u32,

    /// Damage multiplier applied on a critical hit
    pub crit_multiplier: f64,

    /// Rounds the special attack stays on cooldown before skill reductions
    pub special_cooldown: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena_k_factor: ARENA_K_FACTOR,
            arena_min_rating_change: ARENA_MIN_RATING_CHANGE,
            match_history_cap: ARENA_MATCH_HISTORY_CAP,
            prestige_level_requirement: PRESTIGE_LEVEL_REQUIREMENT,
            max_battle_turns: DEFAULT_MAX_BATTLE_TURNS,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            special_cooldown: DEFAULT_SPECIAL_COOLDOWN,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON override document on top of the defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Steeper ladder for short competitive seasons
    pub fn volatile_ladder() -> Self {
        Self {
            arena_k_factor: 48.0,
            arena_min_rating_change: 8,
            ..Default::default()
        }
    }

    /// Short battles for quick balance sweeps
    pub fn quick_battles() -> Self {
        Self {
            max_battle_turns: 50,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(self.arena_k_factor.is_finite() && self.arena_k_factor > 0.0) {
            return Err(EngineError::Config(format!(
                "arena_k_factor must be positive, got {}",
                self.arena_k_factor
            )));
        }
        if self.arena_min_rating_change < 0 {
            return Err(EngineError::Config(
                "arena_min_rating_change must not be negative".to_string(),
            ));
        }
        if self.match_history_cap == 0 {
            return Err(EngineError::Config(
                "match_history_cap must be at least 1".to_string(),
            ));
        }
        if self.max_battle_turns == 0 {
            return Err(EngineError::Config(
                "max_battle_turns must be at least 1".to_string(),
            ));
        }
        if !(self.crit_multiplier.is_finite() && self.crit_multiplier >= 1.0) {
            return Err(EngineError::Config(format!(
                "crit_multiplier must be at least 1.0, got {}",
                self.crit_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.arena_k_factor, 32.0);
        assert_eq!(config.arena_min_rating_change, 5);
        assert_eq!(config.match_history_cap, 50);
        assert_eq!(config.prestige_level_requirement, 20);
        assert_eq!(config.special_cooldown, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"arena_k_factor": 24.0}"#).unwrap();
        assert_eq!(config.arena_k_factor, 24.0);
        assert_eq!(config.match_history_cap, 50);
        assert_eq!(config.max_battle_turns, DEFAULT_MAX_BATTLE_TURNS);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_turn_limit() {
        let err = EngineConfig::from_json(r#"{"max_battle_turns": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_history_cap() {
        let err = EngineConfig::from_json(r#"{"match_history_cap": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert!(EngineConfig::from_json(r#"{"match_history_cap": 1}"#).is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::volatile_ladder().validate().is_ok());
        assert!(EngineConfig::quick_battles().validate().is_ok());
        assert!(EngineConfig::volatile_ladder().arena_k_factor > ARENA_K_FACTOR);
    }
}
