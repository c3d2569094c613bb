//! Engine error types.

use thiserror::Error;
use uuid::Uuid;

/// Problems with embedded content (bestiary, dungeons).
///
/// These indicate a content-authoring bug rather than a player action that
/// should be refused, and surface when the engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown enemy template: {0}")]
    UnknownEnemyTemplate(String),

    #[error("unknown dungeon: {0}")]
    UnknownDungeon(String),

    #[error("dungeon {0} has no floors")]
    EmptyDungeon(String),

    #[error("unknown item template: {0}")]
    UnknownItemTemplate(String),

    #[error("duplicate content id: {0}")]
    DuplicateId(String),

    #[error("no enemy templates available for tier {0}")]
    EmptyTier(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("level {level} is below the required level {required}")]
    LevelTooLow { level: u32, required: u32 },

    #[error("prestige perk {0} has already been chosen")]
    PerkAlreadyOwned(String),

    #[error("unknown prestige perk: {0}")]
    UnknownPerk(String),

    #[error("{item} cannot be used by a {class}")]
    ClassRestricted { item: String, class: String },

    #[error("{0} has no equipment slot")]
    NotEquippable(String),

    #[error("item {0} is not in the inventory")]
    ItemNotFound(Uuid),

    #[error("inventory is full")]
    InventoryFull,

    #[error("not enough {template_id}: have {have}, need {need}")]
    MissingMaterial { template_id: String, have: u32, need: u32 },

    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("not enough gold: have {have}, need {need}")]
    InsufficientGold { have: u64, need: u64 },

    #[error("slot is already empty")]
    SlotEmpty,

    #[error("not enough arena tokens: have {have}, need {need}")]
    InsufficientTokens { have: u32, need: u32 },

    #[error("not enough energy: have {have}, need {need}")]
    InsufficientEnergy { have: u32, need: u32 },

    #[error("not enough skill points: have {have}, need {need}")]
    InsufficientSkillPoints { have: u32, need: u32 },

    #[error("skill {0} is already unlocked")]
    SkillAlreadyUnlocked(String),

    #[error("skill {skill} requires {prerequisite}")]
    MissingPrerequisite { skill: String, prerequisite: String },

    #[error("skill {0} belongs to another class")]
    WrongClass(String),

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("dungeon run is not active")]
    RunNotActive,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl EngineError {
    /// True for rule refusals, where the caller's state is untouched and the
    /// player can be told why.
    pub fn is_refusal(&self) -> bool {
        !matches!(self, EngineError::Content(_) | EngineError::Config(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_classification() {
        assert!(EngineError::InventoryFull.is_refusal());
        assert!(EngineError::LevelTooLow {
            level: 3,
            required: 20
        }
        .is_refusal());
        assert!(EngineError::InsufficientEnergy { have: 2, need: 3 }.is_refusal());
        assert!(!EngineError::Content(ContentError::UnknownDungeon("x".into())).is_refusal());
        assert!(!EngineError::Config("bad".into()).is_refusal());
    }

    #[test]
    fn test_content_error_converts() {
        fn lookup() -> EngineResult<()> {
            Err(ContentError::UnknownEnemyTemplate("ghost".into()))?
        }
        let err = lookup().unwrap_err();
        assert_eq!(err.to_string(), "unknown enemy template: ghost");
    }

    #[test]
    fn test_messages_are_readable() {
        let err = EngineError::InsufficientTokens { have: 3, need: 10 };
        assert_eq!(err.to_string(), "not enough arena tokens: have 3, need 10");
    }
}
