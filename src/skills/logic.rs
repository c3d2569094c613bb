//! Skill aggregation and unlock rules.

use super::tree::{find_skill, skill_tree};
use super::types::{Skill, SkillBonusSummary};
use crate::character::Character;
use crate::core::error::{EngineError, EngineResult};
use tracing::{info, warn};

/// Folds every unlocked skill of the character's class into one summary.
/// Unlocked ids from other classes contribute nothing.
pub fn aggregate_skill_bonuses(character: &Character) -> SkillBonusSummary {
    skill_tree(character.class)
        .iter()
        .filter(|skill| character.skills.is_unlocked(&skill.id))
        .flat_map(|skill| skill.effects.iter())
        .fold(SkillBonusSummary::default(), |mut summary, effect| {
            summary.apply(effect);
            summary
        })
}

/// Checks whether `skill` may be unlocked right now.
pub fn can_unlock(character: &Character, skill: &Skill) -> EngineResult<()> {
    if skill.class != character.class {
        return Err(EngineError::WrongClass(skill.id.clone()));
    }
    if character.skills.is_unlocked(&skill.id) {
        return Err(EngineError::SkillAlreadyUnlocked(skill.id.clone()));
    }
    if let Some(prereq) = &skill.prerequisite {
        if !character.skills.is_unlocked(prereq) {
            return Err(EngineError::MissingPrerequisite {
                skill: skill.id.clone(),
                prerequisite: prereq.clone(),
            });
        }
    }
    if character.skills.points < skill.cost {
        return Err(EngineError::InsufficientSkillPoints {
            have: character.skills.points,
            need: skill.cost,
        });
    }
    Ok(())
}

/// Spends points and unlocks the skill, returning the updated character.
pub fn unlock_skill(character: &Character, skill_id: &str) -> EngineResult<Character> {
    let skill = find_skill(skill_id).ok_or_else(|| EngineError::UnknownSkill(skill_id.to_string()))?;
    if let Err(e) = can_unlock(character, &skill) {
        warn!(skill = skill_id, error = %e, "skill unlock refused");
        return Err(e);
    }

    let mut next = character.clone();
    next.skills.points -= skill.cost;
    next.skills.unlocked.insert(skill.id.clone());
    info!(skill = skill.name, points_left = next.skills.points, "skill unlocked");
    Ok(next)
}

/// Skills the character could unlock immediately.
pub fn available_skills(character: &Character) -> Vec<Skill> {
    skill_tree(character.class)
        .into_iter()
        .filter(|skill| can_unlock(character, skill).is_ok())
        .collect()
}
