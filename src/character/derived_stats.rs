use super::attributes::{Attributes, StatType};
use super::types::Character;
use crate::core::constants::*;
use crate::items::EquipmentLoadout;
use crate::skills::SkillBonusSummary;

/// Stats computed from a character's base stats, gear, and skills.
/// Always recomputed; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub effective: Attributes,
    pub attack_power: i32,
    pub defense_power: i32,
    pub max_health: u32,
}

impl DerivedStats {
    /// base + equipment modifiers + skill stat boosts, per stat.
    pub fn effective_stats(
        base: &Attributes,
        equipment: &EquipmentLoadout,
        skills: &SkillBonusSummary,
    ) -> Attributes {
        let mut total = *base;
        total.apply_modifiers(&equipment.total_modifiers());
        total.apply_modifiers(&skills.stat_boosts);
        total
    }

    /// 10 + (STR - 10) + (DEX - 10) / 2
    pub fn attack_power(stats: &Attributes) -> i32 {
        BASE_ATTACK_POWER
            + (stats.get(StatType::Strength) - BASE_ATTRIBUTE_VALUE)
            + (stats.get(StatType::Dexterity) - BASE_ATTRIBUTE_VALUE) / 2
    }

    /// 5 + (CON - 10) / 2
    pub fn defense_power(stats: &Attributes) -> i32 {
        BASE_DEFENSE_POWER + (stats.get(StatType::Constitution) - BASE_ATTRIBUTE_VALUE) / 2
    }

    pub fn calculate_derived_stats(
        base: &Attributes,
        equipment: &EquipmentLoadout,
        skills: &SkillBonusSummary,
        max_health: u32,
    ) -> Self {
        let effective = Self::effective_stats(base, equipment, skills);
        Self {
            effective,
            attack_power: Self::attack_power(&effective),
            defense_power: Self::defense_power(&effective),
            max_health: max_health.saturating_add(skills.max_health_bonus),
        }
    }

    /// Derived stats for a character with an already-aggregated skill summary.
    pub fn from_parts(character: &Character, skills: &SkillBonusSummary) -> Self {
        Self::calculate_derived_stats(
            &character.stats,
            &character.equipment,
            skills,
            character.max_health,
        )
    }

    pub fn for_character(character: &Character) -> Self {
        Self::from_parts(character, &crate::skills::aggregate_skill_bonuses(character))
    }
}
