use crate::character::{CharacterClass, StatModifiers, StatType};
use crate::combat::StatusEffectType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillBranch {
    Offense,
    Defense,
    Utility,
}

impl SkillBranch {
    pub const ALL: [SkillBranch; 3] = [SkillBranch::Offense, SkillBranch::Defense, SkillBranch::Utility];

    pub fn id(&self) -> &'static str {
        match self {
            SkillBranch::Offense => "off",
            SkillBranch::Defense => "def",
            SkillBranch::Utility => "util",
        }
    }
}

/// Percentages are whole numbers: `CritChance(5)` is +5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillEffect {
    StatBoost(StatType, i32),
    CritChance(u32),
    DodgeChance(u32),
    DamageMultiplier(u32),
    DefenseMultiplier(u32),
    MaxHealthBonus(u32),
    EnergyBonus(u32),
    GoldMultiplier(u32),
    XpMultiplier(u32),
    StatusResistance(StatusEffectType, u32),
    SpecialCooldownReduction(u32),
    Lifesteal(u32),
    Counterattack(u32),
}

/// A node in a class skill tree. Skill content is static.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: &'static str,
    pub class: CharacterClass,
    pub branch: SkillBranch,
    pub tier: u32,
    pub cost: u32,
    pub prerequisite: Option<String>,
    pub effects: Vec<SkillEffect>,
}

/// Persistent per-character skill state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub unlocked: BTreeSet<String>,
    pub points: u32,
    pub total_earned: u32,
}

impl SkillProgress {
    pub fn grant(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
        self.total_earned = self.total_earned.saturating_add(points);
    }

    pub fn is_unlocked(&self, skill_id: &str) -> bool {
        self.unlocked.contains(skill_id)
    }
}

/// Additive totals of every unlocked skill effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillBonusSummary {
    pub stat_boosts: StatModifiers,
    pub crit_chance: u32,
    pub dodge_chance: u32,
    pub damage_percent: u32,
    pub defense_percent: u32,
    pub max_health_bonus: u32,
    pub energy_bonus: u32,
    pub gold_percent: u32,
    pub xp_percent: u32,
    pub status_resistance: BTreeMap<StatusEffectType, u32>,
    pub special_cooldown_reduction: u32,
    pub lifesteal_percent: u32,
    pub counterattack_percent: u32,
}

impl SkillBonusSummary {
    pub fn apply(&mut self, effect: &SkillEffect) {
        match *effect {
            SkillEffect::StatBoost(stat, amount) => {
                *self.stat_boosts.entry(stat).or_insert(0) += amount;
            }
            SkillEffect::CritChance(v) => self.crit_chance += v,
            SkillEffect::DodgeChance(v) => self.dodge_chance += v,
            SkillEffect::DamageMultiplier(v) => self.damage_percent += v,
            SkillEffect::DefenseMultiplier(v) => self.defense_percent += v,
            SkillEffect::MaxHealthBonus(v) => self.max_health_bonus += v,
            SkillEffect::EnergyBonus(v) => self.energy_bonus += v,
            SkillEffect::GoldMultiplier(v) => self.gold_percent += v,
            SkillEffect::XpMultiplier(v) => self.xp_percent += v,
            SkillEffect::StatusResistance(kind, v) => {
                *self.status_resistance.entry(kind).or_insert(0) += v;
            }
            SkillEffect::SpecialCooldownReduction(v) => self.special_cooldown_reduction += v,
            SkillEffect::Lifesteal(v) => self.lifesteal_percent += v,
            SkillEffect::Counterattack(v) => self.counterattack_percent += v,
        }
    }

    pub fn stat_boost(&self, stat: StatType) -> i32 {
        self.stat_boosts.get(&stat).copied().unwrap_or(0)
    }

    /// Resistance to a status type, capped at 100%.
    pub fn resistance(&self, kind: StatusEffectType) -> u32 {
        self.status_resistance.get(&kind).copied().unwrap_or(0).min(100)
    }
}
