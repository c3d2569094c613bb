use super::types::Character;
use crate::core::constants::*;
use crate::core::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};
use uuid::Uuid;

/// Perk ids. Each can be chosen once per character.
pub mod perks {
    pub const VETERANS_WISDOM: &str = "veterans_wisdom";
    pub const FORTUNES_FAVOR: &str = "fortunes_favor";
    pub const BATTLE_HARDENED: &str = "battle_hardened";
    pub const QUICK_LEARNER: &str = "quick_learner";
    pub const ENERGY_RESERVE: &str = "energy_reserve";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrestigePerk {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const PRESTIGE_PERKS: [PrestigePerk; 5] = [
    PrestigePerk {
        id: perks::VETERANS_WISDOM,
        name: "Veteran's Wisdom",
        description: "+10% XP from all sources",
    },
    PrestigePerk {
        id: perks::FORTUNES_FAVOR,
        name: "Fortune's Favor",
        description: "+15% gold from all sources",
    },
    PrestigePerk {
        id: perks::BATTLE_HARDENED,
        name: "Battle Hardened",
        description: "+5% critical hit chance",
    },
    PrestigePerk {
        id: perks::QUICK_LEARNER,
        name: "Quick Learner",
        description: "10% less XP needed per level",
    },
    PrestigePerk {
        id: perks::ENERGY_RESERVE,
        name: "Energy Reserve",
        description: "+1 maximum energy",
    },
];

pub fn find_perk(perk_id: &str) -> Option<&'static PrestigePerk> {
    PRESTIGE_PERKS.iter().find(|p| p.id == perk_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrestigeRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Character level at the moment of prestige
    pub level_reached: u32,
    pub perk_chosen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestigeData {
    pub level: u32,
    /// XP earned across all completed cycles
    pub total_prestige_xp: u64,
    /// XP earned since the last prestige
    #[serde(default)]
    pub cycle_xp: u64,
    pub history: Vec<PrestigeRecord>,
    pub perks: BTreeSet<String>,
}

impl PrestigeData {
    pub fn has_perk(&self, perk_id: &str) -> bool {
        self.perks.contains(perk_id)
    }
}

/// Permanent bonuses granted by a prestige level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeRewards {
    pub starter_gold: u64,
    pub xp_bonus_percent: u32,
    pub gold_bonus_percent: u32,
    pub skill_points: u32,
}

impl PrestigeRewards {
    pub fn for_level(level: u32) -> Self {
        Self {
            starter_gold: PRESTIGE_GOLD_STEP * (level as u64 + 1),
            xp_bonus_percent: PRESTIGE_BONUS_PERCENT_PER_LEVEL * level,
            gold_bonus_percent: PRESTIGE_BONUS_PERCENT_PER_LEVEL * level,
            skill_points: PRESTIGE_SKILL_POINT_GRANT * level,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrestigeResult {
    pub character: Character,
    pub record: PrestigeRecord,
    pub rewards: PrestigeRewards,
}

pub fn can_prestige(character: &Character, required_level: u32) -> bool {
    character.level >= required_level
}

/// Perks not yet chosen, in display order.
pub fn available_perks(character: &Character) -> Vec<&'static PrestigePerk> {
    PRESTIGE_PERKS
        .iter()
        .filter(|p| !character.prestige.has_perk(p.id))
        .collect()
}

/// Resets the character's cycle and advances their prestige level.
///
/// Level, XP, stats, health, and gold reset. Inventory, equipment,
/// cosmetics, achievements, story progress, and unlocked skills carry over.
pub fn perform_prestige(
    character: &Character,
    perk_id: &str,
    required_level: u32,
    now: DateTime<Utc>,
) -> EngineResult<PrestigeResult> {
    if !can_prestige(character, required_level) {
        warn!(level = character.level, required_level, "prestige refused");
        return Err(EngineError::LevelTooLow {
            level: character.level,
            required: required_level,
        });
    }
    let perk = find_perk(perk_id).ok_or_else(|| EngineError::UnknownPerk(perk_id.to_string()))?;
    if character.prestige.has_perk(perk.id) {
        return Err(EngineError::PerkAlreadyOwned(perk.id.to_string()));
    }

    let mut next = character.clone();
    let new_level = character.prestige.level + 1;
    let rewards = PrestigeRewards::for_level(new_level);

    next.level = STARTING_LEVEL;
    next.xp = 0;
    next.xp_to_next = XP_PER_LEVEL;
    next.stats = character.class.base_attributes();
    next.max_health = STARTING_HEALTH;
    next.health = STARTING_HEALTH;
    next.gold = rewards.starter_gold;

    let record = PrestigeRecord {
        id: Uuid::new_v4(),
        date: now,
        level_reached: character.level,
        perk_chosen: perk.id.to_string(),
    };

    let prestige = &mut next.prestige;
    prestige.level = new_level;
    prestige.total_prestige_xp = prestige.total_prestige_xp.saturating_add(prestige.cycle_xp);
    prestige.cycle_xp = 0;
    prestige.history.push(record.clone());
    prestige.perks.insert(perk.id.to_string());

    if perk.id == perks::ENERGY_RESERVE {
        next.max_energy += ENERGY_RESERVE_BONUS;
    }
    next.skills.grant(rewards.skill_points);

    info!(
        name = %next.name,
        prestige = new_level,
        perk = perk.name,
        "prestige complete"
    );

    Ok(PrestigeResult {
        character: next,
        record,
        rewards,
    })
}
