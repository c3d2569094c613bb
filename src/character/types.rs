//! The persistent character record.

use super::attributes::Attributes;
use super::class::{Background, CharacterClass};
use super::prestige::PrestigeData;
use crate::core::constants::*;
use crate::items::{CraftingProgress, EquipmentLoadout, Inventory};
use crate::skills::SkillProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CosmeticCollection {
    pub owned: BTreeSet<String>,
    pub equipped: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryProgress {
    pub chapter: u32,
    pub completed_nodes: Vec<String>,
}

impl Default for StoryProgress {
    fn default() -> Self {
        Self {
            chapter: 1,
            completed_nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub class: CharacterClass,
    pub background: Background,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    /// Base stats before equipment and skills
    pub stats: Attributes,
    pub health: u32,
    pub max_health: u32,
    pub gold: u64,
    pub energy: u32,
    pub max_energy: u32,
    /// When the running regen interval began; `None` while energy is full.
    #[serde(default)]
    pub last_energy_regen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: SkillProgress,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub equipment: EquipmentLoadout,
    #[serde(default)]
    pub crafting: CraftingProgress,
    #[serde(default)]
    pub cosmetics: CosmeticCollection,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default)]
    pub story: StoryProgress,
    #[serde(default)]
    pub prestige: PrestigeData,
}

impl Character {
    pub fn new(name: String, class: CharacterClass, background: Background) -> Self {
        let mut stats = class.base_attributes();
        for (stat, bonus) in background.stat_bonuses() {
            stats.add(stat, bonus);
        }

        Self {
            id: Uuid::new_v4(),
            name,
            class,
            background,
            level: STARTING_LEVEL,
            xp: 0,
            xp_to_next: XP_PER_LEVEL,
            stats,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            gold: STARTING_GOLD,
            energy: STARTING_MAX_ENERGY,
            max_energy: STARTING_MAX_ENERGY,
            last_energy_regen: None,
            skills: SkillProgress::default(),
            inventory: Inventory::new(),
            equipment: EquipmentLoadout::new(),
            crafting: CraftingProgress::default(),
            cosmetics: CosmeticCollection::default(),
            achievements: BTreeSet::new(),
            story: StoryProgress::default(),
            prestige: PrestigeData::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
