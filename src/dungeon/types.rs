//! Dungeon data structures.
//!
//! A dungeon is a fixed sequence of floors, each naming a bestiary template.
//! A run walks the floors in order with HP carried between fights.

use crate::character::Character;
use crate::combat::BattleRewards;
use crate::items::ItemStack;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One floor of a dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonFloor {
    pub id: String,
    /// 1-based, for display
    pub floor_number: u32,
    pub enemy_template_id: String,
    #[serde(default)]
    pub is_boss_floor: bool,
    #[serde(default)]
    pub flavor_text: Option<String>,
}

impl DungeonFloor {
    pub fn new(id: &str, floor_number: u32, enemy_template_id: &str) -> Self {
        Self {
            id: id.to_string(),
            floor_number,
            enemy_template_id: enemy_template_id.to_string(),
            is_boss_floor: false,
            flavor_text: None,
        }
    }

    pub fn boss(mut self) -> Self {
        self.is_boss_floor = true;
        self
    }

    pub fn with_flavor(mut self, text: &str) -> Self {
        self.flavor_text = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub id: String,
    pub name: String,
    pub description: String,
    pub floors: Vec<DungeonFloor>,
    pub energy_cost: u32,
    pub level_requirement: u32,
}

impl Dungeon {
    pub fn floor(&self, index: usize) -> Option<&DungeonFloor> {
        self.floors.get(index)
    }

    pub fn total_floors(&self) -> usize {
        self.floors.len()
    }
}

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Active,
    Completed,
    Defeated,
}

/// An in-progress or finished dungeon run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRunState {
    pub dungeon_id: String,
    /// Index of the next floor to fight
    pub current_floor: usize,
    /// HP carried from floor to floor
    pub hp: u32,
    pub max_hp: u32,
    pub total_floors: usize,
    pub status: RunStatus,
    pub floors_completed: usize,
    pub total_gold: u64,
    pub total_xp: u64,
    #[serde(default)]
    pub items_collected: Vec<ItemStack>,
}

impl DungeonRunState {
    pub fn is_active(&self) -> bool {
        self.status == RunStatus::Active
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn floors_remaining(&self) -> usize {
        self.total_floors.saturating_sub(self.floors_completed)
    }

    /// Adds one floor's rewards to the run totals.
    pub fn bank(&mut self, rewards: &BattleRewards) {
        self.total_gold = self.total_gold.saturating_add(rewards.gold);
        self.total_xp = self.total_xp.saturating_add(rewards.xp);
        self.items_collected.extend(rewards.items.iter().cloned());
    }

    pub fn item_count(&self) -> u32 {
        self.items_collected.iter().map(|s| s.quantity).sum()
    }
}

/// A freshly opened run and the character after paying its energy cost.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonEntry {
    pub character: Character,
    pub run: DungeonRunState,
}

/// Lifetime dungeon statistics, persisted with the character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DungeonProgress {
    pub completed_dungeons: BTreeSet<String>,
    pub total_runs: u32,
    pub total_floors_cleared: u32,
    /// Dungeon id to the most floors cleared in a single run
    pub best_floor: BTreeMap<String, u32>,
}

impl DungeonProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_completed(&self, dungeon_id: &str) -> bool {
        self.completed_dungeons.contains(dungeon_id)
    }

    pub fn best_floor_reached(&self, dungeon_id: &str) -> u32 {
        self.best_floor.get(dungeon_id).copied().unwrap_or(0)
    }
}
