use crate::combat::{Ability, BattleRewards, Encounter};
use crate::core::constants::{ENCOUNTER_XP_PER_LEVEL, SCALE_TENTHS_BASE};
use crate::items::{roll_loot, LootTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// A bestiary entry. Scaled into an [`Encounter`] for a specific level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tier: u32,
    pub level_range: RangeInclusive<u32>,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub is_boss: bool,
    pub abilities: Vec<Ability>,
    pub loot_table: LootTable,
}

/// `floor(base * (1 + 0.1 * (level - lower_bound)))`, computed in tenths so the
/// floor is exact. Levels below the range shrink the stat, never below zero.
pub fn scale_stat(base: u32, level: u32, lower_bound: u32) -> u32 {
    let tenths = SCALE_TENTHS_BASE + level as i64 - lower_bound as i64;
    (base as i64 * tenths).div_euclid(SCALE_TENTHS_BASE).max(0) as u32
}

impl EnemyTemplate {
    pub fn new(id: &str, name: &str, tier: u32, level_range: RangeInclusive<u32>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            tier,
            level_range,
            base_hp: 1,
            base_attack: 1,
            base_defense: 0,
            is_boss: false,
            abilities: Vec::new(),
            loot_table: LootTable::default(),
        }
    }

    pub fn stats(mut self, hp: u32, attack: u32, defense: u32) -> Self {
        self.base_hp = hp;
        self.base_attack = attack;
        self.base_defense = defense;
        self
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_loot(mut self, loot_table: LootTable) -> Self {
        self.loot_table = loot_table;
        self
    }

    pub fn min_level(&self) -> u32 {
        *self.level_range.start()
    }

    /// Builds an encounter at `level`, rolling its loot once.
    pub fn scaled_to(&self, level: u32, rng: &mut impl Rng) -> Encounter {
        let low = self.min_level();
        let hp = scale_stat(self.base_hp, level, low).max(1);
        let drop = roll_loot(&self.loot_table, rng);

        Encounter {
            id: Uuid::new_v4(),
            enemy_name: self.name.clone(),
            description: self.description.clone(),
            level,
            hp,
            max_hp: hp,
            attack: scale_stat(self.base_attack, level, low),
            defense: scale_stat(self.base_defense, level, low),
            is_boss: self.is_boss,
            abilities: self.abilities.clone(),
            rewards: BattleRewards {
                xp: self
                    .loot_table
                    .guaranteed_xp
                    .saturating_add(ENCOUNTER_XP_PER_LEVEL * level as u64),
                gold: drop.gold,
                items: drop.items,
            },
            loot_table: Some(self.loot_table.clone()),
            pre_battle_text: None,
            victory_text: None,
        }
    }
}
