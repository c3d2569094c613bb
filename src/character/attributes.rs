use crate::core::constants::{BASE_ATTRIBUTE_VALUE, NUM_ATTRIBUTES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum StatType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl StatType {
    pub fn all() -> [StatType; NUM_ATTRIBUTES] {
        [
            StatType::Strength,
            StatType::Dexterity,
            StatType::Constitution,
            StatType::Intelligence,
            StatType::Wisdom,
            StatType::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Strength => "STR",
            StatType::Dexterity => "DEX",
            StatType::Constitution => "CON",
            StatType::Intelligence => "INT",
            StatType::Wisdom => "WIS",
            StatType::Charisma => "CHA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Strength => 0,
            StatType::Dexterity => 1,
            StatType::Constitution => 2,
            StatType::Intelligence => 3,
            StatType::Wisdom => 4,
            StatType::Charisma => 5,
        }
    }
}

/// Per-stat additive bonuses, as carried by items and skills.
pub type StatModifiers = BTreeMap<StatType, i32>;

/// The six core stats. Values are signed so modifiers can push below the
/// baseline without wrapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [i32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self {
            values: [BASE_ATTRIBUTE_VALUE; NUM_ATTRIBUTES],
        }
    }

    pub fn get(&self, stat: StatType) -> i32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatType, value: i32) {
        self.values[stat.index()] = value;
    }

    pub fn add(&mut self, stat: StatType, delta: i32) {
        let slot = &mut self.values[stat.index()];
        *slot = slot.saturating_add(delta);
    }

    /// Adds every entry of a modifier map.
    pub fn apply_modifiers(&mut self, modifiers: &StatModifiers) {
        for (&stat, &delta) in modifiers {
            self.add(stat, delta);
        }
    }

    /// Distance from the baseline, halved and truncated toward zero.
    pub fn modifier(&self, stat: StatType) -> i32 {
        (self.get(stat) - BASE_ATTRIBUTE_VALUE) / 2
    }

    pub fn total(&self) -> i32 {
        self.values.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatType, i32)> + '_ {
        StatType::all().into_iter().map(|stat| (stat, self.get(stat)))
    }
}
