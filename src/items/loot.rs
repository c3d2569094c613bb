//! Loot tables and drop rolling.

use super::types::{Item, ItemStack};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTableEntry {
    pub item: Item,
    /// Independent chance in 0.0..=1.0
    pub drop_chance: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

impl LootTableEntry {
    pub fn new(item: Item, drop_chance: f64) -> Self {
        Self {
            item,
            drop_chance,
            min_quantity: 1,
            max_quantity: 1,
        }
    }

    pub fn quantity(mut self, min: u32, max: u32) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub entries: Vec<LootTableEntry>,
    pub guaranteed_gold: u64,
    pub guaranteed_xp: u64,
    pub bonus_gold: Option<RangeInclusive<u64>>,
}

impl LootTable {
    pub fn new(guaranteed_gold: u64, guaranteed_xp: u64) -> Self {
        Self {
            entries: Vec::new(),
            guaranteed_gold,
            guaranteed_xp,
            bonus_gold: None,
        }
    }

    pub fn with_bonus_gold(mut self, range: RangeInclusive<u64>) -> Self {
        self.bonus_gold = Some(range);
        self
    }

    pub fn with_entry(mut self, entry: LootTableEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// Result of one roll against a loot table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    pub items: Vec<ItemStack>,
    pub gold: u64,
}

/// Rolls every entry independently, then the gold.
///
/// Dropped items are fresh instances of the table's items with ids drawn
/// from `rng`, so the same seeded rng always yields an identical drop.
pub fn roll_loot(table: &LootTable, rng: &mut impl Rng) -> LootDrop {
    let mut items = Vec::new();
    for entry in &table.entries {
        if rng.gen::<f64>() < entry.drop_chance {
            let low = entry.min_quantity;
            let high = entry.max_quantity.max(low);
            let quantity = rng.gen_range(low..=high);
            if quantity > 0 {
                items.push(ItemStack {
                    item: entry.item.instance(rng),
                    quantity,
                });
            }
        }
    }

    let bonus = match &table.bonus_gold {
        Some(range) => {
            let low = *range.start();
            let high = (*range.end()).max(low);
            rng.gen_range(low..=high)
        }
        None => 0,
    };

    LootDrop {
        items,
        gold: table.guaranteed_gold.saturating_add(bonus),
    }
}
