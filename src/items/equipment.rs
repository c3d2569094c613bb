use super::types::{EquipmentSlot, Item};
use crate::character::{Character, StatModifiers};
use crate::core::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Player equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLoadout {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl EquipmentLoadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    /// Puts an item in a slot and returns whatever was there.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        };
        std::mem::replace(target, item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum of stat modifiers across every equipped item.
    pub fn total_modifiers(&self) -> StatModifiers {
        let mut total = StatModifiers::new();
        for item in self.iter_equipped() {
            for (&stat, &value) in &item.stat_modifiers {
                *total.entry(stat).or_insert(0) += value;
            }
        }
        total
    }
}

/// Moves an item from the inventory into its slot. The previously equipped
/// item, if any, goes back to the inventory.
pub fn equip_item(character: &Character, item_id: Uuid) -> EngineResult<Character> {
    let entry = character
        .inventory
        .get(item_id)
        .ok_or(EngineError::ItemNotFound(item_id))?;
    let item = &entry.item;

    let slot = item
        .slot
        .ok_or_else(|| EngineError::NotEquippable(item.name.clone()))?;
    if !item.usable_by(character.class) {
        warn!(item = %item.name, class = character.class.name(), "equip refused: class restriction");
        return Err(EngineError::ClassRestricted {
            item: item.name.clone(),
            class: character.class.name().to_string(),
        });
    }
    if character.level < item.level_requirement {
        warn!(item = %item.name, level = character.level, "equip refused: level requirement");
        return Err(EngineError::LevelTooLow {
            level: character.level,
            required: item.level_requirement,
        });
    }

    let mut next = character.clone();
    let item = next.inventory.take_one(item_id)?;
    debug!(item = %item.name, ?slot, "equipping");
    if let Some(previous) = next.equipment.replace(slot, Some(item)) {
        next.inventory.add(previous, 1)?;
    }
    Ok(next)
}

/// Moves the item in `slot` back to the inventory.
pub fn unequip_slot(character: &Character, slot: EquipmentSlot) -> EngineResult<Character> {
    if character.equipment.get(slot).is_none() {
        return Err(EngineError::SlotEmpty);
    }
    if character.inventory.is_full() {
        return Err(EngineError::InventoryFull);
    }

    let mut next = character.clone();
    if let Some(item) = next.equipment.replace(slot, None) {
        next.inventory.add(item, 1)?;
    }
    Ok(next)
}
