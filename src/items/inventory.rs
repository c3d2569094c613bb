//! Capacity-limited item storage.

use super::types::{Item, ItemStack};
use crate::core::constants::INVENTORY_CAPACITY;
use crate::core::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Item,
    pub quantity: u32,
}

/// Capacity counts entries, not units: ten potions in one stack take one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn get(&self, id: Uuid) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.item.id == id)
    }

    pub fn count_template(&self, template_id: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item.template_id == template_id)
            .map(|e| e.quantity)
            .sum()
    }

    /// Adds units of an item. Consumables and materials stack onto an existing
    /// entry of the same template; equipment always takes its own slot.
    pub fn add(&mut self, item: Item, quantity: u32) -> EngineResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        if !item.is_equippable() {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| e.item.template_id == item.template_id)
            {
                entry.quantity = entry.quantity.saturating_add(quantity);
                return Ok(());
            }
        }
        if self.is_full() {
            return Err(EngineError::InventoryFull);
        }
        self.entries.push(InventoryEntry { item, quantity });
        Ok(())
    }

    pub fn add_stack(&mut self, stack: ItemStack) -> EngineResult<()> {
        self.add(stack.item, stack.quantity)
    }

    /// Removes one unit and returns it, dropping the entry when it empties.
    pub fn take_one(&mut self, id: Uuid) -> EngineResult<Item> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.item.id == id)
            .ok_or(EngineError::ItemNotFound(id))?;
        let entry = &mut self.entries[pos];
        entry.quantity = entry.quantity.saturating_sub(1);
        if entry.quantity == 0 {
            Ok(self.entries.remove(pos).item)
        } else {
            Ok(entry.item.clone())
        }
    }

    /// Removes `quantity` units of a template across however many entries
    /// hold it, oldest first. Nothing is removed unless all units are there.
    pub fn take_template(&mut self, template_id: &str, quantity: u32) -> EngineResult<()> {
        let have = self.count_template(template_id);
        if have < quantity {
            return Err(EngineError::MissingMaterial {
                template_id: template_id.to_string(),
                have,
                need: quantity,
            });
        }
        let mut remaining = quantity;
        for entry in self.entries.iter_mut().filter(|e| e.item.template_id == template_id) {
            let taken = entry.quantity.min(remaining);
            entry.quantity -= taken;
            remaining -= taken;
            if remaining == 0 {
                break;
            }
        }
        self.entries.retain(|e| e.quantity > 0);
        Ok(())
    }

    pub fn consumables(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.iter().filter(|e| e.item.is_consumable())
    }
}
