use crate::character::{CharacterClass, StatModifiers, StatType};
use crate::combat::StatusEffectType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Weapon,
    Armor,
    Accessory,
    Consumable,
    Material,
    QuestItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// What a consumable does when used in battle. Several fields may be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumableEffect {
    pub heal_amount: Option<u32>,
    pub cures: Vec<StatusEffectType>,
    pub temp_stat_boost: StatModifiers,
    pub temp_boost_duration: Option<u32>,
    pub battle_damage: Option<u32>,
}

impl ConsumableEffect {
    /// Sum of the temporary boost, applied in battle as a single strengthen.
    pub fn boost_total(&self) -> u32 {
        self.temp_stat_boost
            .values()
            .copied()
            .sum::<i32>()
            .max(0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Instance id; two potions from separate drops have different ids
    pub id: Uuid,
    /// Catalog id shared by all instances of the same item
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub level_requirement: u32,
    pub buy_price: u64,
    pub sell_price: u64,
    #[serde(default)]
    pub stat_modifiers: StatModifiers,
    pub slot: Option<EquipmentSlot>,
    /// Empty means any class may use it
    #[serde(default)]
    pub class_restrictions: Vec<CharacterClass>,
    #[serde(default)]
    pub consumable: Option<ConsumableEffect>,
}

impl Item {
    pub fn new(template_id: &str, name: &str, item_type: ItemType, rarity: Rarity) -> Self {
        let slot = match item_type {
            ItemType::Weapon => Some(EquipmentSlot::Weapon),
            ItemType::Armor => Some(EquipmentSlot::Armor),
            ItemType::Accessory => Some(EquipmentSlot::Accessory),
            _ => None,
        };
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            item_type,
            rarity,
            level_requirement: 1,
            buy_price: 0,
            sell_price: 0,
            stat_modifiers: StatModifiers::new(),
            slot,
            class_restrictions: Vec::new(),
            consumable: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    pub fn with_price(mut self, buy: u64, sell: u64) -> Self {
        self.buy_price = buy;
        self.sell_price = sell;
        self
    }

    pub fn with_stat(mut self, stat: StatType, value: i32) -> Self {
        *self.stat_modifiers.entry(stat).or_insert(0) += value;
        self
    }

    pub fn restricted_to(mut self, class: CharacterClass) -> Self {
        self.class_restrictions.push(class);
        self
    }

    pub fn with_effect(mut self, effect: ConsumableEffect) -> Self {
        self.consumable = Some(effect);
        self
    }

    /// A copy of this item with a fresh instance id drawn from `rng`, so a
    /// seeded rng reproduces the same ids.
    pub fn instance(&self, rng: &mut impl Rng) -> Self {
        Self {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            ..self.clone()
        }
    }

    pub fn is_consumable(&self) -> bool {
        self.item_type == ItemType::Consumable && self.consumable.is_some()
    }

    pub fn is_equippable(&self) -> bool {
        self.slot.is_some()
    }

    pub fn usable_by(&self, class: CharacterClass) -> bool {
        self.class_restrictions.is_empty() || self.class_restrictions.contains(&class)
    }
}

/// An item and how many of it were dropped or collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_slot_follows_item_type() {
        let sword = Item::new("s", "Sword", ItemType::Weapon, Rarity::Common);
        assert_eq!(sword.slot, Some(EquipmentSlot::Weapon));
        let ore = Item::new("o", "Ore", ItemType::Material, Rarity::Common);
        assert_eq!(ore.slot, None);
        assert!(!ore.is_equippable());
    }

    #[test]
    fn test_instance_gets_new_id() {
        let potion = Item::new("p", "Potion", ItemType::Consumable, Rarity::Common);
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let copy = potion.instance(&mut rng);
        assert_ne!(potion.id, copy.id);
        assert_eq!(potion.template_id, copy.template_id);
        assert_eq!(copy.id.get_version_num(), 4);
    }

    #[test]
    fn test_instance_ids_follow_the_seed() {
        let potion = Item::new("p", "Potion", ItemType::Consumable, Rarity::Common);
        let a = potion.instance(&mut ChaCha8Rng::seed_from_u64(3));
        let b = potion.instance(&mut ChaCha8Rng::seed_from_u64(3));
        let c = potion.instance(&mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_class_restrictions() {
        let bow = Item::new("b", "Bow", ItemType::Weapon, Rarity::Common)
            .restricted_to(CharacterClass::Ranger);
        assert!(bow.usable_by(CharacterClass::Ranger));
        assert!(!bow.usable_by(CharacterClass::Warrior));
        let ring = Item::new("r", "Ring", ItemType::Accessory, Rarity::Common);
        assert!(ring.usable_by(CharacterClass::Warrior));
    }

    #[test]
    fn test_with_stat_accumulates() {
        let item = Item::new("x", "X", ItemType::Weapon, Rarity::Rare)
            .with_stat(StatType::Strength, 2)
            .with_stat(StatType::Strength, 1);
        assert_eq!(item.stat_modifiers.get(&StatType::Strength), Some(&3));
    }

    #[test]
    fn test_boost_total() {
        let mut effect = ConsumableEffect::default();
        effect.temp_stat_boost.insert(StatType::Strength, 5);
        effect.temp_stat_boost.insert(StatType::Dexterity, 2);
        assert_eq!(effect.boost_total(), 7);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Epic < Rarity::Legendary);
    }
}
