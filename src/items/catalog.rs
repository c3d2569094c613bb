//! Built-in item content: starter weapons, shop gear, consumables, materials.
//!
//! Each function returns a fresh instance, so callers never share ids.

use super::types::{ConsumableEffect, Item, ItemType, Rarity};
use crate::character::{CharacterClass, StatType};
use crate::combat::StatusEffectType;

use StatType::*;

fn weapon(id: &str, name: &str, rarity: Rarity) -> Item {
    Item::new(id, name, ItemType::Weapon, rarity)
}

fn armor(id: &str, name: &str, rarity: Rarity) -> Item {
    Item::new(id, name, ItemType::Armor, rarity)
}

fn accessory(id: &str, name: &str, rarity: Rarity) -> Item {
    Item::new(id, name, ItemType::Accessory, rarity)
}

fn consumable(id: &str, name: &str, rarity: Rarity, effect: ConsumableEffect) -> Item {
    Item::new(id, name, ItemType::Consumable, rarity).with_effect(effect)
}

fn material(id: &str, name: &str, rarity: Rarity) -> Item {
    Item::new(id, name, ItemType::Material, rarity)
}

// ============================================================================
// Starter weapons
// ============================================================================

pub fn ranger_bow() -> Item {
    weapon("ranger_bow", "Recruit's Longbow", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Dexterity, 2)
        .with_stat(Strength, 1)
        .restricted_to(CharacterClass::Ranger)
}

pub fn warrior_sword() -> Item {
    weapon("warrior_sword", "Iron Broadsword", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Strength, 3)
        .restricted_to(CharacterClass::Warrior)
}

pub fn king_scepter() -> Item {
    weapon("king_scepter", "Royal Training Scepter", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Strength, 2)
        .with_stat(Charisma, 1)
        .restricted_to(CharacterClass::WarriorKing)
}

pub fn pirate_cutlass() -> Item {
    weapon("pirate_cutlass", "Rusty Cutlass", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Dexterity, 2)
        .with_stat(Charisma, 1)
        .restricted_to(CharacterClass::Pirate)
}

pub fn ice_staff() -> Item {
    weapon("ice_staff", "Frost Apprentice Staff", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Intelligence, 3)
        .restricted_to(CharacterClass::IceMage)
}

pub fn necro_wand() -> Item {
    weapon("necro_wand", "Dark Initiate Wand", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Intelligence, 2)
        .with_stat(Constitution, 1)
        .restricted_to(CharacterClass::Necromancer)
}

pub fn dragon_claw() -> Item {
    weapon("dragon_claw", "Hatchling's Claw", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Constitution, 2)
        .with_stat(Strength, 1)
        .restricted_to(CharacterClass::Dragon)
}

pub fn angel_blade() -> Item {
    weapon("angel_blade", "Celestial Training Blade", Rarity::Common)
        .with_price(0, 5)
        .with_stat(Wisdom, 2)
        .with_stat(Charisma, 1)
        .restricted_to(CharacterClass::Angel)
}

pub fn starter_weapon(class: CharacterClass) -> Item {
    match class {
        CharacterClass::Ranger => ranger_bow(),
        CharacterClass::Warrior => warrior_sword(),
        CharacterClass::WarriorKing => king_scepter(),
        CharacterClass::Pirate => pirate_cutlass(),
        CharacterClass::IceMage => ice_staff(),
        CharacterClass::Necromancer => necro_wand(),
        CharacterClass::Dragon => dragon_claw(),
        CharacterClass::Angel => angel_blade(),
    }
}

// ============================================================================
// Shop weapons
// ============================================================================

pub fn steel_sword() -> Item {
    weapon("steel_sword", "Steel Longsword", Rarity::Uncommon)
        .with_level(5)
        .with_price(100, 50)
        .with_stat(Strength, 4)
        .with_stat(Dexterity, 1)
}

pub fn enchanted_bow() -> Item {
    weapon("enchanted_bow", "Enchanted Longbow", Rarity::Uncommon)
        .with_level(5)
        .with_price(100, 50)
        .with_stat(Dexterity, 4)
        .with_stat(Wisdom, 1)
}

pub fn frost_staff() -> Item {
    weapon("frost_staff", "Frostbite Staff", Rarity::Rare)
        .with_level(10)
        .with_price(250, 125)
        .with_stat(Intelligence, 6)
        .with_stat(Wisdom, 2)
}

pub fn shadow_blade() -> Item {
    weapon("shadow_blade", "Shadow Blade", Rarity::Rare)
        .with_level(10)
        .with_price(250, 125)
        .with_stat(Strength, 5)
        .with_stat(Dexterity, 3)
}

pub fn dragon_slayer() -> Item {
    weapon("dragon_slayer", "Dragonslayer Greatsword", Rarity::Epic)
        .with_level(15)
        .with_price(500, 250)
        .with_stat(Strength, 8)
        .with_stat(Constitution, 3)
        .with_stat(Dexterity, 2)
}

// ============================================================================
// Armor
// ============================================================================

pub fn basic_leather_armor() -> Item {
    armor("basic_leather_armor", "Leather Armor", Rarity::Common)
        .with_price(25, 12)
        .with_stat(Constitution, 2)
}

pub fn chainmail() -> Item {
    armor("chainmail", "Chainmail Armor", Rarity::Uncommon)
        .with_level(5)
        .with_price(120, 60)
        .with_stat(Constitution, 3)
        .with_stat(Strength, 1)
}

pub fn plate_armor() -> Item {
    armor("plate_armor", "Plate Armor", Rarity::Rare)
        .with_level(10)
        .with_price(300, 150)
        .with_stat(Constitution, 5)
        .with_stat(Strength, 2)
}

pub fn mage_robes() -> Item {
    armor("mage_robes", "Arcane Robes", Rarity::Rare)
        .with_level(10)
        .with_price(280, 140)
        .with_stat(Intelligence, 4)
        .with_stat(Wisdom, 3)
}

// ============================================================================
// Accessories
// ============================================================================

pub fn clarity_amulet() -> Item {
    accessory("clarity_amulet", "Clarity Amulet", Rarity::Common)
        .with_price(50, 25)
        .with_stat(Intelligence, 1)
        .with_stat(Wisdom, 1)
}

pub fn strength_ring() -> Item {
    accessory("strength_ring", "Ring of Might", Rarity::Uncommon)
        .with_level(5)
        .with_price(80, 40)
        .with_stat(Strength, 3)
}

pub fn wisdom_pendant() -> Item {
    accessory("wisdom_pendant", "Pendant of Insight", Rarity::Uncommon)
        .with_level(5)
        .with_price(80, 40)
        .with_stat(Wisdom, 3)
}

pub fn dexterity_boots() -> Item {
    accessory("dexterity_boots", "Swiftfoot Boots", Rarity::Rare)
        .with_level(8)
        .with_price(150, 75)
        .with_stat(Dexterity, 4)
        .with_stat(Strength, 1)
}

// ============================================================================
// Consumables
// ============================================================================

pub fn health_potion() -> Item {
    consumable(
        "health_potion",
        "Health Potion",
        Rarity::Common,
        ConsumableEffect {
            heal_amount: Some(30),
            ..Default::default()
        },
    )
    .with_price(20, 10)
    .with_description("Restores 30 HP.")
}

pub fn greater_health_potion() -> Item {
    consumable(
        "greater_health_potion",
        "Greater Health Potion",
        Rarity::Uncommon,
        ConsumableEffect {
            heal_amount: Some(75),
            ..Default::default()
        },
    )
    .with_level(5)
    .with_price(50, 25)
    .with_description("Restores 75 HP.")
}

pub fn antidote() -> Item {
    consumable(
        "antidote",
        "Antidote",
        Rarity::Common,
        ConsumableEffect {
            cures: vec![StatusEffectType::Poison, StatusEffectType::Bleed],
            ..Default::default()
        },
    )
    .with_price(15, 7)
    .with_description("Cures poison and bleed.")
}

pub fn battle_scroll() -> Item {
    consumable(
        "battle_scroll",
        "Scroll of Flames",
        Rarity::Uncommon,
        ConsumableEffect {
            battle_damage: Some(40),
            ..Default::default()
        },
    )
    .with_price(40, 20)
    .with_description("Deals 40 fire damage to an enemy.")
}

pub fn stat_potion() -> Item {
    let mut effect = ConsumableEffect {
        temp_boost_duration: Some(3),
        ..Default::default()
    };
    effect.temp_stat_boost.insert(Strength, 5);
    consumable("stat_potion", "Elixir of Power", Rarity::Uncommon, effect)
        .with_level(3)
        .with_price(35, 17)
        .with_description("Boosts STR by 5 for 3 turns.")
}

// ============================================================================
// Materials
// ============================================================================

pub fn iron_ore() -> Item {
    material("iron_ore", "Iron Ore", Rarity::Common).with_price(10, 5)
}

pub fn shadow_essence() -> Item {
    material("shadow_essence", "Shadow Essence", Rarity::Uncommon).with_price(25, 12)
}

pub fn crystal_shard() -> Item {
    material("crystal_shard", "Crystal Shard", Rarity::Uncommon).with_price(20, 10)
}

pub fn dragon_scale() -> Item {
    material("dragon_scale", "Dragon Scale", Rarity::Rare).with_price(50, 25)
}

pub fn enchanted_thread() -> Item {
    material("enchanted_thread", "Enchanted Thread", Rarity::Uncommon).with_price(15, 7)
}

/// Everything a merchant sells, in display order.
pub fn shop_items() -> Vec<Item> {
    vec![
        steel_sword(),
        enchanted_bow(),
        frost_staff(),
        shadow_blade(),
        dragon_slayer(),
        basic_leather_armor(),
        chainmail(),
        plate_armor(),
        mage_robes(),
        clarity_amulet(),
        strength_ring(),
        wisdom_pendant(),
        dexterity_boots(),
        health_potion(),
        greater_health_potion(),
        antidote(),
        battle_scroll(),
        stat_potion(),
        iron_ore(),
        shadow_essence(),
        crystal_shard(),
        dragon_scale(),
        enchanted_thread(),
    ]
}

/// Shop equipment a given class can equip, used to outfit arena opponents.
pub fn equippable_items(class: CharacterClass) -> Vec<Item> {
    let mut items = vec![starter_weapon(class)];
    items.extend(
        shop_items()
            .into_iter()
            .filter(|item| item.is_equippable() && item.usable_by(class)),
    );
    items
}

pub fn find_by_template(template_id: &str) -> Option<Item> {
    shop_items()
        .into_iter()
        .chain(CharacterClass::ALL.iter().map(|&c| starter_weapon(c)))
        .find(|item| item.template_id == template_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::EquipmentSlot;
    use std::collections::HashSet;

    #[test]
    fn test_template_ids_are_unique() {
        let items = shop_items();
        let ids: HashSet<&str> = items.iter().map(|i| i.template_id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_starter_weapons_are_free_and_class_locked() {
        for class in CharacterClass::ALL {
            let w = starter_weapon(class);
            assert_eq!(w.buy_price, 0);
            assert_eq!(w.rarity, Rarity::Common);
            assert_eq!(w.slot, Some(EquipmentSlot::Weapon));
            assert!(w.usable_by(class));
            assert_eq!(w.class_restrictions.len(), 1);
        }
    }

    #[test]
    fn test_consumables_have_effects() {
        for item in shop_items() {
            if item.item_type == ItemType::Consumable {
                assert!(item.is_consumable(), "{}", item.template_id);
            }
        }
        assert_eq!(
            health_potion().consumable.and_then(|e| e.heal_amount),
            Some(30)
        );
        assert_eq!(stat_potion().consumable.map(|e| e.boost_total()), Some(5));
    }

    #[test]
    fn test_equippable_items_for_class() {
        let items = equippable_items(CharacterClass::Ranger);
        assert!(items.iter().all(|i| i.is_equippable()));
        assert!(items.iter().any(|i| i.template_id == "ranger_bow"));
        assert!(!items.iter().any(|i| i.template_id == "warrior_sword"));
    }

    #[test]
    fn test_find_by_template() {
        assert_eq!(
            find_by_template("dragon_slayer").map(|i| i.level_requirement),
            Some(15)
        );
        assert!(find_by_template("angel_blade").is_some());
        assert!(find_by_template("nope").is_none());
    }
}
