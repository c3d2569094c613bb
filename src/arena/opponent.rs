//! Simulated arena opponents built from a class, a level, and catalog gear.

use super::types::ArenaRank;
use crate::character::{Attributes, CharacterClass, DerivedStats, StatType};
use crate::combat::{Ability, BattleRewards, Encounter, StatusEffectType};
use crate::core::constants::*;
use crate::items::{catalog, EquipmentLoadout, EquipmentSlot, Item};
use crate::skills::SkillBonusSummary;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const NAME_PREFIXES: [&str; 20] = [
    "Shadow", "Storm", "Iron", "Frost", "Flame", "Dark", "Crystal", "Thunder", "Silent",
    "Crimson", "Night", "Star", "Wind", "Stone", "Blood", "Moon", "Sun", "Void", "Ember",
    "Steel",
];

const NAME_SUFFIXES: [&str; 20] = [
    "blade", "hunter", "walker", "striker", "weaver", "bane", "fang", "heart", "shield",
    "sworn", "fire", "storm", "claw", "forge", "spirit", "wing", "eye", "hand", "soul",
    "keeper",
];

/// Prefix + suffix from the arena name bank, e.g. "Stormfang".
pub fn random_opponent_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES.choose(rng).copied().unwrap_or("Nameless");
    let suffix = NAME_SUFFIXES.choose(rng).copied().unwrap_or("one");
    format!("{}{}", prefix, suffix)
}

/// Signature abilities of a class at `level`. Damage is keyed off
/// `8 + 2 * level` plus a per-ability offset.
pub fn class_abilities(class: CharacterClass, level: u32) -> Vec<Ability> {
    use StatusEffectType::*;
    let scaled = ARENA_ABILITY_BASE_DAMAGE + ARENA_ABILITY_DAMAGE_PER_LEVEL * level;
    match class {
        CharacterClass::Warrior => vec![
            Ability::new("Power Strike", scaled + 5, 0.4)
                .with_description("A mighty overhead swing"),
            Ability::new("Shield Wall", 0, 0.2)
                .with_description("Raises defenses")
                .with_effect(Shield, 2, scaled / 2),
        ],
        CharacterClass::Ranger => vec![
            Ability::new("Aimed Shot", scaled + 8, 0.35).with_description("A precise arrow"),
            Ability::new("Quick Shot", scaled, 0.3).with_description("A rapid volley"),
        ],
        CharacterClass::Pirate => vec![
            Ability::new("Cutlass Fury", scaled + 4, 0.35)
                .with_description("Wild slashing attack"),
            Ability::new("Bleeding Strike", scaled, 0.25)
                .with_description("A cut that bleeds")
                .with_effect(Bleed, 3, scaled / 3),
        ],
        CharacterClass::IceMage => vec![
            Ability::new("Frost Bolt", scaled + 6, 0.35).with_description("A bolt of ice"),
            Ability::new("Frozen Touch", scaled / 2, 0.2)
                .with_description("Chilling stun")
                .with_effect(Stun, 1, 0),
        ],
        CharacterClass::Necromancer => vec![
            Ability::new("Shadow Drain", scaled + 3, 0.35)
                .with_description("Drains life force"),
            Ability::new("Curse", scaled / 2, 0.25)
                .with_description("A weakening curse")
                .with_effect(Weaken, 2, scaled / 3),
        ],
        CharacterClass::WarriorKing => vec![
            Ability::new("Royal Command", scaled + 6, 0.35)
                .with_description("A commanding strike"),
            Ability::new("Inspire", 0, 0.2)
                .with_description("Bolsters own strength")
                .with_effect(Strengthen, 2, scaled / 3),
        ],
        CharacterClass::Dragon => vec![
            Ability::new("Fire Breath", scaled + 7, 0.35)
                .with_description("Scorching flames")
                .with_effect(Burn, 2, scaled / 4),
            Ability::new("Tail Swipe", scaled + 3, 0.3)
                .with_description("A powerful tail swing"),
        ],
        CharacterClass::Angel => vec![
            Ability::new("Divine Smite", scaled + 6, 0.35)
                .with_description("Holy energy strike"),
            Ability::new("Healing Light", 0, 0.2)
                .with_description("Regenerates health")
                .with_effect(Regenerate, 3, scaled / 3),
        ],
    }
}

/// A generated ladder opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaOpponent {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub rating: u32,
    pub rank: ArenaRank,
    pub equipment: EquipmentLoadout,
    pub stats: Attributes,
}

impl ArenaOpponent {
    pub fn effective_stats(&self) -> Attributes {
        DerivedStats::effective_stats(&self.stats, &self.equipment, &SkillBonusSummary::default())
    }

    pub fn attack_power(&self) -> u32 {
        DerivedStats::attack_power(&self.effective_stats()).max(0) as u32
    }

    pub fn defense_power(&self) -> u32 {
        DerivedStats::defense_power(&self.effective_stats()).max(0) as u32
    }

    /// 100 + 10 per level past the first.
    pub fn max_hp(&self) -> u32 {
        ARENA_BASE_HP + ARENA_HP_PER_LEVEL * self.level.saturating_sub(1)
    }

    /// The opponent as a fightable encounter. Arena fights carry no loot table.
    pub fn to_encounter(&self) -> Encounter {
        let hp = self.max_hp();
        Encounter {
            id: Uuid::new_v4(),
            enemy_name: self.name.clone(),
            description: format!("Arena opponent, {} rank {}", self.rank.name(), self.class.name()),
            level: self.level,
            hp,
            max_hp: hp,
            attack: self.attack_power(),
            defense: self.defense_power(),
            is_boss: false,
            abilities: class_abilities(self.class, self.level),
            rewards: BattleRewards {
                xp: (ARENA_XP_PER_LEVEL * self.level as u64).max(ARENA_MIN_XP_REWARD),
                gold: (ARENA_GOLD_PER_LEVEL * self.level as u64).max(ARENA_MIN_GOLD_REWARD),
                items: Vec::new(),
            },
            loot_table: None,
            pre_battle_text: Some(format!("{} challenges you!", self.name)),
            victory_text: Some(format!("You defeated {} in the arena!", self.name)),
        }
    }
}

fn pick_class(player_class: Option<CharacterClass>, rng: &mut impl Rng) -> CharacterClass {
    let others: Vec<CharacterClass> = match player_class {
        Some(own) if rng.gen::<f64>() < ARENA_OTHER_CLASS_CHANCE => CharacterClass::ALL
            .into_iter()
            .filter(|c| *c != own)
            .collect(),
        _ => CharacterClass::ALL.to_vec(),
    };
    others.choose(rng).copied().unwrap_or(CharacterClass::Warrior)
}

fn random_gear(level: u32, rng: &mut impl Rng) -> EquipmentLoadout {
    let eligible: Vec<Item> = catalog::shop_items()
        .into_iter()
        .filter(|item| item.is_equippable() && item.level_requirement <= level)
        .collect();

    let mut loadout = EquipmentLoadout::new();
    for slot in EquipmentSlot::ALL {
        let in_slot: Vec<&Item> = eligible.iter().filter(|i| i.slot == Some(slot)).collect();
        if let Some(item) = in_slot.choose(rng) {
            loadout.replace(slot, Some(item.instance(rng)));
        }
    }
    loadout
}

/// Rolls an opponent near the player's level and rating.
pub fn generate_opponent(
    player_level: u32,
    player_rating: u32,
    player_class: Option<CharacterClass>,
    rng: &mut impl Rng,
) -> ArenaOpponent {
    let level_offset = rng.gen_range(-ARENA_LEVEL_SPREAD..=ARENA_LEVEL_SPREAD);
    let level = (player_level as i64 + level_offset as i64).max(1) as u32;
    let rating_offset = rng.gen_range(-ARENA_RATING_SPREAD..=ARENA_RATING_SPREAD);
    let rating = (player_rating as i64 + rating_offset as i64).max(0) as u32;

    let class = pick_class(player_class, rng);
    let mut stats = class.base_attributes();
    let level_bonus = (level / ARENA_LEVELS_PER_STAT_POINT) as i32;
    for stat in StatType::all() {
        stats.add(stat, level_bonus);
    }

    ArenaOpponent {
        name: random_opponent_name(rng),
        class,
        level,
        rating,
        rank: ArenaRank::for_rating(rating),
        equipment: random_gear(level, rng),
        stats,
    }
}
