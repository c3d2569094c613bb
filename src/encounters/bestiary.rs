//! Built-in enemy templates, five tiers from pests to world bosses.

use super::types::EnemyTemplate;
use crate::combat::Ability;
use crate::combat::StatusEffectType::{self, *};
use crate::core::error::ContentError;
use crate::items::{catalog, Item, LootTable, LootTableEntry};
use std::collections::HashSet;

fn loot(gold: u64, bonus: (u64, u64), xp: u64, drops: Vec<LootTableEntry>) -> LootTable {
    drops.into_iter().fold(
        LootTable::new(gold, xp).with_bonus_gold(bonus.0..=bonus.1),
        LootTable::with_entry,
    )
}

fn drop(item: Item, chance: f64) -> LootTableEntry {
    LootTableEntry::new(item, chance)
}

fn hit(name: &str, damage: u32, chance: f64) -> Ability {
    Ability::new(name, damage, chance)
}

fn status(name: &str, damage: u32, chance: f64, kind: StatusEffectType, duration: u32, value: u32) -> Ability {
    Ability::new(name, damage, chance).with_effect(kind, duration, value)
}

fn tier_one() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("whiskered_rat", "Whiskered Rat", 1, 1..=4)
            .with_description("An oversized rat with twitching whiskers.")
            .stats(30, 8, 2)
            .with_ability(hit("Gnaw", 10, 0.3))
            .with_loot(loot(5, (2, 8), 10, vec![drop(catalog::iron_ore(), 0.3)])),
        EnemyTemplate::new("shadow_wisp", "Shadow Wisp", 1, 1..=4)
            .with_description("A flicker of darkness that drifts between shadows.")
            .stats(25, 10, 1)
            .with_ability(hit("Shadow Bolt", 12, 0.3))
            .with_loot(loot(6, (3, 10), 12, vec![drop(catalog::shadow_essence(), 0.2)])),
        EnemyTemplate::new("moss_goblin", "Moss Goblin", 1, 1..=4)
            .with_description("A goblin overgrown with moss, wielding a knotted club.")
            .stats(35, 9, 3)
            .with_ability(hit("Club Smash", 11, 0.25))
            .with_loot(loot(
                8,
                (3, 10),
                12,
                vec![
                    drop(catalog::iron_ore(), 0.25),
                    drop(catalog::health_potion(), 0.15),
                ],
            )),
        EnemyTemplate::new("cave_spider", "Cave Spider", 1, 1..=4)
            .with_description("A pale spider with venom-slick fangs.")
            .stats(28, 9, 2)
            .with_ability(status("Venomous Bite", 8, 0.35, Poison, 3, 3))
            .with_loot(loot(
                7,
                (2, 8),
                14,
                vec![
                    drop(catalog::antidote(), 0.3),
                    drop(catalog::enchanted_thread(), 0.2),
                ],
            )),
        EnemyTemplate::new("emerald_slime", "Emerald Slime", 1, 1..=4)
            .with_description("A wobbling green mass that saps strength on contact.")
            .stats(40, 7, 4)
            .with_ability(status("Slimy Embrace", 6, 0.3, Weaken, 3, 2))
            .with_loot(loot(6, (3, 9), 12, vec![drop(catalog::crystal_shard(), 0.2)])),
        EnemyTemplate::new("bark_sentinel", "Bark Sentinel", 1, 1..=4)
            .with_description("A living tree stump standing watch over the woods.")
            .stats(45, 8, 5)
            .with_ability(hit("Branch Slam", 12, 0.25))
            .with_loot(loot(
                9,
                (4, 12),
                15,
                vec![
                    drop(catalog::iron_ore(), 0.3),
                    drop(catalog::enchanted_thread(), 0.15),
                ],
            )),
    ]
}

fn tier_two() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("shadow_stalker", "Shadow Stalker", 2, 5..=8)
            .with_description("A lean predator that hunts from the dark.")
            .stats(60, 14, 5)
            .with_ability(status("Rending Claws", 16, 0.3, Bleed, 4, 3))
            .with_loot(loot(
                15,
                (5, 15),
                25,
                vec![
                    drop(catalog::shadow_essence(), 0.35),
                    drop(catalog::health_potion(), 0.2),
                ],
            )),
        EnemyTemplate::new("frost_imp", "Frost Imp", 2, 5..=8)
            .with_description("A cackling imp trailing frost.")
            .stats(50, 16, 4)
            .with_ability(status("Frost Snap", 18, 0.25, Stun, 1, 0))
            .with_loot(loot(
                14,
                (6, 14),
                24,
                vec![
                    drop(catalog::crystal_shard(), 0.3),
                    drop(catalog::stat_potion(), 0.15),
                ],
            )),
        EnemyTemplate::new("ember_hound", "Ember Hound", 2, 5..=8)
            .with_description("A hound with smoldering fur and burning breath.")
            .stats(55, 15, 5)
            .with_ability(status("Flame Breath", 14, 0.3, Burn, 4, 3))
            .with_loot(loot(
                16,
                (5, 15),
                26,
                vec![
                    drop(catalog::battle_scroll(), 0.2),
                    drop(catalog::health_potion(), 0.25),
                ],
            )),
        EnemyTemplate::new("corrupted_knight", "Corrupted Knight", 2, 5..=8)
            .with_description("A fallen knight in rusted, cursed plate.")
            .stats(70, 13, 8)
            .with_ability(status("Shield Bash", 15, 0.25, Stun, 1, 0))
            .with_loot(loot(
                18,
                (8, 18),
                28,
                vec![
                    drop(catalog::iron_ore(), 0.4).quantity(1, 2),
                    drop(catalog::chainmail(), 0.1),
                ],
            )),
        EnemyTemplate::new("crystal_golem", "Crystal Golem", 2, 5..=8)
            .with_description("A lumbering construct of living crystal.")
            .stats(80, 12, 10)
            .with_ability(hit("Crystal Slam", 18, 0.2))
            .with_loot(loot(
                20,
                (10, 20),
                30,
                vec![
                    drop(catalog::crystal_shard(), 0.5).quantity(1, 3),
                    drop(catalog::clarity_amulet(), 0.08),
                ],
            )),
        EnemyTemplate::new("vine_weaver", "Vine Weaver", 2, 5..=8)
            .with_description("A tangle of thorned vines that mends itself.")
            .stats(65, 11, 6)
            .with_ability(hit("Thorn Lash", 13, 0.3))
            .with_ability(status("Regrowth", 0, 0.2, Regenerate, 3, 5))
            .with_loot(loot(
                14,
                (5, 12),
                24,
                vec![
                    drop(catalog::enchanted_thread(), 0.35),
                    drop(catalog::antidote(), 0.2),
                ],
            )),
    ]
}

fn tier_three() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("flame_wraith", "Flame Wraith", 3, 9..=12)
            .with_description("A restless spirit wreathed in fire.")
            .stats(90, 20, 8)
            .with_ability(status("Infernal Wave", 22, 0.3, Burn, 3, 6))
            .with_loot(loot(
                25,
                (10, 25),
                40,
                vec![
                    drop(catalog::battle_scroll(), 0.3),
                    drop(catalog::greater_health_potion(), 0.2),
                ],
            )),
        EnemyTemplate::new("ice_revenant", "Ice Revenant", 3, 9..=12)
            .with_description("A frozen warrior risen from a glacier.")
            .stats(100, 18, 10)
            .with_ability(status("Glacial Strike", 20, 0.25, Stun, 1, 0))
            .with_ability(status("Frost Aura", 10, 0.2, Weaken, 4, 2))
            .with_loot(loot(
                28,
                (12, 28),
                45,
                vec![
                    drop(catalog::crystal_shard(), 0.35).quantity(1, 2),
                    drop(catalog::frost_staff(), 0.05),
                ],
            )),
        EnemyTemplate::new("thunder_drake", "Thunder Drake", 3, 9..=12)
            .with_description("A young drake crackling with lightning.")
            .stats(95, 22, 9)
            .with_ability(status("Lightning Bolt", 25, 0.3, Stun, 1, 0))
            .with_loot(loot(
                30,
                (15, 30),
                48,
                vec![
                    drop(catalog::dragon_scale(), 0.2),
                    drop(catalog::stat_potion(), 0.25),
                ],
            )),
        EnemyTemplate::new("plague_bearer", "Plague Bearer", 3, 9..=12)
            .with_description("A hunched figure trailing a sickly green haze.")
            .stats(85, 17, 7)
            .with_ability(status("Plague Cloud", 14, 0.35, Poison, 5, 4))
            .with_ability(status("Enfeeble", 10, 0.2, Weaken, 4, 3))
            .with_loot(loot(
                24,
                (10, 22),
                42,
                vec![
                    drop(catalog::antidote(), 0.4).quantity(1, 2),
                    drop(catalog::greater_health_potion(), 0.2),
                ],
            )),
        EnemyTemplate::new("bone_construct", "Bone Construct", 3, 9..=12)
            .with_description("Bones bound together by dark will.")
            .stats(110, 16, 12)
            .with_ability(hit("Bone Crush", 20, 0.25))
            .with_ability(status("Dark Mend", 0, 0.15, Regenerate, 2, 8))
            .with_loot(loot(
                26,
                (12, 26),
                44,
                vec![
                    drop(catalog::shadow_essence(), 0.4).quantity(1, 2),
                    drop(catalog::shadow_blade(), 0.05),
                ],
            )),
        EnemyTemplate::new("storm_harpy", "Storm Harpy", 3, 9..=12)
            .with_description("A shrieking harpy riding the storm winds.")
            .stats(80, 21, 6)
            .with_ability(status("Gale Force", 18, 0.3, Weaken, 3, 2))
            .with_loot(loot(
                27,
                (12, 25),
                43,
                vec![
                    drop(catalog::enchanted_thread(), 0.35),
                    drop(catalog::dexterity_boots(), 0.06),
                ],
            )),
    ]
}

fn tier_four() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("shadow_lord", "Shadow Lord", 4, 13..=16)
            .with_description("A tyrant of the dark realms.")
            .stats(140, 26, 14)
            .with_ability(status("Shadow Rend", 28, 0.3, Bleed, 6, 3))
            .with_ability(status("Dark Command", 20, 0.2, Stun, 1, 0))
            .with_loot(loot(
                40,
                (20, 40),
                65,
                vec![
                    drop(catalog::shadow_essence(), 0.5).quantity(2, 4),
                    drop(catalog::shadow_blade(), 0.1),
                ],
            )),
        EnemyTemplate::new("inferno_titan", "Inferno Titan", 4, 13..=16)
            .with_description("A giant of molten rock.")
            .stats(160, 24, 16)
            .with_ability(status("Magma Slam", 30, 0.3, Burn, 7, 4))
            .with_loot(loot(
                45,
                (20, 45),
                70,
                vec![
                    drop(catalog::dragon_scale(), 0.35).quantity(1, 2),
                    drop(catalog::greater_health_potion(), 0.3),
                ],
            )),
        EnemyTemplate::new("frost_wyrm", "Frost Wyrm", 4, 13..=16)
            .with_description("A serpentine dragon of ice.")
            .stats(150, 25, 13)
            .with_ability(status("Blizzard Coil", 26, 0.3, Stun, 1, 0))
            .with_loot(loot(
                42,
                (20, 42),
                68,
                vec![
                    drop(catalog::crystal_shard(), 0.45).quantity(2, 4),
                    drop(catalog::frost_staff(), 0.08),
                ],
            )),
        EnemyTemplate::new("lich_acolyte", "Lich Acolyte", 4, 13..=16)
            .with_description("A disciple of undeath, siphoning life.")
            .stats(130, 28, 10)
            .with_ability(status("Necrotic Bolt", 24, 0.3, Poison, 6, 4))
            .with_ability(status("Life Siphon", 0, 0.2, Regenerate, 3, 8))
            .with_loot(loot(
                38,
                (18, 38),
                62,
                vec![
                    drop(catalog::shadow_essence(), 0.5).quantity(2, 3),
                    drop(catalog::mage_robes(), 0.06),
                ],
            )),
        EnemyTemplate::new("celestial_guardian", "Celestial Guardian", 4, 13..=16)
            .with_description("A radiant sentinel of the heavens.")
            .stats(170, 22, 18)
            .with_ability(hit("Holy Smite", 24, 0.25))
            .with_ability(status("Divine Aegis", 0, 0.2, Strengthen, 5, 3))
            .with_loot(loot(
                48,
                (22, 48),
                72,
                vec![
                    drop(catalog::crystal_shard(), 0.4).quantity(2, 3),
                    drop(catalog::wisdom_pendant(), 0.1),
                ],
            )),
    ]
}

fn tier_five() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("boss_mindflayer", "The Mindflayer", 5, 15..=20)
            .boss()
            .with_description("An ancient horror that feeds on focus itself.")
            .stats(250, 30, 15)
            .with_ability(status("Psychic Blast", 32, 0.3, Stun, 1, 0))
            .with_ability(status("Mind Drain", 20, 0.25, Weaken, 5, 3))
            .with_loot(loot(
                100,
                (50, 100),
                150,
                vec![
                    drop(catalog::shadow_essence(), 1.0).quantity(3, 5),
                    drop(catalog::dragon_slayer(), 0.15),
                ],
            )),
        EnemyTemplate::new("boss_ignaroth", "Ignaroth the Undying Flame", 5, 15..=20)
            .boss()
            .with_description("A dragon whose fire has burned for a thousand years.")
            .stats(300, 32, 18)
            .with_ability(status("Dragon's Inferno", 35, 0.35, Burn, 8, 4))
            .with_loot(loot(
                120,
                (60, 120),
                180,
                vec![
                    drop(catalog::dragon_scale(), 1.0).quantity(3, 5),
                    drop(catalog::dragon_slayer(), 0.2),
                ],
            )),
        EnemyTemplate::new("boss_glaciara", "Glaciara, Queen of Ice", 5, 15..=20)
            .boss()
            .with_description("Sovereign of the frozen wastes.")
            .stats(270, 28, 20)
            .with_ability(status("Absolute Zero", 30, 0.3, Stun, 2, 0))
            .with_ability(status("Frost Crown", 18, 0.2, Weaken, 5, 3))
            .with_loot(loot(
                110,
                (55, 110),
                170,
                vec![
                    drop(catalog::crystal_shard(), 1.0).quantity(4, 6),
                    drop(catalog::frost_staff(), 0.2),
                ],
            )),
        EnemyTemplate::new("boss_nyx", "Nyx, the Void Walker", 5, 15..=20)
            .boss()
            .with_description("A shade that walks between worlds.")
            .stats(280, 34, 16)
            .with_ability(status("Void Slash", 30, 0.3, Bleed, 7, 4))
            .with_ability(status("Poison Eclipse", 22, 0.25, Poison, 6, 4))
            .with_loot(loot(
                115,
                (55, 115),
                175,
                vec![
                    drop(catalog::shadow_essence(), 1.0).quantity(4, 6),
                    drop(catalog::shadow_blade(), 0.2),
                ],
            )),
        EnemyTemplate::new("boss_solara", "Solara, the Radiant", 5, 15..=20)
            .boss()
            .with_description("A fallen sun goddess burning with fury.")
            .stats(290, 30, 20)
            .with_ability(status("Solar Flare", 28, 0.3, Burn, 7, 3))
            .with_ability(status("Radiant Might", 0, 0.2, Strengthen, 6, 3))
            .with_loot(loot(
                125,
                (60, 125),
                185,
                vec![
                    drop(catalog::crystal_shard(), 1.0).quantity(3, 5),
                    drop(catalog::dragon_slayer(), 0.18),
                ],
            )),
    ]
}

/// Every template, indexed by id.
#[derive(Debug, Clone)]
pub struct Bestiary {
    templates: Vec<EnemyTemplate>,
}

impl Bestiary {
    /// The built-in 28 templates.
    pub fn standard() -> Self {
        let mut templates = tier_one();
        templates.extend(tier_two());
        templates.extend(tier_three());
        templates.extend(tier_four());
        templates.extend(tier_five());
        Self { templates }
    }

    pub fn from_templates(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[EnemyTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&EnemyTemplate, ContentError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ContentError::UnknownEnemyTemplate(id.to_string()))
    }

    /// Non-boss templates of a tier.
    pub fn regular_in_tier(&self, tier: u32) -> Vec<&EnemyTemplate> {
        self.templates
            .iter()
            .filter(|t| t.tier == tier && !t.is_boss)
            .collect()
    }

    pub fn bosses(&self) -> Vec<&EnemyTemplate> {
        self.templates.iter().filter(|t| t.is_boss).collect()
    }

    /// Rejects duplicate ids.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for t in &self.templates {
            if !seen.insert(t.id.as_str()) {
                return Err(ContentError::DuplicateId(t.id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for Bestiary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_twenty_eight_templates() {
        let bestiary = Bestiary::standard();
        assert_eq!(bestiary.len(), 28);
        assert!(bestiary.validate().is_ok());
    }

    #[test]
    fn test_tier_sizes() {
        let bestiary = Bestiary::standard();
        assert_eq!(bestiary.regular_in_tier(1).len(), 6);
        assert_eq!(bestiary.regular_in_tier(2).len(), 6);
        assert_eq!(bestiary.regular_in_tier(3).len(), 6);
        assert_eq!(bestiary.regular_in_tier(4).len(), 5);
        assert_eq!(bestiary.regular_in_tier(5).len(), 0);
        assert_eq!(bestiary.bosses().len(), 5);
    }

    #[test]
    fn test_lookup() {
        let bestiary = Bestiary::standard();
        let spider = bestiary.get("cave_spider").unwrap();
        assert_eq!(spider.base_hp, 28);
        assert_eq!(spider.abilities.len(), 1);
        assert!(matches!(
            bestiary.get("unicorn"),
            Err(ContentError::UnknownEnemyTemplate(_))
        ));
    }

    #[test]
    fn test_loot_ranges_are_well_formed() {
        for t in Bestiary::standard().templates() {
            for entry in &t.loot_table.entries {
                assert!(entry.min_quantity <= entry.max_quantity, "{}", t.id);
                assert!((0.0..=1.0).contains(&entry.drop_chance), "{}", t.id);
            }
            if let Some(range) = &t.loot_table.bonus_gold {
                assert!(range.start() <= range.end(), "{}", t.id);
            }
            assert!(t.level_range.start() <= t.level_range.end());
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut templates = tier_one();
        templates.push(tier_one().remove(0));
        assert_eq!(
            Bestiary::from_templates(templates).validate(),
            Err(ContentError::DuplicateId("whiskered_rat".to_string()))
        );
    }
}
