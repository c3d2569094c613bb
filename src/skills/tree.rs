//! Class skill trees: 8 classes, 3 branches, 3 tiers each.
//!
//! Skill ids follow `{class}_{branch}_{tier}`, e.g. `iceMage_def_2`. Tier n
//! costs n points and requires tier n-1 of the same branch.

use super::types::{Skill, SkillBranch, SkillEffect};
use crate::character::CharacterClass;

/// Names and effects in branch order (offense, defense, utility), tiers 1-3.
fn tree_content(class: CharacterClass) -> [(&'static str, Vec<SkillEffect>); 9] {
    use crate::character::StatType::*;
    use crate::combat::StatusEffectType::*;
    use SkillEffect::*;

    match class {
        CharacterClass::Ranger => [
            ("Keen Eye", vec![CritChance(5)]),
            ("Piercing Shot", vec![DamageMultiplier(10)]),
            ("Hunter's Mark", vec![Lifesteal(8), CritChance(5)]),
            ("Quick Reflexes", vec![DodgeChance(5)]),
            ("Natural Armor", vec![MaxHealthBonus(20), DodgeChance(3)]),
            ("Poison Immunity", vec![StatusResistance(Poison, 50), DefenseMultiplier(10)]),
            ("Scavenger", vec![GoldMultiplier(10)]),
            ("Trailblazer", vec![EnergyBonus(10), XpMultiplier(5)]),
            ("Survivalist", vec![SpecialCooldownReduction(1), XpMultiplier(10)]),
        ],
        CharacterClass::Warrior => [
            ("Battle Fury", vec![CritChance(4), StatBoost(Strength, 1)]),
            ("Rending Blow", vec![DamageMultiplier(12)]),
            ("Berserker Rage", vec![Lifesteal(6), DamageMultiplier(15)]),
            ("Iron Skin", vec![MaxHealthBonus(25)]),
            ("Shield Wall", vec![DefenseMultiplier(8), DodgeChance(4)]),
            ("Unbreakable", vec![MaxHealthBonus(40), StatusResistance(Stun, 50)]),
            ("War Spoils", vec![GoldMultiplier(8)]),
            ("Battle Hardened", vec![XpMultiplier(8), EnergyBonus(5)]),
            ("Warlord's Command", vec![SpecialCooldownReduction(1), GoldMultiplier(10)]),
        ],
        CharacterClass::WarriorKing => [
            ("Royal Strike", vec![CritChance(5)]),
            ("Sovereign's Wrath", vec![DamageMultiplier(12), StatBoost(Strength, 2)]),
            ("Conqueror's Blade", vec![Lifesteal(10), CritChance(8)]),
            ("Regal Fortitude", vec![MaxHealthBonus(20), DodgeChance(3)]),
            ("Crown's Aegis", vec![DefenseMultiplier(10), StatusResistance(Weaken, 50)]),
            ("Immortal Sovereign", vec![MaxHealthBonus(50), Counterattack(10)]),
            ("Royal Treasury", vec![GoldMultiplier(12)]),
            ("Inspiring Presence", vec![XpMultiplier(10), StatBoost(Charisma, 2)]),
            ("Decree of Power", vec![SpecialCooldownReduction(1), EnergyBonus(15)]),
        ],
        CharacterClass::Pirate => [
            ("Dirty Fighting", vec![CritChance(6)]),
            ("Cutlass Mastery", vec![DamageMultiplier(10), CritChance(3)]),
            ("Dead Man's Strike", vec![Lifesteal(10), DamageMultiplier(10)]),
            ("Sea Legs", vec![DodgeChance(6)]),
            ("Rum-Soaked Hide", vec![MaxHealthBonus(15), StatusResistance(Burn, 50)]),
            (
                "Captain's Resolve",
                vec![DodgeChance(8), DefenseMultiplier(12), MaxHealthBonus(20)],
            ),
            ("Plunder", vec![GoldMultiplier(15)]),
            ("Treasure Map", vec![XpMultiplier(8), GoldMultiplier(8)]),
            ("Privateer's Fortune", vec![SpecialCooldownReduction(1), EnergyBonus(15)]),
        ],
        CharacterClass::IceMage => [
            ("Frost Bite", vec![CritChance(4), StatBoost(Intelligence, 1)]),
            ("Frost Nova", vec![DamageMultiplier(14)]),
            ("Absolute Zero", vec![CritChance(10), Lifesteal(5)]),
            ("Glacial Shield", vec![MaxHealthBonus(15), DefenseMultiplier(5)]),
            ("Frozen Armor", vec![DodgeChance(5), StatusResistance(Stun, 50)]),
            ("Permafrost", vec![MaxHealthBonus(30), Counterattack(12)]),
            ("Crystal Harvest", vec![GoldMultiplier(10)]),
            ("Arcane Study", vec![XpMultiplier(12)]),
            ("Time Freeze", vec![SpecialCooldownReduction(2), EnergyBonus(10)]),
        ],
        CharacterClass::Necromancer => [
            ("Soul Siphon", vec![CritChance(3), Lifesteal(3)]),
            ("Death's Embrace", vec![DamageMultiplier(12), Lifesteal(4)]),
            ("Reaper's Harvest", vec![DamageMultiplier(15), Lifesteal(8)]),
            ("Bone Armor", vec![MaxHealthBonus(20)]),
            ("Spectral Ward", vec![DodgeChance(6), StatusResistance(Poison, 50)]),
            (
                "Undying Will",
                vec![MaxHealthBonus(35), DefenseMultiplier(10), StatusResistance(Bleed, 50)],
            ),
            ("Grave Robber", vec![GoldMultiplier(12)]),
            ("Dark Knowledge", vec![XpMultiplier(10), StatBoost(Intelligence, 2)]),
            ("Temporal Rift", vec![SpecialCooldownReduction(1), EnergyBonus(15)]),
        ],
        CharacterClass::Dragon => [
            ("Dragon's Fury", vec![CritChance(5), StatBoost(Strength, 1)]),
            ("Inferno Breath", vec![DamageMultiplier(15)]),
            ("Cataclysm", vec![CritChance(8), DamageMultiplier(10), Lifesteal(5)]),
            ("Scale Plating", vec![MaxHealthBonus(30)]),
            ("Flame Ward", vec![DefenseMultiplier(10), StatusResistance(Burn, 75)]),
            ("Ancient Wyrm", vec![MaxHealthBonus(50), Counterattack(15)]),
            ("Hoard Instinct", vec![GoldMultiplier(12)]),
            ("Elder Wisdom", vec![XpMultiplier(10), StatBoost(Wisdom, 2)]),
            ("Primordial Force", vec![SpecialCooldownReduction(1), EnergyBonus(20)]),
        ],
        CharacterClass::Angel => [
            ("Holy Smite", vec![CritChance(4), StatBoost(Wisdom, 1)]),
            ("Radiant Blade", vec![DamageMultiplier(12), CritChance(3)]),
            ("Divine Judgment", vec![Lifesteal(10), DamageMultiplier(12)]),
            ("Blessed Aura", vec![MaxHealthBonus(20), DodgeChance(3)]),
            ("Wings of Grace", vec![DodgeChance(7), StatusResistance(Burn, 50)]),
            (
                "Seraphim's Guard",
                vec![MaxHealthBonus(40), DefenseMultiplier(12), StatusResistance(Bleed, 50)],
            ),
            ("Divine Blessing", vec![GoldMultiplier(8), XpMultiplier(5)]),
            ("Celestial Insight", vec![XpMultiplier(10), StatBoost(Wisdom, 2)]),
            ("Ascension", vec![SpecialCooldownReduction(2), EnergyBonus(10)]),
        ],
    }
}

pub fn skill_id(class: CharacterClass, branch: SkillBranch, tier: u32) -> String {
    format!("{}_{}_{}", class.id(), branch.id(), tier)
}

/// The full tree for one class, offense first, each branch in tier order.
pub fn skill_tree(class: CharacterClass) -> Vec<Skill> {
    tree_content(class)
        .into_iter()
        .enumerate()
        .map(|(i, (name, effects))| {
            let branch = SkillBranch::ALL[i / 3];
            let tier = (i % 3) as u32 + 1;
            Skill {
                id: skill_id(class, branch, tier),
                name,
                class,
                branch,
                tier,
                cost: tier,
                prerequisite: (tier > 1).then(|| skill_id(class, branch, tier - 1)),
                effects,
            }
        })
        .collect()
}

pub fn find_skill(skill_id: &str) -> Option<Skill> {
    CharacterClass::ALL
        .iter()
        .flat_map(|&class| skill_tree(class))
        .find(|skill| skill.id == skill_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_class_has_nine_skills() {
        for class in CharacterClass::ALL {
            let tree = skill_tree(class);
            assert_eq!(tree.len(), 9);
            for branch in SkillBranch::ALL {
                assert_eq!(tree.iter().filter(|s| s.branch == branch).count(), 3);
            }
        }
    }

    #[test]
    fn test_ids_are_unique_across_classes() {
        let ids: HashSet<String> = CharacterClass::ALL
            .iter()
            .flat_map(|&c| skill_tree(c))
            .map(|s| s.id)
            .collect();
        assert_eq!(ids.len(), 72);
    }

    #[test]
    fn test_prerequisites_chain_within_branch() {
        let tree = skill_tree(CharacterClass::IceMage);
        let t3 = tree.iter().find(|s| s.id == "iceMage_def_3").unwrap();
        assert_eq!(t3.cost, 3);
        assert_eq!(t3.prerequisite.as_deref(), Some("iceMage_def_2"));
        let t1 = tree.iter().find(|s| s.id == "iceMage_def_1").unwrap();
        assert_eq!(t1.prerequisite, None);
        assert_eq!(t1.name, "Glacial Shield");
    }

    #[test]
    fn test_find_skill() {
        let skill = find_skill("dragon_def_2").unwrap();
        assert_eq!(skill.class, CharacterClass::Dragon);
        assert_eq!(skill.name, "Flame Ward");
        assert!(find_skill("dragon_def_4").is_none());
    }

    #[test]
    fn test_every_skill_has_effects() {
        for class in CharacterClass::ALL {
            for skill in skill_tree(class) {
                assert!(!skill.effects.is_empty(), "{}", skill.id);
            }
        }
    }
}
