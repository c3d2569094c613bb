//! XP, level-ups, and banking battle rewards onto a character.

use super::prestige::perks;
use super::types::Character;
use crate::combat::{BattleOutcome, BattleRewards};
use crate::core::constants::*;
use crate::items::ItemStack;
use crate::skills::{aggregate_skill_bonuses, SkillBonusSummary};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpResult {
    pub character: Character,
    pub levels_gained: u32,
    pub gold_awarded: u64,
}

/// XP needed to leave `level`.
pub fn xp_to_next_level(level: u32, quick_learner: bool) -> u64 {
    let base = level as u64 * XP_PER_LEVEL;
    if quick_learner {
        base * QUICK_LEARNER_XP_PERCENT / 100
    } else {
        base
    }
}

/// Adds XP and processes every level-up it triggers.
pub fn award_xp(character: &Character, amount: u64) -> LevelUpResult {
    let mut next = character.clone();
    let quick = next.prestige.has_perk(perks::QUICK_LEARNER);
    let mut levels_gained = 0;
    let mut gold_awarded = 0;

    next.xp = next.xp.saturating_add(amount);
    next.prestige.cycle_xp = next.prestige.cycle_xp.saturating_add(amount);

    while next.xp_to_next > 0 && next.xp >= next.xp_to_next {
        next.xp -= next.xp_to_next;
        next.level += 1;
        next.xp_to_next = xp_to_next_level(next.level, quick);
        next.max_health = next.max_health.saturating_add(MAX_HEALTH_PER_LEVEL);
        next.health = next.max_health;
        let gold = GOLD_PER_LEVEL_UP * next.level as u64;
        next.gold = next.gold.saturating_add(gold);
        gold_awarded += gold;
        next.skills.grant(SKILL_POINTS_PER_LEVEL);
        levels_gained += 1;
        info!(name = %next.name, level = next.level, "level up");
    }

    LevelUpResult {
        character: next,
        levels_gained,
        gold_awarded,
    }
}

/// Percent bonuses to XP and gold from skills, prestige level, and perks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardMultipliers {
    pub xp_percent: u32,
    pub gold_percent: u32,
}

impl RewardMultipliers {
    pub fn for_character(character: &Character, skills: &SkillBonusSummary) -> Self {
        let prestige = PRESTIGE_BONUS_PERCENT_PER_LEVEL * character.prestige.level;
        let mut xp_percent = skills.xp_percent + prestige;
        let mut gold_percent = skills.gold_percent + prestige;
        if character.prestige.has_perk(perks::VETERANS_WISDOM) {
            xp_percent += VETERANS_WISDOM_XP_PERCENT;
        }
        if character.prestige.has_perk(perks::FORTUNES_FAVOR) {
            gold_percent += FORTUNES_FAVOR_GOLD_PERCENT;
        }
        Self {
            xp_percent,
            gold_percent,
        }
    }

    pub fn apply_xp(&self, base: u64) -> u64 {
        base.saturating_mul(100 + self.xp_percent as u64) / 100
    }

    pub fn apply_gold(&self, base: u64) -> u64 {
        base.saturating_mul(100 + self.gold_percent as u64) / 100
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewardResult {
    pub character: Character,
    pub xp_awarded: u64,
    pub gold_awarded: u64,
    pub levels_gained: u32,
    /// Items that did not fit in the inventory
    pub overflow: Vec<ItemStack>,
}

/// Banks a reward bundle with multipliers applied.
pub fn apply_battle_rewards(character: &Character, rewards: &BattleRewards) -> RewardResult {
    let multipliers = RewardMultipliers::for_character(character, &aggregate_skill_bonuses(character));
    let xp = multipliers.apply_xp(rewards.xp);
    let gold = multipliers.apply_gold(rewards.gold);

    let mut next = character.clone();
    next.gold = next.gold.saturating_add(gold);
    let mut overflow = Vec::new();
    for stack in &rewards.items {
        if next.inventory.add_stack(stack.clone()).is_err() {
            overflow.push(stack.clone());
        }
    }
    if !overflow.is_empty() {
        debug!(dropped = overflow.len(), "inventory full, rewards left behind");
    }

    let leveled = award_xp(&next, xp);
    RewardResult {
        character: leveled.character,
        xp_awarded: xp,
        gold_awarded: gold,
        levels_gained: leveled.levels_gained,
        overflow,
    }
}

/// Projects a finished battle onto the character: remaining health, used
/// consumables, and rewards on victory.
pub fn apply_battle_outcome(character: &Character, outcome: &BattleOutcome) -> RewardResult {
    let mut next = character.clone();
    next.health = outcome.remaining_hp.min(next.max_health);
    for &id in &outcome.consumed_items {
        // a consumed id that is no longer present was already removed elsewhere
        let _ = next.inventory.take_one(id);
    }

    match &outcome.rewards {
        Some(rewards) if outcome.is_victory() => apply_battle_rewards(&next, rewards),
        _ => RewardResult {
            character: next,
            xp_awarded: 0,
            gold_awarded: 0,
            levels_gained: 0,
            overflow: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Background, CharacterClass};
    use crate::combat::BattleResult;
    use crate::items::{catalog, Inventory};

    fn hero() -> Character {
        Character::new("Kit".to_string(), CharacterClass::Warrior, Background::Athlete)
    }

    #[test]
    fn test_award_xp_below_threshold() {
        let result = award_xp(&hero(), 99);
        assert_eq!(result.levels_gained, 0);
        assert_eq!(result.character.xp, 99);
        assert_eq!(result.character.level, 1);
    }

    #[test]
    fn test_single_level_up() {
        let mut c = hero();
        c.health = 40;
        let result = award_xp(&c, 130);
        let c = result.character;
        assert_eq!(c.level, 2);
        assert_eq!(c.xp, 30);
        assert_eq!(c.xp_to_next, 200);
        assert_eq!(c.max_health, 110);
        assert_eq!(c.health, 110);
        assert_eq!(c.gold, 120);
        assert_eq!(c.skills.points, 2);
        assert_eq!(c.skills.total_earned, 2);
        assert_eq!(result.gold_awarded, 20);
    }

    #[test]
    fn test_multiple_level_ups_from_one_award() {
        // 100 + 200 + 300 = 600 to reach level 4
        let result = award_xp(&hero(), 650);
        assert_eq!(result.levels_gained, 3);
        assert_eq!(result.character.level, 4);
        assert_eq!(result.character.xp, 50);
        assert_eq!(result.character.xp_to_next, 400);
        assert_eq!(result.character.skills.points, 6);
        assert_eq!(result.gold_awarded, 20 + 30 + 40);
        assert_eq!(result.character.prestige.cycle_xp, 650);
    }

    #[test]
    fn test_quick_learner_reduces_requirement() {
        assert_eq!(xp_to_next_level(5, false), 500);
        assert_eq!(xp_to_next_level(5, true), 450);
        let mut c = hero();
        c.prestige.perks.insert(perks::QUICK_LEARNER.to_string());
        let result = award_xp(&c, 100);
        assert_eq!(result.character.xp_to_next, 180);
    }

    #[test]
    fn test_reward_multipliers_stack() {
        let mut c = hero();
        c.prestige.level = 2;
        c.prestige.perks.insert(perks::VETERANS_WISDOM.to_string());
        c.prestige.perks.insert(perks::FORTUNES_FAVOR.to_string());
        c.skills.unlocked.insert("warrior_util_1".to_string());
        let m = RewardMultipliers::for_character(&c, &aggregate_skill_bonuses(&c));
        assert_eq!(m.xp_percent, 20);
        assert_eq!(m.gold_percent, 10 + 15 + 8);
        assert_eq!(m.apply_xp(50), 60);
        assert_eq!(m.apply_gold(100), 133);
    }

    #[test]
    fn test_apply_rewards_adds_items_and_gold() {
        let rewards = BattleRewards {
            xp: 40,
            gold: 25,
            items: vec![ItemStack {
                item: catalog::iron_ore(),
                quantity: 2,
            }],
        };
        let result = apply_battle_rewards(&hero(), &rewards);
        assert_eq!(result.character.gold, 125);
        assert_eq!(result.character.xp, 40);
        assert_eq!(result.character.inventory.count_template("iron_ore"), 2);
        assert!(result.overflow.is_empty());
    }

    #[test]
    fn test_full_inventory_overflows() {
        let mut c = hero();
        c.inventory = Inventory::with_capacity(0);
        let rewards = BattleRewards {
            xp: 0,
            gold: 0,
            items: vec![ItemStack {
                item: catalog::steel_sword(),
                quantity: 1,
            }],
        };
        let result = apply_battle_rewards(&c, &rewards);
        assert_eq!(result.overflow.len(), 1);
        assert!(result.character.inventory.is_empty());
    }

    #[test]
    fn test_defeat_outcome_sets_health_and_consumes_items() {
        let mut c = hero();
        let potion = catalog::health_potion();
        let id = potion.id;
        c.inventory.add(potion, 2).unwrap();
        let outcome = BattleOutcome {
            result: BattleResult::Defeat,
            remaining_hp: 0,
            enemy_remaining_hp: 12,
            turns: 7,
            rewards: None,
            consumed_items: vec![id],
            log: vec![],
        };
        let result = apply_battle_outcome(&c, &outcome);
        assert_eq!(result.character.health, 0);
        assert_eq!(result.character.inventory.count_template("health_potion"), 1);
        assert_eq!(result.xp_awarded, 0);
        assert_eq!(result.character.gold, c.gold);
    }
}
