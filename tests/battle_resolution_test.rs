//! Integration test: battle resolution through the engine
//!
//! Covers the damage floor, victory and defeat projection onto the
//! character, consumables used mid-fight, and the stalled-battle limit.

use mindquest::character::{Background, Character, CharacterClass, StatType};
use mindquest::combat::{
    basic_attack_damage, Ability, BattlePhase, BattleResult, BattleRewards, CombatEvent,
    Encounter, PlayerAction, StatusEffectType,
};
use mindquest::items::catalog;
use mindquest::{EngineConfig, GameEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn engine() -> GameEngine {
    GameEngine::new(EngineConfig::default()).unwrap()
}

fn warrior() -> Character {
    Character::new("Brenna".to_string(), CharacterClass::Warrior, Background::Student)
}

fn dummy(hp: u32, attack: u32, defense: u32) -> Encounter {
    Encounter {
        id: Uuid::new_v4(),
        enemy_name: "Training Dummy".to_string(),
        description: String::new(),
        level: 1,
        hp,
        max_hp: hp,
        attack,
        defense,
        is_boss: false,
        abilities: Vec::new(),
        rewards: BattleRewards {
            xp: 40,
            gold: 15,
            items: Vec::new(),
        },
        loot_table: None,
        pre_battle_text: None,
        victory_text: None,
    }
}

// =============================================================================
// Damage floor
// =============================================================================

#[test]
fn test_overwhelming_defense_still_takes_one_damage() {
    assert_eq!(basic_attack_damage(15, 20), 1);

    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut hero = warrior();
    // 5 + (40 - 10) / 2 = 20 defense
    hero.stats.set(StatType::Constitution, 40);

    let mut battle = engine.start_battle(&hero, &dummy(1000, 15, 0));
    let events = battle.play_round(PlayerAction::Attack, &mut rng);
    assert!(events.contains(&CombatEvent::EnemyAttack {
        damage: 1,
        ability: None
    }));
    assert_eq!(battle.player().hp, 99);
}

// =============================================================================
// Outcome projection
// =============================================================================

#[test]
fn test_victory_banks_rewards() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let hero = warrior();

    let outcome = engine.resolve_battle(&hero, &dummy(20, 1, 0), Vec::new(), &mut rng);
    assert_eq!(outcome.result, BattleResult::Victory);
    assert_eq!(outcome.enemy_remaining_hp, 0);
    assert!(outcome.rewards.is_some());
    assert!(!outcome.log.is_empty());

    let result = engine.apply_battle_outcome(&hero, &outcome);
    assert_eq!(result.xp_awarded, 40);
    assert_eq!(result.character.xp, 40);
    assert_eq!(result.character.gold, hero.gold + 15);
    assert_eq!(result.character.health, outcome.remaining_hp);
}

#[test]
fn test_defeat_grants_nothing() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let hero = warrior();

    let outcome = engine.resolve_battle(&hero, &dummy(5000, 200, 100), Vec::new(), &mut rng);
    assert_eq!(outcome.result, BattleResult::Defeat);
    assert_eq!(outcome.remaining_hp, 0);
    assert!(outcome.rewards.is_none());

    let result = engine.apply_battle_outcome(&hero, &outcome);
    assert_eq!(result.character.xp, 0);
    assert_eq!(result.character.gold, hero.gold);
    assert_eq!(result.character.health, 0);
}

#[test]
fn test_potion_is_consumed_from_inventory() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut hero = warrior();
    hero.health = 50;
    let potion = catalog::health_potion();
    let potion_id = potion.id;
    hero.inventory.add(potion, 2).unwrap();

    let outcome = engine.resolve_battle(
        &hero,
        &dummy(10, 1, 0),
        vec![PlayerAction::UseItem(potion_id), PlayerAction::Attack],
        &mut rng,
    );
    assert!(outcome.is_victory());
    assert_eq!(outcome.consumed_items, vec![potion_id]);
    // healed 30, then took a single 1-damage hit
    assert_eq!(outcome.remaining_hp, 79);

    let after = engine.apply_battle_outcome(&hero, &outcome).character;
    assert_eq!(after.inventory.count_template("health_potion"), 1);
}

#[test]
fn test_missing_item_falls_back_to_attack() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut battle = engine.start_battle(&warrior(), &dummy(500, 1, 0));
    let ghost = Uuid::new_v4();
    let events = battle.play_round(PlayerAction::UseItem(ghost), &mut rng);
    assert!(events.contains(&CombatEvent::ItemMissing(ghost)));
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::PlayerAttack { .. })));
    assert!(battle.enemy().hp < 500);
}

// =============================================================================
// Status effects and limits
// =============================================================================

#[test]
fn test_enemy_poison_lands_and_ticks() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut venomous = dummy(1000, 1, 0);
    venomous.abilities =
        vec![Ability::new("Venom Spit", 1, 1.0).with_effect(StatusEffectType::Poison, 3, 4)];

    let mut battle = engine.start_battle(&warrior(), &venomous);
    battle.play_round(PlayerAction::Defend, &mut rng);
    assert!(battle.player().effects.has(StatusEffectType::Poison));

    let before = battle.player().hp;
    let events = battle.play_round(PlayerAction::Defend, &mut rng);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::StatusTick {
            player: true,
            damage: 4,
            ..
        }
    )));
    assert!(battle.player().hp < before);
}

#[test]
fn test_stalled_battle_is_a_defeat() {
    let engine = GameEngine::new(EngineConfig::quick_battles()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut hero = warrior();
    hero.stats.set(StatType::Constitution, 60);

    let outcome = engine.resolve_battle(&hero, &dummy(100_000, 1, 500), Vec::new(), &mut rng);
    assert_eq!(outcome.result, BattleResult::Defeat);
    assert_eq!(outcome.turns, 50);
    assert!(outcome.remaining_hp > 0);
    assert!(outcome.rewards.is_none());
}

#[test]
fn test_finished_battle_ignores_further_rounds() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut battle = engine.start_battle(&warrior(), &dummy(1, 1, 0));
    battle.play_round(PlayerAction::Attack, &mut rng);
    assert_eq!(battle.phase(), BattlePhase::PlayerVictory);
    assert!(battle.play_round(PlayerAction::Attack, &mut rng).is_empty());
    let outcome = battle.into_outcome().unwrap();
    assert_eq!(outcome.turns, 1);
}
