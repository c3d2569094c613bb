//! Integration test: arena ladder
//!
//! Plays a short ladder through the engine: streak tokens, rating movement,
//! history retention, and fights against generated opponents.

use chrono::Utc;
use mindquest::arena::{ArenaManager, ArenaOpponent, ArenaRank, ArenaStats};
use mindquest::character::{Background, Character, CharacterClass};
use mindquest::items::EquipmentLoadout;
use mindquest::{EngineConfig, EngineError, GameEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine() -> GameEngine {
    GameEngine::new(EngineConfig::default()).unwrap()
}

fn bronze_rival() -> ArenaOpponent {
    ArenaOpponent {
        name: "Grimshade".to_string(),
        class: CharacterClass::Necromancer,
        level: 5,
        rating: 200,
        rank: ArenaRank::Bronze,
        equipment: EquipmentLoadout::new(),
        stats: CharacterClass::Necromancer.base_attributes(),
    }
}

#[test]
fn test_win_streak_then_loss() {
    let engine = engine();
    let rival = bronze_rival();
    let mut stats = ArenaStats::default();
    assert_eq!(stats.rating, 200);

    let mut tokens = Vec::new();
    for _ in 0..3 {
        let (next, result) = engine.record_arena_match(&stats, true, &rival);
        assert!(result.rating_change >= 5);
        assert!(next.rating > stats.rating);
        tokens.push(result.tokens_earned);
        stats = next;
    }
    // 10 base for a Bronze rival plus 5 per streak win
    assert_eq!(tokens, vec![15, 20, 25]);
    assert_eq!(stats.tokens, 60);
    assert_eq!(stats.current_streak, 3);

    let peak = stats.rating;
    let (stats, result) = engine.record_arena_match(&stats, false, &rival);
    assert!(result.rating_change <= -5);
    assert_eq!(result.tokens_earned, 0);
    assert_eq!(stats.rating, (peak as i64 + result.rating_change as i64) as u32);
    assert_eq!(stats.highest_rating, peak);
    assert_eq!(stats.wins, 3);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.matches_played(), 4);
    assert_eq!(stats.history.len(), 4);
    assert_eq!(stats.tokens, 60);
}

#[test]
fn test_streak_bonus_caps() {
    assert_eq!(ArenaManager::tokens_earned(ArenaRank::Bronze, 5), 35);
    assert_eq!(ArenaManager::tokens_earned(ArenaRank::Bronze, 12), 35);
    assert_eq!(ArenaManager::tokens_earned(ArenaRank::Champion, 1), 45);
}

#[test]
fn test_history_is_capped_newest_first() {
    let config = EngineConfig {
        match_history_cap: 5,
        ..EngineConfig::default()
    };
    let engine = GameEngine::new(config).unwrap();
    let rival = bronze_rival();

    let mut stats = ArenaStats::default();
    for i in 0..8 {
        stats = engine.record_arena_match(&stats, i % 2 == 0, &rival).0;
    }
    assert_eq!(stats.history.len(), 5);
    assert_eq!(stats.matches_played(), 8);
    // the eighth match was a loss
    assert!(!stats.history[0].victory);
}

#[test]
fn test_rating_never_goes_negative() {
    let engine = engine();
    let stats = ArenaStats {
        rating: 3,
        highest_rating: 3,
        ..ArenaStats::default()
    };
    let (after, _) = engine.record_arena_match(&stats, false, &bronze_rival());
    assert_eq!(after.rating, 0);
    assert_eq!(after.rank(), ArenaRank::Bronze);
}

#[test]
fn test_fight_generated_opponents() {
    let engine = engine();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut hero = Character::new("Tam".to_string(), CharacterClass::Dragon, Background::Athlete);
    hero = engine.award_xp(&hero, 1_000).character;
    let mut stats = ArenaStats::default();

    for _ in 0..5 {
        let opponent =
            engine.generate_arena_opponent(hero.level, stats.rating, Some(hero.class), &mut rng);
        assert!(opponent.level + 2 >= hero.level && opponent.level <= hero.level + 2);

        let encounter = opponent.to_encounter();
        assert_eq!(encounter.max_hp, opponent.max_hp());
        assert!(encounter.loot_table.is_none());

        let fighter = Character {
            health: hero.max_health,
            ..hero.clone()
        };
        let outcome = engine.resolve_battle(&fighter, &encounter, Vec::new(), &mut rng);
        let (next, result) = engine.record_arena_match(&stats, outcome.is_victory(), &opponent);
        assert_eq!(result.opponent_name, opponent.name);
        assert_eq!(result.opponent_rank, opponent.rank);
        assert_eq!(result.victory, outcome.is_victory());
        stats = next;
    }
    assert_eq!(stats.matches_played(), 5);
    assert_eq!(stats.history.len(), 5);
    assert!(stats.history.iter().all(|h| h.date <= Utc::now()));
}

#[test]
fn test_spending_tokens() {
    let engine = engine();
    let stats = ArenaStats {
        tokens: 40,
        ..ArenaStats::default()
    };
    let after = engine.spend_arena_tokens(&stats, 25).unwrap();
    assert_eq!(after.tokens, 15);
    assert_eq!(
        engine.spend_arena_tokens(&after, 20),
        Err(EngineError::InsufficientTokens { have: 15, need: 20 })
    );
}

