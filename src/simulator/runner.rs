//! Main simulation runner driving the real engine.
//!
//! Every run builds a fresh character, raises it to the configured level,
//! then plays one dungeon attempt and an arena ladder through
//! [`GameEngine`], so results match what a host would see.

use super::config::SimConfig;
use super::report::SimReport;
use crate::arena::ArenaStats;
use crate::character::{Background, Character};
use crate::combat::PlayerAction;
use crate::core::config::EngineConfig;
use crate::core::engine::GameEngine;
use crate::core::error::EngineResult;
use crate::items::catalog;
use crate::skills::available_skills;
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

const POTIONS_PER_RUN: u32 = 3;

/// Outcome of one simulated character.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub dungeon_attempted: bool,
    pub dungeon_completed: bool,
    pub floors_cleared: usize,
    pub dungeon_turns: u32,
    pub arena_wins: u32,
    pub arena_losses: u32,
    pub final_rating: u32,
    pub highest_rating: u32,
    pub best_streak: u32,
    pub tokens: u32,
    pub gold_earned: u64,
    pub final_level: u32,
}

/// Run the full simulation with default engine settings.
pub fn run_simulation(config: &SimConfig) -> EngineResult<SimReport> {
    let engine = GameEngine::new(EngineConfig::default())?;
    run_simulation_with(&engine, config)
}

/// Run the full simulation against an existing engine.
pub fn run_simulation_with(engine: &GameEngine, config: &SimConfig) -> EngineResult<SimReport> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(engine, config, &mut rng)?;
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                floors = stats.floors_cleared,
                wins = stats.arena_wins,
                rating = stats.final_rating,
                "run finished"
            );
        }
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(all_runs))
}

/// A character at `config.level` with its starter weapon equipped, skill
/// points spent greedily, and a few potions.
pub fn prepare_character(engine: &GameEngine, config: &SimConfig) -> EngineResult<Character> {
    let mut character = Character::new("Simulant".to_string(), config.class, Background::Student);
    while character.level < config.level {
        let needed = character.xp_to_next.saturating_sub(character.xp);
        character = engine.award_xp(&character, needed).character;
    }

    while let Some(skill) = available_skills(&character).into_iter().next() {
        character = engine.unlock_skill(&character, &skill.id)?;
    }

    let weapon = catalog::starter_weapon(config.class);
    let weapon_id = weapon.id;
    character.inventory.add(weapon, 1)?;
    character = engine.equip(&character, weapon_id)?;
    character.inventory.add(catalog::health_potion(), POTIONS_PER_RUN)?;
    Ok(character)
}

/// Opens with a special attack, drinks a potion once, then attacks.
fn battle_plan(character: &Character) -> Vec<PlayerAction> {
    let mut plan = vec![PlayerAction::Special, PlayerAction::Attack];
    if let Some(potion) = character.inventory.consumables().next() {
        plan.push(PlayerAction::UseItem(potion.item.id));
    }
    plan
}

fn simulate_single_run(
    engine: &GameEngine,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> EngineResult<RunStats> {
    let mut character = prepare_character(engine, config)?;
    let starting_gold = character.gold;
    let mut stats = RunStats::default();

    if let Some(dungeon_id) = &config.dungeon_id {
        stats.dungeon_attempted = true;
        let entry = engine.start_dungeon_run(dungeon_id, &character, Utc::now())?;
        character = entry.character;
        let mut run = entry.run;
        while run.is_active() {
            let encounter = engine.dungeon_floor_encounter(&run, character.level, rng)?;
            let outcome = engine.resolve_floor_battle(
                &character,
                &run,
                &encounter,
                battle_plan(&character),
                rng,
            );
            stats.dungeon_turns += outcome.turns;
            let advance = engine.advance_dungeon_floor(&character, &run, &outcome)?;
            character = advance.reward.character;
            run = advance.run;
        }
        stats.floors_cleared = run.floors_completed;
        stats.dungeon_completed = run.is_complete();
        debug!(floors = run.floors_completed, completed = stats.dungeon_completed, "dungeon attempt");
    }

    let mut arena = ArenaStats::new();
    for _ in 0..config.arena_matches {
        character.health = character.max_health;
        let opponent =
            engine.generate_arena_opponent(character.level, arena.rating, Some(character.class), rng);
        let outcome = engine.resolve_battle(
            &character,
            &opponent.to_encounter(),
            battle_plan(&character),
            rng,
        );
        arena = engine.record_arena_match(&arena, outcome.is_victory(), &opponent).0;
        character = engine.apply_battle_outcome(&character, &outcome).character;
    }

    stats.arena_wins = arena.wins;
    stats.arena_losses = arena.losses;
    stats.final_rating = arena.rating;
    stats.highest_rating = arena.highest_rating;
    stats.best_streak = arena.best_streak;
    stats.tokens = arena.tokens;
    stats.gold_earned = character.gold.saturating_sub(starting_gold);
    stats.final_level = character.level;
    Ok(stats)
}
