//! Dungeon run sequencing: entering, fighting floor by floor, and banking.

use super::types::{Dungeon, DungeonEntry, DungeonFloor, DungeonProgress, DungeonRunState, RunStatus};
use crate::character::{apply_battle_outcome, spend_energy, Character, DerivedStats, RewardResult};
use crate::combat::{BattleOutcome, BattleRewards, Encounter};
use crate::core::error::{ContentError, EngineError, EngineResult};
use crate::encounters::Bestiary;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

/// Opens a run. Traveling HP starts at the character's effective max HP.
pub fn start_run(dungeon: &Dungeon, character: &Character) -> EngineResult<DungeonRunState> {
    if character.level < dungeon.level_requirement {
        warn!(
            dungeon = %dungeon.id,
            level = character.level,
            required = dungeon.level_requirement,
            "dungeon refused"
        );
        return Err(EngineError::LevelTooLow {
            level: character.level,
            required: dungeon.level_requirement,
        });
    }

    if dungeon.floors.is_empty() {
        return Err(ContentError::EmptyDungeon(dungeon.id.clone()).into());
    }

    let max_hp = DerivedStats::for_character(character).max_health;
    info!(dungeon = %dungeon.id, hp = max_hp, "dungeon run started");
    Ok(DungeonRunState {
        dungeon_id: dungeon.id.clone(),
        current_floor: 0,
        hp: max_hp,
        max_hp,
        total_floors: dungeon.total_floors(),
        status: RunStatus::Active,
        floors_completed: 0,
        total_gold: 0,
        total_xp: 0,
        items_collected: Vec::new(),
    })
}

/// Opens a run and charges the dungeon's energy cost. Level and content
/// checks come first, so a refused entry never costs energy.
pub fn enter_dungeon(
    dungeon: &Dungeon,
    character: &Character,
    now: DateTime<Utc>,
) -> EngineResult<DungeonEntry> {
    let run = start_run(dungeon, character)?;
    let character = spend_energy(character, dungeon.energy_cost, now).map_err(|err| {
        warn!(dungeon = %dungeon.id, cost = dungeon.energy_cost, "dungeon refused: {err}");
        err
    })?;
    Ok(DungeonEntry { character, run })
}

/// The floor the run is about to fight, if it is still going.
pub fn current_floor<'a>(dungeon: &'a Dungeon, run: &DungeonRunState) -> Option<&'a DungeonFloor> {
    if !run.is_active() {
        return None;
    }
    dungeon.floor(run.current_floor)
}

/// Scales the current floor's template to the player's level.
pub fn floor_encounter(
    bestiary: &Bestiary,
    dungeon: &Dungeon,
    run: &DungeonRunState,
    player_level: u32,
    rng: &mut impl Rng,
) -> EngineResult<Encounter> {
    let floor = current_floor(dungeon, run).ok_or(EngineError::RunNotActive)?;
    let template = bestiary.get(&floor.enemy_template_id)?;

    let mut encounter = template.scaled_to(player_level, rng);
    if floor.is_boss_floor {
        encounter.is_boss = true;
    }
    encounter.pre_battle_text = floor.flavor_text.clone();
    debug!(
        dungeon = %dungeon.id,
        floor = floor.floor_number,
        enemy = %encounter.enemy_name,
        "floor encounter"
    );
    Ok(encounter)
}

/// Records the result of the current floor's fight.
///
/// A win carries `remaining_hp` forward and banks `rewards`; clearing the
/// last floor completes the run. A loss ends it.
pub fn complete_floor(
    run: &DungeonRunState,
    victory: bool,
    remaining_hp: u32,
    rewards: Option<&BattleRewards>,
) -> EngineResult<DungeonRunState> {
    if !run.is_active() {
        return Err(EngineError::RunNotActive);
    }

    let mut next = run.clone();
    if !victory {
        next.hp = 0;
        next.status = RunStatus::Defeated;
        info!(
            dungeon = %next.dungeon_id,
            floors = next.floors_completed,
            "dungeon run defeated"
        );
        return Ok(next);
    }

    next.hp = remaining_hp.min(next.max_hp);
    next.floors_completed += 1;
    next.current_floor += 1;
    if let Some(rewards) = rewards {
        next.bank(rewards);
    }
    if next.floors_completed >= next.total_floors {
        next.status = RunStatus::Completed;
        info!(
            dungeon = %next.dungeon_id,
            gold = next.total_gold,
            xp = next.total_xp,
            "dungeon completed"
        );
    }
    Ok(next)
}

/// Drops an unfinished run. Rewards already banked on the character stay.
pub fn abandon_run(run: DungeonRunState) {
    info!(
        dungeon = %run.dungeon_id,
        floors = run.floors_completed,
        "dungeon run abandoned"
    );
}

/// A character and run after one floor has been fought.
#[derive(Debug, Clone)]
pub struct FloorAdvance {
    pub reward: RewardResult,
    pub run: DungeonRunState,
}

/// Banks a floor's battle outcome on the character and advances the run.
pub fn advance_dungeon_floor(
    character: &Character,
    run: &DungeonRunState,
    outcome: &BattleOutcome,
) -> EngineResult<FloorAdvance> {
    let next_run = complete_floor(
        run,
        outcome.is_victory(),
        outcome.remaining_hp,
        outcome.rewards.as_ref(),
    )?;
    Ok(FloorAdvance {
        reward: apply_battle_outcome(character, outcome),
        run: next_run,
    })
}

impl DungeonProgress {
    pub fn record_run_started(&self) -> Self {
        let mut next = self.clone();
        next.total_runs = next.total_runs.saturating_add(1);
        next
    }

    /// Folds a run transition into lifetime stats. Call with the run state
    /// after each [`complete_floor`].
    pub fn record_floor(&self, before: &DungeonRunState, after: &DungeonRunState) -> Self {
        let mut next = self.clone();
        let cleared = after.floors_completed.saturating_sub(before.floors_completed) as u32;
        next.total_floors_cleared = next.total_floors_cleared.saturating_add(cleared);

        let best = next.best_floor.entry(after.dungeon_id.clone()).or_insert(0);
        *best = (*best).max(after.floors_completed as u32);

        if after.is_complete() {
            next.completed_dungeons.insert(after.dungeon_id.clone());
        }
        next
    }
}
