use super::bestiary::Bestiary;
use crate::combat::Encounter;
use crate::core::constants::{
    BOSS_ENCOUNTER_MIN_LEVEL, LOWER_TIER_CHANCE, MAX_ENEMY_TIER, SAME_TIER_CHANCE,
};
use crate::core::error::ContentError;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Home tier for a player level: four levels per tier, 17 and up is tier 5.
pub fn tier_for_level(level: u32) -> u32 {
    match level {
        0..=4 => 1,
        5..=8 => 2,
        9..=12 => 3,
        13..=16 => 4,
        _ => MAX_ENEMY_TIER,
    }
}

/// 70% home tier, 20% one lower, 10% one higher, clamped to 1..=5.
pub fn roll_tier(level: u32, rng: &mut impl Rng) -> u32 {
    let home = tier_for_level(level);
    let roll: f64 = rng.gen();
    if roll < SAME_TIER_CHANCE {
        home
    } else if roll < SAME_TIER_CHANCE + LOWER_TIER_CHANCE {
        home.saturating_sub(1).max(1)
    } else {
        (home + 1).min(MAX_ENEMY_TIER)
    }
}

/// Random non-boss encounter scaled to `level`.
///
/// Tier 5 holds only bosses, so a roll landing there walks down to the
/// nearest tier that has regular enemies.
pub fn generate_encounter(
    bestiary: &Bestiary,
    level: u32,
    rng: &mut impl Rng,
) -> Result<Encounter, ContentError> {
    let rolled = roll_tier(level, rng);
    let candidates = (1..=rolled)
        .rev()
        .map(|tier| bestiary.regular_in_tier(tier))
        .find(|c| !c.is_empty())
        .ok_or(ContentError::EmptyTier(rolled))?;

    let template = candidates
        .choose(rng)
        .ok_or(ContentError::EmptyTier(rolled))?;
    debug!(
        template = %template.id,
        tier = template.tier,
        level,
        "generated encounter"
    );
    Ok(template.scaled_to(level, rng))
}

/// Boss encounter, only offered from level 15.
pub fn generate_boss_encounter(
    bestiary: &Bestiary,
    level: u32,
    rng: &mut impl Rng,
) -> Option<Encounter> {
    if level < BOSS_ENCOUNTER_MIN_LEVEL {
        return None;
    }
    let bosses = bestiary.bosses();
    let template = bosses.choose(rng)?;
    debug!(template = %template.id, level, "generated boss encounter");
    Some(template.scaled_to(level, rng))
}
