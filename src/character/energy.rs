//! Energy: the pool dungeon runs and other activities draw from.
//!
//! Energy refills one point per [`ENERGY_REGEN_SECONDS`] while below the
//! maximum. The regen clock only runs while the pool is short; a full pool
//! has no clock. Every operation here settles pending regen against `now`
//! before doing anything else.

use super::types::Character;
use crate::core::constants::*;
use crate::core::error::{EngineError, EngineResult};
use crate::skills::aggregate_skill_bonuses;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Base maximum plus skill energy bonuses.
pub fn effective_max_energy(character: &Character) -> u32 {
    character
        .max_energy
        .saturating_add(aggregate_skill_bonuses(character).energy_bonus)
}

/// Credits every whole regen interval elapsed since the clock started.
pub fn regenerate_energy(character: &Character, now: DateTime<Utc>) -> Character {
    let mut next = character.clone();
    let max = effective_max_energy(character);
    if next.energy >= max {
        next.last_energy_regen = None;
        return next;
    }
    let Some(since) = next.last_energy_regen else {
        next.last_energy_regen = Some(now);
        return next;
    };

    let intervals = (now - since).num_seconds().max(0) / ENERGY_REGEN_SECONDS;
    if intervals == 0 {
        return next;
    }
    let gained = u32::try_from(intervals).unwrap_or(u32::MAX);
    next.energy = next.energy.saturating_add(gained).min(max);
    next.last_energy_regen = if next.energy >= max {
        None
    } else {
        Some(since + Duration::seconds(intervals * ENERGY_REGEN_SECONDS))
    };
    debug!(name = %next.name, energy = next.energy, max, "energy regenerated");
    next
}

/// Takes `amount` energy, or refuses if the pool cannot cover it.
pub fn spend_energy(character: &Character, amount: u32, now: DateTime<Utc>) -> EngineResult<Character> {
    let mut next = regenerate_energy(character, now);
    if next.energy < amount {
        return Err(EngineError::InsufficientEnergy {
            have: next.energy,
            need: amount,
        });
    }
    next.energy -= amount;
    if next.last_energy_regen.is_none() && next.energy < effective_max_energy(&next) {
        next.last_energy_regen = Some(now);
    }
    Ok(next)
}

/// Adds energy up to the effective maximum, e.g. for finishing a quest.
pub fn restore_energy(character: &Character, amount: u32, now: DateTime<Utc>) -> Character {
    let mut next = regenerate_energy(character, now);
    let max = effective_max_energy(&next);
    next.energy = next.energy.saturating_add(amount).min(max);
    if next.energy >= max {
        next.last_energy_regen = None;
    }
    next
}

/// Seconds until the next point arrives, or `None` when the pool is full.
pub fn seconds_until_next_energy(character: &Character, now: DateTime<Utc>) -> Option<i64> {
    let settled = regenerate_energy(character, now);
    let since = settled.last_energy_regen?;
    Some((ENERGY_REGEN_SECONDS - (now - since).num_seconds()).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Background, CharacterClass};
    use chrono::TimeZone;

    fn at(hours: i64, minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + Duration::hours(hours)
            + Duration::minutes(minutes)
    }

    fn scout() -> Character {
        Character::new("Wren".to_string(), CharacterClass::Ranger, Background::Explorer)
    }

    #[test]
    fn test_spend_takes_energy_and_starts_clock() {
        let c = spend_energy(&scout(), 3, at(0, 0)).unwrap();
        assert_eq!(c.energy, 2);
        assert_eq!(c.last_energy_regen, Some(at(0, 0)));
    }

    #[test]
    fn test_spend_refused_when_short() {
        let mut c = scout();
        c.energy = 2;
        let err = spend_energy(&c, 3, at(0, 0)).unwrap_err();
        assert_eq!(err, EngineError::InsufficientEnergy { have: 2, need: 3 });
        assert!(err.is_refusal());
    }

    #[test]
    fn test_regen_one_point_per_hour() {
        let c = spend_energy(&scout(), 4, at(0, 0)).unwrap();
        assert_eq!(regenerate_energy(&c, at(0, 59)).energy, 1);

        let later = regenerate_energy(&c, at(2, 30));
        assert_eq!(later.energy, 3);
        // the half hour already elapsed carries over
        assert_eq!(later.last_energy_regen, Some(at(2, 0)));
        assert_eq!(seconds_until_next_energy(&later, at(2, 30)), Some(1800));
    }

    #[test]
    fn test_regen_stops_at_max() {
        let c = spend_energy(&scout(), 2, at(0, 0)).unwrap();
        let full = regenerate_energy(&c, at(10, 0));
        assert_eq!(full.energy, 5);
        assert_eq!(full.last_energy_regen, None);
        assert_eq!(seconds_until_next_energy(&full, at(10, 0)), None);
    }

    #[test]
    fn test_regen_pays_for_a_spend() {
        let c = spend_energy(&scout(), 5, at(0, 0)).unwrap();
        assert!(spend_energy(&c, 1, at(0, 30)).is_err());
        let c = spend_energy(&c, 1, at(1, 0)).unwrap();
        assert_eq!(c.energy, 0);
    }

    #[test]
    fn test_restore_capped_at_max() {
        let c = spend_energy(&scout(), 1, at(0, 0)).unwrap();
        let c = restore_energy(&c, 3, at(0, 10));
        assert_eq!(c.energy, 5);
        assert_eq!(c.last_energy_regen, None);
    }

    #[test]
    fn test_skill_bonus_raises_max() {
        let mut c = scout();
        c.skills.unlocked.insert("ranger_util_2".to_string());
        assert_eq!(effective_max_energy(&c), 15);

        let c = restore_energy(&c, 20, at(0, 0));
        assert_eq!(c.energy, 15);
        let drained = spend_energy(&c, 15, at(0, 0)).unwrap();
        assert_eq!(regenerate_energy(&drained, at(7, 0)).energy, 7);
    }

    #[test]
    fn test_clock_running_backwards_grants_nothing() {
        let c = spend_energy(&scout(), 2, at(5, 0)).unwrap();
        let c = regenerate_energy(&c, at(1, 0));
        assert_eq!(c.energy, 3);
        assert_eq!(c.last_energy_regen, Some(at(5, 0)));
    }
}
