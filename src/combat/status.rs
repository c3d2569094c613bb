//! Timed status effects attached to one combatant.

use super::types::{StatusEffect, StatusEffectType};
use serde::{Deserialize, Serialize};

/// What happened when a ledger ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub damage: u32,
    pub healed: u32,
    pub expired: Vec<StatusEffectType>,
}

/// Ordered list of active effects. Same-type effects stack as separate
/// entries, each with its own duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusLedger {
    effects: Vec<StatusEffect>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect. Effects with no duration left are ignored.
    pub fn apply(&mut self, effect: StatusEffect) {
        if effect.duration > 0 {
            self.effects.push(effect);
        }
    }

    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has(&self, kind: StatusEffectType) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn is_stunned(&self) -> bool {
        self.has(StatusEffectType::Stun)
    }

    /// Strengthen minus weaken.
    pub fn attack_modifier(&self) -> i64 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                StatusEffectType::Strengthen => e.value as i64,
                StatusEffectType::Weaken => -(e.value as i64),
                _ => 0,
            })
            .sum()
    }

    pub fn shield_bonus(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == StatusEffectType::Shield)
            .fold(0u32, |acc, e| acc.saturating_add(e.value))
    }

    /// Removes every effect of the given types. Returns how many were removed.
    pub fn cure(&mut self, kinds: &[StatusEffectType]) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !kinds.contains(&e.kind));
        before - self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Runs one owner turn-end: applies each effect's per-turn value in order,
    /// decrements every duration by one, and drops expired entries.
    pub fn tick_all(&mut self, hp: &mut u32, max_hp: u32) -> TickReport {
        let mut report = TickReport::default();

        for effect in &mut self.effects {
            match effect.kind {
                StatusEffectType::Poison | StatusEffectType::Burn | StatusEffectType::Bleed => {
                    let dealt = effect.value.min(*hp);
                    *hp -= dealt;
                    report.damage += dealt;
                }
                StatusEffectType::Regenerate => {
                    let healed = effect.value.min(max_hp.saturating_sub(*hp));
                    *hp += healed;
                    report.healed += healed;
                }
                StatusEffectType::Stun
                | StatusEffectType::Shield
                | StatusEffectType::Strengthen
                | StatusEffectType::Weaken => {}
            }
            effect.duration = effect.duration.saturating_sub(1);
            if effect.duration == 0 {
                report.expired.push(effect.kind);
            }
        }

        self.effects.retain(|e| e.duration > 0);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: StatusEffectType, duration: u32, value: u32) -> StatusEffect {
        StatusEffect::new(kind, duration, value, "test")
    }

    #[test]
    fn test_poison_ticks_and_expires() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Poison, 2, 3));
        let mut hp = 20;

        let report = ledger.tick_all(&mut hp, 20);
        assert_eq!(hp, 17);
        assert_eq!(report.damage, 3);
        assert_eq!(ledger.effects()[0].duration, 1);

        let report = ledger.tick_all(&mut hp, 20);
        assert_eq!(hp, 14);
        assert_eq!(report.expired, vec![StatusEffectType::Poison]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_duration_counts_owner_turns_exactly() {
        for duration in 1..=5 {
            let mut ledger = StatusLedger::new();
            ledger.apply(effect(StatusEffectType::Burn, duration, 1));
            let mut hp = 100;
            for turn in 1..duration {
                let report = ledger.tick_all(&mut hp, 100);
                assert!(report.expired.is_empty(), "expired early at turn {}", turn);
                assert_eq!(ledger.effects()[0].duration, duration - turn);
            }
            let report = ledger.tick_all(&mut hp, 100);
            assert_eq!(report.expired, vec![StatusEffectType::Burn]);
            assert!(ledger.is_empty());
            assert_eq!(hp, 100 - duration);

            ledger.tick_all(&mut hp, 100);
            assert_eq!(hp, 100 - duration);
        }
    }

    #[test]
    fn test_same_type_effects_stack() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Burn, 3, 4));
        ledger.apply(effect(StatusEffectType::Burn, 1, 4));
        assert_eq!(ledger.len(), 2);
        let mut hp = 50;
        ledger.tick_all(&mut hp, 50);
        assert_eq!(hp, 42);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Regenerate, 3, 5));
        let mut hp = 98;
        let report = ledger.tick_all(&mut hp, 100);
        assert_eq!(hp, 100);
        assert_eq!(report.healed, 2);
    }

    #[test]
    fn test_damage_never_wraps() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Bleed, 2, 10));
        let mut hp = 4;
        ledger.tick_all(&mut hp, 100);
        assert_eq!(hp, 0);
    }

    #[test]
    fn test_attack_modifier_and_shield() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Strengthen, 3, 5));
        ledger.apply(effect(StatusEffectType::Weaken, 3, 2));
        ledger.apply(effect(StatusEffectType::Shield, 2, 4));
        ledger.apply(effect(StatusEffectType::Shield, 2, 1));
        assert_eq!(ledger.attack_modifier(), 3);
        assert_eq!(ledger.shield_bonus(), 5);
    }

    #[test]
    fn test_stun_for_one_turn() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Stun, 1, 0));
        assert!(ledger.is_stunned());
        let mut hp = 10;
        ledger.tick_all(&mut hp, 10);
        assert!(!ledger.is_stunned());
        assert_eq!(hp, 10);
    }

    #[test]
    fn test_zero_duration_is_ignored() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Poison, 0, 5));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_cure_removes_listed_types() {
        let mut ledger = StatusLedger::new();
        ledger.apply(effect(StatusEffectType::Poison, 3, 3));
        ledger.apply(effect(StatusEffectType::Bleed, 3, 3));
        ledger.apply(effect(StatusEffectType::Burn, 3, 3));
        let removed = ledger.cure(&[StatusEffectType::Poison, StatusEffectType::Bleed]);
        assert_eq!(removed, 2);
        assert!(ledger.has(StatusEffectType::Burn));
        assert!(!ledger.has(StatusEffectType::Poison));
    }
}
