//! Turn-based battle resolution.
//!
//! A round is one player turn followed by one enemy turn. HP is checked
//! after every hit and every status tick, so a battle can end mid-round.

use super::status::TickReport;
use super::types::*;
use crate::core::config::EngineConfig;
use crate::core::constants::*;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
        was_crit: bool,
        special: bool,
    },
    PlayerDefend,
    SpecialNotReady,
    ItemUsed {
        item: String,
    },
    ItemMissing(Uuid),
    PlayerHealed {
        amount: u32,
    },
    EnemyAttack {
        damage: u32,
        ability: Option<String>,
    },
    EnemyAbility {
        ability: String,
    },
    PlayerDodged,
    Counterattack {
        damage: u32,
    },
    EffectApplied {
        on_player: bool,
        kind: StatusEffectType,
    },
    EffectResisted {
        kind: StatusEffectType,
    },
    Stunned {
        player: bool,
    },
    StatusTick {
        player: bool,
        damage: u32,
        healed: u32,
    },
    PlayerDied,
    EnemyDied,
    TurnLimitReached,
}

impl CombatEvent {
    fn describe(&self, player: &str, enemy: &str) -> String {
        match self {
            CombatEvent::PlayerAttack {
                damage,
                was_crit,
                special,
            } => {
                let verb = if *special { "unleashes a special attack on" } else { "hits" };
                let crit = if *was_crit { " Critical!" } else { "" };
                format!("{} {} {} for {} damage.{}", player, verb, enemy, damage, crit)
            }
            CombatEvent::PlayerDefend => format!("{} braces for the next attack.", player),
            CombatEvent::SpecialNotReady => "Special attack is still recharging.".to_string(),
            CombatEvent::ItemUsed { item } => format!("{} uses {}.", player, item),
            CombatEvent::ItemMissing(_) => "That item is not in the bag.".to_string(),
            CombatEvent::PlayerHealed { amount } => format!("{} recovers {} HP.", player, amount),
            CombatEvent::EnemyAttack { damage, ability } => match ability {
                Some(name) => format!("{} uses {} for {} damage.", enemy, name, damage),
                None => format!("{} attacks for {} damage.", enemy, damage),
            },
            CombatEvent::EnemyAbility { ability } => format!("{} uses {}.", enemy, ability),
            CombatEvent::PlayerDodged => format!("{} dodges the attack.", player),
            CombatEvent::Counterattack { damage } => {
                format!("{} counterattacks for {} damage.", player, damage)
            }
            CombatEvent::EffectApplied { on_player, kind } => {
                let target = if *on_player { player } else { enemy };
                format!("{} is affected by {}.", target, kind.name())
            }
            CombatEvent::EffectResisted { kind } => {
                format!("{} resists {}.", player, kind.name())
            }
            CombatEvent::Stunned { player: is_player } => {
                let who = if *is_player { player } else { enemy };
                format!("{} is stunned and loses the turn.", who)
            }
            CombatEvent::StatusTick {
                player: is_player,
                damage,
                healed,
            } => {
                let who = if *is_player { player } else { enemy };
                match (*damage, *healed) {
                    (d, 0) => format!("{} takes {} damage from status effects.", who, d),
                    (0, h) => format!("{} regenerates {} HP.", who, h),
                    (d, h) => format!("{} takes {} damage and regenerates {} HP.", who, d, h),
                }
            }
            CombatEvent::PlayerDied => format!("{} has fallen.", player),
            CombatEvent::EnemyDied => format!("{} is defeated!", enemy),
            CombatEvent::TurnLimitReached => "The battle drags on too long. Retreat!".to_string(),
        }
    }

    fn is_player_action(&self) -> bool {
        !matches!(
            self,
            CombatEvent::EnemyAttack { .. }
                | CombatEvent::EnemyAbility { .. }
                | CombatEvent::Stunned { player: false }
                | CombatEvent::StatusTick { player: false, .. }
                | CombatEvent::EnemyDied
        )
    }
}

/// `attack - defense`, never below 1.
pub fn basic_attack_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

/// Rolls a percentage chance. Zero never succeeds and consumes no randomness.
fn roll_percent(percent: u32, rng: &mut impl Rng) -> bool {
    percent > 0 && rng.gen_range(0..100) < percent
}

/// A battle in progress. Dropping it before it finishes has no side effects.
#[derive(Debug, Clone)]
pub struct Battle {
    player: PlayerCombatant,
    enemy: Combatant,
    phase: BattlePhase,
    turn: u32,
    defending: bool,
    special_ready_in: u32,
    special_cooldown: u32,
    crit_multiplier: f64,
    max_turns: u32,
    rewards: BattleRewards,
    consumed_items: Vec<Uuid>,
    log: Vec<CombatLogEntry>,
}

impl Battle {
    pub fn new(player: PlayerCombatant, encounter: &Encounter, config: &EngineConfig) -> Self {
        let special_cooldown = config
            .special_cooldown
            .saturating_sub(player.bonuses.special_cooldown_reduction)
            .max(MIN_SPECIAL_COOLDOWN);
        Self {
            enemy: Combatant::from_encounter(encounter),
            player,
            phase: BattlePhase::NotStarted,
            turn: 0,
            defending: false,
            special_ready_in: 0,
            special_cooldown,
            crit_multiplier: config.crit_multiplier,
            max_turns: config.max_battle_turns,
            rewards: encounter.rewards.clone(),
            consumed_items: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        if self.phase == BattlePhase::NotStarted {
            self.phase = BattlePhase::InProgress;
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &Combatant {
        &self.player.combatant
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    /// Rounds until the special attack is usable again.
    pub fn special_ready_in(&self) -> u32 {
        self.special_ready_in
    }

    /// Plays one full round and returns what happened.
    pub fn play_round(&mut self, action: PlayerAction, rng: &mut impl Rng) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }
        self.start();
        // a side that enters at 0 HP loses before anyone acts
        if self.check_end(&mut events) {
            self.record(&events);
            return events;
        }
        self.turn += 1;

        self.player_turn(action, rng, &mut events);
        if !self.is_finished() {
            self.enemy_turn(rng, &mut events);
        }
        if !self.is_finished() && self.turn >= self.max_turns {
            events.push(CombatEvent::TurnLimitReached);
            self.phase = BattlePhase::EnemyVictory;
        }

        self.record(&events);
        debug!(turn = self.turn, phase = ?self.phase, events = events.len(), "round resolved");
        events
    }

    fn record(&mut self, events: &[CombatEvent]) {
        let (player_name, enemy_name) = (&self.player.combatant.name, &self.enemy.name);
        for event in events {
            self.log.push(CombatLogEntry {
                turn: self.turn,
                message: event.describe(player_name, enemy_name),
                is_crit: matches!(event, CombatEvent::PlayerAttack { was_crit: true, .. }),
                is_player_action: event.is_player_action(),
            });
        }
    }

    /// Converts a finished battle into its outcome. Returns `None` while the
    /// battle is still running.
    pub fn into_outcome(self) -> Option<BattleOutcome> {
        if self.is_finished() {
            Some(self.finish())
        } else {
            None
        }
    }

    /// Anything short of a player victory counts as a defeat.
    fn finish(self) -> BattleOutcome {
        let result = if self.phase == BattlePhase::PlayerVictory {
            BattleResult::Victory
        } else {
            BattleResult::Defeat
        };
        BattleOutcome {
            result,
            remaining_hp: self.player.combatant.hp,
            enemy_remaining_hp: self.enemy.hp,
            turns: self.turn,
            rewards: (result == BattleResult::Victory).then_some(self.rewards),
            consumed_items: self.consumed_items,
            log: self.log,
        }
    }

    /// Sets a terminal phase if either side is down. Returns true if the
    /// battle is over.
    fn check_end(&mut self, events: &mut Vec<CombatEvent>) -> bool {
        if self.is_finished() {
            return true;
        }
        if !self.player.combatant.is_alive() {
            events.push(CombatEvent::PlayerDied);
            self.phase = BattlePhase::EnemyVictory;
            true
        } else if !self.enemy.is_alive() {
            events.push(CombatEvent::EnemyDied);
            self.phase = BattlePhase::PlayerVictory;
            true
        } else {
            false
        }
    }

    fn player_turn(&mut self, action: PlayerAction, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        self.defending = false;
        self.special_ready_in = self.special_ready_in.saturating_sub(1);

        if self.player.combatant.effects.is_stunned() {
            events.push(CombatEvent::Stunned { player: true });
        } else {
            match action {
                PlayerAction::Attack => self.player_strike(1, rng, events),
                PlayerAction::Defend => {
                    self.defending = true;
                    events.push(CombatEvent::PlayerDefend);
                }
                PlayerAction::Special => {
                    if self.special_ready_in == 0 {
                        self.player_strike(SPECIAL_ATTACK_MULTIPLIER, rng, events);
                        self.special_ready_in = self.special_cooldown;
                    } else {
                        events.push(CombatEvent::SpecialNotReady);
                        self.player_strike(1, rng, events);
                    }
                }
                PlayerAction::UseItem(id) => {
                    if !self.use_item(id, events) {
                        events.push(CombatEvent::ItemMissing(id));
                        self.player_strike(1, rng, events);
                    }
                }
            }
        }
        if self.check_end(events) {
            return;
        }

        let c = &mut self.player.combatant;
        let report = c.effects.tick_all(&mut c.hp, c.max_hp);
        push_tick(events, true, &report);
        self.check_end(events);
    }

    fn enemy_turn(&mut self, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        if self.enemy.effects.is_stunned() {
            events.push(CombatEvent::Stunned { player: false });
        } else {
            // the first ability whose roll succeeds is used
            let chosen = self
                .enemy
                .abilities
                .iter()
                .find(|ability| rng.gen::<f64>() < ability.chance)
                .cloned();
            match chosen {
                Some(ability) => self.enemy_ability(&ability, rng, events),
                None => {
                    self.enemy_hit(self.enemy.attack, None, rng, events);
                }
            }
        }
        if self.check_end(events) {
            return;
        }

        let report = self.enemy.effects.tick_all(&mut self.enemy.hp, self.enemy.max_hp);
        push_tick(events, false, &report);
        self.check_end(events);
    }

    /// Self-buffs land after the hit and tick at the end of this same turn,
    /// so a buff of duration n covers the enemy's next n - 1 attacks.
    fn enemy_ability(&mut self, ability: &Ability, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        let landed = if ability.damage > 0 {
            self.enemy_hit(ability.damage, Some(ability.name.as_str()), rng, events)
        } else {
            events.push(CombatEvent::EnemyAbility {
                ability: ability.name.clone(),
            });
            true
        };
        if self.is_finished() || !self.player.combatant.is_alive() || !self.enemy.is_alive() {
            return;
        }

        let Some(effect) = &ability.status_effect else {
            return;
        };
        if effect.is_debuff() {
            if !landed {
                return;
            }
            let resistance = self.player.bonuses.resistance(effect.kind);
            if roll_percent(resistance, rng) {
                events.push(CombatEvent::EffectResisted { kind: effect.kind });
            } else {
                self.player.combatant.effects.apply(effect.fresh());
                events.push(CombatEvent::EffectApplied {
                    on_player: true,
                    kind: effect.kind,
                });
            }
        } else {
            self.enemy.effects.apply(effect.fresh());
            events.push(CombatEvent::EffectApplied {
                on_player: false,
                kind: effect.kind,
            });
        }
    }

    /// Enemy damaging hit against the player. Returns false if dodged.
    fn enemy_hit(
        &mut self,
        raw_attack: u32,
        ability: Option<&str>,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if roll_percent(self.player.bonuses.dodge_chance, rng) {
            events.push(CombatEvent::PlayerDodged);
            return false;
        }

        let attack = self.enemy.effective_attack(raw_attack);
        let mut defense = self.player.combatant.effective_defense(self.defending);
        let defense_percent = self.player.bonuses.defense_percent;
        if defense_percent > 0 {
            defense = defense.saturating_mul(100 + defense_percent) / 100;
        }
        let damage = basic_attack_damage(attack, defense);
        self.player.combatant.take_damage(damage);
        events.push(CombatEvent::EnemyAttack {
            damage,
            ability: ability.map(str::to_string),
        });

        if self.player.combatant.is_alive() && roll_percent(self.player.bonuses.counterattack_percent, rng) {
            let counter = basic_attack_damage(
                self.player.combatant.effective_attack(self.player.combatant.attack),
                self.enemy.effective_defense(false),
            );
            self.enemy.take_damage(counter);
            events.push(CombatEvent::Counterattack { damage: counter });
        }
        true
    }

    fn player_strike(&mut self, multiplier: u32, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        let attack = self
            .player
            .combatant
            .effective_attack(self.player.combatant.attack)
            .saturating_mul(multiplier);
        let mut damage = basic_attack_damage(attack, self.enemy.effective_defense(false));

        let damage_percent = self.player.bonuses.damage_percent;
        if damage_percent > 0 {
            damage = damage.saturating_mul(100 + damage_percent) / 100;
        }
        let was_crit = roll_percent(self.player.crit_chance, rng);
        if was_crit {
            damage = (damage as f64 * self.crit_multiplier) as u32;
        }
        let damage = damage.max(1);

        self.enemy.take_damage(damage);
        events.push(CombatEvent::PlayerAttack {
            damage,
            was_crit,
            special: multiplier > 1,
        });

        let lifesteal = damage.saturating_mul(self.player.bonuses.lifesteal_percent) / 100;
        if lifesteal > 0 {
            let healed = self.player.combatant.heal(lifesteal);
            if healed > 0 {
                events.push(CombatEvent::PlayerHealed { amount: healed });
            }
        }
    }

    /// Uses one unit from the battle bag. Returns false if the id is unknown.
    fn use_item(&mut self, id: Uuid, events: &mut Vec<CombatEvent>) -> bool {
        let Some(pos) = self.player.bag.iter().position(|s| s.item.id == id && s.quantity > 0) else {
            return false;
        };
        let item = self.player.bag[pos].item.clone();
        let Some(effect) = item.consumable.as_ref() else {
            return false;
        };
        events.push(CombatEvent::ItemUsed {
            item: item.name.clone(),
        });

        if let Some(amount) = effect.heal_amount {
            let healed = self.player.combatant.heal(amount);
            events.push(CombatEvent::PlayerHealed { amount: healed });
        }
        if !effect.cures.is_empty() {
            self.player.combatant.effects.cure(&effect.cures);
        }
        let boost = effect.boost_total();
        if boost > 0 {
            let duration = effect.temp_boost_duration.unwrap_or(1);
            self.player.combatant.effects.apply(StatusEffect::new(
                StatusEffectType::Strengthen,
                duration,
                boost,
                &item.name,
            ));
            events.push(CombatEvent::EffectApplied {
                on_player: true,
                kind: StatusEffectType::Strengthen,
            });
        }
        if let Some(power) = effect.battle_damage {
            let damage = basic_attack_damage(
                power,
                self.enemy.effective_defense(false) / ITEM_DAMAGE_DEFENSE_DIVISOR,
            );
            self.enemy.take_damage(damage);
            events.push(CombatEvent::PlayerAttack {
                damage,
                was_crit: false,
                special: false,
            });
        }

        let stack = &mut self.player.bag[pos];
        stack.quantity -= 1;
        if stack.quantity == 0 {
            self.player.bag.remove(pos);
        }
        self.consumed_items.push(id);
        true
    }
}

fn push_tick(events: &mut Vec<CombatEvent>, player: bool, report: &TickReport) {
    if report.damage > 0 || report.healed > 0 {
        events.push(CombatEvent::StatusTick {
            player,
            damage: report.damage,
            healed: report.healed,
        });
    }
}

/// Runs a battle to completion. Once `actions` runs out the player attacks.
pub fn resolve_battle(
    player: PlayerCombatant,
    encounter: &Encounter,
    actions: impl IntoIterator<Item = PlayerAction>,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> BattleOutcome {
    let mut battle = Battle::new(player, encounter, config);
    let mut actions = actions.into_iter();
    battle.start();
    while !battle.is_finished() {
        let action = actions.next().unwrap_or(PlayerAction::Attack);
        battle.play_round(action, rng);
    }

    debug!(turns = battle.turn(), phase = ?battle.phase(), "battle resolved");
    battle.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::StatusLedger;
    use crate::items::{catalog, ItemStack};
    use crate::skills::SkillBonusSummary;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(hp: u32, attack: u32, defense: u32) -> PlayerCombatant {
        PlayerCombatant {
            combatant: Combatant {
                name: "Hero".into(),
                hp,
                max_hp: hp,
                attack,
                defense,
                abilities: vec![],
                effects: StatusLedger::new(),
            },
            bonuses: SkillBonusSummary::default(),
            crit_chance: 0,
            bag: vec![],
        }
    }

    fn encounter(hp: u32, attack: u32, defense: u32, abilities: Vec<Ability>) -> Encounter {
        Encounter {
            id: Uuid::new_v4(),
            enemy_name: "Dummy".into(),
            description: String::new(),
            level: 1,
            hp,
            max_hp: hp,
            attack,
            defense,
            is_boss: false,
            abilities,
            rewards: BattleRewards {
                xp: 20,
                gold: 7,
                items: vec![],
            },
            loot_table: None,
            pre_battle_text: None,
            victory_text: None,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_minimum_damage_is_one() {
        assert_eq!(basic_attack_damage(15, 20), 1);
        assert_eq!(basic_attack_damage(20, 20), 1);
        assert_eq!(basic_attack_damage(25, 20), 5);
    }

    #[test]
    fn test_weak_attacker_deals_one_per_round() {
        let mut battle = Battle::new(player(100, 15, 50), &encounter(10, 1, 20, vec![]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::PlayerAttack {
            damage: 1,
            was_crit: false,
            special: false
        }));
        assert_eq!(battle.enemy().hp, 9);
    }

    #[test]
    fn test_battle_starts_not_started() {
        let battle = Battle::new(player(100, 10, 5), &encounter(10, 1, 0, vec![]), &EngineConfig::default());
        assert_eq!(battle.phase(), BattlePhase::NotStarted);
        assert!(battle.into_outcome().is_none());
    }

    #[test]
    fn test_enemy_dies_before_acting() {
        let mut battle = Battle::new(player(100, 50, 5), &encounter(10, 99, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert_eq!(battle.phase(), BattlePhase::PlayerVictory);
        assert!(!events.iter().any(|e| matches!(e, CombatEvent::EnemyAttack { .. })));
        assert_eq!(battle.player().hp, 100);
        let outcome = battle.into_outcome().unwrap();
        assert!(outcome.is_victory());
        assert_eq!(outcome.rewards.map(|r| r.xp), Some(20));
        assert_eq!(outcome.turns, 1);
    }

    #[test]
    fn test_defend_doubles_defense() {
        let mut battle = Battle::new(player(100, 10, 5), &encounter(500, 20, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::Attack, &mut rng);
        assert_eq!(battle.player().hp, 85);
        battle.play_round(PlayerAction::Defend, &mut rng);
        assert_eq!(battle.player().hp, 75);
    }

    #[test]
    fn test_special_cooldown() {
        let mut battle = Battle::new(player(1000, 20, 500), &encounter(1000, 1, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Special, &mut rng);
        assert!(events.contains(&CombatEvent::PlayerAttack {
            damage: 40,
            was_crit: false,
            special: true
        }));
        let events = battle.play_round(PlayerAction::Special, &mut rng);
        assert!(events.contains(&CombatEvent::SpecialNotReady));
        battle.play_round(PlayerAction::Attack, &mut rng);
        let events = battle.play_round(PlayerAction::Special, &mut rng);
        assert!(events.iter().any(|e| matches!(e, CombatEvent::PlayerAttack { special: true, .. })));
    }

    #[test]
    fn test_stun_skips_enemy_turn() {
        let stun = Ability::new("Shock", 0, 1.0).with_effect(StatusEffectType::Stun, 1, 0);
        let mut battle = Battle::new(player(100, 1, 0), &encounter(1000, 10, 50, vec![stun]), &EngineConfig::default());
        let mut rng = rng();
        // enemy stuns the player on round one
        battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(battle.player().effects.is_stunned());
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::Stunned { player: true }));
    }

    #[test]
    fn test_zero_damage_buff_goes_to_enemy() {
        let regrowth = Ability::new("Regrowth", 0, 1.0).with_effect(StatusEffectType::Regenerate, 3, 5);
        let mut battle = Battle::new(player(100, 20, 500), &encounter(100, 1, 0, vec![regrowth]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::Attack, &mut rng);
        // 20 damage, then 5 regenerated on the enemy's tick
        assert_eq!(battle.enemy().hp, 85);
        assert!(battle.player().effects.is_empty());
        assert_eq!(battle.enemy().effects.len(), 1);
    }

    #[test]
    fn test_poison_from_ability_ticks_on_player() {
        let bite = Ability::new("Bite", 8, 1.0).with_effect(StatusEffectType::Poison, 3, 3);
        let mut battle = Battle::new(player(100, 1, 0), &encounter(1000, 5, 50, vec![bite]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::Attack, &mut rng);
        assert_eq!(battle.player().hp, 92);
        battle.play_round(PlayerAction::Defend, &mut rng);
        // poison tick 3 at the player's turn end, then another bite for 8 against doubled defense 0
        assert_eq!(battle.player().hp, 92 - 3 - 8);
        assert_eq!(battle.player().effects.len(), 2);
    }

    #[test]
    fn test_status_resistance_blocks_debuff() {
        let bite = Ability::new("Bite", 8, 1.0).with_effect(StatusEffectType::Poison, 3, 3);
        let mut p = player(100, 1, 0);
        p.bonuses.status_resistance.insert(StatusEffectType::Poison, 100);
        let mut battle = Battle::new(p, &encounter(1000, 5, 50, vec![bite]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::EffectResisted {
            kind: StatusEffectType::Poison
        }));
        assert!(battle.player().effects.is_empty());
    }

    #[test]
    fn test_guaranteed_crit_and_lifesteal() {
        let mut p = player(50, 20, 500);
        p.combatant.hp = 10;
        p.crit_chance = 100;
        p.bonuses.lifesteal_percent = 50;
        let mut battle = Battle::new(p, &encounter(1000, 1, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::PlayerAttack {
            damage: 30,
            was_crit: true,
            special: false
        }));
        // 10 + 15 lifesteal, then the enemy's minimum hit
        assert_eq!(battle.player().hp, 24);
    }

    #[test]
    fn test_guaranteed_dodge() {
        let mut p = player(50, 1, 0);
        p.bonuses.dodge_chance = 100;
        let mut battle = Battle::new(p, &encounter(1000, 30, 50, vec![]), &EngineConfig::default());
        let mut rng = rng();
        let events = battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::PlayerDodged));
        assert_eq!(battle.player().hp, 50);
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let mut p = player(100, 1, 500);
        p.combatant.hp = 40;
        let potion = catalog::health_potion();
        let id = potion.id;
        p.bag.push(ItemStack {
            item: potion,
            quantity: 1,
        });
        let mut battle = Battle::new(p, &encounter(1000, 1, 50, vec![]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::UseItem(id), &mut rng);
        // healed 30, then took the minimum 1 damage
        assert_eq!(battle.player().hp, 69);
        let events = battle.play_round(PlayerAction::UseItem(id), &mut rng);
        assert!(events.contains(&CombatEvent::ItemMissing(id)));
    }

    #[test]
    fn test_battle_scroll_ignores_most_defense() {
        let mut p = player(100, 1, 500);
        let scroll = catalog::battle_scroll();
        let id = scroll.id;
        p.bag.push(ItemStack {
            item: scroll,
            quantity: 1,
        });
        let mut battle = Battle::new(p, &encounter(200, 1, 20, vec![]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::UseItem(id), &mut rng);
        // 40 - 20/4
        assert_eq!(battle.enemy().hp, 165);
    }

    #[test]
    fn test_turn_limit_is_defeat() {
        let config = EngineConfig {
            max_battle_turns: 5,
            ..Default::default()
        };
        let outcome = resolve_battle(
            player(1000, 1, 500),
            &encounter(1000, 1, 500, vec![]),
            Vec::new(),
            &config,
            &mut rng(),
        );
        assert_eq!(outcome.result, BattleResult::Defeat);
        assert_eq!(outcome.turns, 5);
        assert!(outcome.rewards.is_none());
        assert!(outcome.remaining_hp > 0);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let bite = Ability::new("Bite", 12, 0.3).with_effect(StatusEffectType::Bleed, 2, 2);
        let enc = encounter(80, 14, 3, vec![bite]);
        let mut p = player(120, 16, 6);
        p.crit_chance = 10;
        let a = resolve_battle(p.clone(), &enc, Vec::new(), &EngineConfig::default(), &mut rng());
        let b = resolve_battle(p, &enc, Vec::new(), &EngineConfig::default(), &mut rng());
        assert_eq!(a.result, b.result);
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.remaining_hp, b.remaining_hp);
        assert_eq!(a.log.len(), b.log.len());
    }

    #[test]
    fn test_finished_battle_ignores_more_rounds() {
        let mut battle = Battle::new(player(100, 50, 5), &encounter(10, 1, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();
        battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(battle.play_round(PlayerAction::Attack, &mut rng).is_empty());
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn test_player_at_zero_hp_never_acts() {
        let config = EngineConfig::default();
        let mut battle = Battle::new(player(0, 50, 5), &encounter(1, 1, 0, vec![]), &config);
        let events = battle.play_round(PlayerAction::Attack, &mut rng());
        assert_eq!(events, vec![CombatEvent::PlayerDied]);
        assert_eq!(battle.phase(), BattlePhase::EnemyVictory);
        assert_eq!(battle.enemy().hp, 1);

        let outcome = resolve_battle(player(0, 50, 5), &encounter(1, 1, 0, vec![]), Vec::new(), &config, &mut rng());
        assert_eq!(outcome.result, BattleResult::Defeat);
        assert_eq!(outcome.turns, 0);
        assert_eq!(outcome.enemy_remaining_hp, 1);
        assert!(outcome.rewards.is_none());
        assert_eq!(outcome.log.len(), 1);
    }

    #[test]
    fn test_player_effect_expires_after_its_last_turn() {
        let mut p = player(100, 1, 0);
        p.combatant
            .effects
            .apply(StatusEffect::new(StatusEffectType::Poison, 2, 3, "trap"));
        let mut battle = Battle::new(p, &encounter(1000, 1, 0, vec![]), &EngineConfig::default());
        let mut rng = rng();

        battle.play_round(PlayerAction::Attack, &mut rng);
        assert_eq!(battle.player().effects.effects()[0].duration, 1);
        assert_eq!(battle.player().hp, 96);

        battle.play_round(PlayerAction::Attack, &mut rng);
        assert!(!battle.player().effects.has(StatusEffectType::Poison));
        assert_eq!(battle.player().hp, 92);

        battle.play_round(PlayerAction::Attack, &mut rng);
        assert_eq!(battle.player().hp, 91);
    }

    #[test]
    fn test_enemy_self_buff_covers_next_attack() {
        let frenzy = Ability::new("Frenzy", 10, 1.0).with_effect(StatusEffectType::Strengthen, 2, 5);
        let mut battle = Battle::new(
            player(500, 1, 0),
            &encounter(1000, 10, 0, vec![frenzy]),
            &EngineConfig::default(),
        );
        let mut rng = rng();

        let hit = |events: Vec<CombatEvent>| {
            events.into_iter().find_map(|e| match e {
                CombatEvent::EnemyAttack { damage, .. } => Some(damage),
                _ => None,
            })
        };
        assert_eq!(hit(battle.play_round(PlayerAction::Attack, &mut rng)), Some(10));
        assert_eq!(battle.enemy().effects.len(), 1);
        assert_eq!(battle.enemy().effects.effects()[0].duration, 1);

        assert_eq!(hit(battle.play_round(PlayerAction::Attack, &mut rng)), Some(15));
        // the first buff expired, the second was just applied and ticked once
        assert_eq!(battle.enemy().effects.len(), 1);
        assert_eq!(battle.enemy().effects.effects()[0].duration, 1);
    }

    #[test]
    fn test_lifesteal_saturates() {
        let mut p = player(100, u32::MAX, 0);
        p.combatant.hp = 50;
        p.bonuses.lifesteal_percent = 200;
        let mut battle = Battle::new(p, &encounter(u32::MAX, 1, 0, vec![]), &EngineConfig::default());
        let events = battle.play_round(PlayerAction::Attack, &mut rng());
        assert!(events.contains(&CombatEvent::PlayerHealed { amount: 50 }));
        assert!(events.contains(&CombatEvent::EnemyDied));
        assert_eq!(battle.player().hp, 100);
    }
}
