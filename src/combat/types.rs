use super::status::StatusLedger;
use crate::character::{Character, DerivedStats};
use crate::core::constants::BATTLE_HARDENED_CRIT_PERCENT;
use crate::items::{ItemStack, LootTable};
use crate::skills::{aggregate_skill_bonuses, SkillBonusSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Status effects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusEffectType {
    /// Damage each turn
    Poison,
    /// Damage each turn
    Burn,
    /// Owner skips their action
    Stun,
    /// Damage each turn
    Bleed,
    /// Adds to defense
    Shield,
    /// Adds to attack
    Strengthen,
    /// Subtracts from attack
    Weaken,
    /// Heals each turn, capped at max HP
    Regenerate,
}

impl StatusEffectType {
    pub const ALL: [StatusEffectType; 8] = [
        StatusEffectType::Poison,
        StatusEffectType::Burn,
        StatusEffectType::Stun,
        StatusEffectType::Bleed,
        StatusEffectType::Shield,
        StatusEffectType::Strengthen,
        StatusEffectType::Weaken,
        StatusEffectType::Regenerate,
    ];

    pub fn is_debuff(&self) -> bool {
        matches!(
            self,
            StatusEffectType::Poison
                | StatusEffectType::Burn
                | StatusEffectType::Stun
                | StatusEffectType::Bleed
                | StatusEffectType::Weaken
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusEffectType::Poison => "Poison",
            StatusEffectType::Burn => "Burn",
            StatusEffectType::Stun => "Stun",
            StatusEffectType::Bleed => "Bleed",
            StatusEffectType::Shield => "Shield",
            StatusEffectType::Strengthen => "Strengthen",
            StatusEffectType::Weaken => "Weaken",
            StatusEffectType::Regenerate => "Regenerate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: Uuid,
    pub kind: StatusEffectType,
    /// Owner turns left before the effect expires
    pub duration: u32,
    /// Damage, heal, or stat delta per turn depending on `kind`
    pub value: u32,
    pub source: String,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectType, duration: u32, value: u32, source: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            duration,
            value,
            source: source.to_string(),
        }
    }

    pub fn is_debuff(&self) -> bool {
        self.kind.is_debuff()
    }

    /// A copy with its own id, so one ability can apply the effect repeatedly.
    pub fn fresh(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

// ============================================================================
// Abilities and encounters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    /// Flat attack value; zero means a pure status ability
    pub damage: u32,
    /// Probability in 0.0..=1.0 that the ability is used on a given turn
    pub chance: f64,
    pub status_effect: Option<StatusEffect>,
}

impl Ability {
    pub fn new(name: &str, damage: u32, chance: f64) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            damage,
            chance,
            status_effect: None,
        }
    }

    pub fn with_effect(mut self, kind: StatusEffectType, duration: u32, value: u32) -> Self {
        self.status_effect = Some(StatusEffect::new(kind, duration, value, &self.name));
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRewards {
    pub xp: u64,
    pub gold: u64,
    pub items: Vec<ItemStack>,
}

impl BattleRewards {
    /// Adds another reward bundle into this one.
    pub fn absorb(&mut self, other: &BattleRewards) {
        self.xp = self.xp.saturating_add(other.xp);
        self.gold = self.gold.saturating_add(other.gold);
        self.items.extend(other.items.iter().cloned());
    }
}

/// An enemy scaled to a specific level, ready to fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: Uuid,
    pub enemy_name: String,
    pub description: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub is_boss: bool,
    pub abilities: Vec<Ability>,
    pub rewards: BattleRewards,
    pub loot_table: Option<LootTable>,
    pub pre_battle_text: Option<String>,
    pub victory_text: Option<String>,
}

// ============================================================================
// Battle state
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Defend,
    Special,
    UseItem(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    PlayerVictory,
    EnemyVictory,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::PlayerVictory | BattlePhase::EnemyVictory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub turn: u32,
    pub message: String,
    pub is_crit: bool,
    pub is_player_action: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub result: BattleResult,
    pub remaining_hp: u32,
    pub enemy_remaining_hp: u32,
    pub turns: u32,
    /// Present only on victory
    pub rewards: Option<BattleRewards>,
    /// One entry per unit used, in use order
    pub consumed_items: Vec<Uuid>,
    pub log: Vec<CombatLogEntry>,
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        self.result == BattleResult::Victory
    }
}

/// One side of a battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub abilities: Vec<Ability>,
    pub effects: StatusLedger,
}

impl Combatant {
    pub fn from_encounter(encounter: &Encounter) -> Self {
        Self {
            name: encounter.enemy_name.clone(),
            hp: encounter.hp,
            max_hp: encounter.max_hp,
            attack: encounter.attack,
            defense: encounter.defense,
            abilities: encounter.abilities.clone(),
            effects: StatusLedger::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// `raw` adjusted by strengthen and weaken, never below zero.
    pub fn effective_attack(&self, raw: u32) -> u32 {
        (raw as i64 + self.effects.attack_modifier()).max(0) as u32
    }

    pub fn effective_defense(&self, defending: bool) -> u32 {
        let base = self.defense.saturating_add(self.effects.shield_bonus());
        if defending {
            base.saturating_mul(crate::core::constants::DEFEND_DEFENSE_MULTIPLIER)
        } else {
            base
        }
    }
}

/// The player's side: combatant stats plus skill bonuses and a battle bag.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCombatant {
    pub combatant: Combatant,
    pub bonuses: SkillBonusSummary,
    pub crit_chance: u32,
    pub bag: Vec<ItemStack>,
}

impl PlayerCombatant {
    /// Builds the player side from a character snapshot.
    ///
    /// `starting_hp` overrides the character's current health, which dungeon
    /// runs use to carry HP between floors.
    pub fn from_character(character: &Character, starting_hp: Option<u32>) -> Self {
        let bonuses = aggregate_skill_bonuses(character);
        let derived = DerivedStats::from_parts(character, &bonuses);
        let hp = starting_hp
            .unwrap_or(character.health)
            .min(derived.max_health);

        let mut crit_chance = bonuses.crit_chance;
        if character.prestige.has_perk(crate::character::perks::BATTLE_HARDENED) {
            crit_chance += BATTLE_HARDENED_CRIT_PERCENT;
        }

        let bag = character
            .inventory
            .consumables()
            .map(|entry| ItemStack {
                item: entry.item.clone(),
                quantity: entry.quantity,
            })
            .collect();

        Self {
            combatant: Combatant {
                name: character.name.clone(),
                hp,
                max_hp: derived.max_health,
                attack: derived.attack_power.max(0) as u32,
                defense: derived.defense_power.max(0) as u32,
                abilities: Vec::new(),
                effects: StatusLedger::new(),
            },
            bonuses,
            crit_chance,
            bag,
        }
    }
}
