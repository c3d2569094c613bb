//! The engine facade.
//!
//! [`GameEngine`] owns the configuration and the validated content (bestiary
//! and dungeons) and exposes every rule the host needs. All operations take
//! snapshots and return new values; the engine itself never changes after
//! construction, so one instance can serve any number of characters.

use super::config::EngineConfig;
use super::error::EngineResult;
use crate::arena::{generate_opponent, ArenaManager, ArenaMatchResult, ArenaOpponent, ArenaStats};
use crate::character::{
    apply_battle_outcome, award_xp, can_prestige, perform_prestige, Character, CharacterClass,
    LevelUpResult, PrestigeResult, RewardResult,
};
use crate::combat::{self, Battle, BattleOutcome, Encounter, PlayerAction, PlayerCombatant};
use crate::dungeon::{self, DungeonCatalog, DungeonEntry, DungeonRunState, FloorAdvance};
use crate::encounters::{self, Bestiary};
use crate::items::{self, CraftResult, LootDrop, LootTable};
use crate::skills::{self, SkillBonusSummary};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    bestiary: Bestiary,
    dungeons: DungeonCatalog,
    arena: ArenaManager,
}

impl GameEngine {
    /// Engine with the built-in bestiary and dungeons.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_content(config, Bestiary::standard(), DungeonCatalog::standard())
    }

    /// Engine over custom content. Fails if the config is out of range or
    /// the content does not hold together.
    pub fn with_content(
        config: EngineConfig,
        bestiary: Bestiary,
        dungeons: DungeonCatalog,
    ) -> EngineResult<Self> {
        config.validate()?;
        bestiary.validate()?;
        dungeons.validate(&bestiary)?;
        info!(
            templates = bestiary.len(),
            dungeons = dungeons.all().len(),
            "engine ready"
        );
        Ok(Self {
            arena: ArenaManager::new(&config),
            config,
            bestiary,
            dungeons,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bestiary(&self) -> &Bestiary {
        &self.bestiary
    }

    pub fn dungeons(&self) -> &DungeonCatalog {
        &self.dungeons
    }

    pub fn arena(&self) -> &ArenaManager {
        &self.arena
    }

    // ------------------------------------------------------------------
    // Encounters
    // ------------------------------------------------------------------

    pub fn generate_encounter(&self, player_level: u32, rng: &mut impl Rng) -> EngineResult<Encounter> {
        Ok(encounters::generate_encounter(&self.bestiary, player_level, rng)?)
    }

    pub fn generate_boss_encounter(&self, player_level: u32, rng: &mut impl Rng) -> Option<Encounter> {
        encounters::generate_boss_encounter(&self.bestiary, player_level, rng)
    }

    pub fn generate_arena_opponent(
        &self,
        player_level: u32,
        player_rating: u32,
        player_class: Option<CharacterClass>,
        rng: &mut impl Rng,
    ) -> ArenaOpponent {
        generate_opponent(player_level, player_rating, player_class, rng)
    }

    // ------------------------------------------------------------------
    // Combat and loot
    // ------------------------------------------------------------------

    /// A battle the host drives round by round.
    pub fn start_battle(&self, character: &Character, encounter: &Encounter) -> Battle {
        let mut battle = Battle::new(
            PlayerCombatant::from_character(character, None),
            encounter,
            &self.config,
        );
        battle.start();
        battle
    }

    /// Fights to the end at the character's current health.
    pub fn resolve_battle(
        &self,
        character: &Character,
        encounter: &Encounter,
        actions: impl IntoIterator<Item = PlayerAction>,
        rng: &mut impl Rng,
    ) -> BattleOutcome {
        let player = PlayerCombatant::from_character(character, None);
        combat::resolve_battle(player, encounter, actions, &self.config, rng)
    }

    /// Fights a dungeon floor starting from the run's traveling HP.
    pub fn resolve_floor_battle(
        &self,
        character: &Character,
        run: &DungeonRunState,
        encounter: &Encounter,
        actions: impl IntoIterator<Item = PlayerAction>,
        rng: &mut impl Rng,
    ) -> BattleOutcome {
        let player = PlayerCombatant::from_character(character, Some(run.hp));
        combat::resolve_battle(player, encounter, actions, &self.config, rng)
    }

    pub fn roll_loot(&self, table: &LootTable, rng: &mut impl Rng) -> LootDrop {
        items::roll_loot(table, rng)
    }

    // ------------------------------------------------------------------
    // Arena
    // ------------------------------------------------------------------

    pub fn record_arena_match(
        &self,
        stats: &ArenaStats,
        victory: bool,
        opponent: &ArenaOpponent,
    ) -> (ArenaStats, ArenaMatchResult) {
        self.arena.record_match(stats, victory, opponent, Utc::now())
    }

    pub fn spend_arena_tokens(&self, stats: &ArenaStats, amount: u32) -> EngineResult<ArenaStats> {
        ArenaManager::spend_tokens(stats, amount)
    }

    // ------------------------------------------------------------------
    // Dungeons
    // ------------------------------------------------------------------

    /// Opens a run and charges the dungeon's energy cost.
    pub fn start_dungeon_run(
        &self,
        dungeon_id: &str,
        character: &Character,
        now: DateTime<Utc>,
    ) -> EngineResult<DungeonEntry> {
        let dungeon = self.dungeons.get(dungeon_id)?;
        dungeon::enter_dungeon(dungeon, character, now)
    }

    pub fn dungeon_floor_encounter(
        &self,
        run: &DungeonRunState,
        player_level: u32,
        rng: &mut impl Rng,
    ) -> EngineResult<Encounter> {
        let dungeon = self.dungeons.get(&run.dungeon_id)?;
        dungeon::floor_encounter(&self.bestiary, dungeon, run, player_level, rng)
    }

    pub fn complete_floor(
        &self,
        run: &DungeonRunState,
        victory: bool,
        remaining_hp: u32,
        rewards: Option<&combat::BattleRewards>,
    ) -> EngineResult<DungeonRunState> {
        dungeon::complete_floor(run, victory, remaining_hp, rewards)
    }

    pub fn advance_dungeon_floor(
        &self,
        character: &Character,
        run: &DungeonRunState,
        outcome: &BattleOutcome,
    ) -> EngineResult<FloorAdvance> {
        dungeon::advance_dungeon_floor(character, run, outcome)
    }

    // ------------------------------------------------------------------
    // Character progression
    // ------------------------------------------------------------------

    pub fn aggregate_skill_bonuses(&self, character: &Character) -> SkillBonusSummary {
        skills::aggregate_skill_bonuses(character)
    }

    pub fn unlock_skill(&self, character: &Character, skill_id: &str) -> EngineResult<Character> {
        skills::unlock_skill(character, skill_id)
    }

    pub fn equip(&self, character: &Character, item_id: Uuid) -> EngineResult<Character> {
        items::equip_item(character, item_id)
    }

    pub fn craft(
        &self,
        character: &Character,
        recipe_id: &str,
        rng: &mut impl Rng,
    ) -> EngineResult<CraftResult> {
        items::craft(character, recipe_id, rng)
    }

    pub fn award_xp(&self, character: &Character, amount: u64) -> LevelUpResult {
        award_xp(character, amount)
    }

    pub fn apply_battle_outcome(&self, character: &Character, outcome: &BattleOutcome) -> RewardResult {
        apply_battle_outcome(character, outcome)
    }

    pub fn spend_energy(
        &self,
        character: &Character,
        amount: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<Character> {
        crate::character::spend_energy(character, amount, now)
    }

    pub fn restore_energy(&self, character: &Character, amount: u32, now: DateTime<Utc>) -> Character {
        crate::character::restore_energy(character, amount, now)
    }

    pub fn regenerate_energy(&self, character: &Character, now: DateTime<Utc>) -> Character {
        crate::character::regenerate_energy(character, now)
    }

    pub fn can_prestige(&self, character: &Character) -> bool {
        can_prestige(character, self.config.prestige_level_requirement)
    }

    pub fn perform_prestige(
        &self,
        character: &Character,
        perk_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<PrestigeResult> {
        perform_prestige(character, perk_id, self.config.prestige_level_requirement, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Background;
    use crate::core::error::{ContentError, EngineError};
    use crate::dungeon::data::{forest_crypt, FOREST_CRYPT};
    use crate::encounters::EnemyTemplate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_standard_content_builds() {
        let engine = engine();
        assert_eq!(engine.bestiary().len(), 28);
        assert_eq!(engine.dungeons().all().len(), 3);
    }

    #[test]
    fn test_dangling_floor_reference_rejected() {
        let bestiary = Bestiary::from_templates(vec![
            EnemyTemplate::new("moss_goblin", "Moss Goblin", 1, 1..=4).stats(35, 9, 3)
        ]);
        let err = GameEngine::with_content(
            EngineConfig::default(),
            bestiary,
            DungeonCatalog::from_dungeons(vec![forest_crypt()]),
        )
        .unwrap_err();
        assert!(!err.is_refusal());
        assert_eq!(
            err,
            EngineError::Content(ContentError::UnknownEnemyTemplate("cave_spider".to_string()))
        );
    }

    #[test]
    fn test_bad_config_rejected() {
        let config = EngineConfig {
            max_battle_turns: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(GameEngine::new(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_unknown_dungeon_is_content_error() {
        let hero = Character::new("Ash".to_string(), CharacterClass::Ranger, Background::Explorer);
        assert_eq!(
            engine().start_dungeon_run("dungeon_nowhere", &hero, Utc::now()),
            Err(EngineError::Content(ContentError::UnknownDungeon(
                "dungeon_nowhere".to_string()
            )))
        );
    }

    #[test]
    fn test_floor_battle_starts_from_run_hp() {
        let engine = engine();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut hero = Character::new("Ash".to_string(), CharacterClass::Warrior, Background::Athlete);
        hero.level = 3;
        let entry = engine.start_dungeon_run(FOREST_CRYPT, &hero, Utc::now()).unwrap();
        assert_eq!(entry.character.energy, 2);
        let mut run = entry.run;
        run.hp = 1;
        let encounter = engine.dungeon_floor_encounter(&run, hero.level, &mut rng).unwrap();
        let battle_hp = PlayerCombatant::from_character(&hero, Some(run.hp)).combatant.hp;
        assert_eq!(battle_hp, 1);

        let outcome = engine.resolve_floor_battle(&hero, &run, &encounter, Vec::new(), &mut rng);
        assert!(outcome.remaining_hp <= 1);
    }

    #[test]
    fn test_crafted_sword_can_be_equipped() {
        let engine = engine();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut hero = Character::new("Ash".to_string(), CharacterClass::Warrior, Background::Athlete);
        hero.level = 5;
        for (template, quantity) in [("iron_ore", 5), ("crystal_shard", 1)] {
            let material = items::catalog::find_by_template(template).unwrap();
            hero.inventory.add(material, quantity).unwrap();
        }

        let crafted = engine.craft(&hero, "recipe_steel_sword", &mut rng).unwrap();
        let armed = engine.equip(&crafted.character, crafted.item.id).unwrap();
        assert_eq!(
            armed.equipment.weapon.as_ref().map(|w| w.id),
            Some(crafted.item.id)
        );
        assert_eq!(armed.inventory.count_template("iron_ore"), 0);
    }

    #[test]
    fn test_prestige_uses_configured_requirement() {
        let config = EngineConfig {
            prestige_level_requirement: 5,
            ..EngineConfig::default()
        };
        let engine = GameEngine::new(config).unwrap();
        let mut hero = Character::new("Ash".to_string(), CharacterClass::Angel, Background::Leader);
        hero.level = 5;
        assert!(engine.can_prestige(&hero));
        let result = engine
            .perform_prestige(&hero, crate::character::perks::QUICK_LEARNER, Utc::now())
            .unwrap();
        assert_eq!(result.character.prestige.level, 1);
        assert_eq!(result.character.level, 1);
    }
}
