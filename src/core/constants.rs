// Character creation
pub const BASE_ATTRIBUTE_VALUE: i32 = 10;
pub const NUM_ATTRIBUTES: usize = 6;
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_GOLD: u64 = 100;
pub const STARTING_MAX_ENERGY: u32 = 5;
pub const INVENTORY_CAPACITY: usize = 50;

// Energy
pub const ENERGY_REGEN_SECONDS: i64 = 3600;

// Derived stats
// Attack = BASE_ATTACK_POWER + (STR - 10) + (DEX - 10) / 2
// Defense = BASE_DEFENSE_POWER + (CON - 10) / 2
pub const BASE_ATTACK_POWER: i32 = 10;
pub const BASE_DEFENSE_POWER: i32 = 5;

// XP and leveling
pub const XP_PER_LEVEL: u64 = 100;
pub const MAX_HEALTH_PER_LEVEL: u32 = 10;
pub const GOLD_PER_LEVEL_UP: u64 = 10;
pub const SKILL_POINTS_PER_LEVEL: u32 = 2;
pub const QUICK_LEARNER_XP_PERCENT: u64 = 90;

// Prestige
pub const PRESTIGE_LEVEL_REQUIREMENT: u32 = 20;
pub const PRESTIGE_GOLD_STEP: u64 = 100;
pub const PRESTIGE_BONUS_PERCENT_PER_LEVEL: u32 = 5;
pub const PRESTIGE_SKILL_POINT_GRANT: u32 = 2;
pub const VETERANS_WISDOM_XP_PERCENT: u32 = 10;
pub const FORTUNES_FAVOR_GOLD_PERCENT: u32 = 15;
pub const BATTLE_HARDENED_CRIT_PERCENT: u32 = 5;
pub const ENERGY_RESERVE_BONUS: u32 = 1;

// Encounter scaling
// factor = 1 + 0.1 * (level - lower bound), kept in tenths for exact flooring
pub const SCALE_TENTHS_BASE: i64 = 10;
pub const ENCOUNTER_XP_PER_LEVEL: u64 = 10;
pub const BOSS_ENCOUNTER_MIN_LEVEL: u32 = 15;
pub const MAX_ENEMY_TIER: u32 = 5;
pub const SAME_TIER_CHANCE: f64 = 0.70;
pub const LOWER_TIER_CHANCE: f64 = 0.20;

// Combat
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
pub const SPECIAL_ATTACK_MULTIPLIER: u32 = 2;
pub const DEFAULT_SPECIAL_COOLDOWN: u32 = 3;
pub const MIN_SPECIAL_COOLDOWN: u32 = 1;
pub const DEFAULT_MAX_BATTLE_TURNS: u32 = 200;
pub const DEFEND_DEFENSE_MULTIPLIER: u32 = 2;
pub const ITEM_DAMAGE_DEFENSE_DIVISOR: u32 = 4;

// Arena
pub const ARENA_STARTING_RATING: u32 = 200;
pub const ARENA_K_FACTOR: f64 = 32.0;
pub const ARENA_MIN_RATING_CHANGE: i32 = 5;
pub const ARENA_MATCH_HISTORY_CAP: usize = 50;
pub const ARENA_STREAK_TOKEN_STEP: u32 = 5;
pub const ARENA_STREAK_TOKEN_CAP: u32 = 25;
pub const ARENA_LEVEL_SPREAD: i32 = 2;
pub const ARENA_RATING_SPREAD: i32 = 200;
pub const ARENA_OTHER_CLASS_CHANCE: f64 = 0.70;
pub const ARENA_LEVELS_PER_STAT_POINT: u32 = 3;
pub const ARENA_BASE_HP: u32 = 100;
pub const ARENA_HP_PER_LEVEL: u32 = 10;
pub const ARENA_ABILITY_BASE_DAMAGE: u32 = 8;
pub const ARENA_ABILITY_DAMAGE_PER_LEVEL: u32 = 2;
pub const ARENA_XP_PER_LEVEL: u64 = 5;
pub const ARENA_MIN_XP_REWARD: u64 = 10;
pub const ARENA_GOLD_PER_LEVEL: u64 = 3;
pub const ARENA_MIN_GOLD_REWARD: u64 = 5;
