//! Arena ladder data: ranks, persistent stats, and match records.

use crate::character::CharacterClass;
use crate::core::constants::ARENA_STARTING_RATING;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rank band derived from rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArenaRank {
    Bronze,
    Silver,
    Gold,
    Diamond,
    Champion,
}

impl ArenaRank {
    pub const ALL: [ArenaRank; 5] = [
        ArenaRank::Bronze,
        ArenaRank::Silver,
        ArenaRank::Gold,
        ArenaRank::Diamond,
        ArenaRank::Champion,
    ];

    pub fn for_rating(rating: u32) -> Self {
        match rating {
            0..=499 => ArenaRank::Bronze,
            500..=999 => ArenaRank::Silver,
            1000..=1499 => ArenaRank::Gold,
            1500..=1999 => ArenaRank::Diamond,
            _ => ArenaRank::Champion,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArenaRank::Bronze => "Bronze",
            ArenaRank::Silver => "Silver",
            ArenaRank::Gold => "Gold",
            ArenaRank::Diamond => "Diamond",
            ArenaRank::Champion => "Champion",
        }
    }

    /// Tokens for beating an opponent of this rank, before streak bonus.
    pub fn base_tokens(&self) -> u32 {
        match self {
            ArenaRank::Bronze => 10,
            ArenaRank::Silver => 15,
            ArenaRank::Gold => 20,
            ArenaRank::Diamond => 30,
            ArenaRank::Champion => 40,
        }
    }

    /// Lowest rating in the band.
    pub fn floor(&self) -> u32 {
        match self {
            ArenaRank::Bronze => 0,
            ArenaRank::Silver => 500,
            ArenaRank::Gold => 1000,
            ArenaRank::Diamond => 1500,
            ArenaRank::Champion => 2000,
        }
    }
}

/// One finished arena match, as kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMatchResult {
    pub id: Uuid,
    pub opponent_name: String,
    pub opponent_class: CharacterClass,
    pub opponent_level: u32,
    pub opponent_rank: ArenaRank,
    pub victory: bool,
    pub rating_change: i32,
    pub tokens_earned: u32,
    pub date: DateTime<Utc>,
}

/// Persistent arena ladder state for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub rating: u32,
    pub tokens: u32,
    pub wins: u32,
    pub losses: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub highest_rating: u32,
    /// Most recent first.
    #[serde(default)]
    pub history: Vec<ArenaMatchResult>,
}

impl Default for ArenaStats {
    fn default() -> Self {
        Self {
            rating: ARENA_STARTING_RATING,
            tokens: 0,
            wins: 0,
            losses: 0,
            current_streak: 0,
            best_streak: 0,
            highest_rating: ARENA_STARTING_RATING,
            history: Vec::new(),
        }
    }
}

impl ArenaStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rank(&self) -> ArenaRank {
        ArenaRank::for_rating(self.rating)
    }

    pub fn matches_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Wins over matches played, 0.0 before the first match.
    pub fn win_rate(&self) -> f64 {
        match self.matches_played() {
            0 => 0.0,
            played => self.wins as f64 / played as f64,
        }
    }

    /// Prepends a result and drops the oldest past `cap`.
    pub fn push_history(&mut self, result: ArenaMatchResult, cap: usize) {
        self.history.insert(0, result);
        self.history.truncate(cap);
    }
}
