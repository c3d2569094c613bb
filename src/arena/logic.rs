use super::opponent::ArenaOpponent;
use super::types::{ArenaMatchResult, ArenaRank, ArenaStats};
use crate::core::config::EngineConfig;
use crate::core::constants::{ARENA_STREAK_TOKEN_CAP, ARENA_STREAK_TOKEN_STEP};
use crate::core::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// Elo-style ladder bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaManager {
    k_factor: f64,
    min_rating_change: i32,
    history_cap: usize,
}

impl ArenaManager {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            k_factor: config.arena_k_factor,
            min_rating_change: config.arena_min_rating_change,
            history_cap: config.match_history_cap,
        }
    }

    /// `round(K * (score - expected))`, at least `+min` on a win and at
    /// most `-min` on a loss.
    pub fn rating_change(&self, own: u32, opponent: u32, victory: bool) -> i32 {
        let diff = opponent as f64 - own as f64;
        let expected = 1.0 / (1.0 + 10f64.powf(diff / 400.0));
        let score = if victory { 1.0 } else { 0.0 };
        let change = (self.k_factor * (score - expected)).round() as i32;
        if victory {
            change.max(self.min_rating_change)
        } else {
            change.min(-self.min_rating_change)
        }
    }

    /// Base tokens for the opponent's rank plus 5 per streak win, bonus capped at 25.
    pub fn tokens_earned(opponent_rank: ArenaRank, streak: u32) -> u32 {
        let bonus = (ARENA_STREAK_TOKEN_STEP.saturating_mul(streak)).min(ARENA_STREAK_TOKEN_CAP);
        opponent_rank.base_tokens() + bonus
    }

    /// Applies one match to the ladder and returns the new stats along with
    /// the history entry that was recorded.
    pub fn record_match(
        &self,
        stats: &ArenaStats,
        victory: bool,
        opponent: &ArenaOpponent,
        now: DateTime<Utc>,
    ) -> (ArenaStats, ArenaMatchResult) {
        let mut next = stats.clone();
        let old_rank = stats.rank();
        let change = self.rating_change(stats.rating, opponent.rating, victory);

        next.rating = (stats.rating as i64 + change as i64).max(0) as u32;
        next.highest_rating = next.highest_rating.max(next.rating);

        let tokens = if victory {
            next.wins = next.wins.saturating_add(1);
            next.current_streak = next.current_streak.saturating_add(1);
            next.best_streak = next.best_streak.max(next.current_streak);
            let earned = Self::tokens_earned(opponent.rank, next.current_streak);
            next.tokens = next.tokens.saturating_add(earned);
            earned
        } else {
            next.losses = next.losses.saturating_add(1);
            next.current_streak = 0;
            0
        };

        let result = ArenaMatchResult {
            id: Uuid::new_v4(),
            opponent_name: opponent.name.clone(),
            opponent_class: opponent.class,
            opponent_level: opponent.level,
            opponent_rank: opponent.rank,
            victory,
            rating_change: change,
            tokens_earned: tokens,
            date: now,
        };
        next.push_history(result.clone(), self.history_cap);

        if next.rank() != old_rank {
            info!(
                from = old_rank.name(),
                to = next.rank().name(),
                rating = next.rating,
                "arena rank changed"
            );
        }
        (next, result)
    }

    /// Deducts tokens, refusing when the balance is short.
    pub fn spend_tokens(stats: &ArenaStats, amount: u32) -> EngineResult<ArenaStats> {
        if stats.tokens < amount {
            warn!(have = stats.tokens, need = amount, "not enough arena tokens");
            return Err(EngineError::InsufficientTokens {
                have: stats.tokens,
                need: amount,
            });
        }
        let mut next = stats.clone();
        next.tokens -= amount;
        Ok(next)
    }
}

impl Default for ArenaManager {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
