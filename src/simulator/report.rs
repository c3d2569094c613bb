//! Simulation report generation.

use super::runner::RunStats;
use crate::arena::ArenaRank;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,

    // Dungeon
    pub dungeon_attempts: u32,
    pub dungeon_completions: u32,
    pub avg_floors_cleared: f64,
    pub avg_dungeon_turns: f64,

    // Arena
    pub arena_win_rate: f64,
    pub avg_final_rating: f64,
    pub avg_highest_rating: f64,
    pub avg_best_streak: f64,
    pub avg_tokens: f64,
    /// Final rank name to number of runs ending there
    pub rank_distribution: BTreeMap<String, u32>,

    pub avg_gold_earned: f64,

    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, count: u32) -> f64 {
    values.sum::<f64>() / count.max(1) as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let attempted: Vec<&RunStats> = runs.iter().filter(|r| r.dungeon_attempted).collect();
        let dungeon_attempts = attempted.len() as u32;
        let dungeon_completions = attempted.iter().filter(|r| r.dungeon_completed).count() as u32;

        let wins: u32 = runs.iter().map(|r| r.arena_wins).sum();
        let matches: u32 = runs.iter().map(|r| r.arena_wins + r.arena_losses).sum();
        let arena_win_rate = if matches == 0 {
            0.0
        } else {
            wins as f64 / matches as f64
        };

        let mut rank_distribution = BTreeMap::new();
        if matches > 0 {
            for run in &runs {
                let rank = ArenaRank::for_rating(run.final_rating).name().to_string();
                *rank_distribution.entry(rank).or_insert(0) += 1;
            }
        }

        Self {
            num_runs,
            dungeon_attempts,
            dungeon_completions,
            avg_floors_cleared: mean(
                attempted.iter().map(|r| r.floors_cleared as f64),
                dungeon_attempts,
            ),
            avg_dungeon_turns: mean(
                attempted.iter().map(|r| r.dungeon_turns as f64),
                dungeon_attempts,
            ),
            arena_win_rate,
            avg_final_rating: mean(runs.iter().map(|r| r.final_rating as f64), num_runs),
            avg_highest_rating: mean(runs.iter().map(|r| r.highest_rating as f64), num_runs),
            avg_best_streak: mean(runs.iter().map(|r| r.best_streak as f64), num_runs),
            avg_tokens: mean(runs.iter().map(|r| r.tokens as f64), num_runs),
            rank_distribution,
            avg_gold_earned: mean(runs.iter().map(|r| r.gold_earned as f64), num_runs),
            runs,
        }
    }

    pub fn dungeon_completion_rate(&self) -> f64 {
        if self.dungeon_attempts == 0 {
            0.0
        } else {
            self.dungeon_completions as f64 / self.dungeon_attempts as f64
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");
        report.push_str(&format!("Runs: {}\n\n", self.num_runs));

        if self.dungeon_attempts > 0 {
            report.push_str("── DUNGEON ──────────────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Completion Rate:     {:.1}%\n",
                self.dungeon_completion_rate() * 100.0
            ));
            report.push_str(&format!(
                "  Avg Floors Cleared:  {:.2}\n",
                self.avg_floors_cleared
            ));
            report.push_str(&format!(
                "  Avg Turns per Run:   {:.1}\n\n",
                self.avg_dungeon_turns
            ));
        }

        if !self.rank_distribution.is_empty() {
            report.push_str("── ARENA ────────────────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Win Rate:            {:.1}%\n",
                self.arena_win_rate * 100.0
            ));
            report.push_str(&format!(
                "  Avg Final Rating:    {:.0}\n",
                self.avg_final_rating
            ));
            report.push_str(&format!(
                "  Avg Peak Rating:     {:.0}\n",
                self.avg_highest_rating
            ));
            report.push_str(&format!(
                "  Avg Best Streak:     {:.1}\n",
                self.avg_best_streak
            ));
            report.push_str(&format!("  Avg Tokens:          {:.0}\n\n", self.avg_tokens));

            report.push_str("── FINAL RANKS ──────────────────────────────────────────────────\n");
            for rank in ArenaRank::ALL {
                let count = self.rank_distribution.get(rank.name()).copied().unwrap_or(0);
                let pct = (count as f64 / self.num_runs.max(1) as f64) * 100.0;
                let bar: String = "█".repeat((pct / 5.0) as usize);
                report.push_str(&format!("  {:<9} {:>5.1}% {}\n", rank.name(), pct, bar));
            }
            report.push('\n');
        }

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Gold Earned:     {:.0}\n",
            self.avg_gold_earned
        ));

        report.push_str("\n── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.dungeon_attempts > 0 {
            let rating = match self.dungeon_completion_rate() {
                r if r > 0.95 => "TOO EASY - Nearly every run clears",
                r if r > 0.6 => "GOOD - Challenging but fair",
                r if r > 0.25 => "HARD - Most runs fall short",
                _ => "TOO HARD - Runs rarely clear",
            };
            report.push_str(&format!("  Dungeon: {}\n", rating));
        }
        if !self.rank_distribution.is_empty() && (self.arena_win_rate - 0.5).abs() > 0.25 {
            report.push_str(&format!(
                "  ⚠️  Arena win rate {:.1}% is far from even\n",
                self.arena_win_rate * 100.0
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
