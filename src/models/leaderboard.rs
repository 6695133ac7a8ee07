// src/models/leaderboard.rs

use serde::Serialize;

/// Badges derived from a stats record. The three point tiers are
/// exclusive (only the highest one is granted); `Learner` appears only
/// when nothing else applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeKind {
    QuizMaster,
    AccuracyExpert,
    StreakMaster,
    Gold,
    Silver,
    Bronze,
    Learner,
}

/// One ranked leaderboard row. Derived fresh from the full stats table on
/// every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Dense positional rank, 1-based. Ties in points still receive
    /// distinct consecutive ranks.
    pub rank: i64,
    pub user_id: String,
    pub display_name: String,
    pub points: i64,
    pub badges: Vec<BadgeKind>,
}
