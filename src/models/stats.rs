// src/models/stats.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cumulative per-user statistics, one record per user at
/// `userStats/{userId}`. Append-only accumulation: created on the first
/// attempt, updated on every subsequent attempt, never deleted.
///
/// `total_points` is deliberately not defaulted: a stored record missing
/// it is malformed and gets dropped by the leaderboard projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    pub total_points: i64,
    #[serde(default)]
    pub total_quizzes: i64,
    #[serde(default)]
    pub total_correct: i64,
    #[serde(default)]
    pub total_questions_answered: i64,
    #[serde(default)]
    pub total_duration_seconds: i64,
    #[serde(default)]
    pub current_streak_days: i64,
    #[serde(default)]
    pub last_quiz_date: Option<NaiveDate>,
    /// Derived: round(100 * total_correct / total_questions_answered),
    /// 0 while nothing has been answered.
    #[serde(default)]
    pub accuracy: i64,
}

impl UserStats {
    /// Zeroed record for a user with no prior attempts.
    pub fn fresh(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: String::new(),
            total_points: 0,
            total_quizzes: 0,
            total_correct: 0,
            total_questions_answered: 0,
            total_duration_seconds: 0,
            current_streak_days: 0,
            last_quiz_date: None,
            accuracy: 0,
        }
    }
}
