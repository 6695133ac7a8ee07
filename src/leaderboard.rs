// src/leaderboard.rs

use serde_json::Value as JsonValue;

use crate::models::leaderboard::{BadgeKind, LeaderboardEntry};
use crate::models::stats::UserStats;

const QUIZ_MASTER_QUIZZES: i64 = 50;
const ACCURACY_EXPERT_PERCENT: i64 = 95;
const STREAK_MASTER_DAYS: i64 = 30;
const GOLD_POINTS: i64 = 20_000;
const SILVER_POINTS: i64 = 10_000;
const BRONZE_POINTS: i64 = 5_000;

/// Ranks the full per-user statistics table into a display-ready sequence.
///
/// The sort is stable on points descending, so equal totals keep the
/// table's iteration order; no secondary sort key is assumed beyond what
/// is stored. Ranks are dense positional, 1-based: ties receive distinct
/// consecutive ranks (a position, not a competition rank).
pub fn project<'a, I>(table: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = (&'a str, &'a UserStats)>,
{
    let mut rows: Vec<(&str, &UserStats)> = table.into_iter().collect();
    rows.sort_by(|a, b| b.1.total_points.cmp(&a.1.total_points));

    rows.into_iter()
        .enumerate()
        .map(|(idx, (user_id, stats))| LeaderboardEntry {
            rank: idx as i64 + 1,
            user_id: user_id.to_string(),
            display_name: stats.display_name.clone(),
            points: stats.total_points,
            badges: badges_for(stats),
        })
        .collect()
}

/// Projects a raw `userStats` snapshot. Entries that do not parse
/// (missing or non-numeric point totals) are dropped rather than failing
/// the whole projection; an empty or missing table projects to an empty
/// sequence. Iteration follows the snapshot's own entry order, so point
/// ties keep store order rather than key order.
pub fn project_snapshot(value: Option<&JsonValue>) -> Vec<LeaderboardEntry> {
    let Some(JsonValue::Object(map)) = value else {
        return Vec::new();
    };

    let mut table: Vec<(String, UserStats)> = Vec::with_capacity(map.len());
    for (user_id, raw) in map {
        match serde_json::from_value::<UserStats>(raw.clone()) {
            Ok(mut stats) => {
                // The snapshot key is authoritative for identity.
                if stats.user_id.is_empty() {
                    stats.user_id = user_id.clone();
                }
                table.push((user_id.clone(), stats));
            }
            Err(err) => {
                tracing::warn!("Skipping malformed stats record {}: {}", user_id, err);
            }
        }
    }

    project(table.iter().map(|(id, stats)| (id.as_str(), stats)))
}

/// Badges are a pure function of one stats record. Only the highest of
/// the three point tiers is granted; `Learner` is the default when no
/// other badge qualifies.
pub fn badges_for(stats: &UserStats) -> Vec<BadgeKind> {
    let mut badges = Vec::new();

    if stats.total_quizzes >= QUIZ_MASTER_QUIZZES {
        badges.push(BadgeKind::QuizMaster);
    }
    if stats.accuracy >= ACCURACY_EXPERT_PERCENT {
        badges.push(BadgeKind::AccuracyExpert);
    }
    if stats.current_streak_days >= STREAK_MASTER_DAYS {
        badges.push(BadgeKind::StreakMaster);
    }

    if stats.total_points >= GOLD_POINTS {
        badges.push(BadgeKind::Gold);
    } else if stats.total_points >= SILVER_POINTS {
        badges.push(BadgeKind::Silver);
    } else if stats.total_points >= BRONZE_POINTS {
        badges.push(BadgeKind::Bronze);
    }

    if badges.is_empty() {
        badges.push(BadgeKind::Learner);
    }
    badges
}
