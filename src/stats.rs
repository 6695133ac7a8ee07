// src/stats.rs

use chrono::{DateTime, Utc};

use crate::models::attempt::QuizAttempt;
use crate::models::stats::UserStats;

/// Folds one finished attempt into a user's cumulative statistics.
///
/// Pure and side-effect-free: persistence is the caller's responsibility
/// (write-after-compute), and `now` is caller-supplied, assumed monotonic
/// per user. Never panics on a well-formed attempt.
///
/// Streak rule, at calendar-date granularity:
/// * no prior date -> 1
/// * prior date is today -> unchanged (same-day repeats do not increment)
/// * prior date is yesterday -> +1
/// * gap of two days or more -> reset to 1
pub fn apply_attempt(
    previous: Option<&UserStats>,
    attempt: &QuizAttempt,
    now: DateTime<Utc>,
) -> UserStats {
    let today = now.date_naive();
    let yesterday = today.pred_opt();

    let prior = previous
        .cloned()
        .unwrap_or_else(|| UserStats::fresh(&attempt.user_id));

    let current_streak_days = match prior.last_quiz_date {
        None => 1,
        Some(date) if date == today => prior.current_streak_days,
        Some(date) if Some(date) == yesterday => prior.current_streak_days + 1,
        Some(_) => 1,
    };

    let total_correct = prior.total_correct + attempt.score;
    let total_questions_answered = prior.total_questions_answered + attempt.total_questions;

    UserStats {
        user_id: prior.user_id,
        display_name: prior.display_name,
        total_points: prior.total_points + attempt.points_earned,
        total_quizzes: prior.total_quizzes + 1,
        total_correct,
        total_questions_answered,
        total_duration_seconds: prior.total_duration_seconds + attempt.duration_seconds,
        current_streak_days,
        last_quiz_date: Some(today),
        accuracy: accuracy_percent(total_correct, total_questions_answered),
    }
}

/// Whole-percent accuracy; 0 while nothing has been answered.
pub fn accuracy_percent(correct: i64, answered: i64) -> i64 {
    if answered <= 0 {
        return 0;
    }
    ((100.0 * correct as f64) / answered as f64).round() as i64
}
