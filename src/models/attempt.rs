// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Points granted per correctly answered question.
pub const POINTS_PER_CORRECT: i64 = 100;

/// A single finished quiz attempt. Created once per completed quiz,
/// immutable, owned by the submitting session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub user_id: String,
    pub quiz_id: String,
    pub score: i64,
    pub total_questions: i64,
    pub points_earned: i64,
    pub duration_seconds: i64,
    pub completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Builds the immutable attempt record from a validated submission.
    /// `points_earned` is always derived here, never taken from input.
    pub fn from_request(
        user_id: &str,
        req: &SubmitAttemptRequest,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            quiz_id: req.quiz_id.clone(),
            score: req.score,
            total_questions: req.total_questions,
            points_earned: req.score * POINTS_PER_CORRECT,
            duration_seconds: req.duration_seconds,
            completed_at,
        }
    }
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, max = 100, message = "Quiz id is required"))]
    pub quiz_id: String,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score: i64,

    #[validate(range(min = 1, message = "A quiz must have at least one question"))]
    pub total_questions: i64,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_seconds: i64,
}
