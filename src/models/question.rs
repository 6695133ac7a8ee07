// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::merge::Threaded;

/// A community-authored quiz question, stored under `questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// One of "a", "b", "c" or "d".
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

/// Reader feedback attached to a community question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub author: String,
    pub text: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CommunityQuestion {
    /// Appends feedback to this question and returns the new entry.
    /// Feedback ids follow the same creation-timestamp scheme as every
    /// other collection.
    pub fn add_feedback(&mut self, author: &str, text: String, now: DateTime<Utc>) -> Feedback {
        let feedback = Feedback {
            id: now.timestamp_millis(),
            author: author.to_string(),
            text,
            created_at: now,
        };
        self.feedback.push(feedback.clone());
        feedback
    }
}

impl Threaded for CommunityQuestion {
    fn thread_id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// DTO for creating a community question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000, message = "Question text is required"))]
    pub question: String,

    #[validate(length(min = 1, max = 500, message = "Option A is required"))]
    pub option_a: String,
    #[validate(length(min = 1, max = 500, message = "Option B is required"))]
    pub option_b: String,
    #[validate(length(min = 1, max = 500, message = "Option C is required"))]
    pub option_c: String,
    #[validate(length(min = 1, max = 500, message = "Option D is required"))]
    pub option_d: String,

    pub correct_answer: String,

    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

/// DTO for leaving feedback on a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, max = 1000, message = "Feedback text is required"))]
    pub text: String,
}
