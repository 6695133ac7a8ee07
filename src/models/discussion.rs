// src/models/discussion.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::merge::Threaded;

/// A forum discussion thread, stored under `discussions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub category: String,
    /// Reply count shown in listings, not the replies themselves.
    #[serde(default)]
    pub replies: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Legacy records hold free-form text here ("2 hours ago"), so this
    /// stays a raw string on the wire. New records write RFC 3339.
    #[serde(default)]
    pub last_activity: Option<String>,
}

impl Threaded for Discussion {
    fn thread_id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// DTO for creating a discussion.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDiscussionRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(max = 5000, message = "Content is limited to 5000 characters"))]
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: Option<String>,
}
