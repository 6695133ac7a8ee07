// src/models/comment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::merge::Threaded;

/// A comment on a quiz or resource page, stored under `comments/{itemId}`.
/// Ids are creation-timestamp-derived and unique within their collection.
/// Mutable only by appending replies; never edited in place after
/// reconciliation.
///
/// Older revisions of the app wrote `content`/`timestamp` instead of
/// `text`/`createdAt`; deserialization accepts both spellings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply nested under a comment or a discussion
/// (`discussionReplies/{discussionId}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: i64,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Threaded for Comment {
    fn thread_id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Threaded for Reply {
    fn thread_id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// DTO for posting a comment or reply.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub text: String,
}
