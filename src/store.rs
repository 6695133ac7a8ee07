// src/store.rs

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::models::user::AuthUser;

/// Callback invoked with each snapshot delivered on a subscribed path.
/// `None` means the path currently holds no data.
pub type SnapshotFn = Box<dyn Fn(Option<JsonValue>) + Send + Sync>;

/// Callback invoked whenever the signed-in user changes.
pub type AuthChangeFn = Box<dyn Fn(Option<AuthUser>) + Send + Sync>;

/// Key-path-addressed realtime store. Consumed by the core, never
/// implemented by it; the hosted database sits behind this contract.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Replaces the value at `path`.
    async fn write(&self, path: &str, value: JsonValue) -> Result<(), AppError>;

    /// Appends `value` under a generated key and returns that key.
    async fn push(&self, path: &str, value: JsonValue) -> Result<String, AppError>;

    /// One-shot read. `Ok(None)` when the path holds no data.
    async fn read(&self, path: &str) -> Result<Option<JsonValue>, AppError>;

    /// Long-lived change feed for `path`. The feed stays open until the
    /// returned guard is dropped or explicitly unsubscribed.
    fn subscribe(&self, path: &str, on_change: SnapshotFn) -> Subscription;

    /// Removes the value at `path`.
    async fn delete(&self, path: &str) -> Result<(), AppError>;
}

/// External authentication provider. Sign-in UI and session persistence
/// live outside the core.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The user signed in right now, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Change feed for the signed-in identity.
    fn subscribe(&self, on_change: AuthChangeFn) -> Subscription;

    async fn sign_in(&self) -> Result<AuthUser, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}

/// RAII unsubscribe guard. The owning view holds exactly one of these per
/// subscribed path and releases it on every exit path; cancellation runs
/// exactly once, on drop or on explicit `unsubscribe`.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A guard that has nothing to tear down.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Explicit teardown; equivalent to dropping the guard.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Store paths used by the core.
pub mod paths {
    pub const USER_STATS: &str = "userStats";
    pub const QUIZ_RESULTS: &str = "quizResults";
    pub const DISCUSSIONS: &str = "discussions";
    pub const QUESTIONS: &str = "questions";

    pub fn user_stats(user_id: &str) -> String {
        format!("{USER_STATS}/{user_id}")
    }

    pub fn comments(item_id: i64) -> String {
        format!("comments/{item_id}")
    }

    pub fn discussion_replies(discussion_id: i64) -> String {
        format!("discussionReplies/{discussion_id}")
    }

    pub fn question(key: &str) -> String {
        format!("{QUESTIONS}/{key}")
    }
}

/// Races a store call against the caller-imposed budget. On elapse the
/// caller proceeds with its optimistic local value and treats the remote
/// call as still in flight.
pub async fn with_timeout<T, F>(budget: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(budget, fut).await?
}
