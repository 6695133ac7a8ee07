// src/services/forum.rs

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    error::AppError,
    merge::{Threaded, ThreadView, snapshot_entries},
    services::{SyncStatus, lock_view, push_with_retry, require_user, write_with_retry},
    state::AppState,
    store::{Subscription, paths, with_timeout},
    utils::html::clean_html,
};

use crate::models::{
    comment::{Comment, CreateCommentRequest, Reply},
    discussion::{CreateDiscussionRequest, Discussion},
    question::{CommunityQuestion, CreateFeedbackRequest, CreateQuestionRequest, Feedback},
};

/// Ids are creation-timestamp-derived, unique within their parent
/// collection.
fn next_id(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}

/// Creates a discussion thread. The thread lands in the shared view
/// immediately (optimistic) and is then pushed to the store; on push
/// failure it stays local, marked pending.
pub async fn create_discussion(
    state: &AppState,
    view: &Mutex<ThreadView<Discussion>>,
    req: &CreateDiscussionRequest,
) -> Result<(Discussion, SyncStatus), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let user = require_user(state, "create a discussion")?;

    let now = Utc::now();
    let discussion = Discussion {
        id: next_id(now),
        title: clean_html(req.title.trim()),
        author: user.display_label(),
        author_id: user.id.clone(),
        category: req
            .category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "General".to_string()),
        replies: 0,
        views: 0,
        tags: Vec::new(),
        content: clean_html(req.content.trim()),
        created_at: now,
        last_activity: Some(now.to_rfc3339()),
    };

    lock_view(view).push_local(discussion.clone());

    let sync = match push_with_retry(state, paths::DISCUSSIONS, serde_json::to_value(&discussion)?)
        .await
    {
        Ok(_key) => SyncStatus::Synced,
        Err(err) => {
            tracing::warn!("Discussion {} still pending: {}", discussion.id, err);
            SyncStatus::Pending
        }
    };

    Ok((discussion, sync))
}

/// Posts a reply under a discussion (`discussionReplies/{discussionId}`).
pub async fn post_reply(
    state: &AppState,
    discussion_id: i64,
    view: &Mutex<ThreadView<Reply>>,
    req: &CreateCommentRequest,
) -> Result<(Reply, SyncStatus), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let user = require_user(state, "post a reply")?;

    let now = Utc::now();
    let reply = Reply {
        id: next_id(now),
        author: user.display_label(),
        author_id: user.id.clone(),
        text: clean_html(req.text.trim()),
        created_at: now,
    };

    lock_view(view).push_local(reply.clone());

    let sync = match push_with_retry(
        state,
        &paths::discussion_replies(discussion_id),
        serde_json::to_value(&reply)?,
    )
    .await
    {
        Ok(_key) => SyncStatus::Synced,
        Err(err) => {
            tracing::warn!("Reply {} still pending: {}", reply.id, err);
            SyncStatus::Pending
        }
    };

    Ok((reply, sync))
}

/// Posts a top-level comment on a quiz or resource page
/// (`comments/{itemId}`).
pub async fn post_comment(
    state: &AppState,
    item_id: i64,
    view: &Mutex<ThreadView<Comment>>,
    req: &CreateCommentRequest,
) -> Result<(Comment, SyncStatus), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let user = require_user(state, "post a comment")?;

    let now = Utc::now();
    let comment = Comment {
        id: next_id(now),
        author: user.display_label(),
        author_id: user.id.clone(),
        text: clean_html(req.text.trim()),
        created_at: now,
        replies: Vec::new(),
    };

    lock_view(view).push_local(comment.clone());

    let sync = match push_with_retry(
        state,
        &paths::comments(item_id),
        serde_json::to_value(&comment)?,
    )
    .await
    {
        Ok(_key) => SyncStatus::Synced,
        Err(err) => {
            tracing::warn!("Comment {} still pending: {}", comment.id, err);
            SyncStatus::Pending
        }
    };

    Ok((comment, sync))
}

/// Publishes a community-authored quiz question.
pub async fn create_question(
    state: &AppState,
    view: &Mutex<ThreadView<CommunityQuestion>>,
    req: &CreateQuestionRequest,
) -> Result<(CommunityQuestion, SyncStatus), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let answer = req.correct_answer.to_ascii_lowercase();
    if !matches!(answer.as_str(), "a" | "b" | "c" | "d") {
        return Err(AppError::Validation(
            "Correct answer must be one of a, b, c or d".to_string(),
        ));
    }

    let user = require_user(state, "create a question")?;

    let now = Utc::now();
    let question = CommunityQuestion {
        id: next_id(now),
        question: clean_html(req.question.trim()),
        option_a: clean_html(req.option_a.trim()),
        option_b: clean_html(req.option_b.trim()),
        option_c: clean_html(req.option_c.trim()),
        option_d: clean_html(req.option_d.trim()),
        correct_answer: answer,
        explanation: clean_html(req.explanation.trim()),
        category: req.category.clone(),
        difficulty: req.difficulty.clone(),
        author: user.display_label(),
        author_id: user.id.clone(),
        created_at: now,
        feedback: Vec::new(),
    };

    lock_view(view).push_local(question.clone());

    let sync = match push_with_retry(state, paths::QUESTIONS, serde_json::to_value(&question)?)
        .await
    {
        Ok(_key) => SyncStatus::Synced,
        Err(err) => {
            tracing::warn!("Question {} still pending: {}", question.id, err);
            SyncStatus::Pending
        }
    };

    Ok((question, sync))
}

/// Appends reader feedback to a community question, identified by its
/// logical id.
///
/// The updated question is written back whole under its push key; open
/// views pick the change up through the `questions` feed rather than an
/// optimistic insert, since a per-id merge would let the stale remote
/// copy win until the write round-trips.
pub async fn post_feedback(
    state: &AppState,
    question_id: i64,
    req: &CreateFeedbackRequest,
) -> Result<(Feedback, SyncStatus), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let user = require_user(state, "leave feedback")?;

    let snapshot =
        with_timeout(state.config.store_timeout, state.store.read(paths::QUESTIONS)).await?;
    let entries = snapshot_entries::<CommunityQuestion>(snapshot.as_ref());

    let (key, mut question) = entries
        .iter()
        .find_map(|(key, entry)| match entry {
            Some(q) if q.id == question_id => Some((key.clone(), q.clone())),
            _ => None,
        })
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let now = Utc::now();
    let feedback = question.add_feedback(&user.display_label(), clean_html(req.text.trim()), now);

    let sync = match write_with_retry(
        state,
        &paths::question(&key),
        serde_json::to_value(&question)?,
    )
    .await
    {
        Ok(()) => SyncStatus::Synced,
        Err(err) => {
            tracing::warn!("Feedback on question {} still pending: {}", question_id, err);
            SyncStatus::Pending
        }
    };

    Ok((feedback, sync))
}

/// Deletes a community question by its logical id.
///
/// The store keys entries by generated push key, so the key owning the id
/// is resolved from a one-shot read first. Only the author may delete.
pub async fn delete_question(state: &AppState, question_id: i64) -> Result<(), AppError> {
    let user = require_user(state, "delete a question")?;

    let snapshot =
        with_timeout(state.config.store_timeout, state.store.read(paths::QUESTIONS)).await?;
    let entries = snapshot_entries::<CommunityQuestion>(snapshot.as_ref());

    let (key, question) = entries
        .iter()
        .find_map(|(key, entry)| match entry {
            Some(q) if q.id == question_id => Some((key.clone(), q.clone())),
            _ => None,
        })
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if question.author_id != user.id {
        return Err(AppError::NotAuthenticated(
            "Only the author can delete this question".to_string(),
        ));
    }

    with_timeout(
        state.config.store_timeout,
        state.store.delete(&paths::question(&key)),
    )
    .await
}

/// Wires a shared thread view to the change feed for one collection.
/// Each delivered snapshot replaces the view's remote side and the merged
/// sequence is handed to `on_change`. Callers own one subscription per
/// path per active view; re-subscribing while a prior guard is live leaks
/// duplicate callbacks.
fn watch_collection<T, F>(
    state: &AppState,
    path: &str,
    view: Arc<Mutex<ThreadView<T>>>,
    on_change: F,
) -> Subscription
where
    T: Threaded + Clone + DeserializeOwned + Send + 'static,
    F: Fn(Vec<T>) + Send + Sync + 'static,
{
    state.store.subscribe(
        path,
        Box::new(move |snapshot| {
            let mut view = lock_view(&view);
            view.apply_snapshot(snapshot.as_ref());
            on_change(view.items());
        }),
    )
}

pub fn watch_discussions<F>(
    state: &AppState,
    view: Arc<Mutex<ThreadView<Discussion>>>,
    on_change: F,
) -> Subscription
where
    F: Fn(Vec<Discussion>) + Send + Sync + 'static,
{
    watch_collection(state, paths::DISCUSSIONS, view, on_change)
}

pub fn watch_replies<F>(
    state: &AppState,
    discussion_id: i64,
    view: Arc<Mutex<ThreadView<Reply>>>,
    on_change: F,
) -> Subscription
where
    F: Fn(Vec<Reply>) + Send + Sync + 'static,
{
    watch_collection(state, &paths::discussion_replies(discussion_id), view, on_change)
}

pub fn watch_comments<F>(
    state: &AppState,
    item_id: i64,
    view: Arc<Mutex<ThreadView<Comment>>>,
    on_change: F,
) -> Subscription
where
    F: Fn(Vec<Comment>) + Send + Sync + 'static,
{
    watch_collection(state, &paths::comments(item_id), view, on_change)
}

pub fn watch_questions<F>(
    state: &AppState,
    view: Arc<Mutex<ThreadView<CommunityQuestion>>>,
    on_change: F,
) -> Subscription
where
    F: Fn(Vec<CommunityQuestion>) + Send + Sync + 'static,
{
    watch_collection(state, paths::QUESTIONS, view, on_change)
}

/// Sample discussions shown before any real data exists. Supplied by the
/// caller as seed input to the merge, never baked into it.
pub fn seed_discussions(now: DateTime<Utc>) -> Vec<Discussion> {
    vec![
        Discussion {
            id: 1,
            title: "Best resources for Security+ exam?".to_string(),
            author: "Alex Rodriguez".to_string(),
            author_id: "seed-1".to_string(),
            category: "Study Tips".to_string(),
            replies: 12,
            views: 245,
            tags: vec!["Security+".to_string(), "Resources".to_string()],
            content: "I'm preparing for the Security+ exam and looking for the best study \
                      resources. What materials did you use? Any recommendations for practice \
                      tests?"
                .to_string(),
            created_at: now - Duration::hours(2),
            last_activity: Some((now - Duration::hours(2)).to_rfc3339()),
        },
        Discussion {
            id: 2,
            title: "How to prepare for CISSP?".to_string(),
            author: "Sarah Chen".to_string(),
            author_id: "seed-2".to_string(),
            category: "Certification".to_string(),
            replies: 8,
            views: 189,
            tags: vec!["CISSP".to_string(), "Preparation".to_string()],
            content: "I have 5 years of experience in cybersecurity and want to pursue CISSP \
                      certification. What's the best study plan? How long did it take you to \
                      prepare?"
                .to_string(),
            created_at: now - Duration::hours(5),
            last_activity: Some((now - Duration::hours(5)).to_rfc3339()),
        },
        Discussion {
            id: 3,
            title: "Network security fundamentals discussion".to_string(),
            author: "Maria Garcia".to_string(),
            author_id: "seed-3".to_string(),
            category: "Technical".to_string(),
            replies: 15,
            views: 312,
            tags: vec!["Network Security".to_string(), "Fundamentals".to_string()],
            content: "Let's discuss network security fundamentals. What are the key concepts \
                      every cybersecurity professional should know? Share your thoughts and \
                      experiences."
                .to_string(),
            created_at: now - Duration::hours(24),
            last_activity: Some((now - Duration::hours(24)).to_rfc3339()),
        },
    ]
}
