// src/services/ranking.rs

use crate::{
    error::AppError,
    leaderboard::project_snapshot,
    models::leaderboard::LeaderboardEntry,
    state::AppState,
    store::{Subscription, paths, with_timeout},
};

/// One-shot leaderboard read. An empty or missing stats table projects to
/// an empty sequence, never an error.
pub async fn fetch_leaderboard(state: &AppState) -> Result<Vec<LeaderboardEntry>, AppError> {
    let snapshot = with_timeout(state.config.store_timeout, state.store.read(paths::USER_STATS))
        .await?;
    Ok(project_snapshot(snapshot.as_ref()))
}

/// Subscribes to the stats table and delivers a freshly projected
/// leaderboard on every change. The returned guard owns the feed;
/// the consuming view drops it exactly once on teardown.
pub fn watch_leaderboard<F>(state: &AppState, on_change: F) -> Subscription
where
    F: Fn(Vec<LeaderboardEntry>) + Send + Sync + 'static,
{
    state.store.subscribe(
        paths::USER_STATS,
        Box::new(move |snapshot| on_change(project_snapshot(snapshot.as_ref()))),
    )
}
