// src/services/mod.rs

pub mod forum;
pub mod quiz;
pub mod ranking;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::merge::ThreadView;
use crate::models::user::AuthUser;
use crate::state::AppState;
use crate::store::with_timeout;

/// Whether the remote store has confirmed the write backing an optimistic
/// local update. `Pending` results are kept and shown, never rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    Synced,
    Pending,
}

pub(crate) fn require_user(state: &AppState, action: &str) -> Result<AuthUser, AppError> {
    state
        .auth
        .current_user()
        .ok_or_else(|| AppError::NotAuthenticated(format!("Please sign in to {action}")))
}

/// Lock helper for shared thread views. A poisoned lock only means some
/// other UI callback panicked mid-update; the data is still usable.
pub(crate) fn lock_view<T>(view: &Mutex<ThreadView<T>>) -> MutexGuard<'_, ThreadView<T>> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One-shot write with the configured number of retries before falling
/// back to "local-only, sync pending".
pub(crate) async fn write_with_retry(
    state: &AppState,
    path: &str,
    value: JsonValue,
) -> Result<(), AppError> {
    let mut attempts_left = state.config.write_retries + 1;
    loop {
        match with_timeout(state.config.store_timeout, state.store.write(path, value.clone())).await
        {
            Ok(()) => return Ok(()),
            Err(err) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(err);
                }
                tracing::debug!("Retrying write to {}: {}", path, err);
            }
        }
    }
}

/// `write_with_retry` for append-style pushes.
pub(crate) async fn push_with_retry(
    state: &AppState,
    path: &str,
    value: JsonValue,
) -> Result<String, AppError> {
    let mut attempts_left = state.config.write_retries + 1;
    loop {
        match with_timeout(state.config.store_timeout, state.store.push(path, value.clone())).await
        {
            Ok(key) => return Ok(key),
            Err(err) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(err);
                }
                tracing::debug!("Retrying push to {}: {}", path, err);
            }
        }
    }
}
