// src/merge.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Items that can take part in thread reconciliation: a stable id plus a
/// creation time used for display ordering.
pub trait Threaded {
    fn thread_id(&self) -> i64;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Reconciles a locally-held optimistic sequence with a remote snapshot of
/// the same keyed collection.
///
/// The mapping is seeded from `local` and then overwritten by every
/// non-null remote entry, so the remote copy of an id wins on content.
/// Absence from the snapshot never removes a local-only item: entries
/// created here survive until a later snapshot actually carries their id.
///
/// Idempotent: merging the merged output against the same snapshot yields
/// the same sequence, which is what makes the race between an optimistic
/// write and the next subscription delivery safe.
pub fn merge<T>(local: &[T], remote: &HashMap<String, Option<T>>) -> Vec<T>
where
    T: Threaded + Clone,
{
    let mut by_id: HashMap<i64, T> = HashMap::with_capacity(local.len() + remote.len());

    for item in local {
        by_id.insert(item.thread_id(), item.clone());
    }

    // Null snapshot values are deletions-in-flight or not-yet-materialized
    // keys, not tombstones to apply locally.
    for item in remote.values().flatten() {
        by_id.insert(item.thread_id(), item.clone());
    }

    let mut merged: Vec<T> = by_id.into_values().collect();
    merged.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.thread_id().cmp(&b.thread_id()))
    });
    merged
}

/// Same contract with caller-supplied seed data threaded in below the
/// local optimistic items. Seeds are plain input here, never baked into
/// the merge itself.
pub fn merge_seeded<T>(seed: &[T], local: &[T], remote: &HashMap<String, Option<T>>) -> Vec<T>
where
    T: Threaded + Clone,
{
    let mut base = seed.to_vec();
    base.extend_from_slice(local);
    merge(&base, remote)
}

/// Parses a raw store snapshot into the keyed form `merge` consumes.
/// Entries that fail to deserialize are dropped, not fatal.
pub fn snapshot_entries<T>(value: Option<&JsonValue>) -> HashMap<String, Option<T>>
where
    T: DeserializeOwned,
{
    let Some(JsonValue::Object(map)) = value else {
        return HashMap::new();
    };

    map.iter()
        .map(|(key, raw)| {
            let parsed = match raw {
                JsonValue::Null => None,
                other => match serde_json::from_value(other.clone()) {
                    Ok(item) => Some(item),
                    Err(err) => {
                        tracing::warn!("Dropping malformed entry {}: {}", key, err);
                        None
                    }
                },
            };
            (key.clone(), parsed)
        })
        .collect()
}

/// Local optimistic cache plus the latest remote snapshot for one
/// subscribed collection: the single reconciliation strategy for every
/// thread-shaped view. The owning view keeps one of these per path,
/// alongside its one `Subscription`.
pub struct ThreadView<T> {
    seed: Vec<T>,
    local: Vec<T>,
    remote: HashMap<String, Option<T>>,
}

impl<T> ThreadView<T> {
    pub fn new() -> Self {
        Self {
            seed: Vec::new(),
            local: Vec::new(),
            remote: HashMap::new(),
        }
    }

    /// A view pre-populated with caller-supplied sample data, shown until
    /// real records arrive.
    pub fn with_seed(seed: Vec<T>) -> Self {
        Self {
            seed,
            local: Vec::new(),
            remote: HashMap::new(),
        }
    }

    /// Records an optimistic local insert, visible before any remote ack.
    pub fn push_local(&mut self, item: T) {
        self.local.push(item);
    }
}

impl<T> Default for ThreadView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ThreadView<T>
where
    T: Threaded + Clone + DeserializeOwned,
{
    /// Replaces the held snapshot with a newly delivered one.
    pub fn apply_snapshot(&mut self, value: Option<&JsonValue>) {
        self.remote = snapshot_entries(value);
    }

    /// The reconciled, display-ready sequence.
    pub fn items(&self) -> Vec<T> {
        merge_seeded(&self.seed, &self.local, &self.remote)
    }
}
