// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use cyberquiz_core::config::Config;
use cyberquiz_core::error::AppError;
use cyberquiz_core::models::user::AuthUser;
use cyberquiz_core::state::AppState;
use cyberquiz_core::store::{AuthChangeFn, AuthProvider, RemoteStore, SnapshotFn, Subscription};

type SubMap = Arc<Mutex<HashMap<u64, (String, SnapshotFn)>>>;

/// In-memory stand-in for the hosted realtime store.
///
/// Mirrors the contract the services rely on: path-addressed JSON values,
/// generated push keys, change feeds that deliver the current value
/// immediately on subscribe, and injectable write failures for the
/// "sync pending" paths.
pub struct MemoryStore {
    data: Mutex<JsonValue>,
    subs: SubMap,
    next_sub: AtomicU64,
    write_failures: AtomicU32,
    read_failures: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(json!({})),
            subs: Arc::new(Mutex::new(HashMap::new())),
            next_sub: AtomicU64::new(1),
            write_failures: AtomicU32::new(0),
            read_failures: AtomicU32::new(0),
        }
    }

    /// Makes the next `n` write/push calls fail with a transient error.
    pub fn fail_next_writes(&self, n: u32) {
        self.write_failures.store(n, Ordering::SeqCst);
    }

    /// Makes the next `n` one-shot reads fail with a transient error.
    pub fn fail_next_reads(&self, n: u32) {
        self.read_failures.store(n, Ordering::SeqCst);
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subs.lock().unwrap().len()
    }

    /// Raw value currently stored at `path`, for assertions.
    pub fn value_at(&self, path: &str) -> Option<JsonValue> {
        let data = self.data.lock().unwrap();
        get_at(&data, path).filter(|v| !v.is_null()).cloned()
    }

    fn take_failure(&self) -> bool {
        self.write_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn take_read_failure(&self) -> bool {
        self.read_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn notify(&self, changed: &str) {
        let data = self.data.lock().unwrap().clone();
        let subs = self.subs.lock().unwrap();
        for (path, on_change) in subs.values() {
            if overlaps(path, changed) {
                on_change(get_at(&data, path).filter(|v| !v.is_null()).cloned());
            }
        }
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    a == b || a.starts_with(&format!("{b}/")) || b.starts_with(&format!("{a}/"))
}

fn get_at<'a>(root: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut node = root;
    for seg in path.split('/') {
        node = node.as_object()?.get(seg)?;
    }
    Some(node)
}

fn set_at(root: &mut JsonValue, path: &str, value: JsonValue) {
    let segments: Vec<&str> = path.split('/').collect();
    let mut node = root;
    for seg in &segments[..segments.len() - 1] {
        if !node.is_object() {
            *node = json!({});
        }
        node = node
            .as_object_mut()
            .unwrap()
            .entry(seg.to_string())
            .or_insert_with(|| json!({}));
    }
    if !node.is_object() {
        *node = json!({});
    }
    node.as_object_mut()
        .unwrap()
        .insert(segments[segments.len() - 1].to_string(), value);
}

fn remove_at(root: &mut JsonValue, path: &str) {
    let segments: Vec<&str> = path.split('/').collect();
    let mut node = root;
    for seg in &segments[..segments.len() - 1] {
        match node.as_object_mut().and_then(|m| m.get_mut(*seg)) {
            Some(next) => node = next,
            None => return,
        }
    }
    if let Some(map) = node.as_object_mut() {
        map.remove(segments[segments.len() - 1]);
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn write(&self, path: &str, value: JsonValue) -> Result<(), AppError> {
        if self.take_failure() {
            return Err(AppError::TransientStore("injected write failure".to_string()));
        }
        {
            let mut data = self.data.lock().unwrap();
            set_at(&mut data, path, value);
        }
        self.notify(path);
        Ok(())
    }

    async fn push(&self, path: &str, value: JsonValue) -> Result<String, AppError> {
        if self.take_failure() {
            return Err(AppError::TransientStore("injected push failure".to_string()));
        }
        let key = format!("-{}", uuid::Uuid::new_v4().simple());
        {
            let mut data = self.data.lock().unwrap();
            set_at(&mut data, &format!("{path}/{key}"), value);
        }
        self.notify(path);
        Ok(key)
    }

    async fn read(&self, path: &str) -> Result<Option<JsonValue>, AppError> {
        if self.take_read_failure() {
            return Err(AppError::TransientStore("injected read failure".to_string()));
        }
        let data = self.data.lock().unwrap();
        Ok(get_at(&data, path).filter(|v| !v.is_null()).cloned())
    }

    fn subscribe(&self, path: &str, on_change: SnapshotFn) -> Subscription {
        let id = self.next_sub.fetch_add(1, Ordering::SeqCst);
        let initial = self.value_at(path);

        self.subs
            .lock()
            .unwrap()
            .insert(id, (path.to_string(), on_change));

        // Realtime stores deliver the current value on attach.
        {
            let subs = self.subs.lock().unwrap();
            if let Some((_, cb)) = subs.get(&id) {
                cb(initial);
            }
        }

        let subs = Arc::clone(&self.subs);
        Subscription::new(move || {
            subs.lock().unwrap().remove(&id);
        })
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        {
            let mut data = self.data.lock().unwrap();
            remove_at(&mut data, path);
        }
        self.notify(path);
        Ok(())
    }
}

/// Fixed-identity auth provider for tests.
pub struct StaticAuth {
    user: Mutex<Option<AuthUser>>,
}

impl StaticAuth {
    pub fn signed_in(id: &str, display_name: &str) -> Self {
        Self {
            user: Mutex::new(Some(AuthUser {
                id: id.to_string(),
                display_name: Some(display_name.to_string()),
                email: None,
            })),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.lock().unwrap().clone()
    }

    fn subscribe(&self, on_change: AuthChangeFn) -> Subscription {
        on_change(self.current_user());
        Subscription::noop()
    }

    async fn sign_in(&self) -> Result<AuthUser, AppError> {
        self.current_user()
            .ok_or_else(|| AppError::NotAuthenticated("no test user configured".to_string()))
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }
}

/// Builds an `AppState` over a fresh in-memory store.
pub fn test_state(auth: StaticAuth) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        auth: Arc::new(auth),
        config: Config::default(),
    };
    (state, store)
}
