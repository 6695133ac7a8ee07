// src/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::store::{AuthProvider, RemoteStore};

/// Shared handles the service layer operates on: the remote store, the
/// auth provider and the runtime configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RemoteStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub config: Config,
}
