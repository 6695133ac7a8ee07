// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct Config {
    /// Budget for a single remote store call before the caller stops
    /// waiting and proceeds with its optimistic local value.
    pub store_timeout: Duration,

    /// Extra attempts for one-shot writes on the critical path
    /// (submitting an attempt, posting a reply).
    pub write_retries: u32,

    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let store_timeout = env::var("STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        let write_retries = env::var("STORE_WRITE_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            store_timeout,
            write_retries,
            rust_log,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(10),
            write_retries: 1,
            rust_log: "info".to_string(),
        }
    }
}

/// Initialize tracing for binaries and test harnesses embedding this crate.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()
        .ok();
}
