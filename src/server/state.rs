//! Server state and API-key usage accounting.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::config::ServerConfig;
use crate::config::ApiKeyEntry;
use crate::engine::Analyzer;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Detection engine
    pub analyzer: Analyzer,
    /// API-key usage ledger
    pub keys: KeyStore,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig) -> Self {
        let keys = KeyStore::new(config.api_keys.clone());

        Self {
            config,
            analyzer: Analyzer::new(),
            keys,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Outcome of an API-key check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCheck {
    /// Key accepted; request counted against the window
    Allowed {
        /// Plan name for the key
        plan: String,
        /// Requests left in the current window
        remaining: u32,
    },
    /// Key not provisioned
    UnknownKey,
    /// Window quota exhausted
    RateLimited {
        /// Seconds until the window resets
        retry_after_secs: u64,
    },
}

/// Explicit, injectable usage ledger for provisioned API keys.
///
/// All mutation happens under the write lock, so there is a single writer
/// per key; windows reset monotonically (a window restarts only when the
/// previous one has fully elapsed). Key issuance is out of scope: the key
/// set is fixed at construction.
pub struct KeyStore {
    keys: Arc<RwLock<HashMap<String, KeyUsage>>>,
    window: Duration,
}

/// Usage entry for one key
struct KeyUsage {
    plan: String,
    per_minute: u32,
    window_start: Instant,
    used: u32,
}

impl KeyStore {
    /// Create a store over the provisioned key set
    pub fn new(entries: Vec<ApiKeyEntry>) -> Self {
        let keys = entries
            .into_iter()
            .map(|e| {
                let usage = KeyUsage {
                    plan: e.plan,
                    per_minute: e.per_minute,
                    window_start: Instant::now(),
                    used: 0,
                };
                (e.key, usage)
            })
            .collect();

        Self {
            keys: Arc::new(RwLock::new(keys)),
            window: Duration::from_secs(60),
        }
    }

    /// Set the rate-limit window
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Check a key and count this request against its window
    pub async fn check(&self, key: &str) -> KeyCheck {
        let mut keys = self.keys.write().await;

        let Some(entry) = keys.get_mut(key) else {
            return KeyCheck::UnknownKey;
        };

        if entry.window_start.elapsed() >= self.window {
            entry.window_start = Instant::now();
            entry.used = 0;
        }

        if entry.used >= entry.per_minute {
            let elapsed = entry.window_start.elapsed();
            let retry = self.window.saturating_sub(elapsed);
            return KeyCheck::RateLimited {
                retry_after_secs: retry.as_secs().max(1),
            };
        }

        entry.used += 1;
        KeyCheck::Allowed {
            plan: entry.plan.clone(),
            remaining: entry.per_minute - entry.used,
        }
    }

    /// Number of provisioned keys
    pub async fn count(&self) -> usize {
        self.keys.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(per_minute: u32) -> ApiKeyEntry {
        ApiKeyEntry {
            key: "pg_test".to_string(),
            plan: "free".to_string(),
            per_minute,
        }
    }

    #[tokio::test]
    async fn test_unknown_key() {
        let store = KeyStore::new(vec![test_key(10)]);
        assert_eq!(store.check("missing").await, KeyCheck::UnknownKey);
    }

    #[tokio::test]
    async fn test_allowed_counts_down() {
        let store = KeyStore::new(vec![test_key(2)]);

        assert_eq!(
            store.check("pg_test").await,
            KeyCheck::Allowed { plan: "free".to_string(), remaining: 1 }
        );
        assert_eq!(
            store.check("pg_test").await,
            KeyCheck::Allowed { plan: "free".to_string(), remaining: 0 }
        );
    }

    #[tokio::test]
    async fn test_rate_limited_when_exhausted() {
        let store = KeyStore::new(vec![test_key(1)]);

        assert!(matches!(store.check("pg_test").await, KeyCheck::Allowed { .. }));
        assert!(matches!(store.check("pg_test").await, KeyCheck::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_window_reset() {
        let store =
            KeyStore::new(vec![test_key(1)]).with_window(Duration::from_millis(10));

        assert!(matches!(store.check("pg_test").await, KeyCheck::Allowed { .. }));
        assert!(matches!(store.check("pg_test").await, KeyCheck::RateLimited { .. }));

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(matches!(store.check("pg_test").await, KeyCheck::Allowed { .. }));
    }

    #[tokio::test]
    async fn test_key_count() {
        let store = KeyStore::new(vec![test_key(10)]);
        assert_eq!(store.count().await, 1);
    }
}
