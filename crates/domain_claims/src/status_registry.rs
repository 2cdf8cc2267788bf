//! TTL-cached status registry
//!
//! The set of claim statuses is data owned by the store; this registry
//! memoizes it for five minutes. A fetch failure serves a built-in default
//! list without touching the cache, so the next caller retries the fetch
//! instead of waiting out a TTL on bad data.
//!
//! Concurrent callers racing past an expired TTL may refresh redundantly;
//! the overwrite is idempotent and left unserialized.
//!
//! Terminal statuses are a structural property of the claim lifecycle, not
//! configurable data, so `is_terminal` checks a fixed set independent of
//! whatever the registry currently serves.

use chrono::Duration;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use core_kernel::{Clock, StatusId};

use crate::claim::StatusDef;
use crate::ports::StatusSource;

/// Cache lifetime for the fetched status list
const CACHE_TTL_SECS: i64 = 5 * 60;

/// Statuses that end a claim's lifecycle
pub const TERMINAL_STATUSES: [&str; 3] = ["concluido", "rejeitado", "arquivado"];

/// Case-insensitive membership test against the fixed terminal set
pub fn is_terminal(name: &str) -> bool {
    TERMINAL_STATUSES
        .iter()
        .any(|terminal| terminal.eq_ignore_ascii_case(name))
}

struct CacheSlot {
    statuses: Vec<StatusDef>,
    fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Process-wide memoized accessor for the status list
pub struct StatusRegistry {
    source: Arc<dyn StatusSource>,
    clock: Arc<dyn Clock>,
    cache: RwLock<CacheSlot>,
}

impl StatusRegistry {
    pub fn new(source: Arc<dyn StatusSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            cache: RwLock::new(CacheSlot {
                statuses: Vec::new(),
                fetched_at: None,
            }),
        }
    }

    /// Returns the status list, serving the cache while it is fresh
    ///
    /// Never fails: a fetch error yields `default_statuses()` and leaves
    /// the cache unchanged.
    pub async fn get(&self) -> Vec<StatusDef> {
        let now = self.clock.now();

        {
            let cache = self.cache.read().await;
            if let Some(fetched_at) = cache.fetched_at {
                let fresh = now - fetched_at < Duration::seconds(CACHE_TTL_SECS);
                if fresh && !cache.statuses.is_empty() {
                    return cache.statuses.clone();
                }
            }
        }

        match self.source.fetch_statuses().await {
            Ok(statuses) => {
                let mut cache = self.cache.write().await;
                cache.statuses = statuses.clone();
                cache.fetched_at = Some(now);
                statuses
            }
            Err(err) => {
                warn!(error = %err, "status fetch failed, serving default list");
                Self::default_statuses()
            }
        }
    }

    /// Looks one status up by name (case-insensitive)
    pub async fn find(&self, name: &str) -> Option<StatusDef> {
        self.get()
            .await
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Clears the cache unconditionally
    ///
    /// Called after any out-of-band status mutation.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.statuses.clear();
        cache.fetched_at = None;
    }

    /// The built-in list served when the store is unreachable
    pub fn default_statuses() -> Vec<StatusDef> {
        let defaults = [
            ("pendente", "#f59e0b", "clock"),
            ("aguardando_documentos", "#3b82f6", "file-text"),
            ("em_analise", "#8b5cf6", "search"),
            ("aprovado", "#10b981", "check-circle"),
            ("rejeitado", "#ef4444", "x-circle"),
            ("concluido", "#6b7280", "flag"),
        ];

        defaults
            .iter()
            .enumerate()
            .map(|(i, (name, color, icon))| StatusDef {
                id: StatusId::new(),
                name: (*name).to_string(),
                color: (*color).to_string(),
                icon: (*icon).to_string(),
                order: i as i32 + 1,
                active: true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_set_is_case_insensitive() {
        assert!(is_terminal("concluido"));
        assert!(is_terminal("Concluido"));
        assert!(is_terminal("REJEITADO"));
        assert!(is_terminal("arquivado"));
        assert!(!is_terminal("pendente"));
        assert!(!is_terminal(""));
    }

    #[test]
    fn test_default_statuses_shape() {
        let defaults = StatusRegistry::default_statuses();
        assert_eq!(defaults.len(), 6);
        assert!(defaults.iter().all(|s| s.active));
        assert_eq!(defaults[0].name, "pendente");
        assert_eq!(defaults[5].name, "concluido");
    }
}
