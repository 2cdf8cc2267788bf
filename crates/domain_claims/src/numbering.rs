//! Sequential claim-number generation
//!
//! Numbers are allocated by reading the greatest persisted number for the
//! current year and incrementing it. The read-then-increment window is not
//! serialized: concurrent callers can race and draw the same number. The
//! store's unique constraint on `numero_sinistro` turns that race into an
//! insert error instead of silent reuse.
//!
//! When the store read fails the generator degrades to a timestamp-derived
//! number of the same shape. Fallback values are not guaranteed
//! collision-free against the sequential range.

use chrono::Datelike;
use std::sync::Arc;
use tracing::warn;

use core_kernel::{ClaimNumber, Clock};

use crate::ports::ClaimNumberStore;

/// Allocates claim numbers for new sinistros
pub struct ClaimNumberGenerator {
    store: Arc<dyn ClaimNumberStore>,
    clock: Arc<dyn Clock>,
}

impl ClaimNumberGenerator {
    pub fn new(store: Arc<dyn ClaimNumberStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Produces the next claim number
    ///
    /// Never fails: an empty store starts the year at 000001, and store
    /// errors (or an unparsable persisted number) fall back to the last
    /// six digits of the current epoch milliseconds.
    pub async fn generate(&self) -> ClaimNumber {
        let now = self.clock.now();
        let year = now.year();
        let prefix = ClaimNumber::year_prefix(year);

        match self.store.latest_with_prefix(&prefix).await {
            Ok(None) => ClaimNumber::first(year),
            Ok(Some(latest)) => match latest.parse::<ClaimNumber>().and_then(|n| n.next()) {
                Ok(next) => next,
                Err(err) => {
                    warn!(%latest, error = %err, "persisted claim number unusable, falling back");
                    self.fallback(year)
                }
            },
            Err(err) => {
                warn!(error = %err, "claim-number query failed, falling back");
                self.fallback(year)
            }
        }
    }

    fn fallback(&self, year: i32) -> ClaimNumber {
        let millis = self.clock.now().timestamp_millis();
        let sequence = (millis.rem_euclid(1_000_000)) as u32;
        ClaimNumber::new(year, sequence).unwrap_or_else(|_| ClaimNumber::first(year))
    }
}
