//! Local Cooldown Tracker
//!
//! Advisory, UX-only view of the post-like cooldown. The backend enforces
//! the same window authoritatively; this tracker only saves the round trip
//! and feeds the countdown display. Clearing local storage resets it, which
//! is why it must never be the sole enforcement point.

use crate::application::config::LikeConfig;
use crate::domain::services::remaining_cooldown_ms;
use crate::domain::value_objects::CooldownStatus;
use platform::clock::Clock;
use platform::storage::KvStore;
use std::sync::Arc;

pub struct CooldownTracker<K, C>
where
    K: KvStore,
    C: Clock,
{
    store: Arc<K>,
    clock: Arc<C>,
    config: Arc<LikeConfig>,
}

impl<K, C> CooldownTracker<K, C>
where
    K: KvStore,
    C: Clock,
{
    pub fn new(store: Arc<K>, clock: Arc<C>, config: Arc<LikeConfig>) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    fn last_success_ms(&self) -> Option<i64> {
        let raw = self.store.get(&self.config.last_like_key)?;
        match raw.parse::<i64>() {
            Ok(ms) => Some(ms),
            Err(e) => {
                tracing::debug!(error = %e, "Stored like timestamp is malformed, ignoring");
                None
            }
        }
    }

    /// Milliseconds until the visitor may like again; 0 when eligible
    pub fn remaining_ms(&self) -> i64 {
        match self.last_success_ms() {
            Some(last) => {
                remaining_cooldown_ms(self.clock.now_ms(), last, self.config.cooldown_ms())
            }
            None => 0,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.remaining_ms() == 0
    }

    /// Full status snapshot, for countdown rendering
    pub fn status(&self) -> CooldownStatus {
        match self.last_success_ms() {
            Some(last) => {
                let remaining =
                    remaining_cooldown_ms(self.clock.now_ms(), last, self.config.cooldown_ms());
                CooldownStatus {
                    eligible: remaining == 0,
                    remaining_ms: remaining,
                    reset_at_ms: Some(last + self.config.cooldown_ms()),
                }
            }
            None => CooldownStatus {
                eligible: true,
                remaining_ms: 0,
                reset_at_ms: None,
            },
        }
    }

    /// Persist "now" as the last successful like
    ///
    /// Called only after the backend accepted the submission. The write is
    /// synchronous, so an immediately following check sees the new window.
    pub fn record_success(&self) {
        let now = self.clock.now_ms();
        self.store
            .set(&self.config.last_like_key, &now.to_string());
        tracing::debug!(last_like_ms = now, "Cooldown window opened");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::clock::ManualClock;
    use platform::storage::MemoryStore;

    fn tracker(
        clock: Arc<ManualClock>,
    ) -> CooldownTracker<MemoryStore, ManualClock> {
        CooldownTracker::new(
            Arc::new(MemoryStore::new()),
            clock,
            Arc::new(LikeConfig::default()),
        )
    }

    #[test]
    fn test_eligible_with_no_record() {
        let clock = Arc::new(ManualClock::new(1_000));
        let tracker = tracker(clock);
        assert!(tracker.is_eligible());
        assert_eq!(tracker.remaining_ms(), 0);
        assert_eq!(tracker.status().reset_at_ms, None);
    }

    #[test]
    fn test_record_success_opens_window() {
        let clock = Arc::new(ManualClock::new(50_000));
        let tracker = tracker(clock.clone());

        tracker.record_success();
        assert!(!tracker.is_eligible());
        assert_eq!(tracker.remaining_ms(), 600_000);
        assert_eq!(tracker.status().reset_at_ms, Some(650_000));
    }

    #[test]
    fn test_remaining_decreases_monotonically() {
        let clock = Arc::new(ManualClock::new(0));
        let tracker = tracker(clock.clone());
        tracker.record_success();

        let mut prev = tracker.remaining_ms();
        for step in [1, 999, 59_000, 240_000, 299_999, 1] {
            clock.advance_ms(step);
            let r = tracker.remaining_ms();
            assert!(r < prev);
            assert!(r > 0);
            prev = r;
        }
    }

    #[test]
    fn test_zero_stays_zero_until_next_success() {
        let clock = Arc::new(ManualClock::new(0));
        let tracker = tracker(clock.clone());
        tracker.record_success();

        clock.advance_ms(600_000);
        assert!(tracker.is_eligible());

        clock.advance_ms(3_600_000);
        assert!(tracker.is_eligible());
        assert_eq!(tracker.remaining_ms(), 0);

        tracker.record_success();
        assert!(!tracker.is_eligible());
    }

    #[test]
    fn test_malformed_timestamp_reads_as_eligible() {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(MemoryStore::new());
        let config = Arc::new(LikeConfig::default());
        store.set(&config.last_like_key, "yesterday");

        let tracker = CooldownTracker::new(store, clock, config);
        assert!(tracker.is_eligible());
    }
}
