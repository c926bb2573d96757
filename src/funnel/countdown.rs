//! Session countdown — a wall-clock deadline persisted once and re-derived
//! from elapsed real time on every load.
//!
//! Informational pressure only: reaching zero changes nothing but the
//! display.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::store::traits::{Storage, keys};

/// The countdown shown throughout the reveal experience.
#[derive(Debug, Clone, Copy)]
pub struct RevealCountdown {
    started_at: DateTime<Utc>,
    window: Duration,
}

impl RevealCountdown {
    /// Load the persisted start timestamp, or start the window at `now` and
    /// persist it. The timestamp is written once per session and never
    /// reset while it exists, so remaining time is monotonically
    /// non-increasing across reloads.
    pub async fn load_or_start(
        storage: &Arc<dyn Storage>,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        match storage.get(keys::SESSION_START).await {
            Ok(Some(value)) => {
                if let Some(started_at) = value
                    .as_str()
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                {
                    return Self {
                        started_at: started_at.with_timezone(&Utc),
                        window,
                    };
                }
                tracing::warn!("Discarding corrupt session start timestamp");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Storage unavailable, countdown starts fresh: {}", e);
                return Self {
                    started_at: now,
                    window,
                };
            }
        }

        if let Err(e) = storage
            .put(keys::SESSION_START, &json!(now.to_rfc3339()))
            .await
        {
            tracing::warn!("Failed to persist session start: {}", e);
        }
        Self {
            started_at: now,
            window,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Remaining time at `now`, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let deadline = self.started_at
            + chrono::Duration::from_std(self.window).unwrap_or_else(|_| chrono::Duration::zero());
        (deadline - now).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).is_zero()
    }
}

/// Format a duration as `M:SS` for the urgency banner.
pub fn format_mmss(remaining: Duration) -> String {
    let total = remaining.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    const WINDOW: Duration = Duration::from_secs(47 * 60);

    #[tokio::test]
    async fn starts_full_and_persists_start() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let now = Utc::now();
        let countdown = RevealCountdown::load_or_start(&storage, WINDOW, now).await;
        assert_eq!(countdown.remaining(now), WINDOW);
        assert!(storage.get(keys::SESSION_START).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reload_subtracts_elapsed_time() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let start = Utc::now();
        RevealCountdown::load_or_start(&storage, WINDOW, start).await;

        // Reload 90 seconds later.
        let later = start + chrono::Duration::seconds(90);
        let reloaded = RevealCountdown::load_or_start(&storage, WINDOW, later).await;
        assert_eq!(reloaded.remaining(later), WINDOW - Duration::from_secs(90));
        assert_eq!(reloaded.started_at(), start);
    }

    #[tokio::test]
    async fn never_negative_after_window_passes() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let start = Utc::now();
        let countdown = RevealCountdown::load_or_start(&storage, WINDOW, start).await;

        let long_after = start + chrono::Duration::hours(3);
        assert_eq!(countdown.remaining(long_after), Duration::ZERO);
        assert!(countdown.is_expired(long_after));
    }

    #[tokio::test]
    async fn remaining_is_monotonic() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let start = Utc::now();
        let countdown = RevealCountdown::load_or_start(&storage, WINDOW, start).await;

        let mut last = countdown.remaining(start);
        for minute in 1..60 {
            let now = start + chrono::Duration::minutes(minute);
            let remaining = countdown.remaining(now);
            assert!(remaining <= last);
            last = remaining;
        }
    }

    #[tokio::test]
    async fn corrupt_timestamp_restarts_window() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage
            .put(keys::SESSION_START, &json!("not a timestamp"))
            .await
            .unwrap();

        let now = Utc::now();
        let countdown = RevealCountdown::load_or_start(&storage, WINDOW, now).await;
        assert_eq!(countdown.remaining(now), WINDOW);
    }

    #[test]
    fn mmss_formatting() {
        assert_eq!(format_mmss(Duration::from_secs(47 * 60)), "47:00");
        assert_eq!(format_mmss(Duration::from_secs(61)), "1:01");
        assert_eq!(format_mmss(Duration::from_secs(9)), "0:09");
        assert_eq!(format_mmss(Duration::ZERO), "0:00");
    }
}
