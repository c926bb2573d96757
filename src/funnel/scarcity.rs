//! Scarcity counters — client-local, explicitly simulated pressure signals.
//!
//! Neither counter reflects real inventory. "Spots left" only ever
//! decreases and persists best-effort so a reload does not reset it;
//! "buying now" is a process-local random walk.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde_json::json;

use crate::store::traits::{Storage, keys};
use crate::tracking::Analytics;

/// The "spots left" counter. Decrements on a fixed interval while above its
/// floor; never increases within or across sessions.
pub struct SpotsCounter {
    storage: Arc<dyn Storage>,
    analytics: Analytics,
    value: u32,
    floor: u32,
}

impl SpotsCounter {
    /// Load the persisted value, clamped into `[floor, initial]`, or start
    /// at `initial` on first visit.
    pub async fn load_or_start(
        storage: Arc<dyn Storage>,
        analytics: Analytics,
        initial: u32,
        floor: u32,
    ) -> Self {
        let value = match storage.get(keys::SPOTS_LEFT).await {
            Ok(Some(value)) => value
                .as_u64()
                .map(|v| (v as u32).clamp(floor, initial))
                .unwrap_or_else(|| {
                    tracing::warn!("Discarding corrupt spots counter");
                    initial
                }),
            Ok(None) => initial,
            Err(e) => {
                tracing::warn!("Storage unavailable, spots counter starts fresh: {}", e);
                initial
            }
        };
        Self {
            storage,
            analytics,
            value,
            floor,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// One scheduled decrement. Returns the new value if the counter moved,
    /// `None` once it sits at the floor. Persists best-effort and fires a
    /// `spots_updated` event per real decrement.
    pub async fn tick(&mut self) -> Option<u32> {
        if self.value <= self.floor {
            return None;
        }
        self.value -= 1;
        if let Err(e) = self.storage.put(keys::SPOTS_LEFT, &json!(self.value)).await {
            tracing::warn!("Failed to persist spots counter: {}", e);
        }
        self.analytics.spots_updated(self.value);
        Some(self.value)
    }
}

/// The "people buying now" counter: a bounded ±1 random walk re-scheduled
/// at a randomized interval after each tick.
#[derive(Debug, Clone, Copy)]
pub struct BuyingNow {
    value: u32,
    min: u32,
    max: u32,
}

impl BuyingNow {
    /// Seed the counter somewhere in the lower half of the band.
    pub fn seeded(rng: &mut impl Rng, min: u32, max: u32) -> Self {
        let seed_max = max.min(min + 4);
        Self {
            value: rng.gen_range(min..=seed_max),
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Walk one step, staying inside the band.
    pub fn tick(&mut self, rng: &mut impl Rng) -> u32 {
        if rng.gen_bool(0.5) {
            if self.value < self.max {
                self.value += 1;
            }
        } else if self.value > self.min {
            self.value -= 1;
        }
        self.value
    }

    /// The delay until the next tick, re-chosen after every tick.
    pub fn next_interval(rng: &mut impl Rng, min: Duration, max: Duration) -> Duration {
        if min >= max {
            return min;
        }
        Duration::from_millis(rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64))
    }
}
