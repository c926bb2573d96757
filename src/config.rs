//! Configuration types.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Funnel configuration.
///
/// Every timing gate and counter band in the funnel is a knob here so tests
/// can shrink them and the binary can override them from the environment.
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    /// Interval between revealed characters in the typed-text effect.
    pub type_tick: Duration,
    /// Delay between a prompt finishing typing and its options unlocking.
    pub settle_delay: Duration,
    /// Simulated "analyzing" pause between an answer and its acknowledgement.
    pub processing_delay: Duration,
    /// Pause between an acknowledgement finishing and the next question.
    pub inter_question_pause: Duration,
    /// Pause before the closing message after the final acknowledgement.
    pub completion_pause: Duration,
    /// How long the Loading phase runs before revealing the diagnosis.
    pub loading_delay: Duration,
    /// Tick interval of the decorative loading progress bar.
    pub loading_progress_tick: Duration,
    /// Progress-bar increment per tick (percent).
    pub loading_progress_step: u8,
    /// Fade-out settle delay applied between recording a confirmation and
    /// entering the next phase.
    pub exit_delay: Duration,
    /// Seconds the Video-phase confirmation stays locked after entry.
    pub video_unlock_secs: u64,
    /// Length of the session countdown window.
    pub session_window: Duration,
    /// Interval between "spots left" decrements.
    pub spots_interval: Duration,
    /// First-visit value of the spots counter.
    pub spots_initial: u32,
    /// The spots counter never goes below this.
    pub spots_floor: u32,
    /// Band for the "people buying now" random walk.
    pub buying_min: u32,
    pub buying_max: u32,
    /// Bounds for the randomized re-scheduling of the buying-now ticker.
    pub buying_interval_min: Duration,
    pub buying_interval_max: Duration,
    /// Base checkout URL the attribution parameters are appended to.
    pub checkout_url: Url,
    /// Media id of the main sales video, mounted on Video-phase entry.
    pub vsl_media_id: String,
    /// Media id of the closer video, mounted on Offer entry.
    pub closer_media_id: String,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            type_tick: Duration::from_millis(50),
            settle_delay: Duration::from_millis(300),
            processing_delay: Duration::from_millis(1500),
            inter_question_pause: Duration::from_millis(800),
            completion_pause: Duration::from_millis(1000),
            loading_delay: Duration::from_millis(2500),
            loading_progress_tick: Duration::from_millis(100),
            loading_progress_step: 4,
            exit_delay: Duration::from_millis(400),
            video_unlock_secs: 20,
            session_window: Duration::from_secs(47 * 60),
            spots_interval: Duration::from_secs(45),
            spots_initial: 50,
            spots_floor: 15,
            buying_min: 1,
            buying_max: 7,
            buying_interval_min: Duration::from_secs(5),
            buying_interval_max: Duration::from_secs(15),
            checkout_url: Url::parse("https://pay.example.com/checkout")
                .expect("default checkout URL is valid"),
            vsl_media_id: "vid-main-plan".to_string(),
            closer_media_id: "vid-final-message".to_string(),
        }
    }
}

impl FunnelConfig {
    /// Replace the checkout URL, validating it parses.
    pub fn with_checkout_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.checkout_url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            key: "checkout_url".to_string(),
            source,
        })?;
        Ok(self)
    }

    /// Validate band invariants that the defaults uphold by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spots_floor > self.spots_initial {
            return Err(ConfigError::InvalidValue {
                key: "spots_floor".to_string(),
                message: format!(
                    "floor {} exceeds initial value {}",
                    self.spots_floor, self.spots_initial
                ),
            });
        }
        if self.buying_min == 0 || self.buying_min > self.buying_max {
            return Err(ConfigError::InvalidValue {
                key: "buying_min".to_string(),
                message: format!("band [{}, {}] is empty", self.buying_min, self.buying_max),
            });
        }
        if self.buying_interval_min > self.buying_interval_max {
            return Err(ConfigError::InvalidValue {
                key: "buying_interval_min".to_string(),
                message: "interval lower bound exceeds upper bound".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        FunnelConfig::default().validate().unwrap();
    }

    #[test]
    fn bad_spots_band_rejected() {
        let config = FunnelConfig {
            spots_floor: 99,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_checkout_url_rejected() {
        assert!(
            FunnelConfig::default()
                .with_checkout_url("not a url")
                .is_err()
        );
    }

    #[test]
    fn checkout_url_override() {
        let config = FunnelConfig::default()
            .with_checkout_url("https://pay.example.com/plan?offer=full")
            .unwrap();
        assert_eq!(config.checkout_url.path(), "/plan");
    }
}
