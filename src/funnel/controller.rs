//! `PhaseController` — the multi-phase reveal state machine.
//!
//! Gates are explicit: the Loading exit is a timer, Diagnosis and Window
//! exits are confirmations, the Video exit requires the countdown to hit
//! zero AND a confirmation. Every confirmation records its per-phase
//! checkmark before the transition it gates, so the recorded flag set is
//! always a prefix of the phase sequence reached.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, interval_at, sleep};
use url::Url;

use crate::attribution::{Attribution, build_checkout_url};
use crate::config::FunnelConfig;
use crate::embed::EmbedRegistry;
use crate::tracking::Analytics;

use super::Viewport;
use super::phase::FunnelPhase;

/// Confirmation button labels, by confirmation index.
const BUTTONS: [&str; 3] = [
    "Unlock The Secret Video",
    "Reveal 72-HOUR WINDOW",
    "Reveal My Personalized Plan",
];

/// Drives the reveal funnel from Loading to Offer.
pub struct PhaseController {
    config: FunnelConfig,
    analytics: Analytics,
    embeds: EmbedRegistry,
    viewport: Arc<dyn Viewport>,
    phase: FunnelPhase,
    checkmarks: [bool; 3],
    gate_remaining: u64,
    gate_enabled: bool,
    unlock_fired: bool,
}

impl PhaseController {
    pub fn new(
        config: FunnelConfig,
        analytics: Analytics,
        embeds: EmbedRegistry,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        Self {
            gate_remaining: config.video_unlock_secs,
            config,
            analytics,
            embeds,
            viewport,
            phase: FunnelPhase::Loading,
            checkmarks: [false; 3],
            gate_enabled: false,
            unlock_fired: false,
        }
    }

    pub fn phase(&self) -> FunnelPhase {
        self.phase
    }

    /// Whether a phase's confirmation checkmark has been recorded.
    pub fn checkmark(&self, phase: FunnelPhase) -> bool {
        phase
            .confirmation_index()
            .map(|i| self.checkmarks[i])
            .unwrap_or(false)
    }

    /// Run the Loading phase: a fixed, non-cancellable analysis delay, then
    /// the diagnosis is revealed. Returns `false` outside Loading.
    pub async fn run_loading(&mut self) -> bool {
        if self.phase != FunnelPhase::Loading {
            tracing::debug!(phase = %self.phase, "run_loading outside Loading, ignoring");
            return false;
        }
        sleep(self.config.loading_delay).await;
        self.enter(FunnelPhase::Diagnosis, None)
    }

    /// Diagnosis confirmation: gated solely by the click. A repeat click
    /// finds the checkmark already recorded and does nothing.
    pub async fn confirm_diagnosis(&mut self) -> bool {
        self.confirm(FunnelPhase::Diagnosis).await
    }

    /// Video confirmation: inert until the countdown reaches zero.
    pub async fn confirm_video(&mut self) -> bool {
        if !self.gate_enabled {
            tracing::debug!(
                remaining = self.gate_remaining,
                "Video confirmation while locked, ignoring"
            );
            return false;
        }
        self.confirm(FunnelPhase::Video).await
    }

    /// Window confirmation: gated solely by the click. Enters the terminal
    /// Offer phase.
    pub async fn confirm_window(&mut self) -> bool {
        self.confirm(FunnelPhase::Window).await
    }

    /// Seconds left on the Video-phase unlock countdown.
    pub fn video_gate_remaining(&self) -> u64 {
        self.gate_remaining
    }

    /// Whether the Video-phase confirmation is active.
    pub fn video_gate_enabled(&self) -> bool {
        self.gate_enabled
    }

    /// One scheduled second of the Video unlock countdown.
    ///
    /// Reaching zero flips the enabled flag and fires the unlock analytics
    /// event exactly once per Video entry; extra ticks (or re-renders
    /// querying state) never re-fire it.
    pub fn video_gate_tick(&mut self) -> u64 {
        if self.phase != FunnelPhase::Video || self.gate_enabled {
            return self.gate_remaining;
        }
        self.gate_remaining = self.gate_remaining.saturating_sub(1);
        if self.gate_remaining == 0 {
            self.gate_enabled = true;
            if !self.unlock_fired {
                self.unlock_fired = true;
                self.analytics
                    .video_button_unlocked(self.config.video_unlock_secs);
            }
        }
        self.gate_remaining
    }

    /// Drive the unlock countdown with a 1-second ticker until it unlocks
    /// or the phase is left. Dropping the future cancels the ticker.
    pub async fn run_video_gate(&mut self) {
        let second = Duration::from_secs(1);
        let mut ticker = interval_at(Instant::now() + second, second);
        while self.phase == FunnelPhase::Video && !self.gate_enabled {
            ticker.tick().await;
            self.video_gate_tick();
        }
    }

    /// Whether the outbound purchase action is available.
    pub fn cta_available(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The purchase CTA was clicked: fire the analytics events and build
    /// the outbound URL carrying the session's attribution. `None` before
    /// the Offer is reached.
    pub fn record_cta_click(&self, attribution: &Attribution) -> Option<Url> {
        if !self.cta_available() {
            tracing::debug!(phase = %self.phase, "CTA click before Offer, ignoring");
            return None;
        }
        self.analytics.cta_buy_clicked("result_buy_main");
        Some(build_checkout_url(&self.config.checkout_url, attribution))
    }

    /// Record the confirmation flag for `from`, wait the exit-transition
    /// settle, and enter the next phase.
    async fn confirm(&mut self, from: FunnelPhase) -> bool {
        if self.phase != from {
            tracing::debug!(phase = %self.phase, confirming = %from, "Confirmation out of phase, ignoring");
            return false;
        }
        let (Some(index), Some(next)) = (from.confirmation_index(), from.next()) else {
            return false;
        };
        if self.checkmarks[index] {
            tracing::debug!(phase = %from, "Confirmation already recorded, ignoring");
            return false;
        }
        self.checkmarks[index] = true;

        sleep(self.config.exit_delay).await;
        self.enter(next, Some(BUTTONS[index]))
    }

    /// Enter a phase and run its entry side effects, in order: scroll the
    /// phase anchor into view, fire the transition event, then the
    /// phase-specific entry events and embed mounts. Gates belonging to the
    /// new phase are armed here, before any of its exits can trigger.
    fn enter(&mut self, next: FunnelPhase, button: Option<&'static str>) -> bool {
        let from = self.phase;
        if !from.can_transition_to(next) {
            tracing::warn!(from = %from, to = %next, "Invalid funnel transition, ignoring");
            return false;
        }
        self.phase = next;
        tracing::info!(from = %from, to = %next, "Funnel transition");

        self.viewport.scroll_to(next.anchor());
        if let Some(button) = button {
            self.analytics.phase_progression(from, next, button);
        }

        match next {
            FunnelPhase::Loading => {}
            FunnelPhase::Diagnosis => {
                self.analytics.revelation_viewed("Why They Left", 1);
            }
            FunnelPhase::Video => {
                self.gate_remaining = self.config.video_unlock_secs;
                self.gate_enabled = false;
                self.unlock_fired = false;
                self.embeds.request_mount(&self.config.vsl_media_id);
                self.analytics.video_started();
            }
            FunnelPhase::Window => {
                self.analytics.revelation_viewed("72 Hour Window", 2);
            }
            FunnelPhase::Offer => {
                self.analytics.revelation_viewed("Offer Revealed", 3);
                self.analytics.offer_revealed();
                self.embeds.request_mount(&self.config.closer_media_id);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::NoopEmbedHost;
    use crate::funnel::NoopViewport;
    use crate::tracking::RecordingSink;

    fn quick_config() -> FunnelConfig {
        FunnelConfig {
            loading_delay: Duration::from_millis(10),
            exit_delay: Duration::from_millis(5),
            video_unlock_secs: 3,
            ..Default::default()
        }
    }

    fn controller_with_sink() -> (PhaseController, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let controller = PhaseController::new(
            quick_config(),
            Analytics::new(sink.clone()),
            EmbedRegistry::new(Arc::new(NoopEmbedHost)),
            Arc::new(NoopViewport),
        );
        (controller, sink)
    }

    /// Drive a controller from Loading into the Video phase.
    async fn reach_video(controller: &mut PhaseController) {
        assert!(controller.run_loading().await);
        assert!(controller.confirm_diagnosis().await);
        assert_eq!(controller.phase(), FunnelPhase::Video);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_advances_automatically() {
        let (mut controller, sink) = controller_with_sink();
        assert_eq!(controller.phase(), FunnelPhase::Loading);

        assert!(controller.run_loading().await);
        assert_eq!(controller.phase(), FunnelPhase::Diagnosis);
        assert_eq!(sink.count("revelation_viewed"), 1);

        // Re-running outside Loading is a no-op.
        assert!(!controller.run_loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn double_confirmation_cannot_double_transition() {
        let (mut controller, sink) = controller_with_sink();
        controller.run_loading().await;

        assert!(controller.confirm_diagnosis().await);
        assert_eq!(controller.phase(), FunnelPhase::Video);
        assert!(controller.checkmark(FunnelPhase::Diagnosis));

        // Second rapid click: checkmark already recorded, nothing moves.
        assert!(!controller.confirm_diagnosis().await);
        assert_eq!(controller.phase(), FunnelPhase::Video);
        assert_eq!(sink.count("phase_progression_clicked"), 1);
        assert_eq!(sink.count("video_started"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn video_confirmation_inert_until_countdown_zero() {
        let (mut controller, sink) = controller_with_sink();
        reach_video(&mut controller).await;

        assert!(!controller.video_gate_enabled());
        assert!(!controller.confirm_video().await, "locked while counting");

        assert_eq!(controller.video_gate_tick(), 2);
        assert_eq!(controller.video_gate_tick(), 1);
        assert!(!controller.confirm_video().await, "still locked at 1");

        assert_eq!(controller.video_gate_tick(), 0);
        assert!(controller.video_gate_enabled());
        assert_eq!(sink.count("video_button_unlocked"), 1);

        assert!(controller.confirm_video().await);
        assert_eq!(controller.phase(), FunnelPhase::Window);
    }

    #[tokio::test(start_paused = true)]
    async fn unlock_event_fires_exactly_once() {
        let (mut controller, sink) = controller_with_sink();
        reach_video(&mut controller).await;

        // Many more ticks than the countdown needs, as a re-rendering host
        // would produce.
        for _ in 0..50 {
            controller.video_gate_tick();
        }
        assert_eq!(sink.count("video_button_unlocked"), 1);
        assert_eq!(controller.video_gate_remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_video_gate_unlocks_after_configured_seconds() {
        let (mut controller, _) = controller_with_sink();
        reach_video(&mut controller).await;

        let start = Instant::now();
        controller.run_video_gate().await;
        assert!(controller.video_gate_enabled());
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn gate_ticks_ignored_outside_video() {
        let (mut controller, sink) = controller_with_sink();
        controller.run_loading().await;

        // The Video countdown cannot start before Video is entered.
        let before = controller.video_gate_remaining();
        controller.video_gate_tick();
        assert_eq!(controller.video_gate_remaining(), before);
        assert_eq!(sink.count("video_button_unlocked"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn full_walk_reaches_offer_with_all_flags() {
        let (mut controller, sink) = controller_with_sink();
        reach_video(&mut controller).await;
        controller.run_video_gate().await;
        assert!(controller.confirm_video().await);
        assert!(controller.confirm_window().await);

        assert_eq!(controller.phase(), FunnelPhase::Offer);
        assert!(controller.checkmark(FunnelPhase::Diagnosis));
        assert!(controller.checkmark(FunnelPhase::Video));
        assert!(controller.checkmark(FunnelPhase::Window));
        assert_eq!(sink.count("offer_revealed"), 1);
        assert_eq!(sink.count("phase_progression_clicked"), 3);

        // Terminal: nothing confirms out of Offer.
        assert!(!controller.confirm_window().await);
        assert_eq!(controller.phase(), FunnelPhase::Offer);
    }

    #[tokio::test(start_paused = true)]
    async fn recorded_flags_are_a_prefix_of_the_walk() {
        let (mut controller, _) = controller_with_sink();
        controller.run_loading().await;
        assert!(!controller.checkmark(FunnelPhase::Diagnosis));

        controller.confirm_diagnosis().await;
        assert!(controller.checkmark(FunnelPhase::Diagnosis));
        assert!(!controller.checkmark(FunnelPhase::Video));
        assert!(!controller.checkmark(FunnelPhase::Window));
    }

    #[tokio::test(start_paused = true)]
    async fn confirmations_out_of_phase_are_noops() {
        let (mut controller, _) = controller_with_sink();
        controller.run_loading().await;

        // In Diagnosis; window confirmation must not move anything.
        assert!(!controller.confirm_window().await);
        assert_eq!(controller.phase(), FunnelPhase::Diagnosis);
        assert!(!controller.checkmark(FunnelPhase::Window));
    }

    #[tokio::test(start_paused = true)]
    async fn cta_only_available_in_offer() {
        let (mut controller, sink) = controller_with_sink();
        let attribution = Attribution::default();

        assert!(controller.record_cta_click(&attribution).is_none());

        reach_video(&mut controller).await;
        controller.run_video_gate().await;
        controller.confirm_video().await;
        controller.confirm_window().await;

        let url = controller.record_cta_click(&attribution).unwrap();
        assert_eq!(url.host_str(), Some("pay.example.com"));
        assert_eq!(sink.count("cta_buy_clicked"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn offer_embed_mounts_once() {
        let (mut controller, _) = controller_with_sink();
        reach_video(&mut controller).await;
        controller.run_video_gate().await;
        controller.confirm_video().await;
        controller.confirm_window().await;

        let vsl = controller.config.vsl_media_id.clone();
        let closer = controller.config.closer_media_id.clone();
        assert!(controller.embeds.is_mounted(&vsl));
        assert!(controller.embeds.is_mounted(&closer));
        // A repeat request for an already-mounted id does nothing.
        assert!(!controller.embeds.request_mount(&closer));
    }
}
