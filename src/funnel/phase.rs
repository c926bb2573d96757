//! Funnel phase state machine.

use serde::{Deserialize, Serialize};

/// The phases of the reveal funnel.
///
/// Progresses linearly: Loading → Diagnosis → Video → Window → Offer.
/// Transitions are one-directional; Offer is terminal and stays mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelPhase {
    /// Simulated analysis delay before anything is revealed.
    Loading,
    /// The personalized diagnosis.
    Diagnosis,
    /// The main sales video, with the timer-locked continue button.
    Video,
    /// The 72-hour-window revelation.
    Window,
    /// The offer: value stack, price, guarantee, purchase CTA.
    Offer,
}

impl FunnelPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: FunnelPhase) -> bool {
        self.next() == Some(target)
    }

    /// The next phase in the linear progression, if any.
    pub fn next(&self) -> Option<FunnelPhase> {
        use FunnelPhase::*;
        match self {
            Loading => Some(Diagnosis),
            Diagnosis => Some(Video),
            Video => Some(Window),
            Window => Some(Offer),
            Offer => None,
        }
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Offer)
    }

    /// Index into the per-phase confirmation flags, for phases gated by an
    /// explicit confirmation.
    pub fn confirmation_index(&self) -> Option<usize> {
        match self {
            Self::Diagnosis => Some(0),
            Self::Video => Some(1),
            Self::Window => Some(2),
            Self::Loading | Self::Offer => None,
        }
    }

    /// Scroll anchor of this phase's section.
    pub fn anchor(&self) -> &'static str {
        match self {
            Self::Loading => "loading-section",
            Self::Diagnosis => "diagnosis-section",
            Self::Video => "video-section",
            Self::Window => "window-section",
            Self::Offer => "offer-section",
        }
    }

    /// Label in the step progress strip.
    pub fn step_label(&self) -> &'static str {
        match self {
            Self::Loading => "Analyzing",
            Self::Diagnosis => "Diagnosis",
            Self::Video => "Video",
            Self::Window => "72h Window",
            Self::Offer => "Solution",
        }
    }
}

impl std::fmt::Display for FunnelPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Loading => "loading",
            Self::Diagnosis => "diagnosis",
            Self::Video => "video",
            Self::Window => "window",
            Self::Offer => "offer",
        };
        f.write_str(s)
    }
}
