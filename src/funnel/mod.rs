//! The post-dialogue reveal funnel — phase state machine, session countdown,
//! and scarcity counters.

pub mod controller;
pub mod countdown;
pub mod phase;
pub mod scarcity;

pub use controller::PhaseController;
pub use countdown::RevealCountdown;
pub use phase::FunnelPhase;
pub use scarcity::{BuyingNow, SpotsCounter};

/// Viewport collaborator — the funnel asks it to bring each phase's anchor
/// into view on entry. Purely visual; the default does nothing.
pub trait Viewport: Send + Sync {
    fn scroll_to(&self, anchor: &'static str) {
        let _ = anchor;
    }
}

/// Viewport that ignores scroll requests.
pub struct NoopViewport;

impl Viewport for NoopViewport {}
