//! Typed-reveal primitive — the character-by-character text presentation
//! effect shared by the dialogue and the reveal phases.
//!
//! A [`TypedReveal`] is created per text value; each call to
//! [`TypedReveal::advance`] waits one tick and exposes one more character.
//! Dropping the value (or the future driving it) cancels the effect at
//! whatever prefix it reached.

use std::time::Duration;

use futures::Stream;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Pure derivation of how many characters are visible after `elapsed` time
/// at one character per `tick`.
pub fn visible_chars(total: usize, elapsed: Duration, tick: Duration) -> usize {
    if tick.is_zero() {
        return total;
    }
    let ticks = (elapsed.as_millis() / tick.as_millis()) as usize;
    ticks.min(total)
}

/// A cancellable, restartable typed reveal of one text value.
pub struct TypedReveal {
    text: String,
    /// Byte offset just past each character, in order.
    boundaries: Vec<usize>,
    shown: usize,
    ticker: Interval,
}

impl TypedReveal {
    /// Start a reveal at the empty prefix. The first character appears one
    /// tick after creation.
    pub fn new(text: impl Into<String>, tick: Duration) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            text,
            boundaries,
            shown: 0,
            ticker,
        }
    }

    /// The full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The currently visible prefix.
    pub fn prefix(&self) -> &str {
        if self.shown == 0 {
            ""
        } else {
            &self.text[..self.boundaries[self.shown - 1]]
        }
    }

    /// Whether the full text is visible.
    pub fn is_complete(&self) -> bool {
        self.shown == self.boundaries.len()
    }

    /// Jump straight to the full text.
    pub fn skip_to_end(&mut self) {
        self.shown = self.boundaries.len();
    }

    /// Wait one tick and reveal the next character, returning the new
    /// prefix. Returns `None` once the reveal is complete; the first `None`
    /// is the completion signal and is observed at most once per text.
    pub async fn advance(&mut self) -> Option<&str> {
        if self.is_complete() {
            return None;
        }
        self.ticker.tick().await;
        self.shown += 1;
        Some(self.prefix())
    }

    /// Drive the reveal to completion, discarding intermediate frames.
    pub async fn run_to_end(&mut self) {
        while self.advance().await.is_some() {}
    }

    /// Adapt the reveal into a stream of owned prefix frames.
    pub fn into_stream(self) -> impl Stream<Item = String> {
        use tokio_stream::{StreamExt, wrappers::IntervalStream};

        let Self {
            text,
            boundaries,
            shown,
            ticker,
        } = self;
        let mut next = shown;
        IntervalStream::new(ticker)
            .take(boundaries.len().saturating_sub(shown))
            .map(move |_| {
                next += 1;
                text[..boundaries[next - 1]].to_string()
            })
    }
}
