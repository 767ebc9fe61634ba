//! Live-typing translation control state.
//!
//! While the user types inside an editable block, the block's content is
//! periodically replaced with its translation. The state here is what keeps
//! that loop from feeding on itself: the translation's own insertion fires
//! an input event, which must not trigger another translation.
//!
//! The timer itself lives in the platform layer; this struct only decides
//! when one should be (re)started and whether a fired timer still counts.

/// Quiet period after the last qualifying edit before a request fires.
pub const LIVE_DEBOUNCE_MS: u32 = 1500;

/// Decision for one edit-input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveDecision {
    /// Restart the debounce timer with this generation.
    Schedule { generation: u64 },
    /// Drop the event (in flight, self-triggered, or empty block).
    Ignore,
}

/// Debounce and feedback-loop guard state for one page.
#[derive(Debug, Default)]
pub struct LiveTranslate {
    /// Source text of the most recent outbound translation.
    last_source: String,
    in_flight: bool,
    /// Bumped on every schedule; a fired timer with an older generation was
    /// superseded and must not send.
    generation: u64,
}

impl LiveTranslate {
    pub fn new() -> Self {
        Self::default()
    }

    /// An edit-input event fired with the enclosing block currently reading
    /// `block_text` (trimmed by the caller).
    pub fn note_input(&mut self, block_text: &str) -> LiveDecision {
        if block_text.is_empty() {
            // Block emptied out: forget the guard so retyping retranslates.
            self.generation += 1;
            self.last_source.clear();
            return LiveDecision::Ignore;
        }
        if self.in_flight || block_text == self.last_source {
            return LiveDecision::Ignore;
        }
        self.generation += 1;
        LiveDecision::Schedule {
            generation: self.generation,
        }
    }

    /// The debounce timer for `generation` elapsed; `current_text` is the
    /// block's text read now, at fire time. Returns the text to translate,
    /// or `None` when the timer was superseded or the guard applies.
    pub fn timer_fired(&mut self, generation: u64, current_text: &str) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        let text = current_text.trim();
        if text.is_empty() || self.in_flight || text == self.last_source {
            return None;
        }
        self.last_source = text.to_owned();
        self.in_flight = true;
        Some(text.to_owned())
    }

    /// The translation was applied to the block.
    pub fn on_success(&mut self) {
        self.in_flight = false;
    }

    /// The request failed: clear the guard so the next edit retries instead
    /// of being permanently suppressed.
    pub fn on_failure(&mut self) {
        self.in_flight = false;
        self.last_source.clear();
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
