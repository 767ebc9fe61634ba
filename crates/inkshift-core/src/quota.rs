//! Trial-credential quota bookkeeping.

/// A monotonically decreasing trial counter. The contract is decrement at
/// most once per successful user-visible operation: the worker calls
/// [`TrialQuota::consume`] once after a request succeeds, never per HTTP
/// attempt, so a fallback call after a primary failure cannot double-count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialQuota {
    pub active: bool,
    pub remaining: u32,
}

impl TrialQuota {
    pub fn new(active: bool, remaining: u32) -> Self {
        Self { active, remaining }
    }

    /// Whether the shared trial credential should be used for the next call.
    pub fn usable(&self) -> bool {
        self.active && self.remaining > 0
    }

    /// Consume one trial use. Returns true when a use was actually consumed;
    /// deactivates the trial when the counter reaches zero.
    pub fn consume(&mut self) -> bool {
        if !self.usable() {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.active = false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_decrements_once() {
        let mut quota = TrialQuota::new(true, 2);
        assert!(quota.consume());
        assert_eq!(quota.remaining, 1);
        assert!(quota.active);
    }

    #[test]
    fn exhaustion_deactivates() {
        let mut quota = TrialQuota::new(true, 1);
        assert!(quota.consume());
        assert_eq!(quota.remaining, 0);
        assert!(!quota.active);
        assert!(!quota.consume());
    }

    #[test]
    fn inactive_trial_never_consumes() {
        let mut quota = TrialQuota::new(false, 10);
        assert!(!quota.usable());
        assert!(!quota.consume());
        assert_eq!(quota.remaining, 10);
    }
}
