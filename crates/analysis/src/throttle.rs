use {
    crate::pipeline::AnalysisState,
    std::{
        sync::{Arc, Mutex},
        time::Duration,
    },
};

/// Single-flight gate with a minimum gap between invocations.
#[derive(Debug, Clone)]
pub struct InferenceThrottle {
    in_flight: bool,
    last_invocation: Option<Duration>,
    min_gap: Duration,
}

impl InferenceThrottle {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            in_flight: false,
            last_invocation: None,
            min_gap,
        }
    }

    /// Take the slot at `now`. Fails while an invocation is in flight or the
    /// previous one started less than `min_gap` ago.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        if self.in_flight {
            return false;
        }
        if let Some(last) = self.last_invocation {
            if now.saturating_sub(last) < self.min_gap {
                return false;
            }
        }
        self.in_flight = true;
        self.last_invocation = Some(now);
        true
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_invocation(&self) -> Option<Duration> {
        self.last_invocation
    }

    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }
}

/// Proof of an acquired throttle slot. Dropping it releases the slot, whether
/// the classification finished, failed, panicked or was aborted.
pub struct ThrottlePermit {
    state: Arc<Mutex<AnalysisState>>,
}

impl ThrottlePermit {
    pub(crate) fn new(state: Arc<Mutex<AnalysisState>>) -> Self {
        Self { state }
    }
}

impl Drop for ThrottlePermit {
    fn drop(&mut self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.throttle.release();
    }
}
