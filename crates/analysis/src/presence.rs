use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    NoFace,
    FacePresent { last_seen: Duration },
}

/// Hysteresis on face presence: a face counts as gone only after none has
/// been seen for longer than the grace window.
#[derive(Debug, Clone)]
pub struct FacePresenceTracker {
    state: PresenceState,
    grace_window: Duration,
}

impl FacePresenceTracker {
    pub fn new(grace_window: Duration) -> Self {
        Self {
            state: PresenceState::NoFace,
            grace_window,
        }
    }

    pub fn observe_face(&mut self, now: Duration) {
        let last_seen = match self.state {
            PresenceState::FacePresent { last_seen } => last_seen.max(now),
            PresenceState::NoFace => now,
        };
        self.state = PresenceState::FacePresent { last_seen };
    }

    /// Record a frame without a face. Returns `true` exactly when this frame
    /// ends a face presence.
    pub fn observe_no_face(&mut self, now: Duration) -> bool {
        match self.state {
            PresenceState::FacePresent { last_seen }
                if now.saturating_sub(last_seen) > self.grace_window =>
            {
                self.state = PresenceState::NoFace;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn is_face_present(&self) -> bool {
        matches!(self.state, PresenceState::FacePresent { .. })
    }

    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }
}
