use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A shared generation counter for session teardown.
///
/// Everything spawned by a session captures the generation that was current
/// when it started. Once `advance()` is called, results carrying the old
/// generation are stale and get discarded instead of delivered.
#[derive(Clone, Debug)]
pub struct Epoch {
    value: Arc<AtomicU64>,
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

impl Epoch {
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Get the current generation.
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Advance to the next generation. Returns the new value.
    pub fn advance(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Check if the given generation is still current.
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.current()
    }
}
