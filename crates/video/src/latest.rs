use {
    crate::*,
    std::sync::{Arc, Mutex, MutexGuard},
    tokio::sync::Notify,
};

struct Slot {
    frame: Option<VideoFrame>,
    next_sequence: u64,
    replaced: u64,
    closed: bool,
}

struct Shared {
    slot: Mutex<Slot>,
    notify: Notify,
}

impl Shared {
    // a panic while holding the slot leaves it consistent, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn close(&self) {
        let pending = {
            let mut slot = self.lock();
            slot.closed = true;
            slot.frame.take()
        };
        drop(pending);
        self.notify.notify_waiters();
        self.notify.notify_one();
    }
}

/// Producer half of a keep-latest frame channel.
pub struct FrameSender {
    shared: Arc<Shared>,
}

/// Consumer half of a keep-latest frame channel.
pub struct FrameReceiver {
    shared: Arc<Shared>,
}

/// Create a channel that holds at most one undelivered frame.
///
/// Sending while a frame is still pending replaces (and drops) the pending
/// one. Frames are numbered from 1 in the order they are sent.
pub fn latest_channel() -> (FrameSender, FrameReceiver) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            frame: None,
            next_sequence: 1,
            replaced: 0,
            closed: false,
        }),
        notify: Notify::new(),
    });
    (
        FrameSender {
            shared: Arc::clone(&shared),
        },
        FrameReceiver { shared },
    )
}

impl FrameSender {
    /// Publish a frame and return its sequence number.
    ///
    /// Fails with `VideoError::Closed` once the receiver is gone; the frame is
    /// dropped in that case.
    pub fn send(&self, mut frame: VideoFrame) -> Result<u64, VideoError> {
        let (sequence, replaced) = {
            let mut slot = self.shared.lock();
            if slot.closed {
                return Err(VideoError::Closed);
            }
            let sequence = slot.next_sequence;
            slot.next_sequence += 1;
            frame.sequence = sequence;
            let replaced = slot.frame.replace(frame);
            if replaced.is_some() {
                slot.replaced += 1;
            }
            (sequence, replaced)
        };
        if let Some(old) = replaced {
            log::trace!("frame {} replaced by {}", old.sequence, sequence);
        }
        self.shared.notify.notify_one();
        Ok(sequence)
    }

    /// Number of frames dropped because a newer one arrived first.
    pub fn replaced(&self) -> u64 {
        self.shared.lock().replaced
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn close(&self) {
        self.shared.close();
    }
}

impl Drop for FrameSender {
    fn drop(&mut self) {
        self.shared.close();
    }
}

impl FrameReceiver {
    /// Wait for the newest frame. Returns `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<VideoFrame> {
        loop {
            let notified = self.shared.notify.notified();
            {
                let mut slot = self.shared.lock();
                if let Some(frame) = slot.frame.take() {
                    return Some(frame);
                }
                if slot.closed {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Take the pending frame without waiting.
    pub fn try_recv(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        let mut slot = self.shared.lock();
        match slot.frame.take() {
            Some(frame) => Ok(Some(frame)),
            None if slot.closed => Err(VideoError::Closed),
            None => Ok(None),
        }
    }

    pub fn close(&self) {
        self.shared.close();
    }
}

impl Drop for FrameReceiver {
    fn drop(&mut self) {
        self.shared.close();
    }
}
