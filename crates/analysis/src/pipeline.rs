use {
    crate::{event::notify_sink, *},
    base::Epoch,
    image::{Image, crop},
    inference::{Classifier, FaceDetector},
    std::sync::{Arc, Mutex, MutexGuard},
    video::VideoFrame,
};

/// Running counters of a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames that went through conversion and detection.
    pub frames_analyzed: u64,
    /// Empty frames ignored without analysis.
    pub frames_skipped: u64,
    pub throttle_acquired: u64,
    /// Frames with a face that found the throttle closed.
    pub throttled: u64,
    pub events_emitted: u64,
    /// Events dropped because the session ended or a newer frame already
    /// reported.
    pub events_discarded: u64,
}

pub(crate) struct AnalysisState {
    pub(crate) throttle: InferenceThrottle,
    pub(crate) presence: FacePresenceTracker,
    last_emitted: u64,
    stats: PipelineStats,
}

struct Inner {
    detector: Arc<dyn FaceDetector>,
    classifier: Arc<dyn Classifier>,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<AnalysisState>>,
    epoch: Epoch,
    generation: u64,
    min_confidence: f32,
}

/// Per-frame analysis: convert, detect, gate, crop, classify, report.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct Pipeline {
    inner: Arc<Inner>,
}

impl Pipeline {
    /// Create a pipeline bound to the current generation of `epoch`. Once the
    /// epoch advances, nothing more reaches `sink`.
    pub fn new(
        detector: Arc<dyn FaceDetector>,
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn EventSink>,
        config: &PipelineConfig,
        epoch: &Epoch,
    ) -> Self {
        let state = AnalysisState {
            throttle: InferenceThrottle::new(config.min_gap()),
            presence: FacePresenceTracker::new(config.grace_window()),
            last_emitted: 0,
            stats: PipelineStats::default(),
        };
        Self {
            inner: Arc::new(Inner {
                detector,
                classifier,
                sink,
                state: Arc::new(Mutex::new(state)),
                epoch: epoch.clone(),
                generation: epoch.current(),
                min_confidence: config.min_confidence(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AnalysisState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // deliver with the state locked, so events reach the sink in order
    fn deliver(&self, state: &mut AnalysisState, sequence: u64, event: PipelineEvent) {
        if !self.inner.epoch.is_current(self.inner.generation) {
            state.stats.events_discarded += 1;
            log::debug!("frame {}: session closed, dropping {:?}", sequence, event);
            return;
        }
        if sequence < state.last_emitted {
            state.stats.events_discarded += 1;
            log::debug!(
                "frame {}: frame {} already reported, dropping {:?}",
                sequence,
                state.last_emitted,
                event
            );
            return;
        }
        state.last_emitted = sequence;
        state.stats.events_emitted += 1;
        notify_sink(self.inner.sink.as_ref(), event);
    }

    fn emit(&self, sequence: u64, event: PipelineEvent) {
        let mut state = self.lock();
        self.deliver(&mut state, sequence, event);
    }

    pub fn stats(&self) -> PipelineStats {
        self.lock().stats
    }

    pub fn min_confidence(&self) -> f32 {
        self.inner.min_confidence
    }

    /// Convert and run detection on one frame.
    ///
    /// The frame is dropped before this returns. When a face was found and the
    /// throttle let it through, the classification is handed back as a job so
    /// the caller decides where it runs.
    pub async fn analyze(&self, frame: VideoFrame) -> Option<ClassificationJob> {
        let sequence = frame.sequence;
        let now = frame.timestamp;
        if frame.is_empty() {
            self.lock().stats.frames_skipped += 1;
            log::trace!("frame {}: empty, skipped", sequence);
            return None;
        }
        self.lock().stats.frames_analyzed += 1;

        let image = match frame.to_rgb() {
            Ok(image) => image,
            Err(err) => {
                log::warn!("frame {}: {}", sequence, AnalysisError::from(err));
                self.emit(sequence, PipelineEvent::NoFace);
                return None;
            }
        };
        let detected = self.inner.detector.detect(&image).await;
        drop(frame);

        let faces = match detected {
            Ok(faces) => faces,
            Err(err) => {
                log::warn!("frame {}: {}", sequence, AnalysisError::from(err));
                self.emit(sequence, PipelineEvent::NoFace);
                return None;
            }
        };

        let Some(bounds) = faces.first().copied() else {
            let mut state = self.lock();
            if state.presence.observe_no_face(now) {
                log::debug!("frame {}: face lost", sequence);
                self.deliver(&mut state, sequence, PipelineEvent::NoFace);
            }
            return None;
        };

        let permit = {
            let mut state = self.lock();
            state.presence.observe_face(now);
            if !state.throttle.try_acquire(now) {
                state.stats.throttled += 1;
                return None;
            }
            state.stats.throttle_acquired += 1;
            ThrottlePermit::new(Arc::clone(&self.inner.state))
        };

        Some(ClassificationJob {
            pipeline: self.clone(),
            face: crop(&image, bounds),
            sequence,
            permit,
        })
    }

    /// Analyze a frame and run its classification inline.
    pub async fn process(&self, frame: VideoFrame) {
        if let Some(job) = self.analyze(frame).await {
            job.run().await;
        }
    }
}

/// A classification that holds the throttle slot until it finishes.
pub struct ClassificationJob {
    pipeline: Pipeline,
    face: Image,
    sequence: u64,
    permit: ThrottlePermit,
}

impl ClassificationJob {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn face(&self) -> &Image {
        &self.face
    }

    /// Classify the face and report the result.
    pub async fn run(self) {
        let ClassificationJob {
            pipeline,
            face,
            sequence,
            permit,
        } = self;
        let result = pipeline.inner.classifier.classify(face).await;
        drop(permit);

        let event = match result {
            Ok(classification) if classification.confidence >= pipeline.inner.min_confidence => {
                log::debug!(
                    "frame {}: {} ({:.2})",
                    sequence,
                    classification.emotion,
                    classification.confidence
                );
                PipelineEvent::FaceDetected {
                    emotion: classification.emotion,
                    confidence: classification.confidence,
                }
            }
            Ok(classification) => {
                log::debug!(
                    "frame {}: {} below confidence threshold ({:.2} < {:.2})",
                    sequence,
                    classification.emotion,
                    classification.confidence,
                    pipeline.inner.min_confidence
                );
                PipelineEvent::NoFace
            }
            Err(err) => {
                log::debug!(
                    "frame {}: {} via {}",
                    sequence,
                    AnalysisError::from(err),
                    pipeline.inner.classifier.name()
                );
                PipelineEvent::NoFace
            }
        };
        pipeline.emit(sequence, event);
    }
}
