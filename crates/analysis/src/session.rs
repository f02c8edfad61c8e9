use {
    crate::*,
    base::Epoch,
    inference::{Classifier, FaceDetector, open_classifier},
    std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    tokio::{
        sync::Notify,
        task::{JoinError, JoinSet},
    },
    video::{FrameReceiver, VideoFrame},
};

/// Stops an `AnalysisSession` from outside the task running it.
#[derive(Clone)]
pub struct ShutdownHandle {
    epoch: Epoch,
    stopped: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// End the session's generation and stop frame intake. Classifications
    /// still running finish without reporting. Calling it again does nothing.
    pub fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let generation = self.epoch.advance();
        log::info!("analysis session shut down (generation {})", generation);
        self.notify.notify_waiters();
        self.notify.notify_one();
    }

    pub fn is_shutdown(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

enum Step {
    Frame(Option<VideoFrame>),
    Joined(Result<(), JoinError>),
    Shutdown,
}

/// One capture session: owns the detector and classifier from `open` to
/// `close` and feeds frames through a `Pipeline`.
pub struct AnalysisSession {
    pipeline: Pipeline,
    detector: Arc<dyn FaceDetector>,
    classifier: Arc<dyn Classifier>,
    handle: ShutdownHandle,
    tasks: JoinSet<()>,
    closed: bool,
}

impl AnalysisSession {
    /// Open the classifier `config` names and start a session around it.
    pub fn open(
        config: &PipelineConfig,
        detector: Arc<dyn FaceDetector>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, AnalysisError> {
        let classifier: Arc<dyn Classifier> = Arc::from(open_classifier(config.backend())?);
        Ok(Self::new(config, detector, classifier, sink))
    }

    /// Start a session around backends that are already open.
    pub fn new(
        config: &PipelineConfig,
        detector: Arc<dyn FaceDetector>,
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let epoch = Epoch::new();
        let pipeline = Pipeline::new(
            Arc::clone(&detector),
            Arc::clone(&classifier),
            sink,
            config,
            &epoch,
        );
        log::info!(
            "analysis session opened ({} classifier, min gap {:?}, grace {:?})",
            classifier.name(),
            config.min_gap(),
            config.grace_window()
        );
        Self {
            pipeline,
            detector,
            classifier,
            handle: ShutdownHandle {
                epoch,
                stopped: Arc::new(AtomicBool::new(false)),
                notify: Arc::new(Notify::new()),
            },
            tasks: JoinSet::new(),
            closed: false,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn stats(&self) -> PipelineStats {
        self.pipeline.stats()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    /// Number of classifications still running.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Analyze one frame now and start its classification in the background.
    pub async fn submit(&mut self, frame: VideoFrame) {
        if self.handle.is_shutdown() {
            return;
        }
        if let Some(job) = self.pipeline.analyze(frame).await {
            self.tasks.spawn(job.run());
        }
    }

    fn reap(result: Result<(), JoinError>) {
        if let Err(err) = result {
            if err.is_panic() {
                log::error!("classification task panicked: {}", err);
            }
        }
    }

    // Await running classifications. A shutdown arriving meanwhile aborts
    // whatever is left.
    async fn drain(&mut self, notify: &Notify) {
        loop {
            if self.handle.is_shutdown() {
                self.abort_pending().await;
                return;
            }
            tokio::select! {
                biased;
                _ = notify.notified() => {}
                result = self.tasks.join_next() => match result {
                    Some(result) => Self::reap(result),
                    None => return,
                },
            }
        }
    }

    async fn abort_pending(&mut self) {
        self.tasks.abort_all();
        while let Some(result) = self.tasks.join_next().await {
            Self::reap(result);
        }
    }

    /// Pull frames until the sender goes away or the session is shut down.
    ///
    /// When the channel ends, classifications already started are awaited so
    /// their events are delivered, unless the session is shut down first.
    pub async fn run(&mut self, mut frames: FrameReceiver) {
        let notify = Arc::clone(&self.handle.notify);
        while !self.handle.is_shutdown() {
            let step = tokio::select! {
                biased;
                _ = notify.notified() => Step::Shutdown,
                Some(result) = self.tasks.join_next(), if !self.tasks.is_empty() => Step::Joined(result),
                frame = frames.recv() => Step::Frame(frame),
            };
            match step {
                Step::Frame(Some(frame)) => self.submit(frame).await,
                Step::Frame(None) => {
                    log::debug!("frame channel closed");
                    self.drain(&notify).await;
                    break;
                }
                Step::Joined(result) => Self::reap(result),
                Step::Shutdown => break,
            }
        }
        frames.close();
    }

    /// Shut down, abort running classifications and close both backends.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.handle.shutdown();
        self.abort_pending().await;
        self.detector.close().await;
        self.classifier.close().await;
        let stats = self.pipeline.stats();
        log::info!(
            "analysis session closed: {} frames analyzed, {} classifications, {} events",
            stats.frames_analyzed,
            stats.throttle_acquired,
            stats.events_emitted
        );
    }
}
