#![allow(dead_code)]

use {
    analysis::PipelineEvent,
    async_trait::async_trait,
    base::Vec2,
    image::{BoundingBox, Image, Rotation},
    inference::{Classification, Classifier, ClassifyError, DetectorError, Emotion, FaceDetector},
    std::{
        collections::VecDeque,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    },
    tokio::sync::{Semaphore, mpsc},
    video::VideoFrame,
};

pub const FACE: BoundingBox = BoundingBox {
    left: 2,
    top: 2,
    right: 12,
    bottom: 12,
};

/// Answers detections from a script, then one face per frame once it runs out.
#[derive(Default)]
pub struct ScriptedDetector {
    script: Mutex<VecDeque<Result<Vec<BoundingBox>, DetectorError>>>,
    pub calls: AtomicUsize,
    pub closed: AtomicBool,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Result<Vec<BoundingBox>, DetectorError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    /// `faces[i]` faces on frame `i`.
    pub fn counts(faces: &[usize]) -> Self {
        Self::new(faces.iter().map(|&n| Ok(vec![FACE; n])).collect())
    }
}

#[async_trait]
impl FaceDetector for ScriptedDetector {
    async fn detect(&self, _image: &Image) -> Result<Vec<BoundingBox>, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![FACE]))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Always answers the same thing. With a gate, each call first waits for a
/// permit on it.
pub struct StubClassifier {
    answer: Result<Classification, ClassifyError>,
    gate: Option<Arc<Semaphore>>,
    pub calls: AtomicUsize,
    pub finished: AtomicUsize,
    pub closed: AtomicBool,
}

impl StubClassifier {
    pub fn answering(emotion: Emotion, confidence: f32) -> Self {
        Self::with_answer(Ok(Classification::new(emotion, confidence)))
    }

    pub fn failing(err: ClassifyError) -> Self {
        Self::with_answer(Err(err))
    }

    pub fn with_answer(answer: Result<Classification, ClassifyError>) -> Self {
        Self {
            answer,
            gate: None,
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    async fn classify(&self, face: Image) -> Result<Classification, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(face.width() >= 1 && face.height() >= 1);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// A 16x16 RGB frame captured at `at`, counting its release in `released`.
pub fn frame(sequence: u64, at: Duration, released: &Arc<AtomicUsize>) -> VideoFrame {
    let released = Arc::clone(released);
    let mut frame = VideoFrame::rgb(
        Image::filled(Vec2::new(16, 16), [120, 100, 90]),
        Rotation::Deg0,
        at,
    )
    .with_release(move || {
        released.fetch_add(1, Ordering::SeqCst);
    });
    frame.sequence = sequence;
    frame
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn count_faces(events: &[PipelineEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PipelineEvent::FaceDetected { .. }))
        .count()
}

pub fn count_no_face(events: &[PipelineEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PipelineEvent::NoFace))
        .count()
}
