use {inference::Emotion, tokio::sync::mpsc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PipelineEvent {
    FaceDetected { emotion: Emotion, confidence: f32 },
    NoFace,
}

/// Receives pipeline results. Called with the pipeline state locked, so
/// implementations must not block.
pub trait EventSink: Send + Sync {
    fn on_face_emotion(&self, emotion: Emotion, confidence: f32);
    fn on_no_face(&self);
}

impl EventSink for mpsc::UnboundedSender<PipelineEvent> {
    fn on_face_emotion(&self, emotion: Emotion, confidence: f32) {
        if self
            .send(PipelineEvent::FaceDetected {
                emotion,
                confidence,
            })
            .is_err()
        {
            log::debug!("event receiver gone, dropping {} event", emotion);
        }
    }

    fn on_no_face(&self) {
        if self.send(PipelineEvent::NoFace).is_err() {
            log::debug!("event receiver gone, dropping no-face event");
        }
    }
}

pub(crate) fn notify_sink(sink: &dyn EventSink, event: PipelineEvent) {
    match event {
        PipelineEvent::FaceDetected {
            emotion,
            confidence,
        } => sink.on_face_emotion(emotion, confidence),
        PipelineEvent::NoFace => sink.on_no_face(),
    }
}
