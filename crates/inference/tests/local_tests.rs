use {
    base::Vec2,
    image::Image,
    inference::{
        Classifier, ClassifyError, Emotion, EmotionModel, LocalModelClassifier, LocalModelConfig,
    },
    std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

// Returns canned scores and records what it was fed.
struct StubModel {
    scores: Vec<f32>,
    seen: Arc<Mutex<Vec<(usize, Vec2<usize>, f32, f32)>>>,
}

impl EmotionModel for StubModel {
    fn predict(&mut self, input: &[f32], size: Vec2<usize>) -> Result<Vec<f32>, ClassifyError> {
        let min = input.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = input.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        self.seen.lock().unwrap().push((input.len(), size, min, max));
        Ok(self.scores.clone())
    }
}

fn classifier(
    scores: Vec<f32>,
) -> (
    LocalModelClassifier<StubModel>,
    Arc<Mutex<Vec<(usize, Vec2<usize>, f32, f32)>>>,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let model = StubModel {
        scores,
        seen: Arc::clone(&seen),
    };
    (
        LocalModelClassifier::new(model, LocalModelConfig::default()),
        seen,
    )
}

#[tokio::test]
async fn test_classify_picks_argmax() {
    let (classifier, seen) = classifier(vec![0.05, 0.05, 0.05, 0.7, 0.05, 0.05, 0.05]);
    let face = Image::filled(Vec2::new(120, 90), [200, 180, 160]);

    let result = classifier.classify(face).await.unwrap();
    assert_eq!(result.emotion, Emotion::Happy);
    assert!((result.confidence - 0.7).abs() < 1e-6);
    assert_eq!(classifier.name(), "local");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (len, size, min, max) = seen[0];
    assert_eq!(len, 48 * 48);
    assert_eq!(size, Vec2::new(48, 48));
    assert!(min >= -1.0 && max <= 1.0);
}

#[tokio::test]
async fn test_tiny_crop_is_upscaled() {
    let (classifier, seen) = classifier(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let face = Image::filled(Vec2::new(1, 1), [0, 0, 0]);

    let result = classifier.classify(face).await.unwrap();
    assert_eq!(result.emotion, Emotion::Angry);
    assert_eq!(seen.lock().unwrap()[0].0, 48 * 48);
}

#[tokio::test]
async fn test_custom_input_size_and_labels() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let model = StubModel {
        scores: vec![0.2, 0.8],
        seen: Arc::clone(&seen),
    };
    let config = LocalModelConfig::default()
        .with_input_size(64)
        .with_labels(vec![Emotion::Neutral, Emotion::Sad]);
    let classifier = LocalModelClassifier::new(model, config);

    let result = classifier
        .classify(Image::filled(Vec2::new(10, 10), [9, 9, 9]))
        .await
        .unwrap();
    assert_eq!(result.emotion, Emotion::Sad);
    assert_eq!(seen.lock().unwrap()[0].1, Vec2::new(64, 64));
}

#[tokio::test]
async fn test_wrong_output_length_is_model_error() {
    let (classifier, _) = classifier(vec![0.5, 0.5]);
    let result = classifier
        .classify(Image::filled(Vec2::new(8, 8), [0, 0, 0]))
        .await;
    assert!(matches!(result, Err(ClassifyError::Model(_))));
}

#[tokio::test]
async fn test_empty_crop_is_invalid_input() {
    let (classifier, seen) = classifier(vec![1.0; 7]);
    let face = Image::filled(Vec2::new(0, 0), [0, 0, 0]);
    let result = classifier.classify(face).await;
    assert!(matches!(result, Err(ClassifyError::InvalidInput(_))));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_classifier_is_cancelled() {
    let (classifier, _) = classifier(vec![1.0; 7]);
    classifier.close().await;
    let result = classifier
        .classify(Image::filled(Vec2::new(8, 8), [0, 0, 0]))
        .await;
    assert_eq!(result, Err(ClassifyError::Cancelled));
}

// Panics inside `predict` and reports when it is dropped.
struct PanickingModel {
    dropped: Arc<AtomicBool>,
}

impl EmotionModel for PanickingModel {
    fn predict(&mut self, _input: &[f32], _size: Vec2<usize>) -> Result<Vec<f32>, ClassifyError> {
        panic!("model crashed");
    }
}

impl Drop for PanickingModel {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_close_drops_model_after_failed_prediction() {
    let dropped = Arc::new(AtomicBool::new(false));
    let classifier = LocalModelClassifier::new(
        PanickingModel {
            dropped: Arc::clone(&dropped),
        },
        LocalModelConfig::default(),
    );
    let face = Image::filled(Vec2::new(8, 8), [10, 20, 30]);

    assert!(matches!(
        classifier.classify(face.clone()).await,
        Err(ClassifyError::Model(_))
    ));
    assert!(!dropped.load(Ordering::SeqCst));

    classifier.close().await;
    assert!(dropped.load(Ordering::SeqCst));
    assert!(matches!(
        classifier.classify(face).await,
        Err(ClassifyError::Cancelled)
    ));
}
