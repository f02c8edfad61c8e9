use {
    crate::*,
    async_trait::async_trait,
    base::Vec2,
    image::{Image, luma, resize},
    std::sync::{Arc, Mutex},
};

/// An in-process model producing one probability per label.
///
/// `predict` is called on the blocking pool and may take as long as it needs.
pub trait EmotionModel: Send + 'static {
    /// `input` is a row-major `size.x * size.y` single channel image, already
    /// normalized.
    fn predict(&mut self, input: &[f32], size: Vec2<usize>) -> Result<Vec<f32>, ClassifyError>;
}

/// Map a luma value in `[0, 255]` to the model's input range.
#[cfg(not(feature = "signed-input"))]
pub fn normalize(luma: f32) -> f32 {
    luma / 255.0
}

/// Map a luma value in `[0, 255]` to the model's input range.
#[cfg(feature = "signed-input")]
pub fn normalize(luma: f32) -> f32 {
    luma / 127.5 - 1.0
}

/// Resize a face crop to the model's square input and turn it into
/// normalized luminance.
pub fn preprocess(face: &Image, input_size: usize) -> Result<Vec<f32>, ClassifyError> {
    let resized = resize(face, Vec2::new(input_size, input_size))?;
    Ok(luma(&resized)?.into_iter().map(normalize).collect())
}

/// Pick the most probable label. Ties go to the lowest index, NaN never wins.
pub fn pick_winner(
    probabilities: &[f32],
    labels: &[Emotion],
) -> Result<Classification, ClassifyError> {
    if probabilities.len() != labels.len() {
        return Err(ClassifyError::Model(format!(
            "model returned {} probabilities for {} labels",
            probabilities.len(),
            labels.len()
        )));
    }
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, top)| p > top) {
            best = Some((i, p));
        }
    }
    let (index, probability) =
        best.ok_or_else(|| ClassifyError::Model("no usable probability in output".to_string()))?;
    Ok(Classification::new(labels[index], probability))
}

/// Runs an `EmotionModel` on the blocking pool.
pub struct LocalModelClassifier<M: EmotionModel> {
    model: Arc<Mutex<Option<M>>>,
    config: LocalModelConfig,
}

impl<M: EmotionModel> LocalModelClassifier<M> {
    pub fn new(model: M, config: LocalModelConfig) -> Self {
        Self {
            model: Arc::new(Mutex::new(Some(model))),
            config,
        }
    }

    pub fn config(&self) -> &LocalModelConfig {
        &self.config
    }
}

#[async_trait]
impl<M: EmotionModel> Classifier for LocalModelClassifier<M> {
    fn name(&self) -> &str {
        "local"
    }

    async fn classify(&self, face: Image) -> Result<Classification, ClassifyError> {
        let model = Arc::clone(&self.model);
        let input_size = self.config.input_size();
        let labels = self.config.labels().to_vec();
        tokio::task::spawn_blocking(move || {
            let input = preprocess(&face, input_size)?;
            let mut guard = model
                .lock()
                .map_err(|_| ClassifyError::Model("model lock poisoned".to_string()))?;
            let model = guard.as_mut().ok_or(ClassifyError::Cancelled)?;
            let probabilities = model.predict(&input, Vec2::new(input_size, input_size))?;
            pick_winner(&probabilities, &labels)
        })
        .await
        .map_err(|e| ClassifyError::Model(format!("inference task failed: {e}")))?
    }

    async fn close(&self) {
        let model = Arc::clone(&self.model);
        // wait for a running prediction to finish before dropping the model
        let closed = tokio::task::spawn_blocking(move || {
            let mut guard = match model.lock() {
                Ok(guard) => guard,
                Err(poisoned) => {
                    log::warn!("model lock poisoned by a failed prediction, dropping the model anyway");
                    model.clear_poison();
                    poisoned.into_inner()
                }
            };
            guard.take();
        })
        .await;
        match closed {
            Ok(()) => log::debug!("local classifier closed"),
            Err(err) => log::error!("closing local classifier failed: {}", err),
        }
    }
}
