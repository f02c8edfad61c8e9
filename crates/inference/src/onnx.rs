use {
    crate::*,
    base::Vec2,
    ndarray::Array4,
    ort::{session::Session, value::Tensor},
    std::path::Path,
};

/// Emotion model in ONNX format, run through `ort`.
///
/// Takes one NHWC tensor `[1, size, size, 1]` and returns the label scores as
/// its first output.
pub struct OnnxEmotionModel {
    session: Session,
}

impl OnnxEmotionModel {
    pub fn open(model_path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let path = model_path.as_ref();
        let session = Session::builder()?.commit_from_file(path).map_err(|e| {
            log::error!("failed to load emotion model {}: {}", path.display(), e);
            ClassifyError::Model(format!("cannot load {}: {e}", path.display()))
        })?;
        log::info!("emotion model loaded from {}", path.display());
        Ok(Self { session })
    }
}

impl EmotionModel for OnnxEmotionModel {
    fn predict(&mut self, input: &[f32], size: Vec2<usize>) -> Result<Vec<f32>, ClassifyError> {
        let array = Array4::from_shape_vec((1, size.y, size.x, 1), input.to_vec())
            .map_err(|e| ClassifyError::InvalidInput(format!("bad input shape: {e}")))?;
        let tensor = Tensor::from_array(array)?;
        let outputs = self.session.run(ort::inputs![tensor])?;
        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| ClassifyError::Model("model produced no output".to_string()))?;
        let (_, scores) = output.try_extract_tensor::<f32>()?;
        Ok(scores.to_vec())
    }
}
