use {
    crate::*,
    async_trait::async_trait,
    image::{BoundingBox, Image},
};

/// Finds faces in an upright RGB frame.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Bounding boxes of every face found, most prominent first.
    async fn detect(&self, image: &Image) -> Result<Vec<BoundingBox>, DetectorError>;

    /// Release the detector's resources. Called once when the session closes.
    async fn close(&self) {}
}

/// Reports the whole frame as one face.
///
/// For classifiers that locate the face themselves, like the remote service.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFrameDetector;

#[async_trait]
impl FaceDetector for FullFrameDetector {
    async fn detect(&self, image: &Image) -> Result<Vec<BoundingBox>, DetectorError> {
        if image.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![BoundingBox::full(image.size)])
    }
}
