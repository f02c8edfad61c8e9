use {crate::*, async_trait::async_trait, image::Image};

/// Turns a face crop into an emotion.
///
/// Implementations never panic on bad input, every failure comes back as a
/// `ClassifyError`. Dropping the returned future abandons the classification.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn classify(&self, face: Image) -> Result<Classification, ClassifyError>;

    /// Release model handles or connections. Later calls to `classify` fail
    /// with `ClassifyError::Cancelled`.
    async fn close(&self);
}
