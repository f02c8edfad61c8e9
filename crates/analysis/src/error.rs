use {
    image::ImageError,
    inference::{ClassifyError, DetectorError},
    std::fmt,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Image(ImageError),
    Detector(DetectorError),
    Classify(ClassifyError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Image(err) => write!(f, "frame conversion failed: {err}"),
            AnalysisError::Detector(err) => write!(f, "face detection failed: {err}"),
            AnalysisError::Classify(err) => write!(f, "classification failed: {err}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Image(err) => Some(err),
            AnalysisError::Detector(err) => Some(err),
            AnalysisError::Classify(err) => Some(err),
        }
    }
}

impl From<ImageError> for AnalysisError {
    fn from(err: ImageError) -> Self {
        AnalysisError::Image(err)
    }
}

impl From<DetectorError> for AnalysisError {
    fn from(err: DetectorError) -> Self {
        AnalysisError::Detector(err)
    }
}

impl From<ClassifyError> for AnalysisError {
    fn from(err: ClassifyError) -> Self {
        AnalysisError::Classify(err)
    }
}
