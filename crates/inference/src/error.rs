use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DetectorError {
    Backend(String),
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorError::Backend(msg) => write!(f, "detector error: {msg}"),
        }
    }
}

impl std::error::Error for DetectorError {}

impl From<image::ImageError> for DetectorError {
    fn from(err: image::ImageError) -> Self {
        DetectorError::Backend(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The face crop could not be prepared for the backend.
    InvalidInput(String),
    /// Loading or running the on-device model failed, or it returned garbage.
    Model(String),
    Network(String),
    /// The service answered with a non-2xx status.
    Status { code: u16, body: String },
    Parse(String),
    /// The backend looked at the crop and found no face in it.
    NoFace,
    /// The classifier was closed.
    Cancelled,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ClassifyError::Model(msg) => write!(f, "model error: {msg}"),
            ClassifyError::Network(msg) => write!(f, "network error: {msg}"),
            ClassifyError::Status { code, body } => {
                write!(f, "service returned status {code}: {body}")
            }
            ClassifyError::Parse(msg) => write!(f, "parse error: {msg}"),
            ClassifyError::NoFace => write!(f, "no face found"),
            ClassifyError::Cancelled => write!(f, "classifier closed"),
        }
    }
}

impl std::error::Error for ClassifyError {}

impl From<image::ImageError> for ClassifyError {
    fn from(err: image::ImageError) -> Self {
        ClassifyError::InvalidInput(err.to_string())
    }
}

impl From<ort::Error> for ClassifyError {
    fn from(err: ort::Error) -> Self {
        ClassifyError::Model(err.to_string())
    }
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        ClassifyError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::Parse(err.to_string())
    }
}
