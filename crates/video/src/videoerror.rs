use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// The other end of the frame channel is gone.
    Closed,
    Image(image::ImageError),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Closed => write!(f, "frame channel closed"),
            VideoError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VideoError::Image(err) => Some(err),
            VideoError::Closed => None,
        }
    }
}

impl From<image::ImageError> for VideoError {
    fn from(err: image::ImageError) -> Self {
        VideoError::Image(err)
    }
}
