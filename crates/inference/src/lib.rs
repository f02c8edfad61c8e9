//! Face detection and emotion classification backends.
//!
//! The pipeline only sees two capabilities, `FaceDetector` and `Classifier`.
//! A classifier is either an on-device model (`LocalModelClassifier`, ONNX via
//! `ort`) or a remote HTTP service (`RemoteHttpClassifier`); `open_classifier`
//! picks one from a `BackendConfig` once per session.

mod classifier;
mod config;
mod detector;
mod emotion;
mod error;
mod local;
mod onnx;
mod remote;

pub use classifier::*;
pub use config::*;
pub use detector::*;
pub use emotion::*;
pub use error::*;
pub use local::*;
pub use onnx::*;
pub use remote::*;
