//! Frame analysis: from camera frames to emotion events.
//!
//! A `Pipeline` turns each frame into at most one `PipelineEvent`. Face
//! presence is smoothed by `FacePresenceTracker` and classification is gated
//! by `InferenceThrottle` so at most one classification is in flight.
//! `AnalysisSession` owns the backends and drives a pipeline from a frame
//! channel.

mod config;
mod error;
mod event;
mod pipeline;
mod presence;
mod session;
mod throttle;

pub use config::*;
pub use error::*;
pub use event::*;
pub use pipeline::*;
pub use presence::*;
pub use session::*;
pub use throttle::*;
