//! Camera frames for the analysis pipeline.
//!
//! A `VideoFrame` is what a frame source hands to the analyzer: planar or RGB
//! pixels plus rotation, capture time and a release guard. Frames travel over
//! a keep-latest channel so a slow analyzer always sees the newest frame and
//! never builds up a backlog.

mod latest;
mod videoerror;
mod videoframe;

pub use latest::*;
pub use videoerror::*;
pub use videoframe::*;
