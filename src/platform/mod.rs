//! Platform abstraction layer
//!
//! Everything that touches the outside world while the arcade runs:
//! - Frame pacing against the wall clock
//! - Tracker frames (camera pipeline, trace replay, or nothing at all)

pub mod clock;
pub mod source;

pub use clock::FrameClock;
pub use source::{FrameSource, FrameStatus, NoCamera, ScriptedSource, TrackingStatus, open_source};
