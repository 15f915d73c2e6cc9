//! Where tracker frames come from
//!
//! Camera capture and landmark inference run outside this crate. The loop
//! only sees a `FrameSource`: one blocking read per tick that either yields a
//! frame, reports a dropped read, or reports that the stream has ended.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::tracking::TrackingFrame;

/// Outcome of one read
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    Ready(TrackingFrame),
    /// The read failed this tick; the tick is skipped
    Dropped,
    /// No more frames will arrive
    Closed,
}

/// Whether tracking input is available at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason")]
pub enum TrackingStatus {
    Active,
    /// Degraded mode: the games run but no hand or head is ever seen
    Unavailable(String),
}

pub trait FrameSource {
    /// Block until the next frame (or failure) is available
    fn next_frame(&mut self) -> FrameStatus;

    fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus::Active
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> FrameStatus {
        (**self).next_frame()
    }

    fn tracking_status(&self) -> TrackingStatus {
        (**self).tracking_status()
    }
}

/// Replays a recorded trace; `None` entries are dropped reads
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Option<TrackingFrame>>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Option<TrackingFrame>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Load a JSON array of frames (or `null` for a dropped read)
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).with_context(|| format!("failed to open trace {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let frames: Vec<Option<TrackingFrame>> =
            serde_json::from_reader(reader).with_context(|| format!("failed to parse trace {}", path.display()))?;
        let source = Self::new(frames);
        log::info!("Loaded {} frames from {}", source.remaining(), path.display());
        Ok(source)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> FrameStatus {
        match self.frames.pop_front() {
            Some(Some(frame)) => FrameStatus::Ready(frame),
            Some(None) => FrameStatus::Dropped,
            None => FrameStatus::Closed,
        }
    }
}

/// Stand-in when no capture device could be opened
///
/// Produces empty frames forever so the games keep running without input.
#[derive(Debug, Clone)]
pub struct NoCamera {
    reason: String,
}

impl NoCamera {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("Tracking unavailable: {}", reason);
        Self { reason }
    }
}

impl FrameSource for NoCamera {
    fn next_frame(&mut self) -> FrameStatus {
        FrameStatus::Ready(TrackingFrame::default())
    }

    fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus::Unavailable(self.reason.clone())
    }
}

/// Pick the frame source for a run: the trace when one is configured and
/// readable, otherwise no tracking with the reason attached
pub fn open_source(trace: Option<&Path>) -> Box<dyn FrameSource> {
    match trace {
        Some(path) => match ScriptedSource::open(path) {
            Ok(source) => Box::new(source),
            Err(e) => Box::new(NoCamera::new(format!("{:#}", e))),
        },
        None => Box::new(NoCamera::new("no capture backend configured")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_replays_in_order() {
        let frame = TrackingFrame {
            confirm: true,
            ..Default::default()
        };
        let mut source = ScriptedSource::new(vec![Some(frame.clone()), None]);
        assert_eq!(source.next_frame(), FrameStatus::Ready(frame));
        assert_eq!(source.next_frame(), FrameStatus::Dropped);
        assert_eq!(source.next_frame(), FrameStatus::Closed);
        assert_eq!(source.tracking_status(), TrackingStatus::Active);
    }

    #[test]
    fn test_trace_file_round_trip() {
        let path = std::env::temp_dir().join(format!("gesture-arcade-trace-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"confirm": true}, null, {"nose": [0.5, 0.5]}]"#).unwrap();
        let source = ScriptedSource::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn test_missing_trace_is_an_error() {
        let err = ScriptedSource::open("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to open trace"));
    }

    #[test]
    fn test_no_camera_reports_degraded() {
        let mut source: Box<dyn FrameSource> = Box::new(NoCamera::new("no device"));
        assert_eq!(source.next_frame(), FrameStatus::Ready(TrackingFrame::default()));
        assert_eq!(source.tracking_status(), TrackingStatus::Unavailable("no device".to_string()));
    }
}
