//! One running arcade: state, input source and tracking status
//!
//! `step` is one iteration of the loop: read a frame, map it, tick, and
//! capture the snapshot. A dropped read skips the tick entirely.

use crate::platform::{FrameSource, FrameStatus, TrackingStatus};
use crate::sim::state::{GameEvent, GameKind, GameState};
use crate::sim::tick::tick;
use crate::snapshot::Snapshot;
use crate::tracking::InputMapper;

/// Result of one loop iteration
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A tick ran
    Ticked { snapshot: Box<Snapshot>, events: Vec<GameEvent> },
    /// The frame read failed; nothing was simulated or rendered
    Skipped,
    /// Quit requested or the frame source closed
    Quit,
}

pub struct Session<S: FrameSource> {
    state: GameState,
    source: S,
    mapper: InputMapper,
    /// Game the mapper was built for
    mapped: GameKind,
    tracking: TrackingStatus,
    dropped_frames: u64,
}

impl<S: FrameSource> Session<S> {
    pub fn new(seed: u64, start: GameKind, effect_cap: usize, source: S) -> Self {
        let tracking = source.tracking_status();
        if let TrackingStatus::Unavailable(reason) = &tracking {
            log::warn!("Running without tracking: {}", reason);
        }
        log::info!("Session starting {} with seed {}", start.as_str(), seed);
        Self {
            state: GameState::new(seed, start, effect_cap),
            source,
            mapper: InputMapper::for_game(start),
            mapped: start,
            tracking,
            dropped_frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn kind(&self) -> GameKind {
        self.state.kind()
    }

    pub fn tracking(&self) -> &TrackingStatus {
        &self.tracking
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Run one loop iteration at wall-clock time `clock_ms`
    pub fn step(&mut self, clock_ms: u64) -> StepOutcome {
        let frame = match self.source.next_frame() {
            FrameStatus::Ready(frame) => frame,
            FrameStatus::Dropped => {
                self.dropped_frames += 1;
                log::warn!("Dropped tracker frame ({} so far)", self.dropped_frames);
                return StepOutcome::Skipped;
            }
            FrameStatus::Closed => {
                log::info!("Frame source closed");
                return StepOutcome::Quit;
            }
        };
        if frame.quit {
            log::info!("Quit requested");
            return StepOutcome::Quit;
        }

        let now_ms = frame.timestamp_ms.unwrap_or(clock_ms);
        let input = self.mapper.map(&frame, now_ms);
        let events = tick(&mut self.state, &input);
        for event in &events {
            log::debug!("{:?}", event);
        }

        let kind = self.state.kind();
        if kind != self.mapped {
            self.mapper = InputMapper::for_game(kind);
            self.mapped = kind;
        }

        StepOutcome::Ticked {
            snapshot: Box::new(Snapshot::capture(&self.state, &self.tracking)),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NoCamera, ScriptedSource, open_source};
    use crate::sim::state::ActiveGame;
    use crate::tracking::TrackingFrame;
    use crate::tracking::tests::open_palm;

    fn frame() -> TrackingFrame {
        TrackingFrame::default()
    }

    #[test]
    fn test_dropped_frame_skips_tick() {
        let source = ScriptedSource::new(vec![Some(frame()), None, Some(frame())]);
        let mut session = Session::new(1, GameKind::Shooter, 10, source);
        assert!(matches!(session.step(0), StepOutcome::Ticked { .. }));
        assert_eq!(session.step(16), StepOutcome::Skipped);
        assert!(matches!(session.step(32), StepOutcome::Ticked { .. }));
        assert_eq!(session.state().time_ticks, 2);
        assert_eq!(session.dropped_frames(), 1);
        assert_eq!(session.step(48), StepOutcome::Quit);
    }

    #[test]
    fn test_quit_frame_stops() {
        let quit = TrackingFrame {
            quit: true,
            ..Default::default()
        };
        let mut session = Session::new(1, GameKind::Pong, 10, ScriptedSource::new(vec![Some(quit)]));
        assert_eq!(session.step(0), StepOutcome::Quit);
        assert_eq!(session.state().time_ticks, 0);
    }

    #[test]
    fn test_degraded_mode_keeps_running() {
        let mut session = Session::new(1, GameKind::Shooter, 10, NoCamera::new("no device"));
        for t in 0..10 {
            match session.step(t * 16) {
                StepOutcome::Ticked { snapshot, .. } => {
                    assert_eq!(snapshot.tracking, TrackingStatus::Unavailable("no device".into()));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_unreadable_trace_runs_degraded() {
        let source = open_source(Some(std::path::Path::new("/nonexistent/trace.json")));
        let mut session = Session::new(2, GameKind::Shooter, 10, source);
        for t in 0..5 {
            match session.step(t * 16) {
                StepOutcome::Ticked { snapshot, .. } => match &snapshot.tracking {
                    TrackingStatus::Unavailable(reason) => assert!(reason.contains("trace.json")),
                    other => panic!("unexpected status {other:?}"),
                },
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(session.state().time_ticks, 5);
    }

    #[test]
    fn test_frame_timestamp_drives_quiz() {
        let confirm = TrackingFrame {
            confirm: true,
            timestamp_ms: Some(500),
            ..Default::default()
        };
        let palm = TrackingFrame {
            hand: Some(open_palm()),
            ..Default::default()
        };
        let source = ScriptedSource::new(vec![Some(confirm), Some(palm)]);
        let mut session = Session::new(4, GameKind::Quiz, 10, source);
        session.step(0);
        assert_eq!(session.state().time_ms, 500);
        match session.step(600) {
            StepOutcome::Ticked { events, .. } => {
                assert!(events.iter().any(|e| matches!(e, GameEvent::HerbShown { .. })));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &session.state().active {
            ActiveGame::Quiz(quiz) => assert_eq!(quiz.learned_count, 1),
            _ => panic!("quiz should be active"),
        }
    }
}
