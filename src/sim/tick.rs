//! Per-tick simulation step
//!
//! Each game runs, strictly in order: input sampling, trigger evaluation,
//! phase transitions, physics. A launch request switches the active game
//! before the tick returns, so the snapshot taken afterwards already shows it.

use glam::DVec2;

use super::state::{ActiveGame, GameEvent, GameState};
use crate::tracking::HandShape;

/// Input commands for a single tick, already mapped to screen space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Monotonic timestamp in milliseconds (dwell and countdown timers)
    pub now_ms: u64,
    /// Hand cursor; `None` when no hand is tracked
    pub cursor: Option<DVec2>,
    /// Head position (pong paddle)
    pub head: Option<DVec2>,
    pub pinch: bool,
    pub shape: Option<HandShape>,
    /// Pointer click this tick
    pub click: Option<DVec2>,
    /// Any key press / confirm action this tick
    pub confirm: bool,
}

/// Advance the arcade by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    state.time_ticks += 1;
    state.time_ms = input.now_ms;

    let mut events = Vec::new();
    match &mut state.active {
        ActiveGame::Shooter(shooter) => shooter.tick(input, &mut events),
        ActiveGame::Quiz(quiz) => quiz.tick(input, &mut events),
        ActiveGame::Pong(pong) => pong.tick(input, &mut events),
    }

    let launch = events.iter().find_map(|event| match event {
        GameEvent::LaunchGame(kind) => Some(*kind),
        _ => None,
    });
    if let Some(kind) = launch {
        state.switch_to(kind);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameKind;

    #[test]
    fn test_tick_advances_clock() {
        let mut state = GameState::new(1, GameKind::Quiz, 10);
        let input = TickInput {
            now_ms: 33,
            ..Default::default()
        };
        tick(&mut state, &input);
        tick(&mut state, &input);
        assert_eq!(state.time_ticks, 2);
        assert_eq!(state.time_ms, 33);
    }

    #[test]
    fn test_launch_switches_game_within_tick() {
        use crate::consts::*;
        use crate::sim::body::{BodyTag, MovingBody, TargetKind};
        use crate::sim::shooter::ShooterPhase;

        let mut state = GameState::new(3, GameKind::Shooter, 100);
        let ActiveGame::Shooter(shooter) = &mut state.active else {
            panic!("shooter should start");
        };
        shooter.phase = ShooterPhase::Playing;
        shooter.scores.healing = LAUNCH_SCORE;
        shooter.targets = vec![MovingBody::new(
            DVec2::new(400.0, 400.0),
            DVec2::ZERO,
            TARGET_RADIUS,
            BodyTag::Target(TargetKind::Herb),
        )];

        let input = TickInput {
            now_ms: 10_000,
            cursor: Some(DVec2::new(400.0, 400.0)),
            pinch: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert!(events.contains(&GameEvent::LaunchGame(GameKind::Quiz)));
        assert_eq!(state.kind(), GameKind::Quiz);
    }

    #[test]
    fn test_identical_seeds_and_inputs_match() {
        let mut a = GameState::new(99, GameKind::Pong, 50);
        let mut b = GameState::new(99, GameKind::Pong, 50);
        for t in 0..200u64 {
            let input = TickInput {
                now_ms: t * 50,
                cursor: Some(DVec2::new(600.0, 530.0)),
                head: Some(DVec2::new(300.0 + t as f64, 400.0)),
                ..Default::default()
            };
            assert_eq!(tick(&mut a, &input), tick(&mut b, &input));
        }
        match (&a.active, &b.active) {
            (ActiveGame::Pong(pa), ActiveGame::Pong(pb)) => {
                assert_eq!(pa.ball.pos, pb.ball.pos);
                assert_eq!(pa.paddle_x, pb.paddle_x);
            }
            _ => panic!("pong should still be active"),
        }
    }
}
