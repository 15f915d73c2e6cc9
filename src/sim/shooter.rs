//! Pinch-to-shoot target game
//!
//! `Loading` shows a start button that is activated by hovering the hand
//! crosshair over it for a second. `Transition` plays a fixed-length intro,
//! then `Playing` spawns bouncing targets. Pinching shoots the target under
//! the crosshair; enough hits of one kind launch that kind's game.

use glam::DVec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BodyTag, MovingBody, TargetKind};
use super::collision::resolve_all_pairs;
use super::effects::EffectList;
use super::geometry::{Bounds, distance};
use super::state::{GameEvent, GameKind};
use super::tick::TickInput;
use super::trigger::{CooldownTrigger, DwellTimer};
use crate::consts::*;

/// Placement tries before a target is allowed to spawn overlapping
const MAX_SPAWN_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterPhase {
    Loading,
    Transition,
    Playing,
}

/// Hits per target kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShooterScores {
    pub fishing: u32,
    pub pingpong: u32,
    pub healing: u32,
}

impl ShooterScores {
    pub fn get(&self, kind: TargetKind) -> u32 {
        match kind {
            TargetKind::FishingRod => self.fishing,
            TargetKind::PingPongPaddle => self.pingpong,
            TargetKind::Herb => self.healing,
        }
    }

    /// Count one hit and return the new score for that kind
    pub fn add(&mut self, kind: TargetKind) -> u32 {
        let slot = match kind {
            TargetKind::FishingRod => &mut self.fishing,
            TargetKind::PingPongPaddle => &mut self.pingpong,
            TargetKind::Herb => &mut self.healing,
        };
        *slot += 1;
        *slot
    }

    /// Game unlocked by the current scores, if any
    pub fn launch_target(&self) -> Option<GameKind> {
        if self.pingpong > LAUNCH_SCORE {
            Some(GameKind::Pong)
        } else if self.healing > LAUNCH_SCORE {
            Some(GameKind::Quiz)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShooterState {
    pub phase: ShooterPhase,
    pub start_button: MovingBody,
    pub dwell: DwellTimer,
    pub transition_started_ms: u64,
    pub targets: Vec<MovingBody>,
    pub scores: ShooterScores,
    pub shot_trigger: CooldownTrigger,
    pub effects: EffectList,
    /// Latest crosshair position
    pub crosshair: Option<DVec2>,
    pub pinching: bool,
    rng: Pcg32,
}

impl ShooterState {
    pub fn new(rng: Pcg32, effect_cap: usize) -> Self {
        Self {
            phase: ShooterPhase::Loading,
            start_button: MovingBody::fixed(
                DVec2::new(START_BUTTON_X, START_BUTTON_Y),
                START_BUTTON_RADIUS,
                BodyTag::StartButton,
            ),
            dwell: DwellTimer::new(START_DWELL_MS),
            transition_started_ms: 0,
            targets: Vec::new(),
            scores: ShooterScores::default(),
            shot_trigger: CooldownTrigger::new(SHOT_COOLDOWN_TICKS),
            effects: EffectList::new(effect_cap),
            crosshair: None,
            pinching: false,
            rng,
        }
    }

    pub fn tick(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        self.crosshair = input.cursor;
        self.pinching = input.pinch;

        let shot = self
            .shot_trigger
            .try_fire(self.phase == ShooterPhase::Playing && input.pinch && input.cursor.is_some());

        match self.phase {
            ShooterPhase::Loading => {
                let inside = input
                    .cursor
                    .is_some_and(|c| distance(c, self.start_button.pos) < self.start_button.radius + CROSSHAIR_RADIUS);
                if self.dwell.update(input.now_ms, inside) {
                    self.transition_started_ms = input.now_ms;
                    self.set_phase(ShooterPhase::Transition, events);
                }
            }
            ShooterPhase::Transition => {
                if input.now_ms.saturating_sub(self.transition_started_ms) >= TRANSITION_MS {
                    self.start_round();
                    self.set_phase(ShooterPhase::Playing, events);
                }
            }
            ShooterPhase::Playing => {
                if let (true, Some(cursor)) = (shot, input.cursor) {
                    self.shoot(cursor, events);
                }
            }
        }

        if self.phase == ShooterPhase::Playing {
            let bounds = Bounds::from_size(SCREEN_WIDTH, SCREEN_HEIGHT);
            for target in &mut self.targets {
                target.integrate();
                target.reflect_off_bounds(&bounds);
            }
            resolve_all_pairs(&mut self.targets);
            // Pair separation can push a target past a wall
            for target in &mut self.targets {
                target.reflect_off_bounds(&bounds);
            }
        }

        self.effects.age();
    }

    fn set_phase(&mut self, phase: ShooterPhase, events: &mut Vec<GameEvent>) {
        log::info!("Shooter phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(GameEvent::ShooterPhaseChanged(phase));
    }

    /// Fresh targets and zeroed scores
    fn start_round(&mut self) {
        self.scores = ShooterScores::default();
        self.shot_trigger.reset();
        self.effects.clear();
        self.targets.clear();
        for i in 0..TARGET_COUNT {
            let kind = match TargetKind::ALL.get(i) {
                Some(kind) => *kind,
                None => random_kind(&mut self.rng),
            };
            let target = spawn_target(&mut self.rng, kind, &self.targets);
            self.targets.push(target);
        }
    }

    /// Hit-test the crosshair; the first target found wins
    fn shoot(&mut self, cursor: DVec2, events: &mut Vec<GameEvent>) {
        let hit = self.targets.iter().enumerate().find_map(|(i, t)| match t.tag {
            BodyTag::Target(kind) if distance(cursor, t.pos) <= t.radius + CROSSHAIR_RADIUS => Some((i, kind)),
            _ => None,
        });
        let Some((index, kind)) = hit else {
            events.push(GameEvent::ShotMissed);
            return;
        };

        let removed = self.targets.remove(index);
        let score = self.scores.add(kind);
        self.effects
            .spawn_burst(&mut self.rng, removed.pos, kind.color(), SPARK_COUNT, SPARK_LIFETIME);
        log::debug!("Shot {:?} (score {})", kind, score);
        events.push(GameEvent::TargetShot { kind, score });

        let last_of_kind = !self.targets.iter().any(|t| t.tag == removed.tag);
        let next_kind = if last_of_kind {
            kind
        } else {
            random_kind(&mut self.rng)
        };
        let replacement = spawn_target(&mut self.rng, next_kind, &self.targets);
        self.targets.insert(index, replacement);

        if let Some(game) = self.scores.launch_target() {
            log::info!("Score threshold reached, launching {}", game.as_str());
            events.push(GameEvent::LaunchGame(game));
        }
    }

    /// Milliseconds left in the intro, for the transition screen
    pub fn transition_remaining_ms(&self, now_ms: u64) -> u64 {
        TRANSITION_MS.saturating_sub(now_ms.saturating_sub(self.transition_started_ms))
    }
}

fn random_kind(rng: &mut Pcg32) -> TargetKind {
    TargetKind::ALL.choose(rng).copied().unwrap_or(TargetKind::Herb)
}

/// New target clear of `existing`, with a random heading and speed
///
/// After `MAX_SPAWN_ATTEMPTS` overlapping candidates the last one is used and
/// pairwise resolution separates the bodies on the next physics step.
pub fn spawn_target(rng: &mut Pcg32, kind: TargetKind, existing: &[MovingBody]) -> MovingBody {
    let r = TARGET_RADIUS;
    let mut pos = DVec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        pos = DVec2::new(
            rng.random_range(r..=SCREEN_WIDTH - r),
            rng.random_range(r..=SCREEN_HEIGHT - r),
        );
        if existing.iter().all(|other| distance(pos, other.pos) >= r + other.radius) {
            break;
        }
    }
    let angle = rng.random_range(0.0..std::f64::consts::TAU);
    let speed = rng.random_range(TARGET_MIN_SPEED..TARGET_MAX_SPEED);
    MovingBody::new(pos, DVec2::from_angle(angle) * speed, r, BodyTag::Target(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn shooter() -> ShooterState {
        ShooterState::new(Pcg32::seed_from_u64(5), 500)
    }

    fn at(now_ms: u64, cursor: Option<DVec2>, pinch: bool) -> TickInput {
        TickInput {
            now_ms,
            cursor,
            pinch,
            ..Default::default()
        }
    }

    fn start_button() -> Option<DVec2> {
        Some(DVec2::new(START_BUTTON_X, START_BUTTON_Y))
    }

    /// Drive a shooter through the dwell and intro into `Playing`
    fn playing() -> ShooterState {
        let mut s = shooter();
        let mut events = Vec::new();
        s.tick(&at(0, start_button(), false), &mut events);
        s.tick(&at(1000, start_button(), false), &mut events);
        s.tick(&at(3000, None, false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Playing);
        s
    }

    #[test]
    fn test_dwell_then_transition_then_playing() {
        let mut s = shooter();
        let mut events = Vec::new();
        s.tick(&at(0, start_button(), false), &mut events);
        s.tick(&at(999, start_button(), false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Loading);
        s.tick(&at(1000, start_button(), false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Transition);

        s.tick(&at(2999, None, false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Transition);
        s.tick(&at(3000, None, false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Playing);
        assert_eq!(s.targets.len(), TARGET_COUNT);
        assert_eq!(
            events,
            vec![
                GameEvent::ShooterPhaseChanged(ShooterPhase::Transition),
                GameEvent::ShooterPhaseChanged(ShooterPhase::Playing),
            ]
        );
    }

    #[test]
    fn test_leaving_start_button_resets_dwell() {
        let mut s = shooter();
        let mut events = Vec::new();
        s.tick(&at(0, start_button(), false), &mut events);
        s.tick(&at(999, None, false), &mut events);
        s.tick(&at(1000, start_button(), false), &mut events);
        s.tick(&at(1999, start_button(), false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Loading);
        s.tick(&at(2000, start_button(), false), &mut events);
        assert_eq!(s.phase, ShooterPhase::Transition);
    }

    #[test]
    fn test_round_has_every_kind() {
        let s = playing();
        for kind in TargetKind::ALL {
            assert!(s.targets.iter().any(|t| t.tag == BodyTag::Target(kind)));
        }
    }

    #[test]
    fn test_spawned_targets_avoid_others() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut targets: Vec<MovingBody> = Vec::new();
        for _ in 0..TARGET_COUNT {
            let target = spawn_target(&mut rng, TargetKind::Herb, &targets);
            let speed = target.vel.length();
            assert!(speed >= TARGET_MIN_SPEED - 1e-9 && speed < TARGET_MAX_SPEED + 1e-9);
            for other in &targets {
                assert!(distance(target.pos, other.pos) >= target.radius + other.radius);
            }
            targets.push(target);
        }
    }

    #[test]
    fn test_shot_scores_and_replaces_target() {
        let mut s = playing();
        let aim = s.targets[0].pos;
        let BodyTag::Target(kind) = s.targets[0].tag else {
            panic!("expected a target");
        };
        // Keep the target still so the aim is exact
        for t in &mut s.targets {
            t.vel = DVec2::ZERO;
        }
        let mut events = Vec::new();
        s.tick(&at(4000, Some(aim), true), &mut events);

        assert_eq!(s.scores.get(kind), 1);
        assert_eq!(s.targets.len(), TARGET_COUNT);
        assert_eq!(s.effects.len(), SPARK_COUNT);
        assert!(events.contains(&GameEvent::TargetShot { kind, score: 1 }));
    }

    #[test]
    fn test_pinch_is_rate_limited() {
        let mut s = playing();
        let mut events = Vec::new();
        // Far corner, clear of any target
        s.targets.clear();
        for t in 0..60 {
            s.tick(&at(4000 + t, Some(DVec2::new(5.0, 5.0)), true), &mut events);
        }
        let misses = events.iter().filter(|e| **e == GameEvent::ShotMissed).count();
        assert_eq!(misses, 2);
    }

    #[test]
    fn test_last_of_kind_is_replaced_in_kind() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut s = playing();
        s.targets = vec![
            spawn_target(&mut rng, TargetKind::FishingRod, &[]),
            MovingBody::new(DVec2::new(1000.0, 600.0), DVec2::ZERO, TARGET_RADIUS, BodyTag::Target(TargetKind::Herb)),
        ];
        s.targets[0].pos = DVec2::new(200.0, 200.0);
        s.targets[0].vel = DVec2::ZERO;
        let mut events = Vec::new();
        s.tick(&at(4000, Some(DVec2::new(200.0, 200.0)), true), &mut events);
        assert_eq!(s.targets[0].tag, BodyTag::Target(TargetKind::FishingRod));
    }

    #[test]
    fn test_pingpong_score_launches_pong() {
        let mut s = playing();
        s.scores.pingpong = LAUNCH_SCORE;
        s.targets = vec![MovingBody::new(
            DVec2::new(300.0, 300.0),
            DVec2::ZERO,
            TARGET_RADIUS,
            BodyTag::Target(TargetKind::PingPongPaddle),
        )];
        let mut events = Vec::new();
        s.tick(&at(4000, Some(DVec2::new(300.0, 300.0)), true), &mut events);
        assert!(events.contains(&GameEvent::LaunchGame(GameKind::Pong)));
    }

    fn assert_on_screen(targets: &[MovingBody]) {
        for target in targets {
            assert!(target.pos.x >= TARGET_RADIUS - 1e-6, "x={}", target.pos.x);
            assert!(target.pos.x <= SCREEN_WIDTH - TARGET_RADIUS + 1e-6, "x={}", target.pos.x);
            assert!(target.pos.y >= TARGET_RADIUS - 1e-6, "y={}", target.pos.y);
            assert!(target.pos.y <= SCREEN_HEIGHT - TARGET_RADIUS + 1e-6, "y={}", target.pos.y);
        }
    }

    #[test]
    fn test_targets_stay_on_screen() {
        let mut s = playing();
        let mut events = Vec::new();
        for t in 0..600 {
            s.tick(&at(4000 + t * 16, None, false), &mut events);
            assert_on_screen(&s.targets);
        }
    }

    #[test]
    fn test_pair_separation_near_wall_stays_on_screen() {
        let mut s = playing();
        s.targets = vec![
            MovingBody::new(
                DVec2::new(TARGET_RADIUS + 1.0, 400.0),
                DVec2::new(-3.0, 0.0),
                TARGET_RADIUS,
                BodyTag::Target(TargetKind::Herb),
            ),
            MovingBody::new(
                DVec2::new(140.0, 400.0),
                DVec2::new(-3.0, 0.0),
                TARGET_RADIUS,
                BodyTag::Target(TargetKind::FishingRod),
            ),
        ];
        let mut events = Vec::new();
        s.tick(&at(4000, None, false), &mut events);
        assert_on_screen(&s.targets);
    }
}
