//! Arcade state and the events a tick reports
//!
//! Exactly one game is active at a time. Each game owns its own seeded RNG
//! stream so runs are reproducible from the run seed and the input trace.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::TargetKind;
use super::pong::{PongPhase, PongState};
use super::quiz::QuizState;
use super::shooter::{ShooterPhase, ShooterState};
use crate::consts::*;

/// The three mini-games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameKind {
    #[default]
    Shooter,
    Quiz,
    Pong,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Shooter => "Shooter",
            GameKind::Quiz => "Quiz",
            GameKind::Pong => "Pong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shooter" => Some(GameKind::Shooter),
            "quiz" | "herbs" => Some(GameKind::Quiz),
            "pong" | "pingpong" => Some(GameKind::Pong),
            _ => None,
        }
    }

    /// Default frame-rate cap
    pub fn frame_rate(&self) -> u32 {
        match self {
            GameKind::Shooter | GameKind::Pong => ARCADE_FRAME_RATE,
            GameKind::Quiz => QUIZ_FRAME_RATE,
        }
    }

    /// RNG stream id, so each game draws from an independent sequence
    fn stream(&self) -> u64 {
        match self {
            GameKind::Shooter => 1,
            GameKind::Quiz => 2,
            GameKind::Pong => 3,
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ShooterPhaseChanged(ShooterPhase),
    TargetShot { kind: TargetKind, score: u32 },
    ShotMissed,
    /// Request to switch the active game; honoured at the end of the tick
    LaunchGame(GameKind),

    PongPhaseChanged(PongPhase),
    PaddleHit { score: u32 },
    WallBounce,
    ObstacleHit { id: u32, hits_remaining: u32 },
    ObstacleDestroyed { id: u32 },
    BallLost { health: u32 },
    RoundReset,

    WelcomeDismissed,
    HerbShown { index: usize },
    InfoToggled { visible: bool },
    TestStarted { questions: usize },
    AnswerSelected { index: usize, correct: bool },
    QuestionAdvanced { index: usize },
    TestCompleted { score: u32, total: usize },
    ReturnedToLearning,
}

/// RNG state wrapper: run seed plus a stream per game launch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub launches: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, launches: 0 }
    }

    /// Fresh generator for the next launch of `kind`
    pub fn next_rng(&mut self, kind: GameKind) -> Pcg32 {
        self.launches += 1;
        Pcg32::new(self.seed, (self.launches << 2) | kind.stream())
    }
}

/// The running game
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Shooter(ShooterState),
    Quiz(QuizState),
    Pong(PongState),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Shooter(_) => GameKind::Shooter,
            ActiveGame::Quiz(_) => GameKind::Quiz,
            ActiveGame::Pong(_) => GameKind::Pong,
        }
    }
}

/// Complete arcade state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the latest tick
    pub time_ms: u64,
    /// Maximum live feedback effects per game (0 disables them)
    pub effect_cap: usize,
    pub active: ActiveGame,
}

impl GameState {
    pub fn new(seed: u64, kind: GameKind, effect_cap: usize) -> Self {
        let mut rng_state = RngState::new(seed);
        let active = Self::launch(&mut rng_state, kind, effect_cap);
        Self {
            seed,
            rng_state,
            time_ticks: 0,
            time_ms: 0,
            effect_cap,
            active,
        }
    }

    fn launch(rng_state: &mut RngState, kind: GameKind, effect_cap: usize) -> ActiveGame {
        let rng = rng_state.next_rng(kind);
        match kind {
            GameKind::Shooter => ActiveGame::Shooter(ShooterState::new(rng, effect_cap)),
            GameKind::Quiz => ActiveGame::Quiz(QuizState::new(rng)),
            GameKind::Pong => ActiveGame::Pong(PongState::new(rng, effect_cap)),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.active.kind()
    }

    /// Replace the active game with a fresh instance of `kind`
    pub fn switch_to(&mut self, kind: GameKind) {
        log::info!("Switching game: {} -> {}", self.kind().as_str(), kind.as_str());
        self.active = Self::launch(&mut self.rng_state, kind, self.effect_cap);
    }
}
