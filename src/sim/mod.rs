//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick steps only
//! - Seeded RNG only
//! - Stable iteration order (slice order decides ties)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod effects;
pub mod geometry;
pub mod herbs;
pub mod obstacle;
pub mod pong;
pub mod quiz;
pub mod shooter;
pub mod state;
pub mod tick;
pub mod trigger;

pub use body::{BodyTag, MovingBody, TargetKind, WallHits};
pub use collision::{
    Axis, ObstacleContact, resolve_all_pairs, resolve_ball_obstacle, resolve_ball_obstacles, resolve_ball_rect,
    resolve_pairwise_collision,
};
pub use effects::{EffectKind, EffectList, FeedbackEffect, Rgb};
pub use geometry::{Bounds, Rect, circle_overlap, distance, normalize};
pub use herbs::{HERBS, Herb, HerbField};
pub use obstacle::{Obstacle, generate_row};
pub use pong::{PongPhase, PongState};
pub use quiz::{Question, QuizState};
pub use shooter::{ShooterPhase, ShooterScores, ShooterState};
pub use state::{ActiveGame, GameEvent, GameKind, GameState};
pub use tick::{TickInput, tick};
pub use trigger::{CooldownTrigger, DwellTimer};
