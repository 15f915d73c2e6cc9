//! Gesture Arcade - three webcam-gesture mini-games on one 2D collision core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, triggers, phase machines)
//! - `tracking`: Landmark frames, gesture classification, screen-space input mapping
//! - `snapshot`: Per-tick render snapshot handed to the rendering collaborator
//! - `session`: One tick of the capture -> simulate -> snapshot loop
//! - `platform`: Frame sources and frame-rate clock
//! - `assets`: Optional asset resolution with placeholder fallback
//! - `settings`: User configuration

pub mod assets;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tracking;

pub use session::Session;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (shooter and pong)
    pub const SCREEN_WIDTH: f64 = 1200.0;
    pub const SCREEN_HEIGHT: f64 = 800.0;

    /// Default frame-rate caps
    pub const ARCADE_FRAME_RATE: u32 = 60;
    pub const QUIZ_FRAME_RATE: u32 = 30;

    /// Normalized thumb-index distance below which a hand counts as pinching
    pub const PINCH_THRESHOLD: f64 = 0.05;

    // --- Shooter ---
    pub const TARGET_RADIUS: f64 = 80.0;
    pub const TARGET_COUNT: usize = 8;
    pub const TARGET_MIN_SPEED: f64 = 3.0;
    pub const TARGET_MAX_SPEED: f64 = 6.0;
    /// Hit radius of the hand crosshair
    pub const CROSSHAIR_RADIUS: f64 = 50.0;
    pub const START_BUTTON_X: f64 = SCREEN_WIDTH / 2.0;
    pub const START_BUTTON_Y: f64 = SCREEN_HEIGHT / 2.0 + 150.0;
    pub const START_BUTTON_RADIUS: f64 = 80.0;
    pub const START_DWELL_MS: u64 = 1000;
    pub const TRANSITION_MS: u64 = 2000;
    /// 500 ms at 60 Hz
    pub const SHOT_COOLDOWN_TICKS: u32 = 30;
    /// A kind's score must exceed this to launch its game
    pub const LAUNCH_SCORE: u32 = 5;
    pub const SPARK_COUNT: usize = 30;
    pub const SPARK_LIFETIME: u32 = 60;

    // --- Pong ---
    pub const TABLE_LEFT: f64 = 100.0;
    pub const TABLE_RIGHT: f64 = SCREEN_WIDTH - 100.0;
    pub const TABLE_TOP: f64 = 0.0;
    pub const TABLE_BOTTOM: f64 = SCREEN_HEIGHT;
    pub const PADDLE_WIDTH: f64 = 250.0;
    pub const PADDLE_Y: f64 = SCREEN_HEIGHT - 300.0;
    /// Paddle collision box, inset from the sprite
    pub const PADDLE_HIT_WIDTH: f64 = PADDLE_WIDTH - 40.0;
    pub const PADDLE_HIT_OFFSET_Y: f64 = 100.0;
    pub const PADDLE_HIT_HEIGHT: f64 = 209.0;
    pub const PADDLE_SMOOTHING: f64 = 0.2;
    /// Horizontal speed per pixel of off-center paddle contact
    pub const PADDLE_ENGLISH: f64 = 0.15;
    pub const BALL_RADIUS: f64 = 20.0;
    pub const BALL_SERVE_SPEED: f64 = 10.0;
    pub const BALL_MAX_SPEED: f64 = 20.0;
    pub const BALL_TRAIL_LENGTH: usize = 5;
    pub const MAX_HEALTH: u32 = 5;
    pub const OBSTACLE_ROW_Y: f64 = TABLE_TOP + 100.0;
    pub const OBSTACLE_WIDTH: f64 = 120.0;
    pub const OBSTACLE_HEIGHT: f64 = 40.0;
    pub const OBSTACLE_HITS: u32 = 5;
    pub const OBSTACLE_HIT_FLASH_TICKS: u32 = 10;
    pub const OBSTACLE_DESTROY_TICKS: u32 = 15;
    pub const INTRO_DWELL_MS: u64 = 3000;
    pub const COUNTDOWN_MS: u64 = 3000;
    pub const HIT_RING_TICKS: u32 = 15;
    pub const WALL_FLASH_TICKS: u32 = 10;
    pub const CONFETTI_COUNT: usize = 50;

    // --- Quiz ---
    pub const QUIZ_WIDTH: f64 = 1280.0;
    pub const QUIZ_HEIGHT: f64 = 800.0;
    pub const LEARN_THRESHOLD: u32 = 30;
    pub const QUESTION_COUNT: usize = 8;
    pub const OPTION_COUNT: usize = 4;
    /// Learned herbs needed before questions draw only from them
    pub const MIN_LEARNED_POOL: usize = 5;
    pub const LEARN_COOLDOWN_TICKS: u32 = 20;
    pub const TEST_COOLDOWN_TICKS: u32 = 30;
}
