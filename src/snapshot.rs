//! Read-only view of one tick for the renderer
//!
//! Everything here is plain data, serializable with serde, and captured
//! after the tick so it reflects this tick's transitions.

use glam::DVec2;
use serde::Serialize;

use crate::consts::*;
use crate::platform::TrackingStatus;
use crate::sim::body::{BodyTag, MovingBody};
use crate::sim::effects::{EffectKind, FeedbackEffect, Rgb};
use crate::sim::geometry::Rect;
use crate::sim::herbs::Herb;
use crate::sim::obstacle::Obstacle;
use crate::sim::pong::{MODAL_BUTTON, PongPhase, PongState};
use crate::sim::quiz::{QuizState, option_rect};
use crate::sim::shooter::{ShooterPhase, ShooterScores, ShooterState};
use crate::sim::state::{ActiveGame, GameKind, GameState};
use crate::tracking::HandShape;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub pos: DVec2,
    pub radius: f64,
    pub tag: BodyTag,
}

impl From<&MovingBody> for BodyView {
    fn from(body: &MovingBody) -> Self {
        Self {
            pos: body.pos,
            radius: body.radius,
            tag: body.tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub pos: DVec2,
    pub radius: f64,
    pub opacity: f64,
    pub color: Option<Rgb>,
}

impl From<&FeedbackEffect> for EffectView {
    fn from(effect: &FeedbackEffect) -> Self {
        Self {
            kind: effect.kind,
            pos: effect.pos,
            radius: effect.radius,
            opacity: effect.opacity(),
            color: effect.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub rect: Rect,
    pub hits_remaining: u32,
    pub flashing: bool,
    /// Fraction of the destroy animation left, for destroyed obstacles
    pub destroy_progress: Option<f64>,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            id: obstacle.id,
            rect: obstacle.rect,
            hits_remaining: obstacle.hits_remaining,
            flashing: obstacle.hit_flash_ticks > 0,
            destroy_progress: (!obstacle.is_active())
                .then(|| obstacle.destroy_anim_ticks as f64 / OBSTACLE_DESTROY_TICKS as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShooterView {
    pub phase: ShooterPhase,
    pub start_button: BodyView,
    pub dwell_progress: f64,
    pub transition_remaining_ms: Option<u64>,
    pub targets: Vec<BodyView>,
    pub scores: ShooterScores,
    pub crosshair: Option<DVec2>,
    pub pinching: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: &'static str,
    pub message: &'static str,
    pub button: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongView {
    pub phase: PongPhase,
    pub health: u32,
    pub max_health: u32,
    pub score: u32,
    pub ball: BodyView,
    pub trail: Vec<DVec2>,
    pub paddle: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub left_wall_flash: bool,
    pub right_wall_flash: bool,
    pub dwell_progress: f64,
    pub countdown_secs: Option<u64>,
    pub hand: Option<DVec2>,
    pub modal: Option<ModalView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<(String, Rect)>,
    pub selected: Option<usize>,
    /// Revealed once an answer is locked in
    pub correct_index: Option<usize>,
    pub number: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub welcome: bool,
    pub herb: Herb,
    pub show_info: bool,
    pub learned_count: u32,
    pub learn_threshold: u32,
    pub in_test: bool,
    pub question: Option<QuestionView>,
    pub test_score: u32,
    pub test_completed: bool,
    pub shape: Option<HandShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "game")]
pub enum GameView {
    Shooter(ShooterView),
    Pong(PongView),
    Quiz(QuizView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub time_ms: u64,
    pub game: GameKind,
    pub tracking: TrackingStatus,
    pub view: GameView,
    pub effects: Vec<EffectView>,
}

impl Snapshot {
    pub fn capture(state: &GameState, tracking: &TrackingStatus) -> Self {
        let now = state.time_ms;
        let (view, effects) = match &state.active {
            ActiveGame::Shooter(s) => (GameView::Shooter(shooter_view(s, now)), collect(s.effects.iter())),
            ActiveGame::Pong(p) => (GameView::Pong(pong_view(p, now)), collect(p.effects.iter())),
            ActiveGame::Quiz(q) => (GameView::Quiz(quiz_view(q)), Vec::new()),
        };
        Self {
            tick: state.time_ticks,
            time_ms: now,
            game: state.kind(),
            tracking: tracking.clone(),
            view,
            effects,
        }
    }
}

fn collect<'a>(effects: impl Iterator<Item = &'a FeedbackEffect>) -> Vec<EffectView> {
    effects.map(EffectView::from).collect()
}

fn shooter_view(s: &ShooterState, now: u64) -> ShooterView {
    ShooterView {
        phase: s.phase,
        start_button: BodyView::from(&s.start_button),
        dwell_progress: s.dwell.progress(now),
        transition_remaining_ms: (s.phase == ShooterPhase::Transition).then(|| s.transition_remaining_ms(now)),
        targets: s.targets.iter().map(BodyView::from).collect(),
        scores: s.scores,
        crosshair: s.crosshair,
        pinching: s.pinching,
    }
}

fn pong_view(p: &PongState, now: u64) -> PongView {
    PongView {
        phase: p.phase,
        health: p.health,
        max_health: MAX_HEALTH,
        score: p.score,
        ball: BodyView::from(&p.ball),
        trail: p.ball.trail.clone(),
        paddle: Rect::new(p.paddle_x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HIT_OFFSET_Y + PADDLE_HIT_HEIGHT),
        obstacles: p.obstacles.iter().map(ObstacleView::from).collect(),
        left_wall_flash: p.left_wall_flash > 0,
        right_wall_flash: p.right_wall_flash > 0,
        dwell_progress: p.dwell.progress(now),
        countdown_secs: (p.phase == PongPhase::Countdown).then(|| p.countdown_remaining_secs(now)),
        hand: p.hand,
        modal: p.modal_text().map(|(title, message)| ModalView {
            title,
            message,
            button: MODAL_BUTTON,
        }),
    }
}

fn quiz_view(q: &QuizState) -> QuizView {
    let question = q.question().map(|question| QuestionView {
        prompt: question.prompt.clone(),
        options: question
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| (o.clone(), option_rect(i)))
            .collect(),
        selected: q.selected_answer,
        correct_index: q.selected_answer.map(|_| question.correct_index),
        number: q.current_question + 1,
        total: q.questions.len(),
    });
    QuizView {
        welcome: q.welcome,
        herb: *q.herb(),
        show_info: q.show_info,
        learned_count: q.learned_count,
        learn_threshold: LEARN_THRESHOLD,
        in_test: q.in_test,
        question,
        test_score: q.test_score,
        test_completed: q.test_completed,
        shape: q.last_shape,
    }
}
