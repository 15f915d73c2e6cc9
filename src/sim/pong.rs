//! Head-controlled pong against a row of breakable obstacles
//!
//! The hand hovers a button to start, a three second countdown runs, then
//! the paddle follows the player's head. Missing the ball costs health;
//! breaking any obstacle wins. Both end screens wait for a click on the
//! modal button, which resets the whole round.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BodyTag, MovingBody};
use super::collision::resolve_ball_obstacles;
use super::effects::{EffectList, FeedbackEffect, Rgb};
use super::geometry::{Bounds, Rect};
use super::obstacle::{Obstacle, age_obstacles, generate_row};
use super::state::GameEvent;
use super::tick::TickInput;
use super::trigger::DwellTimer;
use crate::consts::*;

/// "Continue" button on the introduction screen
pub const CONTINUE_BUTTON: Rect = Rect {
    x: SCREEN_WIDTH / 2.0 - 100.0,
    y: SCREEN_HEIGHT / 2.0 + 100.0,
    width: 200.0,
    height: 60.0,
};

/// Button inside the game-over / victory modal
pub const MODAL_BUTTON: Rect = Rect {
    x: SCREEN_WIDTH / 2.0 - 50.0,
    y: (SCREEN_HEIGHT - 250.0) / 2.0 + 180.0,
    width: 100.0,
    height: 40.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PongPhase {
    Introduction,
    Countdown,
    Playing,
    GameOver,
    Victory,
}

impl PongPhase {
    /// Waiting on the modal button
    pub fn is_terminal(&self) -> bool {
        matches!(self, PongPhase::GameOver | PongPhase::Victory)
    }
}

#[derive(Debug, Clone)]
pub struct PongState {
    pub phase: PongPhase,
    pub ball: MovingBody,
    /// Left edge of the paddle sprite
    pub paddle_x: f64,
    pub health: u32,
    pub score: u32,
    pub obstacles: Vec<Obstacle>,
    pub effects: EffectList,
    pub dwell: DwellTimer,
    pub countdown_started_ms: u64,
    pub left_wall_flash: u32,
    pub right_wall_flash: u32,
    /// Hand cursor (introduction screen)
    pub hand: Option<DVec2>,
    pub head: Option<DVec2>,
    rng: Pcg32,
}

impl PongState {
    pub fn new(rng: Pcg32, effect_cap: usize) -> Self {
        let mut state = Self {
            phase: PongPhase::Introduction,
            ball: MovingBody::new(DVec2::ZERO, DVec2::ZERO, BALL_RADIUS, BodyTag::PaddleBall),
            paddle_x: 0.0,
            health: MAX_HEALTH,
            score: 0,
            obstacles: Vec::new(),
            effects: EffectList::new(effect_cap),
            dwell: DwellTimer::new(INTRO_DWELL_MS),
            countdown_started_ms: 0,
            left_wall_flash: 0,
            right_wall_flash: 0,
            hand: None,
            head: None,
            rng,
        };
        state.reset_round();
        state
    }

    /// Everything back to a fresh round, on the introduction screen
    pub fn reset_round(&mut self) {
        self.phase = PongPhase::Introduction;
        self.health = MAX_HEALTH;
        self.score = 0;
        self.paddle_x = (TABLE_LEFT + TABLE_RIGHT - PADDLE_WIDTH) / 2.0;
        self.obstacles = generate_row(SCREEN_WIDTH, OBSTACLE_ROW_Y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        self.effects.clear();
        self.dwell.reset();
        self.left_wall_flash = 0;
        self.right_wall_flash = 0;
        self.serve();
    }

    /// Ball back to the center, heading up at a random horizontal sign
    fn serve(&mut self) {
        let dx = if self.rng.random_bool(0.5) {
            BALL_SERVE_SPEED
        } else {
            -BALL_SERVE_SPEED
        };
        self.ball.pos = DVec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        self.ball.vel = DVec2::new(dx, -BALL_SERVE_SPEED);
        self.ball.clear_trail();
    }

    /// Collision box under the paddle sprite
    pub fn paddle_hit_rect(&self) -> Rect {
        Rect::new(
            self.paddle_x + (PADDLE_WIDTH - PADDLE_HIT_WIDTH) / 2.0,
            PADDLE_Y + PADDLE_HIT_OFFSET_Y,
            PADDLE_HIT_WIDTH,
            PADDLE_HIT_HEIGHT,
        )
    }

    /// Whole seconds left on the countdown (3, 2, 1)
    pub fn countdown_remaining_secs(&self, now_ms: u64) -> u64 {
        let left = COUNTDOWN_MS.saturating_sub(now_ms.saturating_sub(self.countdown_started_ms));
        left.div_ceil(1000)
    }

    pub fn tick(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        self.hand = input.cursor;
        self.head = input.head;

        let modal_clicked = self.phase.is_terminal() && input.click.is_some_and(|p| MODAL_BUTTON.contains(p));
        let intro_inside = input.cursor.is_some_and(|p| CONTINUE_BUTTON.contains(p));

        match self.phase {
            PongPhase::Introduction => {
                if self.dwell.update(input.now_ms, intro_inside) {
                    self.countdown_started_ms = input.now_ms;
                    self.set_phase(PongPhase::Countdown, events);
                }
            }
            PongPhase::Countdown => {
                if input.now_ms.saturating_sub(self.countdown_started_ms) >= COUNTDOWN_MS {
                    self.set_phase(PongPhase::Playing, events);
                }
            }
            PongPhase::Playing => {}
            PongPhase::GameOver | PongPhase::Victory => {
                if modal_clicked {
                    self.reset_round();
                    log::info!("Pong round reset");
                    events.push(GameEvent::RoundReset);
                    events.push(GameEvent::PongPhaseChanged(PongPhase::Introduction));
                }
            }
        }

        if self.phase == PongPhase::Playing {
            if let Some(head) = input.head {
                self.follow_head(head.x);
            }
            self.step_ball(events);
        }

        self.left_wall_flash = self.left_wall_flash.saturating_sub(1);
        self.right_wall_flash = self.right_wall_flash.saturating_sub(1);
        age_obstacles(&mut self.obstacles);
        self.effects.age();
    }

    fn set_phase(&mut self, phase: PongPhase, events: &mut Vec<GameEvent>) {
        log::info!("Pong phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(GameEvent::PongPhaseChanged(phase));
    }

    /// Ease the paddle center toward the head, clamped to the table
    fn follow_head(&mut self, head_x: f64) {
        let target = head_x - PADDLE_WIDTH / 2.0;
        let x = self.paddle_x + (target - self.paddle_x) * PADDLE_SMOOTHING;
        self.paddle_x = x.max(TABLE_LEFT).min(TABLE_RIGHT - PADDLE_WIDTH);
    }

    fn step_ball(&mut self, events: &mut Vec<GameEvent>) {
        self.ball.integrate();
        self.ball.record_trail(BALL_TRAIL_LENGTH);

        let table = Bounds::new(DVec2::new(TABLE_LEFT, TABLE_TOP), DVec2::new(TABLE_RIGHT, f64::INFINITY));
        let walls = self.ball.reflect_off_bounds(&table);
        if walls.left {
            self.left_wall_flash = WALL_FLASH_TICKS;
        }
        if walls.right {
            self.right_wall_flash = WALL_FLASH_TICKS;
        }
        if walls.any() {
            events.push(GameEvent::WallBounce);
        }

        if self.ball.pos.y - self.ball.radius >= TABLE_BOTTOM {
            self.lose_ball(events);
            return;
        }

        let ball_box = Rect::around_circle(self.ball.pos, self.ball.radius);
        if self.ball.vel.y > 0.0 && ball_box.intersects(&self.paddle_hit_rect()) {
            self.ball.vel.y = -self.ball.vel.y;
            self.score += 1;
            let offset = self.ball.pos.x - (self.paddle_x + PADDLE_WIDTH / 2.0);
            self.ball.vel.x = offset * PADDLE_ENGLISH;
            self.ball.vel = self.ball.vel.clamp(DVec2::splat(-BALL_MAX_SPEED), DVec2::splat(BALL_MAX_SPEED));
            self.effects.push(FeedbackEffect::ring(self.ball.pos, HIT_RING_TICKS));
            events.push(GameEvent::PaddleHit { score: self.score });
        }

        if let Some(contact) = resolve_ball_obstacles(&mut self.ball, &mut self.obstacles) {
            // Push-out can cross a wall when an obstacle sits against it
            self.ball.reflect_off_bounds(&table);
            self.effects.push(FeedbackEffect::ring(contact.point, HIT_RING_TICKS));
            events.push(GameEvent::ObstacleHit {
                id: contact.obstacle_id,
                hits_remaining: contact.hits_remaining,
            });
            if contact.destroyed {
                events.push(GameEvent::ObstacleDestroyed { id: contact.obstacle_id });
                self.celebrate();
                self.set_phase(PongPhase::Victory, events);
            }
        }
    }

    /// Only reachable while playing, so health never underflows
    fn lose_ball(&mut self, events: &mut Vec<GameEvent>) {
        self.health = self.health.saturating_sub(1);
        log::debug!("Ball lost, health {}", self.health);
        events.push(GameEvent::BallLost { health: self.health });
        self.serve();
        if self.health == 0 {
            self.set_phase(PongPhase::GameOver, events);
        }
    }

    fn celebrate(&mut self) {
        for _ in 0..CONFETTI_COUNT {
            let pos = DVec2::new(
                self.rng.random_range(0.0..SCREEN_WIDTH),
                self.rng.random_range(0.0..SCREEN_HEIGHT),
            );
            let lifetime = self.rng.random_range(20..=40);
            let color = Rgb(255, self.rng.random_range(200..=255), self.rng.random_range(0..=100));
            self.effects.push(FeedbackEffect::confetti(pos, lifetime, color));
        }
    }

    /// Title and message for the end-of-round modal
    pub fn modal_text(&self) -> Option<(&'static str, &'static str)> {
        match self.phase {
            PongPhase::GameOver => Some(("Game Over", "You ran out of health")),
            PongPhase::Victory => Some(("Victory!", "You broke through the wall")),
            _ => None,
        }
    }
}
