//! Moving circular bodies
//!
//! Every circle in the arcade (shooter targets, the shooter's start button,
//! the pong ball) is a `MovingBody`; the `tag` says which game object it is.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::effects::Rgb;
use super::geometry::Bounds;

/// Shooter target categories; each one feeds its own score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    FishingRod,
    PingPongPaddle,
    Herb,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [
        TargetKind::FishingRod,
        TargetKind::PingPongPaddle,
        TargetKind::Herb,
    ];

    /// Sprite file the rendering collaborator draws for this kind
    pub fn asset_name(&self) -> &'static str {
        match self {
            TargetKind::FishingRod => "fishing_rod.png",
            TargetKind::PingPongPaddle => "pingpong_paddle.png",
            TargetKind::Herb => "herb.png",
        }
    }

    /// Fill for the placeholder circle and the explosion sparks
    pub fn color(&self) -> Rgb {
        match self {
            TargetKind::FishingRod => Rgb::BLUE,
            TargetKind::PingPongPaddle => Rgb::ORANGE,
            TargetKind::Herb => Rgb::GREEN,
        }
    }
}

/// What a body represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    Target(TargetKind),
    StartButton,
    PaddleBall,
}

/// Which walls a reflection touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// A circle with a velocity, advanced one fixed step per tick
#[derive(Debug, Clone, PartialEq)]
pub struct MovingBody {
    pub pos: DVec2,
    /// Displacement per tick
    pub vel: DVec2,
    pub radius: f64,
    pub tag: BodyTag,
    /// Recent positions, newest last (only recorded by games that draw trails)
    pub trail: Vec<DVec2>,
}

impl MovingBody {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, tag: BodyTag) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            pos,
            vel,
            radius,
            tag,
            trail: Vec::new(),
        }
    }

    /// A body that never moves (e.g. the shooter's start button)
    pub fn fixed(pos: DVec2, radius: f64, tag: BodyTag) -> Self {
        Self::new(pos, DVec2::ZERO, radius, tag)
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Keep the body inside `bounds`, reflecting each axis independently
    ///
    /// A component is inverted only when it points out of the playfield, so a
    /// body resting on a wall while moving inward is left alone. The speed is
    /// never changed.
    pub fn reflect_off_bounds(&mut self, bounds: &Bounds) -> WallHits {
        let mut hits = WallHits::default();
        let min = bounds.min + DVec2::splat(self.radius);
        let max = bounds.max - DVec2::splat(self.radius);

        if self.pos.x <= min.x {
            self.pos.x = min.x;
            if self.vel.x < 0.0 {
                self.vel.x = -self.vel.x;
                hits.left = true;
            }
        } else if self.pos.x >= max.x {
            self.pos.x = max.x;
            if self.vel.x > 0.0 {
                self.vel.x = -self.vel.x;
                hits.right = true;
            }
        }

        if self.pos.y <= min.y {
            self.pos.y = min.y;
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y;
                hits.top = true;
            }
        } else if self.pos.y >= max.y {
            self.pos.y = max.y;
            if self.vel.y > 0.0 {
                self.vel.y = -self.vel.y;
                hits.bottom = true;
            }
        }

        hits
    }

    /// Record the current position, keeping at most `max_len` entries
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push(self.pos);
        if self.trail.len() > max_len {
            self.trail.remove(0);
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Sum of squared velocity components (unit mass)
    pub fn kinetic_energy(&self) -> f64 {
        self.vel.length_squared()
    }
}
