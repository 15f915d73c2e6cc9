//! Short-lived visual feedback (explosion sparks, hit rings, confetti)
//!
//! Effects never feed back into gameplay; they are aged once per tick and
//! handed to the renderer through the snapshot.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(10, 132, 255);
    pub const GREEN: Rgb = Rgb(48, 209, 88);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Drifting dot that shrinks as it moves
    Spark,
    /// Expanding-then-fading outline at a contact point
    Ring,
    /// Victory sparkle at a fixed position
    Confetti,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEffect {
    pub kind: EffectKind,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub remaining_lifetime: u32,
    pub initial_lifetime: u32,
    /// `None` means the renderer's default highlight color
    pub color: Option<Rgb>,
}

impl FeedbackEffect {
    pub fn ring(pos: DVec2, lifetime: u32) -> Self {
        Self {
            kind: EffectKind::Ring,
            pos,
            vel: DVec2::ZERO,
            radius: ring_radius(lifetime),
            remaining_lifetime: lifetime,
            initial_lifetime: lifetime,
            color: None,
        }
    }

    pub fn confetti(pos: DVec2, lifetime: u32, color: Rgb) -> Self {
        Self {
            kind: EffectKind::Confetti,
            color: Some(color),
            ..Self::ring(pos, lifetime)
        }
    }

    pub fn spark(pos: DVec2, vel: DVec2, radius: f64, lifetime: u32, color: Rgb) -> Self {
        Self {
            kind: EffectKind::Spark,
            pos,
            vel,
            radius,
            remaining_lifetime: lifetime,
            initial_lifetime: lifetime,
            color: Some(color),
        }
    }

    /// One tick older
    pub fn age(&mut self) {
        self.remaining_lifetime = self.remaining_lifetime.saturating_sub(1);
        match self.kind {
            EffectKind::Spark => {
                self.pos += self.vel;
                self.radius = (self.radius - 0.1).max(0.0);
            }
            EffectKind::Ring | EffectKind::Confetti => {
                self.radius = ring_radius(self.remaining_lifetime);
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_lifetime > 0
    }

    /// Remaining life in `[0, 1]`, for fading
    pub fn opacity(&self) -> f64 {
        if self.initial_lifetime == 0 {
            0.0
        } else {
            self.remaining_lifetime as f64 / self.initial_lifetime as f64
        }
    }
}

#[inline]
fn ring_radius(lifetime: u32) -> f64 {
    lifetime as f64 * 2.0
}

/// Bounded list of live effects
#[derive(Debug, Clone, Default)]
pub struct EffectList {
    effects: Vec<FeedbackEffect>,
    cap: usize,
}

impl EffectList {
    pub fn new(cap: usize) -> Self {
        Self {
            effects: Vec::new(),
            cap,
        }
    }

    /// Add an effect; silently dropped once the cap is reached
    pub fn push(&mut self, effect: FeedbackEffect) {
        if self.effects.len() < self.cap {
            self.effects.push(effect);
        }
    }

    /// Explosion of `count` sparks at `pos`
    pub fn spawn_burst<R: Rng>(&mut self, rng: &mut R, pos: DVec2, color: Rgb, count: usize, lifetime: u32) {
        for _ in 0..count {
            let vel = DVec2::new(rng.random_range(-3.0..=3.0), rng.random_range(-3.0..=3.0));
            let radius = rng.random_range(3..=8) as f64;
            self.push(FeedbackEffect::spark(pos, vel, radius, lifetime, color));
        }
    }

    /// Age everything by one tick and drop the expired
    pub fn age(&mut self) {
        for effect in &mut self.effects {
            effect.age();
        }
        self.effects.retain(FeedbackEffect::is_alive);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ring_expires_after_lifetime() {
        let mut list = EffectList::new(16);
        list.push(FeedbackEffect::ring(DVec2::new(10.0, 10.0), 15));
        for _ in 0..14 {
            list.age();
        }
        assert_eq!(list.len(), 1);
        let ring = list.iter().next().map(|e| (e.remaining_lifetime, e.radius));
        assert_eq!(ring, Some((1, 2.0)));
        list.age();
        assert!(list.is_empty());
    }

    #[test]
    fn test_sparks_move_and_shrink() {
        let mut spark = FeedbackEffect::spark(DVec2::ZERO, DVec2::new(1.0, -2.0), 5.0, 60, Rgb::RED);
        spark.age();
        assert_eq!(spark.pos, DVec2::new(1.0, -2.0));
        assert!((spark.radius - 4.9).abs() < 1e-12);
        assert_eq!(spark.remaining_lifetime, 59);
        assert!((spark.opacity() - 59.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_cap_limits_burst() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut list = EffectList::new(10);
        list.spawn_burst(&mut rng, DVec2::ZERO, Rgb::BLUE, 30, 60);
        assert_eq!(list.len(), 10);
        for effect in list.iter() {
            assert!(effect.vel.x.abs() <= 3.0 && effect.vel.y.abs() <= 3.0);
            assert!((3.0..=8.0).contains(&effect.radius));
        }
    }

    #[test]
    fn test_zero_cap_disables_effects() {
        let mut list = EffectList::new(0);
        list.push(FeedbackEffect::ring(DVec2::ZERO, 15));
        assert!(list.is_empty());
    }
}
