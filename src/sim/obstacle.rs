//! Breakable rectangular obstacles (pong's top row)

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// A rectangle that absorbs a fixed number of ball hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub hits_remaining: u32,
    /// Ticks left of the yellow hit outline
    pub hit_flash_ticks: u32,
    /// Ticks left of the explosion; only runs once `hits_remaining == 0`
    pub destroy_anim_ticks: u32,
}

impl Obstacle {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            hits_remaining: OBSTACLE_HITS,
            hit_flash_ticks: 0,
            destroy_anim_ticks: 0,
        }
    }

    /// Can still be hit by the ball
    #[inline]
    pub fn is_active(&self) -> bool {
        self.hits_remaining > 0
    }

    /// Still visible (active, or playing its destroy animation)
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_active() || self.destroy_anim_ticks > 0
    }

    /// Take one hit. Returns true on the hit that destroys the obstacle.
    pub fn register_hit(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.hits_remaining -= 1;
        self.hit_flash_ticks = OBSTACLE_HIT_FLASH_TICKS;
        if self.hits_remaining == 0 {
            self.destroy_anim_ticks = OBSTACLE_DESTROY_TICKS;
            true
        } else {
            false
        }
    }

    /// Count down both animation timers by one tick
    pub fn age(&mut self) {
        self.hit_flash_ticks = self.hit_flash_ticks.saturating_sub(1);
        self.destroy_anim_ticks = self.destroy_anim_ticks.saturating_sub(1);
    }
}

/// Tile a row of obstacles across `[0, width)` at height `y`
///
/// The last obstacle is trimmed so the row ends exactly at `width`.
pub fn generate_row(width: f64, y: f64, cell_width: f64, cell_height: f64) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    let mut x = 0.0;
    let mut id = 1;
    while x < width {
        let w = cell_width.min(width - x);
        obstacles.push(Obstacle::new(id, Rect::new(x, y, w, cell_height)));
        id += 1;
        x += cell_width;
    }
    obstacles
}

/// Age every obstacle and drop the ones whose destroy animation finished
pub fn age_obstacles(obstacles: &mut Vec<Obstacle>) {
    for obstacle in obstacles.iter_mut() {
        obstacle.age();
    }
    obstacles.retain(Obstacle::is_visible);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_covers_width() {
        let row = generate_row(SCREEN_WIDTH, OBSTACLE_ROW_Y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        assert_eq!(row.len(), 10);
        let last = row.last().map(|o| o.rect.right());
        assert_eq!(last, Some(SCREEN_WIDTH));

        let trimmed = generate_row(250.0, 0.0, 120.0, 40.0);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[2].rect.width, 10.0);
    }

    #[test]
    fn test_destroyed_exactly_once() {
        let mut obstacle = Obstacle::new(1, Rect::new(0.0, 0.0, 120.0, 40.0));
        let mut destroyed = 0;
        for _ in 0..(OBSTACLE_HITS + 3) {
            if obstacle.register_hit() {
                destroyed += 1;
            }
        }
        assert_eq!(destroyed, 1);
        assert_eq!(obstacle.hits_remaining, 0);
        assert_eq!(obstacle.destroy_anim_ticks, OBSTACLE_DESTROY_TICKS);
    }

    #[test]
    fn test_removed_after_destroy_animation() {
        let mut obstacles = vec![Obstacle::new(1, Rect::new(0.0, 0.0, 120.0, 40.0))];
        for _ in 0..OBSTACLE_HITS {
            obstacles[0].register_hit();
        }
        for _ in 0..(OBSTACLE_DESTROY_TICKS - 1) {
            age_obstacles(&mut obstacles);
        }
        assert_eq!(obstacles.len(), 1);
        age_obstacles(&mut obstacles);
        assert!(obstacles.is_empty());
    }
}
