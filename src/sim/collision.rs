//! Collision detection and response
//!
//! Circle-vs-circle uses an equal-mass elastic exchange with symmetric
//! positional correction. Circle-vs-rectangle resolves along the axis of
//! least penetration, one axis per contact.

use glam::DVec2;

use super::body::MovingBody;
use super::geometry::{Rect, distance};
use super::obstacle::Obstacle;

/// Separation direction used when two centers coincide exactly
const COINCIDENT_AXIS: DVec2 = DVec2::X;

/// Resolve one pair of overlapping circles
///
/// Returns false (and touches nothing) when the circles do not overlap.
/// Both bodies are pushed apart by half the penetration each, then the
/// components of their velocities along the line of centers are exchanged.
pub fn resolve_pairwise_collision(a: &mut MovingBody, b: &mut MovingBody) -> bool {
    let delta = a.pos - b.pos;
    let dist = distance(a.pos, b.pos);
    let radii = a.radius + b.radius;
    if dist >= radii {
        return false;
    }

    let overlap = radii - dist;
    let normal = if dist == 0.0 {
        COINCIDENT_AXIS
    } else {
        delta / dist
    };

    // Positional correction (equal masses)
    a.pos += normal * (overlap / 2.0);
    b.pos -= normal * (overlap / 2.0);

    // Velocity exchange along the recomputed line of centers
    let sep = a.pos - b.pos;
    let dist_sq = sep.length_squared();
    if dist_sq == 0.0 {
        return true;
    }
    let factor = (a.vel - b.vel).dot(sep) / dist_sq;
    let change = sep * factor;
    a.vel -= change;
    b.vel += change;

    true
}

/// Resolve every overlapping pair once, in ascending `(i, j)` order
///
/// Returns the number of pairs that collided.
pub fn resolve_all_pairs(bodies: &mut [MovingBody]) -> usize {
    let mut collisions = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            if resolve_pairwise_collision(&mut head[i], &mut tail[0]) {
                collisions += 1;
            }
        }
    }
    collisions
}

/// Axis a ball-vs-rectangle contact was resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Result of a ball striking an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleContact {
    pub obstacle_id: u32,
    pub axis: Axis,
    /// Ball center at the moment of contact (after push-out)
    pub point: DVec2,
    pub hits_remaining: u32,
    /// True only on the hit that took the obstacle to zero
    pub destroyed: bool,
}

/// Push a ball out of a rectangle along the axis of minimum overlap
///
/// The ball's bounding square is tested against the rectangle. Returns the
/// axis used, or `None` when they do not overlap. Only one axis is ever
/// corrected.
pub fn resolve_ball_rect(ball: &mut MovingBody, rect: &Rect) -> Option<Axis> {
    let ball_box = Rect::around_circle(ball.pos, ball.radius);
    if !ball_box.intersects(rect) {
        return None;
    }

    let delta = ball.pos - rect.center();
    let half = rect.half_extents();
    let overlap_x = ball.radius + half.x - delta.x.abs();
    let overlap_y = ball.radius + half.y - delta.y.abs();

    if overlap_x < overlap_y {
        ball.vel.x = -ball.vel.x;
        if delta.x > 0.0 {
            ball.pos.x += overlap_x;
        } else {
            ball.pos.x -= overlap_x;
        }
        Some(Axis::Horizontal)
    } else {
        ball.vel.y = -ball.vel.y;
        if delta.y > 0.0 {
            ball.pos.y += overlap_y;
        } else {
            ball.pos.y -= overlap_y;
        }
        Some(Axis::Vertical)
    }
}

/// Resolve a ball against one obstacle, charging the obstacle one hit
///
/// Obstacles with no hits left are ignored.
pub fn resolve_ball_obstacle(ball: &mut MovingBody, obstacle: &mut Obstacle) -> Option<ObstacleContact> {
    if !obstacle.is_active() {
        return None;
    }
    let axis = resolve_ball_rect(ball, &obstacle.rect)?;
    let destroyed = obstacle.register_hit();
    Some(ObstacleContact {
        obstacle_id: obstacle.id,
        axis,
        point: ball.pos,
        hits_remaining: obstacle.hits_remaining,
        destroyed,
    })
}

/// Resolve the first obstacle (in slice order) the ball overlaps
///
/// At most one contact per call keeps a single tick from stacking
/// corrections from neighbouring obstacles.
pub fn resolve_ball_obstacles(
    ball: &mut MovingBody,
    obstacles: &mut [Obstacle],
) -> Option<ObstacleContact> {
    obstacles
        .iter_mut()
        .find_map(|obstacle| resolve_ball_obstacle(ball, obstacle))
}
