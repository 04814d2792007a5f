//! Collision detection and response
//!
//! Ball against paddles (circle vs rectangle), against the bordered walls,
//! and against the goal/death boundary.

use glam::Vec2;

use super::geometry::{circle_intersects_rect, normalize_or_zero};
use super::state::{Paddle, PaddleAxis, Playfield, Side};

/// A wall of the bordered playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];
}

/// Whether a ball of `radius` at `pos` touches or crosses `wall`
pub fn touches_wall(pos: Vec2, radius: f32, wall: Wall, field: &Playfield) -> bool {
    let min = field.inner_min();
    let max = field.inner_max();
    match wall {
        Wall::Top => pos.y <= min.y + radius,
        Wall::Bottom => pos.y >= max.y - radius,
        Wall::Left => pos.x <= min.x + radius,
        Wall::Right => pos.x >= max.x - radius,
    }
}

/// Reflect `direction` off each touched wall in `walls`.
///
/// The reflected component always points back into the field, so a ball
/// still overlapping a wall on the next frame is not flipped back outward.
/// Returns true if any wall was hit.
pub fn reflect_off_walls(
    pos: Vec2,
    radius: f32,
    direction: &mut Vec2,
    walls: &[Wall],
    field: &Playfield,
) -> bool {
    let mut hit = false;
    for &wall in walls {
        if !touches_wall(pos, radius, wall, field) {
            continue;
        }
        hit = true;
        match wall {
            Wall::Top => direction.y = direction.y.abs(),
            Wall::Bottom => direction.y = -direction.y.abs(),
            Wall::Left => direction.x = direction.x.abs(),
            Wall::Right => direction.x = -direction.x.abs(),
        }
    }
    hit
}

/// Pong goal check: at most one side scores per frame.
/// Returns the side that *scores* (the opposite of the wall crossed).
pub fn goal_scored(pos: Vec2, radius: f32, field: &Playfield) -> Option<Side> {
    if touches_wall(pos, radius, Wall::Left, field) {
        Some(Side::Right)
    } else if touches_wall(pos, radius, Wall::Right, field) {
        Some(Side::Left)
    } else {
        None
    }
}

/// Breakout death check: the whole ball has dropped below the paddle row,
/// whose bottom edge sits one margin above the screen edge
pub fn ball_lost(pos: Vec2, radius: f32, field: &Playfield) -> bool {
    pos.y - radius >= field.screen_size.y - field.margin
}

/// Whether the ball overlaps the paddle
#[inline]
pub fn ball_paddle_collision(pos: Vec2, radius: f32, paddle: &Paddle) -> bool {
    circle_intersects_rect(pos, radius, &paddle.rect())
}

/// Whether `direction` carries the ball toward the paddle's hitting face.
/// A ball already heading away (just served, or just returned) is left alone.
pub fn approaching_paddle(pos: Vec2, direction: Vec2, paddle: &Paddle) -> bool {
    let to_paddle = paddle.center() - pos;
    match paddle.axis {
        PaddleAxis::Vertical => direction.x * to_paddle.x > 0.0,
        PaddleAxis::Horizontal => direction.y * to_paddle.y > 0.0,
    }
}

/// New ball direction after a paddle hit.
///
/// The component across the paddle's travel axis flips; the component along
/// it picks up `paddle.motion * dt * deflection` so a moving paddle steers the
/// rebound. The result is renormalized; if that degenerates, the plain
/// reflection is kept.
pub fn paddle_rebound(direction: Vec2, paddle: &Paddle, dt: f32, deflection: f32) -> Vec2 {
    let reflected = match paddle.axis {
        PaddleAxis::Vertical => Vec2::new(-direction.x, direction.y),
        PaddleAxis::Horizontal => Vec2::new(direction.x, -direction.y),
    };
    let steered = reflected + paddle.axis.along() * (paddle.motion * dt * deflection);
    let steered = normalize_or_zero(steered);
    if steered == Vec2::ZERO {
        normalize_or_zero(reflected)
    } else {
        steered
    }
}
