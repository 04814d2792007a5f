//! Round lifecycle
//!
//! `WaitingToServe` → `InPlay` on a serve, back on a goal, a lost ball, or a
//! manual reset. There is no terminal state.

use glam::Vec2;
use rand::Rng;

use super::geometry::normalize_or_zero;
use super::state::{GameState, RoundPhase, Side};
use crate::settings::Layout;

/// Something that changed the round this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// Ball launched from its anchor
    Served { direction: Vec2 },
    /// Ball crossed a side boundary; `scorer` gained a point
    Goal { scorer: Side },
    /// Ball dropped past the bottom wall (no score)
    BallLost,
    /// Serve pressed while in play (Pong debug affordance)
    Reset,
    /// A paddle returned the ball
    PaddleHit { paddle: usize },
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Pick a launch direction for a ball resting at `anchor`
pub fn serve_direction(state: &mut GameState, anchor: Vec2) -> Vec2 {
    let screen = state.playfield.screen_size;
    let rng = &mut state.rng;
    let raw = match state.settings.layout {
        Layout::DualPaddle => {
            let half_height = (screen.y / 2.0).floor().max(0.0) as u32;
            let x = random_sign(&mut *rng) * screen.x / 2.0;
            let y = random_sign(&mut *rng) * rng.random_range(0..=half_height) as f32;
            Vec2::new(x, y)
        }
        Layout::SinglePaddle => {
            // Aim anywhere across the top edge
            let lo = -anchor.x.round() as i32;
            let hi = (screen.x - anchor.x).round() as i32;
            let x = if lo <= hi {
                rng.random_range(lo..=hi) as f32
            } else {
                0.0
            };
            Vec2::new(x, -anchor.y)
        }
    };

    let direction = normalize_or_zero(raw);
    if direction == Vec2::ZERO {
        // Zero aim (anchor on the edge itself): launch straight across
        match state.settings.layout {
            Layout::DualPaddle => Vec2::X,
            Layout::SinglePaddle => Vec2::NEG_Y,
        }
    } else {
        direction
    }
}

/// Launch a dormant ball. Returns `None` if it is already in play.
pub fn serve(state: &mut GameState) -> Option<RoundEvent> {
    if state.phase() == RoundPhase::InPlay {
        return None;
    }
    let anchor = state.anchor();
    let direction = serve_direction(state, anchor);

    let ball = &mut state.ball;
    ball.pos = anchor;
    ball.direction = direction;
    ball.alive = true;
    ball.has_been_hit = false;
    ball.last_collision = None;

    log::info!(
        "Serve at frame {} toward ({:+.3} {:+.3})",
        state.frame,
        direction.x,
        direction.y
    );
    Some(RoundEvent::Served { direction })
}

/// Put the ball back to sleep at its anchor
fn park_ball(state: &mut GameState) {
    let anchor = state.anchor();
    state.ball.kill(anchor);
}

/// Ball crossed the `scorer`'s opponent's boundary
pub fn goal(state: &mut GameState, scorer: Side) -> RoundEvent {
    state.score.award(scorer);
    park_ball(state);
    log::info!(
        "Goal for {:?} ({} total): {} - {}",
        scorer,
        state.score.get(scorer),
        state.score.left,
        state.score.right
    );
    RoundEvent::Goal { scorer }
}

/// Ball dropped out of a single-paddle field
pub fn ball_lost(state: &mut GameState) -> RoundEvent {
    park_ball(state);
    log::info!("Ball lost at frame {}", state.frame);
    RoundEvent::BallLost
}

/// Abort the current rally without scoring
pub fn reset(state: &mut GameState) -> RoundEvent {
    park_ball(state);
    log::debug!("Round reset at frame {}", state.frame);
    RoundEvent::Reset
}
