//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time is an explicit input
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod dashed;
pub mod geometry;
pub mod round;
pub mod state;
pub mod tick;

pub use collision::{Wall, ball_paddle_collision, paddle_rebound};
pub use dashed::{DashedLine, Dashes, Spacing};
pub use geometry::{Rect, circle_intersects_rect, normalize_or_zero};
pub use round::RoundEvent;
pub use state::{Ball, GameState, Paddle, PaddleAxis, Playfield, RoundPhase, Score, Side};
pub use tick::{TickInput, tick};
