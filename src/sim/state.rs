//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in `GameState`, so a run is
//! reproducible from its settings, seed and input sequence.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp};
use crate::settings::{Layout, Settings};

/// Immutable playfield geometry for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub screen_size: Vec2,
    pub margin: f32,
    pub border_thickness: f32,
    pub text_margin: f32,
}

impl Playfield {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            screen_size: settings.screen_size,
            margin: settings.margin,
            border_thickness: settings.border_thickness,
            text_margin: settings.text_margin,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.screen_size * 0.5
    }

    /// Distance from each screen edge to the inside of the border
    #[inline]
    pub fn inset(&self) -> f32 {
        self.margin + self.border_thickness
    }

    /// Top-left corner of the bordered area
    #[inline]
    pub fn inner_min(&self) -> Vec2 {
        Vec2::splat(self.inset())
    }

    /// Bottom-right corner of the bordered area
    #[inline]
    pub fn inner_max(&self) -> Vec2 {
        self.screen_size - self.inner_min()
    }

    /// Allowed top-left positions for a paddle of `size` moving along `axis`
    pub fn paddle_bounds(&self, axis: PaddleAxis, size: Vec2, fixed: Vec2) -> (Vec2, Vec2) {
        let inset = self.inset();
        match axis {
            PaddleAxis::Vertical => (
                Vec2::new(fixed.x, inset),
                Vec2::new(fixed.x, self.screen_size.y - size.y - inset),
            ),
            PaddleAxis::Horizontal => (
                Vec2::new(inset, fixed.y),
                Vec2::new(self.screen_size.x - size.x - inset, fixed.y),
            ),
        }
    }
}

/// Direction a paddle travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleAxis {
    /// Pong: up/down
    Vertical,
    /// Breakout: left/right
    Horizontal,
}

impl PaddleAxis {
    /// Unit vector along the travel direction
    #[inline]
    pub fn along(&self) -> Vec2 {
        match self {
            PaddleAxis::Vertical => Vec2::Y,
            PaddleAxis::Horizontal => Vec2::X,
        }
    }
}

/// A player paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub axis: PaddleAxis,
    /// Signed displacement requested this frame (drives rebound deflection)
    pub motion: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2, axis: PaddleAxis) -> Self {
        Self {
            pos,
            size,
            axis,
            motion: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Extent of the paddle along its travel axis
    pub fn extent(&self) -> f32 {
        self.size.dot(self.axis.along())
    }

    /// Move along the axis and clamp into the playfield
    pub fn displace(&mut self, amount: f32, field: &Playfield) {
        self.motion = amount;
        self.pos += self.axis.along() * amount;
        self.clamp_to(field);
    }

    /// Centre the paddle on `target` along its axis and clamp into the playfield
    pub fn follow(&mut self, target: Vec2, field: &Playfield) {
        let along = self.axis.along();
        let before = self.pos.dot(along);
        let wanted = target.dot(along) - self.extent() / 2.0;
        self.pos += along * (wanted - before);
        self.clamp_to(field);
        self.motion = wanted - before;
    }

    pub fn clamp_to(&mut self, field: &Playfield) {
        let (min, max) = field.paddle_bounds(self.axis, self.size, self.pos);
        self.pos = clamp(self.pos, min, max);
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Unit vector while alive
    pub direction: Vec2,
    pub radius: f32,
    pub alive: bool,
    /// A paddle has returned the ball this round (switches to boosted speed)
    pub has_been_hit: bool,
    /// Simulation time of the last honoured paddle hit
    pub last_collision: Option<f64>,
}

impl Ball {
    pub fn new(anchor: Vec2, radius: f32) -> Self {
        Self {
            pos: anchor,
            direction: Vec2::ZERO,
            radius,
            alive: false,
            has_been_hit: false,
            last_collision: None,
        }
    }

    /// Current speed in pixels per second
    pub fn speed(&self, settings: &Settings) -> f32 {
        if self.has_been_hit {
            settings.ball_boosted_speed
        } else {
            settings.ball_initial_speed
        }
    }

    pub fn velocity(&self, settings: &Settings) -> Vec2 {
        self.direction * self.speed(settings)
    }

    /// Return to the dormant state at `anchor`
    pub fn kill(&mut self, anchor: Vec2) {
        self.alive = false;
        self.has_been_hit = false;
        self.last_collision = None;
        self.direction = Vec2::ZERO;
        self.pos = anchor;
    }

    /// A paddle hit is honoured unless one happened within `debounce` seconds
    pub fn can_collide(&self, now: f64, debounce: Option<f32>) -> bool {
        match (debounce, self.last_collision) {
            (Some(window), Some(last)) => now - last > f64::from(window),
            _ => true,
        }
    }
}

/// Goals per side (Pong only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// Which side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ball dormant at its anchor, waiting for a serve
    WaitingToServe,
    /// Ball moving
    InPlay,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub playfield: Playfield,
    /// One paddle for Breakout, left then right for Pong
    pub paddles: Vec<Paddle>,
    pub ball: Ball,
    pub score: Score,
    /// Monotonic simulation clock in seconds. Kept in f64 so long sessions
    /// still advance by each frame's dt.
    pub time: f64,
    /// Simulation frame counter
    pub frame: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with the ball waiting to be served
    pub fn new(settings: Settings, seed: u64) -> Self {
        let playfield = Playfield::from_settings(&settings);
        let paddles = Self::initial_paddles(&settings, &playfield);
        let mut state = Self {
            ball: Ball::new(playfield.center(), settings.ball_radius),
            settings,
            playfield,
            paddles,
            score: Score::default(),
            time: 0.0,
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.ball.pos = state.anchor();
        state
    }

    fn initial_paddles(settings: &Settings, field: &Playfield) -> Vec<Paddle> {
        let size = settings.paddle_size;
        let screen = field.screen_size;
        match settings.layout {
            Layout::DualPaddle => {
                let y = screen.y / 2.0 - size.y / 2.0;
                let side_gap = field.inset() + field.text_margin;
                vec![
                    Paddle::new(Vec2::new(side_gap, y), size, PaddleAxis::Vertical),
                    Paddle::new(
                        Vec2::new(screen.x - side_gap - size.x, y),
                        size,
                        PaddleAxis::Vertical,
                    ),
                ]
            }
            Layout::SinglePaddle => {
                let pos = Vec2::new(
                    screen.x / 2.0 - size.x / 2.0,
                    screen.y - size.y - field.margin,
                );
                vec![Paddle::new(pos, size, PaddleAxis::Horizontal)]
            }
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.ball.alive {
            RoundPhase::InPlay
        } else {
            RoundPhase::WaitingToServe
        }
    }

    /// Where a dormant ball rests: screen centre (Pong) or on the paddle (Breakout)
    pub fn anchor(&self) -> Vec2 {
        match self.settings.layout {
            Layout::DualPaddle => self.playfield.center(),
            Layout::SinglePaddle => {
                let paddle = &self.paddles[0];
                Vec2::new(paddle.center().x, paddle.pos.y - self.ball.radius)
            }
        }
    }
}
