//! Paddle Arcade - Pong and Breakout on one simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, round lifecycle)
//! - `render`: Draw-command description of the current state
//! - `platform`: Input/clock/surface traits and the frame loop
//! - `settings`: Data-driven tuning, loaded from JSON
//! - `autoplay`: Headless host used by the native runner

pub mod autoplay;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use render::{DrawCommand, MonospaceMetrics, TextMetrics, describe};
pub use settings::{GoalRule, Layout, PaddleControl, Settings, SettingsError};
pub use sim::{GameState, RoundEvent, RoundPhase, TickInput, tick};

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;
    /// Gap between the screen edge and the playfield border
    pub const MARGIN: f32 = 50.0;
    /// Space reserved between the border and text/paddles
    pub const TEXT_MARGIN: f32 = 5.0;
    /// Net/border line thickness
    pub const BORDER_THICKNESS: f32 = 10.0;

    /// Pong paddle (tall, vertical motion)
    pub const PONG_PADDLE_WIDTH: f32 = 20.0;
    pub const PONG_PADDLE_HEIGHT: f32 = 150.0;
    /// Breakout paddle (wide, horizontal motion)
    pub const BREAKOUT_PADDLE_WIDTH: f32 = 200.0;
    pub const BREAKOUT_PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle speed in pixels per second
    pub const PADDLE_SPEED: f32 = 200.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 200.0;
    /// Speed once a paddle has returned the ball
    pub const BALL_BOOSTED_SPEED: f32 = 400.0;

    /// How strongly paddle motion bends the rebound angle
    pub const PADDLE_DEFLECTION: f32 = 2.0;
    /// Minimum seconds between two honoured paddle hits
    pub const COLLISION_DEBOUNCE: f32 = 1.0;

    /// HUD text
    pub const FONT_SIZE: f32 = 20.0;
    pub const FONT_SPACING: f32 = 3.0;

    /// Host frame pacing
    pub const TARGET_FPS: u32 = 60;
}
