//! Game settings and tuning
//!
//! One `Settings` value configures a whole run: playfield geometry, paddle
//! and ball tuning, and the mode flags that select Pong or Breakout rules.
//! Loaded from a JSON file; any missing field falls back to the defaults.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Paddle arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Breakout: one paddle at the bottom, moving horizontally
    SinglePaddle,
    /// Pong: one paddle per side, moving vertically
    #[default]
    DualPaddle,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::SinglePaddle => "breakout",
            Layout::DualPaddle => "pong",
        }
    }
}

/// What happens when the ball reaches the goal/death boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalRule {
    /// The round ends (Pong scores the opposing side)
    #[default]
    Kill,
    /// The boundary reflects like any other wall (endless rally)
    Bounce,
}

/// How player one's paddle is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddleControl {
    /// Discrete up/down (or left/right) keys
    Keys,
    /// Paddle follows the pointer
    Pointer,
}

/// Configuration errors
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings JSON: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: Layout,
    pub goal_rule: GoalRule,
    /// Player one's control scheme (player two always uses keys)
    pub paddle_control: PaddleControl,

    // === Playfield ===
    pub screen_size: Vec2,
    pub margin: f32,
    pub border_thickness: f32,
    pub text_margin: f32,

    // === Paddles ===
    pub paddle_size: Vec2,
    /// Pixels per second
    pub paddle_speed: f32,
    /// Rebound angle control from paddle motion
    pub deflection: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_initial_speed: f32,
    pub ball_boosted_speed: f32,
    /// Seconds between honoured paddle hits (`None` disables the debounce)
    pub collision_debounce: Option<f32>,

    // === HUD ===
    pub font_size: f32,
    pub font_spacing: f32,

    // === Host ===
    pub target_fps: u32,
    /// RNG seed; the runner picks one from the clock when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::pong()
    }
}

impl Settings {
    /// Two keyboard paddles, side goals
    pub fn pong() -> Self {
        Self {
            layout: Layout::DualPaddle,
            goal_rule: GoalRule::Kill,
            paddle_control: PaddleControl::Keys,

            screen_size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            margin: MARGIN,
            border_thickness: BORDER_THICKNESS,
            text_margin: TEXT_MARGIN,

            paddle_size: Vec2::new(PONG_PADDLE_WIDTH, PONG_PADDLE_HEIGHT),
            paddle_speed: PADDLE_SPEED,
            deflection: PADDLE_DEFLECTION,

            ball_radius: BALL_RADIUS,
            ball_initial_speed: BALL_START_SPEED,
            ball_boosted_speed: BALL_BOOSTED_SPEED,
            collision_debounce: Some(COLLISION_DEBOUNCE),

            font_size: FONT_SIZE,
            font_spacing: FONT_SPACING,

            target_fps: TARGET_FPS,
            seed: None,
        }
    }

    /// One pointer-driven paddle, bottom edge kills the ball
    pub fn breakout() -> Self {
        Self {
            layout: Layout::SinglePaddle,
            paddle_control: PaddleControl::Pointer,
            paddle_size: Vec2::new(BREAKOUT_PADDLE_WIDTH, BREAKOUT_PADDLE_HEIGHT),
            ball_boosted_speed: BALL_START_SPEED,
            ..Self::pong()
        }
    }

    /// Defaults for a layout
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::SinglePaddle => Self::breakout(),
            Layout::DualPaddle => Self::pong(),
        }
    }

    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to the layout defaults on any error
    pub fn load_or_default(path: &Path, layout: Layout) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using {} defaults", e, layout.as_str());
                Self::for_layout(layout)
            }
        }
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("screen width", self.screen_size.x),
            ("screen height", self.screen_size.y),
            ("paddle width", self.paddle_size.x),
            ("paddle height", self.paddle_size.y),
            ("ball radius", self.ball_radius),
            ("ball initial speed", self.ball_initial_speed),
            ("ball boosted speed", self.ball_boosted_speed),
            ("font size", self.font_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("border thickness", self.border_thickness),
            ("text margin", self.text_margin),
            ("paddle speed", self.paddle_speed),
            ("deflection", self.deflection),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if let Some(debounce) = self.collision_debounce {
            if !(debounce.is_finite() && debounce >= 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "collision debounce must not be negative, got {}",
                    debounce
                )));
            }
        }

        if self.target_fps == 0 {
            return Err(SettingsError::Invalid("target fps must be at least 1".into()));
        }

        // The paddle must fit inside the bordered playfield along its travel axis
        let inset = 2.0 * (self.margin + self.border_thickness);
        let (room, extent, axis) = match self.layout {
            Layout::DualPaddle => (self.screen_size.y - inset, self.paddle_size.y, "height"),
            Layout::SinglePaddle => (self.screen_size.x - inset, self.paddle_size.x, "width"),
        };
        if extent > room {
            return Err(SettingsError::Invalid(format!(
                "paddle {} {} exceeds playfield {} {}",
                axis, extent, axis, room
            )));
        }

        Ok(())
    }
}
