//! Render description
//!
//! The simulation never talks to a graphics API. Each frame, `describe`
//! turns the current state into an ordered list of `DrawCommand`s that a
//! host surface replays with whatever drawing facility it owns.

pub mod scene;

pub use scene::describe;

use glam::Vec2;

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// A single drawing primitive, in screen coordinates (y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Color },
    /// Filled axis-aligned rectangle from its top-left corner
    Rect { pos: Vec2, size: Vec2, color: Color },
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Color },
    /// Straight line of the given thickness
    Line {
        start: Vec2,
        end: Vec2,
        thickness: f32,
        color: Color,
    },
    /// Text with its top-left corner at `pos`; `size` is the measured extent
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        spacing: f32,
        size: Vec2,
        color: Color,
    },
}

/// Text measurement, provided by whoever owns the font
pub trait TextMetrics {
    /// Width and height of `text` at `font_size` with `spacing` between glyphs
    fn measure(&self, text: &str, font_size: f32, spacing: f32) -> Vec2;
}

/// Fixed-advance fallback used when no real font is available
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f32, spacing: f32) -> Vec2 {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return Vec2::new(0.0, font_size);
        }
        let width = glyphs as f32 * font_size * self.advance + (glyphs - 1) as f32 * spacing;
        Vec2::new(width, font_size)
    }
}
