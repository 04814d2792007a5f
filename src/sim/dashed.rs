//! Dashed line layout
//!
//! Splits a segment into evenly spaced dashes. In auto mode the gap aims for
//! half a dash, then stretches so the first dash starts at `start` and the
//! last dash ends exactly at `end`.

use glam::Vec2;

use super::geometry::normalize_or_zero;

/// Gap between dashes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Roughly half a dash, adjusted so dashes tile the segment exactly
    Auto,
    /// Fixed gap; the tail after the last full dash stays empty
    Fixed(f32),
}

/// A dashed segment; iterate with [`DashedLine::dashes`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashedLine {
    pub start: Vec2,
    pub end: Vec2,
    pub dash_length: f32,
    pub spacing: Spacing,
}

impl DashedLine {
    pub fn new(start: Vec2, end: Vec2, dash_length: f32, spacing: Spacing) -> Self {
        Self {
            start,
            end,
            dash_length,
            spacing,
        }
    }

    pub fn total_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Number of dashes and the gap between consecutive dashes
    pub fn layout(&self) -> (usize, f32) {
        let total = self.total_length();
        let dash = self.dash_length;
        if !(total.is_finite() && dash.is_finite()) || total <= 0.0 || dash <= 0.0 {
            return (0, 0.0);
        }

        let (count, space) = match self.spacing {
            Spacing::Auto => {
                let approx = dash / 2.0;
                let count = ((total + approx) / (dash + approx)).floor() as usize;
                if count <= 1 {
                    return (1, 0.0);
                }
                // total + space == count * (dash + space)
                (count, (total - count as f32 * dash) / (count - 1) as f32)
            }
            Spacing::Fixed(space) => {
                let space = space.max(0.0);
                let count = ((total + space) / (dash + space)).floor() as usize;
                (count, space)
            }
        };

        if count <= 1 { (1, 0.0) } else { (count, space) }
    }

    /// Fresh iterator over `(dash_start, dash_end)` pairs, from `start` to `end`
    pub fn dashes(&self) -> Dashes {
        let (count, space) = self.layout();
        let total = self.total_length();
        Dashes {
            origin: self.start,
            direction: normalize_or_zero(self.end - self.start),
            dash_length: self.dash_length.min(total),
            stride: self.dash_length + space,
            index: 0,
            count,
        }
    }
}

impl IntoIterator for &DashedLine {
    type Item = (Vec2, Vec2);
    type IntoIter = Dashes;

    fn into_iter(self) -> Dashes {
        self.dashes()
    }
}

/// Iterator over the dashes of a [`DashedLine`]
#[derive(Debug, Clone)]
pub struct Dashes {
    origin: Vec2,
    direction: Vec2,
    dash_length: f32,
    stride: f32,
    index: usize,
    count: usize,
}

impl Iterator for Dashes {
    type Item = (Vec2, Vec2);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        // Offsets from the origin avoid drift from repeated addition
        let from = self.origin + self.direction * (self.stride * self.index as f32);
        let to = from + self.direction * self.dash_length;
        self.index += 1;
        Some((from, to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Dashes {}
