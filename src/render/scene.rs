//! Scene description for Pong and Breakout

use glam::Vec2;

use super::{BLACK, Color, DrawCommand, TextMetrics, WHITE};
use crate::settings::Layout;
use crate::sim::{DashedLine, GameState, Playfield, Spacing};

const BACKGROUND: Color = BLACK;
const FOREGROUND: Color = WHITE;

/// Line commands for each dash of `line`
fn dashed(out: &mut Vec<DrawCommand>, line: DashedLine, thickness: f32, color: Color) {
    out.extend(line.dashes().map(|(start, end)| DrawCommand::Line {
        start,
        end,
        thickness,
        color,
    }));
}

fn solid(out: &mut Vec<DrawCommand>, start: Vec2, end: Vec2, thickness: f32) {
    out.push(DrawCommand::Line {
        start,
        end,
        thickness,
        color: FOREGROUND,
    });
}

/// Corners of the margin box: (nw, ne, sw, se)
fn corners(field: &Playfield) -> (Vec2, Vec2, Vec2, Vec2) {
    let m = field.margin;
    let s = field.screen_size;
    (
        Vec2::new(m, m),
        Vec2::new(s.x - m, m),
        Vec2::new(m, s.y - m),
        Vec2::new(s.x - m, s.y - m),
    )
}

/// Solid top/bottom, dashed goal lines, dashed centre line
fn pong_net(out: &mut Vec<DrawCommand>, field: &Playfield) {
    let thick = field.border_thickness;
    let (nw, ne, sw, se) = corners(field);
    // Lines are centred on their path; shift them so the outer edge sits on the margin
    let h = Vec2::new(0.0, thick / 2.0);
    let v = Vec2::new(thick / 2.0, 0.0);
    let dash = 3.0 * thick;

    solid(out, nw + h, ne + h, thick);
    dashed(out, DashedLine::new(ne - v, se - v, dash, Spacing::Auto), thick, FOREGROUND);
    solid(out, se - h, sw - h, thick);
    dashed(out, DashedLine::new(sw + v, nw + v, dash, Spacing::Auto), thick, FOREGROUND);

    let mid = field.screen_size.x / 2.0;
    let centre = DashedLine::new(
        Vec2::new(mid, field.margin),
        Vec2::new(mid, field.screen_size.y - field.margin),
        2.0 * thick,
        Spacing::Auto,
    );
    dashed(out, centre, thick / 2.0, FOREGROUND);
}

/// Solid top and side walls; the bottom stays open
fn breakout_walls(out: &mut Vec<DrawCommand>, field: &Playfield) {
    let thick = field.border_thickness;
    let (nw, ne, sw, se) = corners(field);
    let h = Vec2::new(0.0, thick / 2.0);
    let v = Vec2::new(thick / 2.0, 0.0);

    solid(out, nw + h, ne + h, thick);
    solid(out, sw + v, nw + v, thick);
    solid(out, ne - v, se - v, thick);
}

fn text(
    out: &mut Vec<DrawCommand>,
    metrics: &dyn TextMetrics,
    state: &GameState,
    label: String,
    place: impl FnOnce(Vec2) -> Vec2,
) {
    let font_size = state.settings.font_size;
    let spacing = state.settings.font_spacing;
    let size = metrics.measure(&label, font_size, spacing);
    out.push(DrawCommand::Text {
        text: label,
        pos: place(size),
        font_size,
        spacing,
        size,
        color: FOREGROUND,
    });
}

/// Message shown while the ball waits for a serve
pub fn serve_prompt(layout: Layout) -> &'static str {
    match layout {
        Layout::DualPaddle => "ball DEAD: press space to start",
        Layout::SinglePaddle => "ball DEAD: click to start",
    }
}

/// Draw commands for the current frame, back to front
pub fn describe(state: &GameState, metrics: &dyn TextMetrics) -> Vec<DrawCommand> {
    let field = &state.playfield;
    let screen = field.screen_size;
    let text_y = field.text_margin;
    let mut out = vec![DrawCommand::Clear { color: BACKGROUND }];

    match state.settings.layout {
        Layout::DualPaddle => pong_net(&mut out, field),
        Layout::SinglePaddle => breakout_walls(&mut out, field),
    }

    for paddle in &state.paddles {
        out.push(DrawCommand::Rect {
            pos: paddle.pos,
            size: paddle.size,
            color: FOREGROUND,
        });
    }

    out.push(DrawCommand::Circle {
        center: state.ball.pos,
        radius: state.ball.radius,
        color: FOREGROUND,
    });

    if !state.ball.alive {
        let prompt = serve_prompt(state.settings.layout).to_string();
        text(&mut out, metrics, state, prompt, |size| {
            Vec2::new(screen.x / 2.0 - size.x / 2.0, text_y)
        });
    }

    if state.settings.layout == Layout::DualPaddle {
        let margin = field.margin;
        text(&mut out, metrics, state, state.score.left.to_string(), |_| {
            Vec2::new(margin, text_y)
        });
        text(&mut out, metrics, state, state.score.right.to_string(), |size| {
            Vec2::new(screen.x - margin - size.x, text_y)
        });
    }

    out
}
