//! Platform abstraction layer
//!
//! The simulation core only sees these traits:
//! - `InputSource`: key and pointer state
//! - `FrameClock`: elapsed time per frame
//! - `Surface`: replays draw commands, reports close requests
//!
//! `FrameLoop` drives one frame at a time: poll, tick, describe, present.

use glam::Vec2;
use serde::Serialize;

use crate::render::{DrawCommand, TextMetrics, describe};
use crate::settings::{Layout, PaddleControl, Settings};
use crate::sim::{GameState, RoundEvent, Score, TickInput, tick};

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Player1Up,
    Player1Down,
    Player2Up,
    Player2Down,
    Serve,
}

/// Keyboard/pointer state for the current frame
pub trait InputSource {
    /// Refresh state at the top of a frame
    fn poll(&mut self) {}
    /// Held this frame
    fn is_down(&self, action: Action) -> bool;
    /// Went down this frame
    fn is_pressed(&self, action: Action) -> bool;
    fn pointer_position(&self) -> Option<Vec2>;
    fn pointer_down(&self) -> bool;
    fn pointer_pressed(&self) -> bool;
}

/// Per-frame elapsed time
pub trait FrameClock {
    /// Seconds since the previous frame
    fn frame_time(&mut self) -> f32;
}

/// Where frames end up
pub trait Surface {
    /// Host asked the loop to stop (window closed, escape pressed, ...)
    fn should_close(&self) -> bool;
    /// Clear, draw and present one frame
    fn present(&mut self, commands: &[DrawCommand]);
}

fn axis(input: &dyn InputSource, negative: Action, positive: Action) -> f32 {
    let mut value = 0.0;
    if input.is_down(negative) {
        value -= 1.0;
    }
    if input.is_down(positive) {
        value += 1.0;
    }
    value
}

/// Translate raw input into a simulation intent for the configured rules
pub fn intent_from_input(input: &dyn InputSource, settings: &Settings) -> TickInput {
    let pointer = match settings.paddle_control {
        PaddleControl::Pointer => input.pointer_position(),
        PaddleControl::Keys => None,
    };
    let serve = match settings.layout {
        Layout::DualPaddle => input.is_pressed(Action::Serve),
        Layout::SinglePaddle => input.pointer_pressed() || input.is_pressed(Action::Serve),
    };
    TickInput {
        intents: [
            axis(input, Action::Player1Up, Action::Player1Down),
            axis(input, Action::Player2Up, Action::Player2Down),
        ],
        pointer,
        serve,
    }
}

/// Totals for a finished session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub serves: u32,
    pub paddle_hits: u32,
    pub goals: u32,
    pub balls_lost: u32,
    pub resets: u32,
    pub score: Score,
}

impl SessionStats {
    fn record(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::Served { .. } => self.serves += 1,
            RoundEvent::PaddleHit { .. } => self.paddle_hits += 1,
            RoundEvent::Goal { .. } => self.goals += 1,
            RoundEvent::BallLost => self.balls_lost += 1,
            RoundEvent::Reset => self.resets += 1,
        }
    }
}

/// Owns the game state and runs it against a host
pub struct FrameLoop<M: TextMetrics> {
    pub state: GameState,
    metrics: M,
    stats: SessionStats,
}

impl<M: TextMetrics> FrameLoop<M> {
    pub fn new(state: GameState, metrics: M) -> Self {
        Self {
            state,
            metrics,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// One full frame: poll, simulate, describe, present
    pub fn step<H>(&mut self, host: &mut H) -> Vec<RoundEvent>
    where
        H: InputSource + FrameClock + Surface,
    {
        host.poll();
        let dt = host.frame_time();
        let input = intent_from_input(&*host, &self.state.settings);
        let events = tick(&mut self.state, &input, dt);
        for event in &events {
            self.stats.record(event);
        }
        self.stats.frames += 1;
        self.stats.score = self.state.score;

        let commands = describe(&self.state, &self.metrics);
        host.present(&commands);
        events
    }

    /// Run until the host asks to close or `max_frames` have been played
    pub fn run<H>(&mut self, host: &mut H, max_frames: Option<u64>) -> SessionStats
    where
        H: InputSource + FrameClock + Surface,
    {
        log::info!(
            "Starting {} session (seed {})",
            self.state.settings.layout.as_str(),
            self.state.seed
        );
        loop {
            if host.should_close() {
                log::info!("Host requested close after {} frames", self.stats.frames);
                break;
            }
            if max_frames.is_some_and(|max| self.stats.frames >= max) {
                break;
            }
            self.step(host);
        }
        self.stats.clone()
    }
}
