//! Headless autoplay host
//!
//! Plays the game the way a person at the screen would: it only looks at
//! the draw commands it is handed, then holds keys or moves the pointer for
//! the next frame. Used by the native runner and for soak tests.

use glam::Vec2;

use crate::platform::{Action, FrameClock, InputSource, Surface};
use crate::render::DrawCommand;
use crate::render::scene::serve_prompt;
use crate::settings::Layout;

/// Paddle centre within this many pixels of the ball counts as lined up
const DEAD_ZONE: f32 = 8.0;

/// Bot-driven host with a fixed frame time
#[derive(Debug, Clone)]
pub struct AutoplayHost {
    layout: Layout,
    dt: f32,
    /// How fast the bot can sweep the pointer (pixels per second)
    pub pointer_speed: f32,
    /// Frames to linger on the serve prompt
    pub serve_delay: u32,
    /// Close after this many rounds have ended
    pub max_rounds: Option<u32>,

    // What the last frame showed
    ball: Option<Vec2>,
    paddles: Vec<(Vec2, Vec2)>,
    prompt_visible: bool,

    // Input for the coming frame
    held: [bool; 4],
    serve: bool,
    pointer: Option<Vec2>,
    waiting_frames: u32,

    rounds_finished: u32,
    frames_presented: u64,
}

impl AutoplayHost {
    pub fn new(layout: Layout, dt: f32) -> Self {
        Self {
            layout,
            dt,
            pointer_speed: 350.0,
            serve_delay: 30,
            max_rounds: None,
            ball: None,
            paddles: Vec::new(),
            prompt_visible: false,
            held: [false; 4],
            serve: false,
            pointer: None,
            waiting_frames: 0,
            rounds_finished: 0,
            frames_presented: 0,
        }
    }

    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn track_vertical(&mut self, ball: Vec2) {
        let mut paddles = self.paddles.clone();
        paddles.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));
        for (i, (pos, size)) in paddles.iter().take(2).enumerate() {
            let center = pos.y + size.y / 2.0;
            self.held[2 * i] = ball.y < center - DEAD_ZONE;
            self.held[2 * i + 1] = ball.y > center + DEAD_ZONE;
        }
    }

    fn track_pointer(&mut self, ball: Vec2) {
        let Some(&(pos, size)) = self.paddles.first() else {
            return;
        };
        let current = self.pointer.unwrap_or(pos + size / 2.0);
        let step = self.pointer_speed * self.dt;
        let dx = (ball.x - current.x).clamp(-step, step);
        self.pointer = Some(Vec2::new(current.x + dx, pos.y));
    }
}

impl InputSource for AutoplayHost {
    fn poll(&mut self) {
        self.held = [false; 4];
        self.serve = false;

        if self.prompt_visible {
            self.waiting_frames += 1;
            self.serve = self.waiting_frames == self.serve_delay.max(1);
        } else {
            self.waiting_frames = 0;
        }

        if let Some(ball) = self.ball {
            match self.layout {
                Layout::DualPaddle => self.track_vertical(ball),
                Layout::SinglePaddle => self.track_pointer(ball),
            }
        }
    }

    fn is_down(&self, action: Action) -> bool {
        match action {
            Action::Player1Up => self.held[0],
            Action::Player1Down => self.held[1],
            Action::Player2Up => self.held[2],
            Action::Player2Down => self.held[3],
            Action::Serve => self.serve,
        }
    }

    fn is_pressed(&self, action: Action) -> bool {
        action == Action::Serve && self.serve
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.pointer
    }

    fn pointer_down(&self) -> bool {
        self.serve
    }

    fn pointer_pressed(&self) -> bool {
        self.serve
    }
}

impl FrameClock for AutoplayHost {
    fn frame_time(&mut self) -> f32 {
        self.dt
    }
}

impl Surface for AutoplayHost {
    fn should_close(&self) -> bool {
        self.max_rounds
            .is_some_and(|max| self.rounds_finished >= max)
    }

    fn present(&mut self, commands: &[DrawCommand]) {
        self.frames_presented += 1;
        let prompt = serve_prompt(self.layout);
        let was_waiting = self.prompt_visible;

        self.ball = None;
        self.paddles.clear();
        self.prompt_visible = false;
        for command in commands {
            match command {
                DrawCommand::Circle { center, .. } => self.ball = Some(*center),
                DrawCommand::Rect { pos, size, .. } => self.paddles.push((*pos, *size)),
                DrawCommand::Text { text, .. } if text == prompt => self.prompt_visible = true,
                _ => {}
            }
        }

        // Prompt coming back after the opening frames means a round ended
        if self.frames_presented > 1 && !was_waiting && self.prompt_visible {
            self.rounds_finished += 1;
            log::debug!("Autoplay saw round {} end", self.rounds_finished);
        }
    }
}
