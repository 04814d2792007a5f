//! Frame simulation step
//!
//! Advances the game by one variable-length frame: paddles, serve/reset,
//! ball motion, collisions, then goal/death detection.

use glam::Vec2;

use super::collision::{self, Wall};
use super::round::{self, RoundEvent};
use super::state::{GameState, RoundPhase};
use crate::settings::{GoalRule, Layout, PaddleControl};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Per-paddle movement intent in [-1, 1]; negative is up (Pong) or left (Breakout)
    pub intents: [f32; 2],
    /// Pointer position, if the host has one
    pub pointer: Option<Vec2>,
    /// Serve action this frame (edge-triggered). Pressing it mid-rally in
    /// Pong resets the ball.
    pub serve: bool,
}

/// Treat NaN, infinite and negative frame times as an empty frame
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Walls that reflect the ball for the current rules
fn bouncing_walls(layout: Layout, goal_rule: GoalRule) -> &'static [Wall] {
    match (layout, goal_rule) {
        (Layout::DualPaddle, GoalRule::Kill) => &[Wall::Top, Wall::Bottom],
        (Layout::SinglePaddle, GoalRule::Kill) => &[Wall::Top, Wall::Left, Wall::Right],
        (_, GoalRule::Bounce) => &Wall::ALL,
    }
}

fn move_paddles(state: &mut GameState, input: &TickInput, dt: f32) {
    let speed = state.settings.paddle_speed;
    let player_one = state.settings.paddle_control;
    let field = state.playfield;

    for (i, paddle) in state.paddles.iter_mut().enumerate() {
        let control = if i == 0 { player_one } else { PaddleControl::Keys };
        match (control, input.pointer) {
            (PaddleControl::Pointer, Some(pointer)) => paddle.follow(pointer, &field),
            (PaddleControl::Pointer, None) => paddle.displace(0.0, &field),
            (PaddleControl::Keys, _) => {
                let intent = input.intents.get(i).copied().unwrap_or(0.0);
                let intent = if intent.is_finite() { intent.clamp(-1.0, 1.0) } else { 0.0 };
                paddle.displace(intent * speed * dt, &field);
            }
        }
    }
}

fn handle_serve(state: &mut GameState, input: &TickInput, events: &mut Vec<RoundEvent>) {
    if !input.serve {
        return;
    }
    match state.phase() {
        RoundPhase::WaitingToServe => events.extend(round::serve(state)),
        RoundPhase::InPlay => {
            if state.settings.layout == Layout::DualPaddle {
                events.push(round::reset(state));
            }
        }
    }
}

fn resolve_paddle_hits(state: &mut GameState, dt: f32, events: &mut Vec<RoundEvent>) {
    let now = state.time;
    let debounce = state.settings.collision_debounce;
    let deflection = state.settings.deflection;
    let ball = &mut state.ball;

    for (i, paddle) in state.paddles.iter().enumerate() {
        if !collision::ball_paddle_collision(ball.pos, ball.radius, paddle)
            || !collision::approaching_paddle(ball.pos, ball.direction, paddle)
        {
            continue;
        }
        if !ball.can_collide(now, debounce) {
            continue;
        }
        ball.direction = collision::paddle_rebound(ball.direction, paddle, dt, deflection);
        ball.has_been_hit = true;
        ball.last_collision = Some(now);
        log::debug!(
            "Paddle {} hit, new ball direction ({:+.3} {:+.3})",
            i,
            ball.direction.x,
            ball.direction.y
        );
        events.push(RoundEvent::PaddleHit { paddle: i });
    }
}

fn resolve_goal(state: &mut GameState, events: &mut Vec<RoundEvent>) {
    if state.settings.goal_rule == GoalRule::Bounce {
        return;
    }
    let (pos, radius) = (state.ball.pos, state.ball.radius);
    match state.settings.layout {
        Layout::DualPaddle => {
            if let Some(scorer) = collision::goal_scored(pos, radius, &state.playfield) {
                events.push(round::goal(state, scorer));
            }
        }
        Layout::SinglePaddle => {
            if collision::ball_lost(pos, radius, &state.playfield) {
                events.push(round::ball_lost(state));
            }
        }
    }
}

/// Advance the game state by `dt` seconds. Returns the round events of this frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<RoundEvent> {
    let dt = sanitize_dt(dt);
    let mut events = Vec::new();

    state.frame += 1;
    state.time += f64::from(dt);

    move_paddles(state, input, dt);
    handle_serve(state, input, &mut events);

    if !state.ball.alive {
        state.ball.pos = state.anchor();
        return events;
    }

    let velocity = state.ball.velocity(&state.settings);
    state.ball.pos += velocity * dt;

    resolve_paddle_hits(state, dt, &mut events);

    let walls = bouncing_walls(state.settings.layout, state.settings.goal_rule);
    let ball = &mut state.ball;
    collision::reflect_off_walls(ball.pos, ball.radius, &mut ball.direction, walls, &state.playfield);

    resolve_goal(state, &mut events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Score, Side};
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn serve_input() -> TickInput {
        TickInput {
            serve: true,
            ..Default::default()
        }
    }

    /// A served Pong game with the ball at `pos` heading along `direction`
    fn pong_in_play(pos: Vec2, direction: Vec2) -> GameState {
        let mut state = GameState::new(Settings::pong(), 12345);
        tick(&mut state, &serve_input(), 0.0);
        state.ball.pos = pos;
        state.ball.direction = direction;
        state
    }

    #[test]
    fn test_tick_serve_to_playing() {
        let mut state = GameState::new(Settings::pong(), 12345);
        assert_eq!(state.phase(), RoundPhase::WaitingToServe);

        // Tick without serve - should stay waiting
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase(), RoundPhase::WaitingToServe);

        let events = tick(&mut state, &serve_input(), DT);
        assert!(matches!(events.as_slice(), [RoundEvent::Served { .. }]));
        assert_eq!(state.phase(), RoundPhase::InPlay);
        assert!((state.ball.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_serve_again_resets_pong() {
        let mut state = GameState::new(Settings::pong(), 1);
        tick(&mut state, &serve_input(), DT);
        tick(&mut state, &TickInput::default(), DT);
        let events = tick(&mut state, &serve_input(), DT);
        assert_eq!(events, vec![RoundEvent::Reset]);
        assert_eq!(state.phase(), RoundPhase::WaitingToServe);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ball.pos, state.playfield.center());
    }

    #[test]
    fn test_serve_ignored_mid_rally_breakout() {
        let mut state = GameState::new(Settings::breakout(), 1);
        tick(&mut state, &serve_input(), DT);
        let events = tick(&mut state, &serve_input(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase(), RoundPhase::InPlay);
    }

    #[test]
    fn test_straight_flight_distance() {
        // 800x450, margin 50, direction (1, 0), initial speed 200
        let start = Vec2::new(400.0, 225.0);
        let mut state = pong_in_play(start, Vec2::X);
        for _ in 0..100 {
            let events = tick(&mut state, &TickInput::default(), 0.01);
            assert!(events.is_empty());
        }
        assert!((state.ball.pos.x - (start.x + 200.0)).abs() < 1e-2);
        assert_eq!(state.ball.pos.y, start.y);
    }

    #[test]
    fn test_dead_ball_pinned_to_anchor() {
        let mut state = GameState::new(Settings::pong(), 5);
        for i in 0..30 {
            let dt = 0.005 * (i % 7) as f32 + 0.001;
            tick(&mut state, &TickInput::default(), dt);
            assert_eq!(state.ball.pos, state.playfield.center());
        }

        // Breakout: the anchor rides on the paddle
        let mut state = GameState::new(Settings::breakout(), 5);
        for x in [100.0, 250.0, 600.0, 900.0, 420.0, 0.0, 333.0, 512.0, 64.0, 700.0] {
            let input = TickInput {
                pointer: Some(Vec2::new(x, 300.0)),
                ..Default::default()
            };
            tick(&mut state, &input, DT);
            assert_eq!(state.ball.pos, state.anchor());
            let paddle = &state.paddles[0];
            assert_eq!(state.ball.pos.x, paddle.center().x);
            assert_eq!(state.ball.pos.y, paddle.pos.y - state.ball.radius);
        }
    }

    #[test]
    fn test_left_goal_scores_right() {
        // Above the paddle, heading for the left boundary
        let mut state = pong_in_play(Vec2::new(75.0, 100.0), Vec2::NEG_X);
        let events = tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(events, vec![RoundEvent::Goal { scorer: Side::Right }]);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.phase(), RoundPhase::WaitingToServe);
        assert!(!state.ball.has_been_hit);
        assert_eq!(state.ball.last_collision, None);
    }

    #[test]
    fn test_right_goal_scores_left() {
        let mut state = pong_in_play(Vec2::new(725.0, 400.0 - 40.0), Vec2::X);
        let events = tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(events, vec![RoundEvent::Goal { scorer: Side::Left }]);
        assert_eq!(state.score.left, 1);
    }

    #[test]
    fn test_bounce_rule_has_no_goals() {
        let mut settings = Settings::pong();
        settings.goal_rule = GoalRule::Bounce;
        let mut state = GameState::new(settings, 9);
        tick(&mut state, &serve_input(), 0.0);
        state.ball.pos = Vec2::new(75.0, 100.0);
        state.ball.direction = Vec2::NEG_X;

        let events = tick(&mut state, &TickInput::default(), 0.05);
        assert!(events.is_empty());
        assert_eq!(state.phase(), RoundPhase::InPlay);
        assert_eq!(state.ball.direction, Vec2::X);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = pong_in_play(Vec2::new(400.0, 75.0), Vec2::new(0.6, -0.8));
        tick(&mut state, &TickInput::default(), 0.05);
        assert!(state.ball.direction.y > 0.0);
        assert_eq!(state.phase(), RoundPhase::InPlay);
    }

    #[test]
    fn test_paddle_hit_boosts_and_reflects() {
        let mut state = pong_in_play(Vec2::new(90.0, 225.0), Vec2::NEG_X);
        let events = tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(events, vec![RoundEvent::PaddleHit { paddle: 0 }]);
        assert!(state.ball.has_been_hit);
        assert_eq!(state.ball.last_collision, Some(state.time));
        assert!(state.ball.direction.x > 0.0);
        assert_eq!(state.ball.speed(&state.settings), state.settings.ball_boosted_speed);
    }

    #[test]
    fn test_collision_debounce_single_direction_change() {
        let mut state = pong_in_play(Vec2::new(90.0, 225.0), Vec2::NEG_X);
        let mut changes = 0;
        for _ in 0..3 {
            // Every frame the ball is pushed back into the paddle face
            state.ball.direction = Vec2::NEG_X;
            tick(&mut state, &TickInput::default(), 0.005);
            assert!(collision::ball_paddle_collision(
                state.ball.pos,
                state.ball.radius,
                &state.paddles[0]
            ));
            if state.ball.direction != Vec2::NEG_X {
                changes += 1;
            }
        }
        assert_eq!(changes, 1);
        assert_eq!(state.ball.last_collision, Some(f64::from(0.005f32)));
    }

    #[test]
    fn test_without_debounce_every_contact_counts() {
        let mut settings = Settings::pong();
        settings.collision_debounce = None;
        let mut state = GameState::new(settings, 12345);
        tick(&mut state, &serve_input(), 0.0);
        state.ball.pos = Vec2::new(90.0, 225.0);

        let mut changes = 0;
        for _ in 0..3 {
            state.ball.direction = Vec2::NEG_X;
            tick(&mut state, &TickInput::default(), 0.005);
            if state.ball.direction != Vec2::NEG_X {
                changes += 1;
            }
        }
        assert_eq!(changes, 3);
    }

    #[test]
    fn test_ball_leaving_paddle_is_not_hit() {
        // Overlapping the paddle but already heading away
        let mut state = pong_in_play(Vec2::new(88.0, 225.0), Vec2::X);
        let events = tick(&mut state, &TickInput::default(), 0.005);
        assert!(events.is_empty());
        assert_eq!(state.ball.direction, Vec2::X);
    }

    #[test]
    fn test_moving_paddle_steers_rebound() {
        let mut state = pong_in_play(Vec2::new(90.0, 225.0), Vec2::NEG_X);
        let input = TickInput {
            intents: [1.0, 0.0],
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.ball.direction.x > 0.0);
        assert!(state.ball.direction.y > 0.0);
    }

    #[test]
    fn test_breakout_bottom_kills_without_score() {
        let mut state = GameState::new(Settings::breakout(), 77);
        tick(&mut state, &serve_input(), 0.0);
        // Far left of the centred paddle, just past the paddle row
        state.ball.pos = Vec2::new(100.0, 405.0);
        state.ball.direction = Vec2::Y;

        let events = tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(events, vec![RoundEvent::BallLost]);
        assert_eq!(state.phase(), RoundPhase::WaitingToServe);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ball.pos, state.anchor());
    }

    #[test]
    fn test_breakout_paddle_returns_ball() {
        let mut state = GameState::new(Settings::breakout(), 77);
        tick(&mut state, &serve_input(), 0.0);
        state.ball.pos = Vec2::new(400.0, 368.0);
        state.ball.direction = Vec2::Y;

        let events = tick(&mut state, &TickInput::default(), 0.02);
        assert_eq!(events, vec![RoundEvent::PaddleHit { paddle: 0 }]);
        assert!(state.ball.direction.y < 0.0);
    }

    #[test]
    fn test_breakout_long_frame_into_paddle_is_a_return() {
        let mut state = GameState::new(Settings::breakout(), 77);
        tick(&mut state, &serve_input(), 0.0);
        state.ball.pos = Vec2::new(400.0, 369.0);
        state.ball.direction = Vec2::Y;

        // One 60 ms frame carries the ball centre past the paddle's top face
        let events = tick(&mut state, &TickInput::default(), 0.06);
        assert_eq!(events, vec![RoundEvent::PaddleHit { paddle: 0 }]);
        assert!(state.ball.alive);
        assert!(state.ball.direction.y < 0.0);

        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::default(), DT).is_empty());
        }
        assert_eq!(state.phase(), RoundPhase::InPlay);
    }

    #[test]
    fn test_clock_keeps_pace_in_long_sessions() {
        let mut state = GameState::new(Settings::pong(), 1);
        // About a week of play
        state.time = 600_000.0;
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!((state.time - 600_010.0).abs() < 1e-3);
    }

    #[test]
    fn test_debounce_expires_in_long_sessions() {
        let mut state = pong_in_play(Vec2::new(90.0, 225.0), Vec2::NEG_X);
        state.time = 600_000.0;
        state.ball.last_collision = Some(599_999.0);

        let events = tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(events, vec![RoundEvent::PaddleHit { paddle: 0 }]);
        assert_eq!(state.ball.last_collision, Some(state.time));
        assert!(state.time > 600_000.0);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(Settings::pong(), 99999);
            let mut log = Vec::new();
            for i in 0..600 {
                let input = TickInput {
                    intents: [((i / 40) % 3) as f32 - 1.0, ((i / 25) % 3) as f32 - 1.0],
                    serve: i % 180 == 0,
                    ..Default::default()
                };
                log.extend(tick(&mut state, &input, DT));
            }
            (state.ball.pos, state.score, log)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_invalid_dt_is_empty_frame() {
        let mut state = pong_in_play(Vec2::new(400.0, 225.0), Vec2::X);
        for dt in [f32::NAN, f32::INFINITY, -1.0] {
            tick(&mut state, &TickInput::default(), dt);
            assert_eq!(state.ball.pos, Vec2::new(400.0, 225.0));
            assert_eq!(state.time, 0.0);
        }
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            -3.0f32..3.0,
            -3.0f32..3.0,
            proptest::option::of((-500.0f32..1300.0, -500.0f32..1000.0)),
            proptest::bool::weighted(0.05),
        )
            .prop_map(|(a, b, pointer, serve)| TickInput {
                intents: [a, b],
                pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
                serve,
            })
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_bounds(
            breakout in any::<bool>(),
            inputs in proptest::collection::vec((arb_input(), 0.0f32..0.2), 1..200),
        ) {
            let settings = if breakout { Settings::breakout() } else { Settings::pong() };
            let mut state = GameState::new(settings, 4);
            for (input, dt) in &inputs {
                tick(&mut state, input, *dt);
                for paddle in &state.paddles {
                    let (min, max) = state.playfield.paddle_bounds(paddle.axis, paddle.size, paddle.pos);
                    prop_assert!(paddle.pos.x >= min.x && paddle.pos.x <= max.x);
                    prop_assert!(paddle.pos.y >= min.y && paddle.pos.y <= max.y);
                }
            }
        }

        #[test]
        fn prop_live_ball_direction_is_unit(
            seed in any::<u64>(),
            breakout in any::<bool>(),
            inputs in proptest::collection::vec((arb_input(), 0.001f32..0.05), 1..400),
        ) {
            let settings = if breakout { Settings::breakout() } else { Settings::pong() };
            let mut state = GameState::new(settings, seed);
            tick(&mut state, &serve_input(), 0.0);
            for (input, dt) in &inputs {
                let events = tick(&mut state, input, *dt);
                let goals = events
                    .iter()
                    .filter(|e| matches!(e, RoundEvent::Goal { .. } | RoundEvent::BallLost))
                    .count();
                prop_assert!(goals <= 1);
                if state.ball.alive {
                    prop_assert!((state.ball.direction.length() - 1.0).abs() < 1e-4);
                }
            }
        }

        #[test]
        fn prop_score_only_grows(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((arb_input(), 0.001f32..0.05), 1..400),
        ) {
            let mut state = GameState::new(Settings::pong(), seed);
            let mut previous = state.score;
            for (input, dt) in &inputs {
                let events = tick(&mut state, input, *dt);
                let scored = events.iter().filter(|e| matches!(e, RoundEvent::Goal { .. })).count() as u32;
                prop_assert!(state.score.left >= previous.left);
                prop_assert!(state.score.right >= previous.right);
                prop_assert_eq!(
                    state.score.left + state.score.right,
                    previous.left + previous.right + scored
                );
                previous = state.score;
            }
        }
    }
}
