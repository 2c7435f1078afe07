//! Game entities: ball, paddle, and bricks
//!
//! Coordinate system is canvas-style: origin at the top-left of the
//! playfield, +y pointing down. Ball position is its center; paddle and
//! brick positions are their top-left corners.

use glam::Vec2;
use serde::Serialize;

use super::easing;
use super::problem::Problem;
use crate::consts::*;

/// Canonical spawn direction (slightly off vertical so the opening
/// trajectory is never a straight up-down loop).
const SPAWN_DIR: Vec2 = Vec2::new(0.45, -1.0);

/// The ball. Speed is positive and non-decreasing within a level: each
/// paddle bounce scales it by [`PADDLE_BOOST`] until the level resets.
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Current speed scalar; `vel.length()` is kept equal to this
    pub speed: f32,
    pub active: bool,
}

impl Ball {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: SPAWN_DIR.normalize() * BALL_BASE_SPEED,
            radius: BALL_RADIUS,
            speed: BALL_BASE_SPEED,
            active: true,
        }
    }

    /// Advance position by velocity.
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.pos += self.vel * dt;
        }
    }

    /// Wall bounce: negate the horizontal velocity axis.
    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    /// Wall bounce: negate the vertical velocity axis.
    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Set outgoing velocity from a paddle hit.
    ///
    /// `hit_offset` is the horizontal offset from paddle center, already
    /// scaled into [-MAX_HIT_OFFSET, MAX_HIT_OFFSET]. The offset is mixed
    /// with a fixed upward bias, so edge hits leave at steeper angles and
    /// dead-center hits go straight up.
    pub fn bounce_off_paddle(&mut self, hit_offset: f32) {
        let offset = hit_offset.clamp(-MAX_HIT_OFFSET, MAX_HIT_OFFSET);
        let dir = Vec2::new(offset, -1.0).normalize();
        self.vel = dir * self.speed;
    }

    /// Scale speed by `factor`, capped at [`BALL_MAX_SPEED`].
    pub fn increase_speed(&mut self, factor: f32) {
        self.speed = (self.speed * factor).min(BALL_MAX_SPEED);
        let dir = self.vel.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.vel = dir * self.speed;
        }
    }

    /// Restore canonical spawn position, direction, and base speed.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.vel = SPAWN_DIR.normalize() * BALL_BASE_SPEED;
        self.speed = BALL_BASE_SPEED;
        self.active = true;
    }
}

/// The player paddle. Input writes a target x; `update` eases the paddle
/// toward it with exponential smoothing, so input frequency is decoupled
/// from simulation frequency.
#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    target_x: f32,
    field_width: f32,
}

impl Paddle {
    pub fn new(field_width: f32, field_height: f32) -> Self {
        let width = PADDLE_WIDTH;
        let x = (field_width - width) / 2.0;
        let y = field_height - PADDLE_BOTTOM_MARGIN;
        Self {
            pos: Vec2::new(x, y),
            width,
            height: PADDLE_HEIGHT,
            target_x: x,
            field_width,
        }
    }

    /// Set the target so the paddle centers on `pointer_x`, clamped so it
    /// never exits the playfield.
    pub fn set_target_x(&mut self, pointer_x: f32) {
        let x = pointer_x - self.width / 2.0;
        self.target_x = x.clamp(0.0, self.field_width - self.width);
    }

    /// Ease current position toward the target. The final clamp holds the
    /// containment invariant even if the target was set before a resize.
    pub fn update(&mut self, dt: f32) {
        let t = easing::smoothing_factor(PADDLE_SMOOTHING, dt);
        self.pos.x = easing::lerp(self.pos.x, self.target_x, t);
        self.pos.x = self.pos.x.clamp(0.0, self.field_width - self.width);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// Brick lifecycle. A destroyed brick plays a scale-up + fade animation
/// before leaving the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BrickPhase {
    Alive,
    /// Destroy animation in progress, `progress` in [0, 1]
    Destroying { progress: f32 },
    Inactive,
}

/// A brick carrying a math-problem payload. Requires `max_hits` hits to
/// destroy; point value and color derive from the problem difficulty.
#[derive(Debug, Clone, Serialize)]
pub struct Brick {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub problem: Problem,
    pub hits_left: u8,
    pub max_hits: u8,
    pub phase: BrickPhase,
}

impl Brick {
    pub fn new(pos: Vec2, width: f32, height: f32, problem: Problem, max_hits: u8) -> Self {
        debug_assert!(max_hits >= 1);
        Self {
            pos,
            width,
            height,
            problem,
            hits_left: max_hits,
            max_hits,
            phase: BrickPhase::Alive,
        }
    }

    /// Register one hit. Returns true exactly when this hit destroys the
    /// brick (starts the destroy animation). No-op once not alive.
    pub fn hit(&mut self) -> bool {
        if self.phase != BrickPhase::Alive {
            return false;
        }
        self.hits_left = self.hits_left.saturating_sub(1);
        if self.hits_left == 0 {
            self.phase = BrickPhase::Destroying { progress: 0.0 };
            return true;
        }
        false
    }

    /// Advance the destroy animation; flips to `Inactive` at the end.
    pub fn update(&mut self, dt: f32) {
        if let BrickPhase::Destroying { progress } = self.phase {
            let next = progress + dt / BRICK_DESTROY_SECS;
            self.phase = if next >= 1.0 {
                BrickPhase::Inactive
            } else {
                BrickPhase::Destroying { progress: next }
            };
        }
    }

    /// Alive bricks are the only ones the ball collides with.
    pub fn collidable(&self) -> bool {
        self.phase == BrickPhase::Alive
    }

    /// Still part of the level (alive or animating out).
    pub fn is_active(&self) -> bool {
        self.phase != BrickPhase::Inactive
    }

    /// Points awarded when destroyed.
    pub fn points(&self) -> u32 {
        self.problem.difficulty as u32 * POINTS_PER_DIFFICULTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_problem(difficulty: u8) -> Problem {
        Problem {
            question: "2 + 2".into(),
            answer: 4,
            difficulty,
        }
    }

    #[test]
    fn test_wall_bounce_is_pure_sign_flip() {
        let mut ball = Ball::new(100.0, 100.0);
        ball.vel = Vec2::new(120.0, -80.0);
        ball.bounce_x();
        assert_eq!(ball.vel, Vec2::new(-120.0, -80.0));
        ball.bounce_y();
        assert_eq!(ball.vel, Vec2::new(-120.0, 80.0));
    }

    #[test]
    fn test_paddle_bounce_always_goes_up() {
        for offset in [-0.8, -0.3, 0.0, 0.5, 0.8] {
            let mut ball = Ball::new(100.0, 100.0);
            ball.vel = Vec2::new(10.0, 250.0);
            ball.bounce_off_paddle(offset);
            assert!(ball.vel.y < 0.0, "offset {offset} must send the ball up");
            assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
        }
    }

    #[test]
    fn test_paddle_bounce_center_is_vertical() {
        let mut ball = Ball::new(100.0, 100.0);
        ball.bounce_off_paddle(0.0);
        assert!(ball.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_speed_increase_is_monotonic_and_capped() {
        let mut ball = Ball::new(0.0, 0.0);
        let mut last = ball.speed;
        for _ in 0..200 {
            ball.increase_speed(PADDLE_BOOST);
            assert!(ball.speed >= last);
            last = ball.speed;
        }
        assert!(ball.speed <= BALL_MAX_SPEED);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-2);
    }

    #[test]
    fn test_ball_reset_restores_base_speed() {
        let mut ball = Ball::new(0.0, 0.0);
        ball.increase_speed(2.0);
        ball.reset(50.0, 60.0);
        assert_eq!(ball.speed, BALL_BASE_SPEED);
        assert_eq!(ball.pos, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_brick_requires_exactly_max_hits() {
        let mut brick = Brick::new(Vec2::ZERO, 60.0, 24.0, test_problem(3), 3);
        assert!(!brick.hit());
        assert!(!brick.hit());
        assert!(brick.hit());
        assert!(matches!(brick.phase, BrickPhase::Destroying { .. }));
    }

    #[test]
    fn test_brick_hit_idempotent_once_destroyed() {
        let mut brick = Brick::new(Vec2::ZERO, 60.0, 24.0, test_problem(2), 1);
        assert!(brick.hit());
        // Further hits report no destruction and never double-score
        assert!(!brick.hit());
        assert!(!brick.hit());
        assert_eq!(brick.hits_left, 0);
    }

    #[test]
    fn test_destroy_animation_progress_bounded() {
        let mut brick = Brick::new(Vec2::ZERO, 60.0, 24.0, test_problem(1), 1);
        brick.hit();
        let mut steps = 0;
        while brick.is_active() && steps < 1000 {
            brick.update(1.0 / 120.0);
            if let BrickPhase::Destroying { progress } = brick.phase {
                assert!((0.0..1.0).contains(&progress));
            }
            steps += 1;
        }
        assert_eq!(brick.phase, BrickPhase::Inactive);
        // ~0.35 s at 120 Hz
        assert!(steps >= 40 && steps <= 44, "took {steps} ticks");
    }

    #[test]
    fn test_brick_points_scale_with_difficulty() {
        let brick = Brick::new(Vec2::ZERO, 60.0, 24.0, test_problem(4), 2);
        assert_eq!(brick.points(), 40);
    }

    proptest! {
        /// Paddle containment: any sequence of targets and updates keeps
        /// the paddle fully inside the playfield.
        #[test]
        fn prop_paddle_stays_in_field(
            targets in prop::collection::vec(-500.0f32..1500.0, 1..40),
            dts in prop::collection::vec(0.0f32..0.1, 1..40),
        ) {
            let mut paddle = Paddle::new(FIELD_WIDTH, FIELD_HEIGHT);
            for (target, dt) in targets.iter().zip(dts.iter().cycle()) {
                paddle.set_target_x(*target);
                paddle.update(*dt);
                prop_assert!(paddle.pos.x >= 0.0);
                prop_assert!(paddle.pos.x <= FIELD_WIDTH - paddle.width);
            }
        }
    }
}
