//! Collision detection and response
//!
//! Detection functions are pure and side-effect-free; resolution functions
//! mutate the ball's velocity and position only. Collision must never halt
//! the frame loop, so every degenerate case (zero-length normal, ball
//! exactly on a boundary) is normalized with a fallback instead of erroring.

use glam::Vec2;

use super::entities::{Ball, Brick, Paddle};
use crate::consts::*;

/// Axis-aligned bounding box, the collision bound for paddle and bricks.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

impl From<&Paddle> for Aabb {
    fn from(p: &Paddle) -> Self {
        Aabb::from_pos_size(p.pos, p.width, p.height)
    }
}

impl From<&Brick> for Aabb {
    fn from(b: &Brick) -> Self {
        Aabb::from_pos_size(b.pos, b.width, b.height)
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub collided: bool,
    /// Surface normal at contact, pointing toward the ball center
    pub normal: Vec2,
    /// Contact point on the AABB surface
    pub point: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            collided: false,
            normal: Vec2::ZERO,
            point: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Which playfield walls the ball currently overlaps. The bottom edge is
/// intentionally open: falling past it is a life-loss condition, not a
/// collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Check the ball against the left/right/top playfield walls.
pub fn ball_wall_collision(pos: Vec2, radius: f32, field_width: f32) -> WallHit {
    WallHit {
        left: pos.x - radius < 0.0,
        right: pos.x + radius > field_width,
        top: pos.y - radius < 0.0,
    }
}

/// Circle-vs-AABB closest-point distance test.
///
/// `fallback_dir` supplies the contact normal when the ball center sits
/// exactly inside the box (zero-length closest-point vector); pass the
/// ball's velocity direction so resolution pushes it back out along its
/// own path instead of propagating NaN.
pub fn ball_aabb_collision(
    pos: Vec2,
    radius: f32,
    rect: Aabb,
    fallback_dir: Vec2,
) -> CollisionResult {
    let closest = pos.clamp(rect.min, rect.max);
    let delta = pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-4 {
        delta / dist
    } else {
        // Ball center inside or exactly on the box surface
        let fb = -fallback_dir.normalize_or_zero();
        if fb == Vec2::ZERO { Vec2::NEG_Y } else { fb }
    };

    CollisionResult {
        collided: true,
        normal,
        point: closest,
        penetration: radius - dist,
    }
}

/// Check the ball against the paddle's AABB.
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle) -> CollisionResult {
    ball_aabb_collision(ball.pos, ball.radius, Aabb::from(paddle), ball.vel)
}

/// Check the ball against one brick's AABB.
pub fn ball_brick_collision(ball: &Ball, brick: &Brick) -> CollisionResult {
    ball_aabb_collision(ball.pos, ball.radius, Aabb::from(brick), ball.vel)
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect the ball's velocity about a contact normal.
pub fn resolve_ball_collision(ball: &mut Ball, normal: Vec2) {
    ball.vel = reflect(ball.vel, normal);
}

/// Resolve walls in place: sign-flip the relevant axis and clamp the
/// position back inside so the next tick does not re-collide.
pub fn resolve_ball_walls(ball: &mut Ball, hit: WallHit, field_width: f32) {
    if hit.left {
        ball.bounce_x();
        ball.pos.x = ball.radius;
    } else if hit.right {
        ball.bounce_x();
        ball.pos.x = field_width - ball.radius;
    }
    if hit.top {
        ball.bounce_y();
        ball.pos.y = ball.radius;
    }
}

/// Resolve a paddle hit: the horizontal offset from paddle center is
/// scaled into [-MAX_HIT_OFFSET, MAX_HIT_OFFSET] and reinjected into the
/// outgoing angle, biasing the bounce away from dead-center. Each paddle
/// hit also applies the speed ramp.
pub fn resolve_ball_paddle_collision(ball: &mut Ball, paddle: &Paddle, contact: &CollisionResult) {
    let half_width = paddle.width / 2.0;
    let offset = ((ball.pos.x - paddle.center_x()) / half_width).clamp(-1.0, 1.0) * MAX_HIT_OFFSET;
    ball.bounce_off_paddle(offset);
    ball.increase_speed(PADDLE_BOOST);
    separate_ball(ball, contact);
}

/// Push the ball out along the contact normal by the penetration depth,
/// plus a hair of slack, so the same contact cannot re-resolve next frame.
pub fn separate_ball(ball: &mut Ball, contact: &CollisionResult) {
    if contact.collided {
        ball.pos += contact.normal * (contact.penetration + 0.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_when_far_away() {
        let rect = Aabb::from_pos_size(Vec2::new(100.0, 100.0), 60.0, 24.0);
        let result = ball_aabb_collision(Vec2::new(0.0, 0.0), 8.0, rect, Vec2::X);
        assert!(!result.collided);
    }

    #[test]
    fn test_hit_from_above_has_upward_normal() {
        let rect = Aabb::from_pos_size(Vec2::new(100.0, 100.0), 60.0, 24.0);
        // Ball just above the top edge, overlapping
        let result = ball_aabb_collision(Vec2::new(130.0, 95.0), 8.0, rect, Vec2::Y);
        assert!(result.collided);
        assert!(result.normal.y < -0.99);
        assert!(result.penetration > 0.0);
    }

    #[test]
    fn test_hit_from_side_has_horizontal_normal() {
        let rect = Aabb::from_pos_size(Vec2::new(100.0, 100.0), 60.0, 24.0);
        let result = ball_aabb_collision(Vec2::new(95.0, 112.0), 8.0, rect, Vec2::X);
        assert!(result.collided);
        assert!(result.normal.x < -0.99);
    }

    #[test]
    fn test_corner_hit_has_diagonal_normal() {
        let rect = Aabb::from_pos_size(Vec2::new(100.0, 100.0), 60.0, 24.0);
        let result = ball_aabb_collision(Vec2::new(96.0, 96.0), 8.0, rect, Vec2::X);
        assert!(result.collided);
        assert!(result.normal.x < 0.0 && result.normal.y < 0.0);
        assert!((result.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_inside_falls_back_to_velocity_direction() {
        let rect = Aabb::from_pos_size(Vec2::new(100.0, 100.0), 60.0, 24.0);
        // Ball center exactly inside the brick, moving down-right
        let vel = Vec2::new(1.0, 1.0);
        let result = ball_aabb_collision(rect.center(), 8.0, rect, vel);
        assert!(result.collided);
        // Normal opposes travel and is finite
        assert!(result.normal.dot(vel) < 0.0);
        assert!(result.normal.is_finite());
    }

    #[test]
    fn test_zero_velocity_fallback_still_finite() {
        let rect = Aabb::from_pos_size(Vec2::ZERO, 10.0, 10.0);
        let result = ball_aabb_collision(rect.center(), 8.0, rect, Vec2::ZERO);
        assert!(result.collided);
        assert!(result.normal.is_finite());
        assert!((result.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_reflection_law_on_walls() {
        // Vertical wall: (vx, vy) -> (-vx, vy)
        let v = reflect(Vec2::new(120.0, -80.0), Vec2::X);
        assert_eq!(v, Vec2::new(-120.0, -80.0));
        // Horizontal wall: (vx, vy) -> (vx, -vy)
        let v = reflect(Vec2::new(120.0, -80.0), Vec2::Y);
        assert_eq!(v, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_wall_detection_ignores_bottom() {
        let hit = ball_wall_collision(Vec2::new(400.0, 10_000.0), 8.0, 800.0);
        assert!(!hit.any());
    }

    #[test]
    fn test_wall_resolution_separates() {
        let mut ball = Ball::new(4.0, 300.0);
        ball.vel = Vec2::new(-200.0, 50.0);
        let hit = ball_wall_collision(ball.pos, ball.radius, 800.0);
        assert!(hit.left);
        resolve_ball_walls(&mut ball, hit, 800.0);
        assert!(ball.vel.x > 0.0);
        assert_eq!(ball.pos.x, ball.radius);
        // No longer colliding
        assert!(!ball_wall_collision(ball.pos, ball.radius, 800.0).any());
    }

    #[test]
    fn test_paddle_resolution_biases_by_offset() {
        let paddle = Paddle::new(800.0, 600.0);
        let mut ball = Ball::new(paddle.center_x() + 40.0, paddle.pos.y - 4.0);
        ball.vel = Vec2::new(0.0, 250.0);
        let contact = ball_paddle_collision(&ball, &paddle);
        assert!(contact.collided);
        resolve_ball_paddle_collision(&mut ball, &paddle, &contact);
        // Right-of-center hit leaves rightward and upward
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_separation_prevents_recollision() {
        let paddle = Paddle::new(800.0, 600.0);
        let mut ball = Ball::new(paddle.center_x(), paddle.pos.y - 4.0);
        ball.vel = Vec2::new(0.0, 250.0);
        let contact = ball_paddle_collision(&ball, &paddle);
        resolve_ball_paddle_collision(&mut ball, &paddle, &contact);
        let again = ball_paddle_collision(&ball, &paddle);
        assert!(!again.collided);
    }
}
