//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod easing;
pub mod entities;
pub mod level;
pub mod particles;
pub mod problem;
pub mod session;

pub use collision::{Aabb, CollisionResult, ball_aabb_collision, ball_wall_collision, reflect};
pub use entities::{Ball, Brick, BrickPhase, Paddle};
pub use level::{LEVELS, ColorScheme, Level, LevelDef};
pub use particles::{Particle, ParticleSystem};
pub use problem::Problem;
pub use session::{Session, Snapshot, Status};
