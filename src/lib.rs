//! Math Breaker - a breakout-style arcade game with math-problem bricks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, session state)
//! - `game`: Controller that drives the simulation from host frame callbacks
//! - `platform`: Host seams (high score storage)
//! - `render`: Canvas-2D drawing (wasm only)

pub mod game;
pub mod platform;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

pub use game::{FrameInput, Game};
pub use platform::storage::ScoreStore;

/// Game tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions (logical pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_BASE_SPEED: f32 = 300.0;
    /// Speed cap so late-level paddle rallies stay playable
    pub const BALL_MAX_SPEED: f32 = 620.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.02;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 110.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Gap between paddle top and the bottom of the playfield
    pub const PADDLE_BOTTOM_MARGIN: f32 = 40.0;
    /// Exponential smoothing rate for paddle target tracking (per second)
    pub const PADDLE_SMOOTHING: f32 = 14.0;
    /// Paddle hit offset is scaled into [-MAX_HIT_OFFSET, MAX_HIT_OFFSET]
    pub const MAX_HIT_OFFSET: f32 = 0.8;

    /// Brick defaults
    pub const BRICK_GAP: f32 = 6.0;
    /// Vertical span of the brick grid as a fraction of field height
    pub const BRICK_AREA_FRACTION: f32 = 0.35;
    /// Top margin above the brick grid
    pub const BRICK_TOP_MARGIN: f32 = 60.0;
    /// Destroy animation duration (scale-up + fade) in seconds
    pub const BRICK_DESTROY_SECS: f32 = 0.35;
    /// Points awarded per difficulty unit when a brick is destroyed
    pub const POINTS_PER_DIFFICULTY: u32 = 10;

    /// Particle burst size per destroyed brick
    pub const PARTICLE_BURST: usize = 14;
    /// Downward acceleration on particles (pixels/s^2)
    pub const PARTICLE_GRAVITY: f32 = 600.0;
    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 256;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const TOTAL_LEVELS: u32 = 5;
    /// Level-complete display window in sim ticks (2 seconds at 120 Hz)
    pub const LEVEL_COMPLETE_TICKS: u32 = 2 * 120;
}
