//! Level definitions and runtime
//!
//! One concrete [`Level`] type parameterized by declarative [`LevelDef`]
//! records: a layout mask, a color scheme, and a difficulty band. The five
//! themed levels live in the fixed [`LEVELS`] table; adding a level is
//! adding a record.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Ball, Brick, Paddle};
use super::particles::ParticleSystem;
use super::problem::Problem;
use crate::consts::*;

/// CSS colors for one themed level. Brick colors are indexed by problem
/// difficulty, so color always derives deterministically from difficulty.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Background gradient, top then bottom stop
    pub background: [&'static str; 2],
    pub paddle: &'static str,
    pub ball: &'static str,
    /// One color per difficulty 1..=5
    pub bricks: [&'static str; 5],
    pub text: &'static str,
}

impl ColorScheme {
    pub fn brick_color(&self, difficulty: u8) -> &'static str {
        let idx = (difficulty.clamp(1, 5) - 1) as usize;
        self.bricks[idx]
    }
}

/// Declarative level record: everything that distinguishes one themed
/// level from another.
pub struct LevelDef {
    pub name: &'static str,
    pub scheme: ColorScheme,
    pub rows: u32,
    pub cols: u32,
    /// Difficulty band; the top row gets `max_difficulty`, the bottom row
    /// `min_difficulty`, interpolated in between
    pub min_difficulty: u8,
    pub max_difficulty: u8,
    /// Layout mask: whether the cell (row, col) holds a brick
    pub layout: fn(row: u32, col: u32, rows: u32, cols: u32) -> bool,
}

fn layout_full(_row: u32, _col: u32, _rows: u32, _cols: u32) -> bool {
    true
}

fn layout_checkerboard(row: u32, col: u32, _rows: u32, _cols: u32) -> bool {
    (row + col) % 2 == 0
}

fn layout_pyramid(row: u32, col: u32, rows: u32, cols: u32) -> bool {
    // Widens toward the bottom row
    let inset = (rows - 1 - row) * cols / (2 * rows);
    col >= inset && col < cols - inset
}

fn layout_diamond(row: u32, col: u32, rows: u32, cols: u32) -> bool {
    let mid_row = (rows - 1) as f32 / 2.0;
    let mid_col = (cols - 1) as f32 / 2.0;
    let dr = (row as f32 - mid_row).abs() / mid_row.max(1.0);
    let dc = (col as f32 - mid_col).abs() / mid_col.max(1.0);
    dr + dc <= 1.0
}

fn layout_fortress(row: u32, col: u32, rows: u32, cols: u32) -> bool {
    // Solid border with interior pillars
    row == 0 || row == rows - 1 || col == 0 || col == cols - 1 || col % 3 == 0
}

/// The five themed levels, in play order.
pub static LEVELS: [LevelDef; 5] = [
    LevelDef {
        name: "Meadow",
        scheme: ColorScheme {
            background: ["#1a3a1a", "#0c1f0c"],
            paddle: "#e8f5e9",
            ball: "#ffee58",
            bricks: ["#81c784", "#66bb6a", "#4caf50", "#388e3c", "#2e7d32"],
            text: "#0c1f0c",
        },
        rows: 4,
        cols: 8,
        min_difficulty: 1,
        max_difficulty: 2,
        layout: layout_full,
    },
    LevelDef {
        name: "Ocean",
        scheme: ColorScheme {
            background: ["#0d2e4d", "#06141f"],
            paddle: "#e1f5fe",
            ball: "#ffca28",
            bricks: ["#4fc3f7", "#29b6f6", "#03a9f4", "#0288d1", "#01579b"],
            text: "#06141f",
        },
        rows: 5,
        cols: 9,
        min_difficulty: 1,
        max_difficulty: 3,
        layout: layout_checkerboard,
    },
    LevelDef {
        name: "Sunset",
        scheme: ColorScheme {
            background: ["#4d2a0d", "#1f1006"],
            paddle: "#fff3e0",
            ball: "#fffde7",
            bricks: ["#ffb74d", "#ffa726", "#ff9800", "#f57c00", "#e65100"],
            text: "#1f1006",
        },
        rows: 5,
        cols: 9,
        min_difficulty: 2,
        max_difficulty: 4,
        layout: layout_pyramid,
    },
    LevelDef {
        name: "Nebula",
        scheme: ColorScheme {
            background: ["#2d0d4d", "#12061f"],
            paddle: "#f3e5f5",
            ball: "#80deea",
            bricks: ["#ba68c8", "#ab47bc", "#9c27b0", "#7b1fa2", "#4a148c"],
            text: "#12061f",
        },
        rows: 6,
        cols: 10,
        min_difficulty: 3,
        max_difficulty: 5,
        layout: layout_diamond,
    },
    LevelDef {
        name: "Volcano",
        scheme: ColorScheme {
            background: ["#4d0d0d", "#1f0606"],
            paddle: "#ffebee",
            ball: "#ffe082",
            bricks: ["#e57373", "#ef5350", "#f44336", "#d32f2f", "#b71c1c"],
            text: "#1f0606",
        },
        rows: 6,
        cols: 10,
        min_difficulty: 4,
        max_difficulty: 5,
        layout: layout_fortress,
    },
];

/// Difficulty for a row: top row hardest, bottom row easiest.
fn row_difficulty(def: &LevelDef, row: u32) -> u8 {
    if def.rows <= 1 {
        return def.max_difficulty;
    }
    let span = (def.max_difficulty - def.min_difficulty) as u32;
    let scaled = span * (def.rows - 1 - row) + (def.rows - 1) / 2;
    def.min_difficulty + (scaled / (def.rows - 1)) as u8
}

/// Hit count grows with difficulty: 1-2 one hit, 3-4 two hits, 5 three.
fn hits_for_difficulty(difficulty: u8) -> u8 {
    difficulty.div_ceil(2).clamp(1, 3)
}

/// A running level: owns its entities, particle pool, and running score.
pub struct Level {
    pub index: u32,
    pub def: &'static LevelDef,
    pub field: Vec2,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub particles: ParticleSystem,
    /// Score earned in this level; committed to the session only on
    /// completion
    pub score: u32,
    /// Cosmetic RNG (particle bursts); layout/problem RNG is re-seeded
    /// per build so levels are identical across runs
    fx_rng: Pcg32,
}

impl Level {
    pub fn new(index: u32, field_width: f32, field_height: f32) -> Self {
        let def = &LEVELS[index as usize % LEVELS.len()];
        let field = Vec2::new(field_width, field_height);
        let paddle = Paddle::new(field_width, field_height);
        let ball_spawn = Self::ball_spawn(&paddle, field_width);
        let bricks = Self::build_bricks(def, index, field);
        if bricks.is_empty() {
            log::warn!("level {index} ({}) generated an empty layout", def.name);
        }
        Self {
            index,
            def,
            field,
            paddle,
            ball: Ball::new(ball_spawn.x, ball_spawn.y),
            bricks,
            particles: ParticleSystem::new(),
            score: 0,
            fx_rng: Pcg32::seed_from_u64(index as u64),
        }
    }

    fn ball_spawn(paddle: &Paddle, field_width: f32) -> Vec2 {
        Vec2::new(field_width / 2.0, paddle.pos.y - 60.0)
    }

    /// Deterministic seed per level index, independent of run order.
    fn layout_seed(index: u32) -> u64 {
        (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn build_bricks(def: &'static LevelDef, index: u32, field: Vec2) -> Vec<Brick> {
        let mut rng = Pcg32::seed_from_u64(Self::layout_seed(index));
        let cols = def.cols as f32;
        let rows = def.rows as f32;
        let brick_w = (field.x - BRICK_GAP * (cols + 1.0)) / cols;
        let area_h = field.y * BRICK_AREA_FRACTION;
        let brick_h = ((area_h - BRICK_GAP * (rows - 1.0)) / rows).min(30.0);

        let mut bricks = Vec::new();
        for row in 0..def.rows {
            let difficulty = row_difficulty(def, row);
            for col in 0..def.cols {
                if !(def.layout)(row, col, def.rows, def.cols) {
                    continue;
                }
                let x = BRICK_GAP + col as f32 * (brick_w + BRICK_GAP);
                let y = BRICK_TOP_MARGIN + row as f32 * (brick_h + BRICK_GAP);
                let problem = Problem::generate(difficulty, &mut rng);
                let hits = hits_for_difficulty(difficulty);
                bricks.push(Brick::new(Vec2::new(x, y), brick_w, brick_h, problem, hits));
            }
        }
        bricks
    }

    /// Reinitialize bricks, ball, score, and particles. The paddle keeps
    /// its position and interpolation target so a life loss does not snap
    /// it back to center.
    pub fn reset(&mut self) {
        self.bricks = Self::build_bricks(self.def, self.index, self.field);
        let spawn = Self::ball_spawn(&self.paddle, self.field.x);
        self.ball.reset(spawn.x, spawn.y);
        self.score = 0;
        self.particles.clear();
    }

    /// Per-tick entity update: paddle easing, ball integration, brick
    /// destroy animations, particle integration and pruning.
    pub fn update(&mut self, dt: f32) {
        self.paddle.update(dt);
        self.ball.update(dt);
        for brick in &mut self.bricks {
            brick.update(dt);
        }
        self.particles.update(dt);
    }

    /// Cosmetic-only update while the level-complete window is showing:
    /// destroy animations and particles keep playing, gameplay is frozen.
    pub fn update_effects(&mut self, dt: f32) {
        for brick in &mut self.bricks {
            brick.update(dt);
        }
        self.particles.update(dt);
    }

    /// Score the destruction of `bricks[idx]` and spawn its burst.
    pub fn on_brick_destroyed(&mut self, idx: usize) {
        let (center, difficulty, points) = {
            let brick = &self.bricks[idx];
            (
                brick.pos + Vec2::new(brick.width, brick.height) / 2.0,
                brick.problem.difficulty,
                brick.points(),
            )
        };
        self.score += points;
        self.particles.spawn_burst(center, difficulty, &mut self.fx_rng);
    }

    /// Complete exactly when every owned brick is inactive. Evaluated once
    /// per controller tick, not inside `hit()`.
    pub fn is_complete(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    /// Life-loss condition: ball fully below the playfield.
    pub fn ball_lost(&self) -> bool {
        self.ball.pos.y - self.ball.radius > self.field.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

    #[test]
    fn test_five_levels_defined() {
        assert_eq!(LEVELS.len(), 5);
        for def in &LEVELS {
            assert!(def.min_difficulty >= 1);
            assert!(def.max_difficulty <= 5);
            assert!(def.min_difficulty <= def.max_difficulty);
        }
    }

    #[test]
    fn test_every_level_has_bricks() {
        for i in 0..5 {
            let level = Level::new(i, FIELD_WIDTH, FIELD_HEIGHT);
            assert!(!level.bricks.is_empty(), "level {i} is empty");
        }
    }

    #[test]
    fn test_levels_are_deterministic_across_builds() {
        let a = Level::new(2, FIELD_WIDTH, FIELD_HEIGHT);
        let b = Level::new(2, FIELD_WIDTH, FIELD_HEIGHT);
        assert_eq!(a.bricks.len(), b.bricks.len());
        for (x, y) in a.bricks.iter().zip(&b.bricks) {
            assert_eq!(x.problem, y.problem);
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_row_difficulty_band() {
        for def in &LEVELS {
            assert_eq!(row_difficulty(def, 0), def.max_difficulty);
            assert_eq!(row_difficulty(def, def.rows - 1), def.min_difficulty);
            for row in 0..def.rows {
                let d = row_difficulty(def, row);
                assert!(d >= def.min_difficulty && d <= def.max_difficulty);
            }
        }
    }

    #[test]
    fn test_hits_scale_with_difficulty() {
        assert_eq!(hits_for_difficulty(1), 1);
        assert_eq!(hits_for_difficulty(2), 1);
        assert_eq!(hits_for_difficulty(3), 2);
        assert_eq!(hits_for_difficulty(4), 2);
        assert_eq!(hits_for_difficulty(5), 3);
    }

    #[test]
    fn test_bricks_fit_inside_field() {
        for i in 0..5 {
            let level = Level::new(i, FIELD_WIDTH, FIELD_HEIGHT);
            for brick in &level.bricks {
                assert!(brick.pos.x >= 0.0);
                assert!(brick.pos.x + brick.width <= FIELD_WIDTH + 0.01);
                assert!(brick.pos.y >= 0.0);
                assert!(brick.pos.y + brick.height < FIELD_HEIGHT / 2.0);
            }
        }
    }

    #[test]
    fn test_reset_restores_bricks_and_keeps_paddle() {
        let mut level = Level::new(0, FIELD_WIDTH, FIELD_HEIGHT);
        let brick_count = level.bricks.len();
        level.paddle.set_target_x(100.0);
        level.paddle.update(1.0);
        let paddle_x = level.paddle.pos.x;

        level.bricks[0].hit();
        level.on_brick_destroyed(0);
        assert!(level.score > 0);

        level.reset();
        assert_eq!(level.bricks.len(), brick_count);
        assert!(level.bricks[0].collidable());
        assert_eq!(level.score, 0);
        assert!(level.particles.is_empty());
        assert_eq!(level.paddle.pos.x, paddle_x);
    }

    #[test]
    fn test_completion_requires_all_inactive() {
        let mut level = Level::new(0, FIELD_WIDTH, FIELD_HEIGHT);
        assert!(!level.is_complete());
        for brick in &mut level.bricks {
            while !brick.hit() {}
        }
        // Destroy animations still running
        assert!(!level.is_complete());
        for _ in 0..120 {
            level.update_effects(1.0 / 120.0);
        }
        assert!(level.is_complete());
    }

    #[test]
    fn test_ball_lost_below_field() {
        let mut level = Level::new(0, FIELD_WIDTH, FIELD_HEIGHT);
        assert!(!level.ball_lost());
        level.ball.pos.y = FIELD_HEIGHT + 50.0;
        assert!(level.ball_lost());
    }

    #[test]
    fn test_scheme_color_tracks_difficulty() {
        let scheme = &LEVELS[0].scheme;
        assert_eq!(scheme.brick_color(1), scheme.bricks[0]);
        assert_eq!(scheme.brick_color(5), scheme.bricks[4]);
        // Out-of-range difficulties clamp instead of panicking
        assert_eq!(scheme.brick_color(0), scheme.bricks[0]);
        assert_eq!(scheme.brick_color(9), scheme.bricks[4]);
    }
}
