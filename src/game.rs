//! Game controller
//!
//! Owns the simulation for one embedding: the fixed-timestep accumulator,
//! input intake, per-tick collision orchestration, and the session state
//! machine. The host calls [`Game::frame`] once per animation callback and
//! renders from the resulting state; within one tick the order is always
//! update -> collisions -> end-condition checks.

use glam::Vec2;

use crate::consts::*;
use crate::platform::storage::ScoreStore;
use crate::sim::collision;
use crate::sim::level::Level;
use crate::sim::session::{Session, Snapshot, Status};

/// Input gathered by the host since the last frame. Pointer movement only
/// writes a paddle target; one-shot flags are consumed by the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Desired paddle center x, in playfield coordinates
    pub target_x: Option<f32>,
    /// Click/tap: starts a run from menu or game over
    pub click: bool,
    /// Pause toggle request
    pub pause: bool,
}

/// The controller. Constructed once per mount.
pub struct Game<S: ScoreStore> {
    session: Session<S>,
    level: Level,
    field: Vec2,
    input: FrameInput,
    accumulator: f32,
    /// Ticks left in the level-complete display window. Counted in sim
    /// ticks, so stopping the loop also stops the pending transition.
    complete_ticks: u32,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(field_width: f32, field_height: f32, store: S) -> Self {
        Self {
            session: Session::new(store),
            level: Level::new(0, field_width, field_height),
            field: Vec2::new(field_width, field_height),
            input: FrameInput::default(),
            accumulator: 0.0,
            complete_ticks: 0,
        }
    }

    /// Pointer/touch moved to `x` (playfield coordinates).
    pub fn set_pointer_x(&mut self, x: f32) {
        self.input.target_x = Some(x);
    }

    pub fn press_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn click(&mut self) {
        self.input.click = true;
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn status(&self) -> Status {
        self.session.status
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Advance by one host frame of `dt` seconds, running as many fixed
    /// timesteps as fit (capped to avoid the spiral of death).
    pub fn frame(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            // One-shot inputs apply to a single tick
            self.input.click = false;
            self.input.pause = false;
        }
    }

    /// One fixed simulation tick.
    pub fn step(&mut self, dt: f32) {
        if self.input.pause {
            self.session.toggle_pause();
        }
        if self.input.click {
            match self.session.status {
                Status::Menu | Status::GameOver => {
                    self.session.start_new_game();
                    self.level = Level::new(0, self.field.x, self.field.y);
                }
                _ => {}
            }
        }
        if let Some(x) = self.input.target_x.take() {
            self.level.paddle.set_target_x(x);
        }

        match self.session.status {
            Status::Playing => self.step_playing(dt),
            Status::LevelComplete => {
                self.level.update_effects(dt);
                self.complete_ticks = self.complete_ticks.saturating_sub(1);
                if self.complete_ticks == 0 {
                    self.session.advance_level();
                }
            }
            Status::Transition => {
                // The cleared level stays in place for the transition
                // frame (its name and score are still on screen); the
                // next level is built only as play resumes
                self.level = Level::new(self.session.current_level, self.field.x, self.field.y);
                self.session.resume_playing();
            }
            Status::Menu | Status::Paused | Status::GameOver => {}
        }
    }

    /// Update strictly precedes collision resolution, which strictly
    /// precedes the completion/failure checks.
    fn step_playing(&mut self, dt: f32) {
        self.level.update(dt);
        self.resolve_collisions();

        if self.level.is_complete() {
            self.session.complete_level(self.level.score);
            self.complete_ticks = LEVEL_COMPLETE_TICKS;
        } else if self.level.ball_lost() {
            if self.session.lose_life() > 0 {
                self.level.reset();
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let field_width = self.field.x;
        let level = &mut self.level;

        let walls = collision::ball_wall_collision(level.ball.pos, level.ball.radius, field_width);
        if walls.any() {
            collision::resolve_ball_walls(&mut level.ball, walls, field_width);
        }

        // Paddle: only when the ball is descending, so a ball resting at
        // paddle height can't oscillate against it
        if level.ball.vel.y > 0.0 {
            let contact = collision::ball_paddle_collision(&level.ball, &level.paddle);
            if contact.collided {
                collision::resolve_ball_paddle_collision(&mut level.ball, &level.paddle, &contact);
            }
        }

        // Bricks: exactly one resolved per tick (first found in iteration
        // order) to avoid double-bounce and double-score artifacts; any
        // remaining overlap corrects next tick
        for idx in 0..level.bricks.len() {
            if !level.bricks[idx].collidable() {
                continue;
            }
            let contact = collision::ball_brick_collision(&level.ball, &level.bricks[idx]);
            if contact.collided {
                collision::resolve_ball_collision(&mut level.ball, contact.normal);
                collision::separate_ball(&mut level.ball, &contact);
                if level.bricks[idx].hit() {
                    level.on_brick_destroyed(idx);
                }
                break;
            }
        }
    }

    /// Rescale to a new playfield: the level is rebuilt at the current
    /// index, while lives, scores, and status counters carry over.
    pub fn resize(&mut self, field_width: f32, field_height: f32) {
        self.field = Vec2::new(field_width, field_height);
        let index = self
            .session
            .current_level
            .min(self.session.total_levels.saturating_sub(1));
        self.level = Level::new(index, field_width, field_height);
        log::info!("playfield resized to {field_width}x{field_height}");
    }
}
