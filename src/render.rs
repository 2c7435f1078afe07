//! Canvas-2D rendering (wasm only)
//!
//! Pure drawing: reads the game state, writes pixels, mutates nothing.
//! The view is selected by session status, so a state transition made
//! during a tick is visible in the very same frame's render pass.

use web_sys::CanvasRenderingContext2d;

use crate::game::Game;
use crate::platform::storage::ScoreStore;
use crate::sim::entities::BrickPhase;
use crate::sim::level::Level;
use crate::sim::session::Status;

/// Draw one frame.
pub fn draw<S: ScoreStore>(ctx: &CanvasRenderingContext2d, game: &Game<S>) {
    let level = game.level();
    let field = level.field;

    draw_background(ctx, level);

    match game.status() {
        Status::Menu => {
            draw_overlay(
                ctx,
                field.x,
                field.y,
                "MATH BREAKER",
                "Click to start",
                Some(&format!("High score: {}", game.snapshot().high_score)),
            );
        }
        Status::Playing => {
            draw_level(ctx, level);
        }
        Status::Paused => {
            draw_level(ctx, level);
            draw_overlay(ctx, field.x, field.y, "PAUSED", "Press Esc to resume", None);
        }
        Status::LevelComplete | Status::Transition => {
            draw_level(ctx, level);
            draw_overlay(
                ctx,
                field.x,
                field.y,
                &format!("{} CLEARED", level.def.name.to_uppercase()),
                &format!("+{} points", level.score),
                None,
            );
        }
        Status::GameOver => {
            let snap = game.snapshot();
            let (title, subtitle) = if snap.won {
                ("YOU WIN!", "All five levels cleared")
            } else {
                ("GAME OVER", "Click to try again")
            };
            draw_overlay(
                ctx,
                field.x,
                field.y,
                title,
                subtitle,
                Some(&format!(
                    "Score: {}   Best: {}",
                    snap.total_score, snap.high_score
                )),
            );
        }
    }
}

fn draw_background(ctx: &CanvasRenderingContext2d, level: &Level) {
    let scheme = &level.def.scheme;
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, level.field.y as f64);
    let _ = gradient.add_color_stop(0.0, scheme.background[0]);
    let _ = gradient.add_color_stop(1.0, scheme.background[1]);
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, level.field.x as f64, level.field.y as f64);
}

fn draw_level(ctx: &CanvasRenderingContext2d, level: &Level) {
    let scheme = &level.def.scheme;

    for brick in &level.bricks {
        match brick.phase {
            BrickPhase::Alive => {
                ctx.set_fill_style_str(scheme.brick_color(brick.problem.difficulty));
                ctx.fill_rect(
                    brick.pos.x as f64,
                    brick.pos.y as f64,
                    brick.width as f64,
                    brick.height as f64,
                );
                // Multi-hit bricks show wear as a thin inner stripe
                if brick.hits_left < brick.max_hits {
                    ctx.set_global_alpha(0.35);
                    ctx.set_fill_style_str("#000000");
                    ctx.fill_rect(
                        brick.pos.x as f64,
                        brick.pos.y as f64 + brick.height as f64 - 4.0,
                        brick.width as f64,
                        4.0,
                    );
                    ctx.set_global_alpha(1.0);
                }
                ctx.set_fill_style_str(scheme.text);
                ctx.set_font("12px monospace");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                let _ = ctx.fill_text(
                    &brick.problem.question,
                    (brick.pos.x + brick.width / 2.0) as f64,
                    (brick.pos.y + brick.height / 2.0) as f64,
                );
            }
            BrickPhase::Destroying { progress } => {
                // Scale up and fade out
                let scale = 1.0 + 0.5 * progress;
                let alpha = 1.0 - progress;
                let w = brick.width * scale;
                let h = brick.height * scale;
                let x = brick.pos.x - (w - brick.width) / 2.0;
                let y = brick.pos.y - (h - brick.height) / 2.0;
                ctx.set_global_alpha(alpha as f64);
                ctx.set_fill_style_str(scheme.brick_color(brick.problem.difficulty));
                ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
                ctx.set_global_alpha(1.0);
            }
            BrickPhase::Inactive => {}
        }
    }

    for p in level.particles.iter() {
        ctx.set_global_alpha(p.alpha() as f64);
        ctx.set_fill_style_str(scheme.brick_color(p.difficulty));
        ctx.fill_rect(
            (p.pos.x - p.size / 2.0) as f64,
            (p.pos.y - p.size / 2.0) as f64,
            p.size as f64,
            p.size as f64,
        );
    }
    ctx.set_global_alpha(1.0);

    let paddle = &level.paddle;
    ctx.set_fill_style_str(scheme.paddle);
    ctx.fill_rect(
        paddle.pos.x as f64,
        paddle.pos.y as f64,
        paddle.width as f64,
        paddle.height as f64,
    );

    let ball = &level.ball;
    ctx.set_fill_style_str(scheme.ball);
    ctx.begin_path();
    let _ = ctx.arc(
        ball.pos.x as f64,
        ball.pos.y as f64,
        ball.radius as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.fill();
}

fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    width: f32,
    height: f32,
    title: &str,
    subtitle: &str,
    detail: Option<&str>,
) {
    ctx.set_global_alpha(0.6);
    ctx.set_fill_style_str("#000000");
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    ctx.set_global_alpha(1.0);

    let cx = (width / 2.0) as f64;
    let cy = (height / 2.0) as f64;

    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("bold 42px sans-serif");
    let _ = ctx.fill_text(title, cx, cy - 30.0);
    ctx.set_font("20px sans-serif");
    let _ = ctx.fill_text(subtitle, cx, cy + 18.0);
    if let Some(detail) = detail {
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text(detail, cx, cy + 52.0);
    }
}
