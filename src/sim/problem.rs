//! Math-problem payloads for bricks
//!
//! Difficulty 1-5 selects the operation family. Generation is driven by
//! the level's seeded RNG so a given level always deals the same problems.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

/// Highest supported difficulty.
pub const MAX_DIFFICULTY: u8 = 5;

/// A question shown on a brick, with its answer for the host-side quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub question: String,
    pub answer: i32,
    /// 1..=5, drives point value, brick color, and hit count
    pub difficulty: u8,
}

impl Problem {
    /// Generate a problem at the given difficulty.
    ///
    /// 1: small addition, 2: subtraction (non-negative result),
    /// 3: single-digit multiplication, 4: larger multiplication,
    /// 5: mixed two-step (a * b + c).
    pub fn generate(difficulty: u8, rng: &mut Pcg32) -> Self {
        let difficulty = difficulty.clamp(1, MAX_DIFFICULTY);
        let (question, answer) = match difficulty {
            1 => {
                let a = rng.random_range(1..=9);
                let b = rng.random_range(1..=9);
                (format!("{a} + {b}"), a + b)
            }
            2 => {
                let a = rng.random_range(5..=18);
                let b = rng.random_range(1..=a);
                (format!("{a} - {b}"), a - b)
            }
            3 => {
                let a = rng.random_range(2..=9);
                let b = rng.random_range(2..=9);
                (format!("{a} × {b}"), a * b)
            }
            4 => {
                let a = rng.random_range(6..=12);
                let b = rng.random_range(4..=12);
                (format!("{a} × {b}"), a * b)
            }
            _ => {
                let a = rng.random_range(3..=9);
                let b = rng.random_range(3..=9);
                let c = rng.random_range(1..=20);
                (format!("{a} × {b} + {c}"), a * b + c)
            }
        };
        Self {
            question,
            answer,
            difficulty,
        }
    }
}
