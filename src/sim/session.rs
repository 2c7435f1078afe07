//! Game session state machine
//!
//! The single source of truth for lives, total score, current level index,
//! status, and the persisted high score. Mutated only by its own transition
//! methods, which the controller calls.
//!
//! ```text
//! Menu -> Playing <-> Paused
//! Playing -> LevelComplete -> Transition -> Playing   (next level)
//! Playing -> LevelComplete -> GameOver                (final level, win)
//! Playing -> GameOver                                 (lives exhausted)
//! GameOver -> Playing                                 (start_new_game)
//! ```

use serde::Serialize;

use crate::consts::{STARTING_LIVES, TOTAL_LEVELS};
use crate::platform::storage::ScoreStore;

/// Game lifecycle status. `Menu` is initial; `GameOver` is terminal until
/// `start_new_game` re-enters `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Menu,
    Playing,
    Paused,
    LevelComplete,
    Transition,
    GameOver,
}

/// Read-only view of the session for the embedding HUD.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub lives: u8,
    pub current_level: u32,
    pub total_levels: u32,
    pub total_score: u32,
    pub high_score: u32,
    /// True when the run ended by clearing the final level
    pub won: bool,
}

/// Session state manager. Created once at controller construction;
/// `start_new_game` resets everything except the high score.
pub struct Session<S: ScoreStore> {
    pub status: Status,
    pub lives: u8,
    pub current_level: u32,
    pub total_levels: u32,
    pub total_score: u32,
    pub high_score: u32,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    /// Construct in `Menu`, reading the persisted high score once.
    pub fn new(store: S) -> Self {
        let high_score = store.load();
        Self {
            status: Status::Menu,
            lives: STARTING_LIVES,
            current_level: 0,
            total_levels: TOTAL_LEVELS,
            total_score: 0,
            high_score,
            store,
        }
    }

    /// Reset lives, score, and level index; keep the high score. Enters
    /// `Playing`.
    pub fn start_new_game(&mut self) {
        self.lives = STARTING_LIVES;
        self.current_level = 0;
        self.total_score = 0;
        self.status = Status::Playing;
        log::info!("new game started");
    }

    /// Only acts from `Playing`/`Paused`; a no-op in any other state.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            other => other,
        };
    }

    /// Decrement lives; at zero the game is over and the high score is
    /// persisted. Returns the remaining lives.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        log::info!("life lost, {} remaining", self.lives);
        if self.lives == 0 {
            self.status = Status::GameOver;
            self.record_high_score();
        }
        self.lives
    }

    /// Commit a completed level's score and enter the level-complete
    /// display window. The high score is persisted immediately, so a
    /// session ending mid-run never loses an already-exceeded record.
    pub fn complete_level(&mut self, level_score: u32) {
        self.total_score += level_score;
        self.record_high_score();
        self.status = Status::LevelComplete;
        log::info!(
            "level {} complete, +{} -> total {}",
            self.current_level,
            level_score,
            self.total_score
        );
    }

    /// Advance past the completed level: `Transition` when levels remain,
    /// `GameOver` (a win) after the final level.
    pub fn advance_level(&mut self) {
        self.current_level += 1;
        self.status = if self.current_level >= self.total_levels {
            self.record_high_score();
            Status::GameOver
        } else {
            Status::Transition
        };
    }

    /// Leave `Transition` once the controller has built the next level.
    pub fn resume_playing(&mut self) {
        if self.status == Status::Transition {
            self.status = Status::Playing;
        }
    }

    /// The run counts as a win when the level index has moved past the
    /// final level.
    pub fn won(&self) -> bool {
        self.current_level >= self.total_levels
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            lives: self.lives,
            current_level: self.current_level,
            total_levels: self.total_levels,
            total_score: self.total_score,
            high_score: self.high_score,
            won: self.won(),
        }
    }

    fn record_high_score(&mut self) {
        if self.total_score > self.high_score {
            self.high_score = self.total_score;
            self.store.save(self.high_score);
        }
    }
}
