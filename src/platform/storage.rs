//! Persistent high score storage
//!
//! One string key mapping to a non-negative integer. Missing or corrupt
//! values read as zero - high score is cosmetic, so storage failure is
//! never surfaced as an error.

use std::cell::Cell;
use std::rc::Rc;

/// LocalStorage key for the high score.
pub const HIGH_SCORE_KEY: &str = "mathbreak_highscore";

/// Single-key score store. Read once at session construction, written on
/// every new record.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// In-memory store backed by a shared cell. Clones share the same backing,
/// which lets tests model "reload the page, construct a fresh session".
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    cell: Rc<Cell<u32>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.cell.get()
    }

    fn save(&mut self, score: u32) {
        self.cell.set(score);
    }
}

/// LocalStorage-backed store (wasm only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScoreStore;

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> u32 {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(HIGH_SCORE_KEY) {
                match raw.parse::<u32>() {
                    Ok(score) => return score,
                    Err(_) => log::warn!("corrupt high score {raw:?}, treating as 0"),
                }
            }
        }
        0
    }

    fn save(&mut self, score: u32) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(HIGH_SCORE_KEY, &score.to_string());
            log::info!("High score saved: {score}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load(), 0);
        store.save(1234);
        assert_eq!(store.load(), 1234);
    }

    #[test]
    fn test_clones_share_backing() {
        let mut a = MemoryScoreStore::new();
        let b = a.clone();
        a.save(500);
        assert_eq!(b.load(), 500);
    }
}
