//! Platform abstraction layer
//!
//! Host-side seams the simulation must not depend on directly. Currently
//! just persistent high score storage (LocalStorage on web, an in-memory
//! cell on native and in tests).

pub mod storage;
