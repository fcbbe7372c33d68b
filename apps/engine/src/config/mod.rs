//! Session configuration.

pub mod game;

pub use game::{GameConfig, MAX_HAND_SIZE, MAX_PENALTY_CARDS, MAX_PLAYERS, MIN_PLAYERS};
