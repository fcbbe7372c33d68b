//! RNG seed derivation utilities for deterministic sessions.
//!
//! Provides functions to derive unique-but-deterministic seeds for the
//! different random streams of a session (deck shuffling, per-bot decisions)
//! from one base session seed.

/// Derive the seed for the session deck.
pub fn derive_deck_seed(session_seed: u64) -> u64 {
    session_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(2) // Offset to distinguish from bot seeds
}

/// Derive the seed for the bot seated at `seat` (0-based turn order).
///
/// - Same session + seat = same decisions
/// - Different seats get different streams even for identical profiles
pub fn derive_bot_seed(session_seed: u64, seat: usize) -> u64 {
    session_seed
        .wrapping_add((seat as u64).wrapping_mul(10_000))
        .wrapping_add(1) // Offset to distinguish from the deck seed
}

/// Seed for the fallback strategy that plays a timed-out human's turn.
pub fn derive_autoplay_seed(session_seed: u64) -> u64 {
    session_seed.rotate_left(17).wrapping_add(3)
}
