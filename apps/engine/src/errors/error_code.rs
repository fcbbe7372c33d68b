//! Error codes surfaced by the engine.
//!
//! This module defines all error codes the engine hands to the external
//! layer. Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings the
//! notifier forwards to clients.

use core::fmt;

/// Centralized error codes for engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Command validation
    /// Command issued by someone other than the active player
    NotPlayersTurn,
    /// Card rejected by the move validator
    IllegalMove,
    /// Wild played without a concrete color
    InvalidColorChoice,
    /// Card id is not in the acting player's hand
    CardNotInHand,
    /// Player id is not part of the roster
    UnknownPlayer,

    // Lifecycle
    /// Session is not accepting game commands
    GameNotInProgress,
    /// Session reached its terminal state
    GameAlreadyEnded,
    /// Fewer than two players at start
    InsufficientPlayers,

    // Registry / runtime
    /// No session registered under the given id
    SessionNotFound,
    /// Session worker stopped before replying
    SessionClosed,
    /// Configuration failed validation
    ConfigError,

    // Fatal
    /// Conservation invariant violated: both piles empty
    DeckExhausted,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Command validation
            Self::NotPlayersTurn => "NOT_PLAYERS_TURN",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::InvalidColorChoice => "INVALID_COLOR_CHOICE",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",

            // Lifecycle
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::GameAlreadyEnded => "GAME_ALREADY_ENDED",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",

            // Registry / runtime
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SessionClosed => "SESSION_CLOSED",
            Self::ConfigError => "CONFIG_ERROR",

            // Fatal
            Self::DeckExhausted => "DECK_EXHAUSTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
