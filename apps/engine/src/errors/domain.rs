//! Domain-level error type used across the engine.
//!
//! This error type is transport-agnostic. Callers receive it from every
//! command entry point and map it to their own responses through
//! [`GameError::code`].

use thiserror::Error;

use super::error_code::ErrorCode;

/// Central engine error type.
///
/// Every variant except [`GameError::DeckExhausted`] is a rejected command:
/// the session is left untouched and no event is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not this player's turn: {0}")]
    NotPlayersTurn(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("invalid color choice: {0}")]
    InvalidColorChoice(String),
    #[error("card not in hand: {0}")]
    CardNotInHand(String),
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("game not in progress")]
    GameNotInProgress,
    #[error("game already ended")]
    GameAlreadyEnded,
    #[error("insufficient players: need at least {min}, got {got}")]
    InsufficientPlayers { min: usize, got: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("session closed")]
    SessionClosed,
    /// Both piles are empty. Card bookkeeping is corrupt; the session aborts.
    #[error("deck exhausted: {0}")]
    DeckExhausted(String),
}

impl GameError {
    pub fn not_players_turn(detail: impl Into<String>) -> Self {
        Self::NotPlayersTurn(detail.into())
    }
    pub fn illegal_move(detail: impl Into<String>) -> Self {
        Self::IllegalMove(detail.into())
    }
    pub fn invalid_color(detail: impl Into<String>) -> Self {
        Self::InvalidColorChoice(detail.into())
    }
    pub fn card_not_in_hand(detail: impl Into<String>) -> Self {
        Self::CardNotInHand(detail.into())
    }
    pub fn unknown_player(detail: impl Into<String>) -> Self {
        Self::UnknownPlayer(detail.into())
    }
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig(detail.into())
    }
    pub fn deck_exhausted(detail: impl Into<String>) -> Self {
        Self::DeckExhausted(detail.into())
    }

    /// Fatal errors abort the session instead of being returned as a no-op.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DeckExhausted(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotPlayersTurn(_) => ErrorCode::NotPlayersTurn,
            Self::IllegalMove(_) => ErrorCode::IllegalMove,
            Self::InvalidColorChoice(_) => ErrorCode::InvalidColorChoice,
            Self::CardNotInHand(_) => ErrorCode::CardNotInHand,
            Self::UnknownPlayer(_) => ErrorCode::UnknownPlayer,
            Self::GameNotInProgress => ErrorCode::GameNotInProgress,
            Self::GameAlreadyEnded => ErrorCode::GameAlreadyEnded,
            Self::InsufficientPlayers { .. } => ErrorCode::InsufficientPlayers,
            Self::InvalidConfig(_) => ErrorCode::ConfigError,
            Self::SessionNotFound(_) => ErrorCode::SessionNotFound,
            Self::SessionClosed => ErrorCode::SessionClosed,
            Self::DeckExhausted(_) => ErrorCode::DeckExhausted,
        }
    }
}
