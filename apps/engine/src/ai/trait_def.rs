//! Bot strategy trait definition.

use thiserror::Error;

use crate::config::GameConfig;
use crate::domain::{Card, Color, PendingDraw};
use crate::errors::GameError;

/// Errors raised while building a bot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("unknown bot strategy: {0}")]
    UnknownStrategy(String),
    #[error("invalid bot config: {0}")]
    InvalidConfig(String),
}

impl From<BotError> for GameError {
    fn from(err: BotError) -> Self {
        GameError::invalid_config(err.to_string())
    }
}

/// Decision-making for a bot seat.
///
/// Implementations only ever pick from the validator's legal moves, so a
/// bot can never be the source of a rejected command.
pub trait BotStrategy {
    /// Pick a card to play, or `None` to draw.
    fn choose_move(
        &mut self,
        hand: &[Card],
        top: &Card,
        pending: &PendingDraw,
        rules: &GameConfig,
    ) -> Option<Card>;

    /// Color to nominate after playing a wild.
    fn choose_color(&mut self, hand: &[Card]) -> Color;

    /// Whether to declare a last card. Only ever true with exactly one card.
    fn should_declare(&mut self, hand: &[Card]) -> bool;
}
