use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Rules and timing options for one session.
///
/// Field names deserialize in camelCase so the external layer can pass the
/// room configuration through unchanged. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Cards dealt to each player at start.
    pub initial_hand_size: usize,
    /// Whether a pending draw obligation can be passed on by stacking.
    pub draw_stacking_enabled: bool,
    /// Cards drawn as a missed-declaration penalty.
    pub penalty_card_count: u32,
    /// Time a player with one card has to declare.
    pub declare_window_ms: u64,
    /// Whether DrawTwo and WildDrawFour may stack onto each other.
    pub allow_cross_kind_stacking: bool,
    /// Reject voluntary draws while the player holds a playable card.
    pub forced_draw_only: bool,
    /// Pass over disconnected players when advancing the turn.
    pub skip_disconnected: bool,
    /// Pause the session while every human is disconnected.
    pub pause_when_all_humans_disconnected: bool,
    /// Auto-play a human's turn after this long. `None` disables it.
    pub turn_timeout_ms: Option<u64>,
    /// Delay before a bot acts on its turn.
    pub bot_move_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_hand_size: 7,
            draw_stacking_enabled: true,
            penalty_card_count: 2,
            declare_window_ms: 3000,
            allow_cross_kind_stacking: false,
            forced_draw_only: false,
            skip_disconnected: false,
            pause_when_all_humans_disconnected: true,
            turn_timeout_ms: None,
            bot_move_delay_ms: 0,
        }
    }
}

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const MAX_HAND_SIZE: usize = 10;
pub const MAX_PENALTY_CARDS: u32 = 10;

impl GameConfig {
    /// Defaults overridden by `ONE_*` environment variables, then validated.
    pub fn from_env() -> Result<Self, GameError> {
        let mut config = Self::default();
        if let Some(v) = parse_var("ONE_INITIAL_HAND_SIZE")? {
            config.initial_hand_size = v;
        }
        if let Some(v) = parse_var("ONE_DRAW_STACKING")? {
            config.draw_stacking_enabled = v;
        }
        if let Some(v) = parse_var("ONE_PENALTY_CARDS")? {
            config.penalty_card_count = v;
        }
        if let Some(v) = parse_var("ONE_DECLARE_WINDOW_MS")? {
            config.declare_window_ms = v;
        }
        if let Some(v) = parse_var("ONE_CROSS_KIND_STACKING")? {
            config.allow_cross_kind_stacking = v;
        }
        if let Some(v) = parse_var("ONE_TURN_TIMEOUT_MS")? {
            config.turn_timeout_ms = Some(v);
        }
        if let Some(v) = parse_var("ONE_BOT_DELAY_MS")? {
            config.bot_move_delay_ms = v;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a game unplayable with one deck.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_HAND_SIZE).contains(&self.initial_hand_size) {
            return Err(GameError::invalid_config(format!(
                "initialHandSize must be 1..={MAX_HAND_SIZE}, got {}",
                self.initial_hand_size
            )));
        }
        if !(1..=MAX_PENALTY_CARDS).contains(&self.penalty_card_count) {
            return Err(GameError::invalid_config(format!(
                "penaltyCardCount must be 1..={MAX_PENALTY_CARDS}, got {}",
                self.penalty_card_count
            )));
        }
        if self.declare_window_ms == 0 {
            return Err(GameError::invalid_config(
                "declareWindowMs must be positive",
            ));
        }
        if self.turn_timeout_ms == Some(0) {
            return Err(GameError::invalid_config(
                "turnTimeoutMs must be positive when set",
            ));
        }
        Ok(())
    }

    /// Whether a roster of `players` fits the deck with this hand size.
    pub fn validate_roster_size(&self, players: usize) -> Result<(), GameError> {
        if players < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers {
                min: MIN_PLAYERS,
                got: players,
            });
        }
        if players > MAX_PLAYERS {
            return Err(GameError::invalid_config(format!(
                "at most {MAX_PLAYERS} players per session, got {players}"
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, GameError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GameError::invalid_config(format!("{name} has invalid value '{raw}'"))),
        _ => Ok(None),
    }
}
