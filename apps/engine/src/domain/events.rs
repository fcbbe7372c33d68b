//! Outbound domain events.
//!
//! Events are queued on the session state while a command runs and are
//! stamped with a sequence number when the orchestrator drains them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_types::{Card, Color};
use super::declarations::PenaltyReason;
use super::state::PlayerId;
use super::turns::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who may see an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "playerId", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    All,
    Player(PlayerId),
}

impl Audience {
    pub fn includes(&self, player: &PlayerId) -> bool {
        match self {
            Audience::All => true,
            Audience::Player(p) => p == player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameEvent {
    GameStarted {
        top_card: Card,
        turn_order: Vec<PlayerId>,
        direction: Direction,
    },
    HandDealt {
        player_id: PlayerId,
        cards: Vec<Card>,
    },
    CardPlayed {
        player_id: PlayerId,
        card: Card,
        chosen_color: Option<Color>,
        /// Set when a Wild-Draw-Four was played while holding a matching card.
        bluff: bool,
    },
    CardDrawn {
        player_id: PlayerId,
        count: u32,
    },
    CardsReceived {
        player_id: PlayerId,
        cards: Vec<Card>,
    },
    TurnChanged {
        player_id: PlayerId,
    },
    Declared {
        player_id: PlayerId,
    },
    PenaltyApplied {
        player_id: PlayerId,
        count: u32,
        reason: PenaltyReason,
    },
    DirectionReversed {
        clockwise: bool,
    },
    GameEnded {
        winner_id: PlayerId,
        hand_points: BTreeMap<PlayerId, u32>,
    },
    GamePaused,
    GameResumed,
    GameAborted {
        reason: String,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "GAME_STARTED",
            GameEvent::HandDealt { .. } => "HAND_DEALT",
            GameEvent::CardPlayed { .. } => "CARD_PLAYED",
            GameEvent::CardDrawn { .. } => "CARD_DRAWN",
            GameEvent::CardsReceived { .. } => "CARDS_RECEIVED",
            GameEvent::TurnChanged { .. } => "TURN_CHANGED",
            GameEvent::Declared { .. } => "DECLARED",
            GameEvent::PenaltyApplied { .. } => "PENALTY_APPLIED",
            GameEvent::DirectionReversed { .. } => "DIRECTION_REVERSED",
            GameEvent::GameEnded { .. } => "GAME_ENDED",
            GameEvent::GamePaused => "GAME_PAUSED",
            GameEvent::GameResumed => "GAME_RESUMED",
            GameEvent::GameAborted { .. } => "GAME_ABORTED",
        }
    }
}

/// An event as delivered to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Strictly increasing per session, starting at 1.
    pub seq: u64,
    pub session_id: SessionId,
    pub audience: Audience,
    pub event: GameEvent,
}
