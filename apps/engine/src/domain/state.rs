use std::fmt;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, CardId, CardKind, Color};
use super::declarations::DeclarationTracker;
use super::deck::{Deck, DECK_SIZE};
use super::events::{Audience, GameEvent};
use super::turns::TurnSequencer;
use crate::errors::GameError;

/// Opaque player identity supplied by the caller's roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a bot seat is driven: a strategy name resolved by the AI registry,
/// plus an optional fixed seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotProfile {
    pub strategy: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            strategy: "heuristic".to_owned(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Human,
    Bot(BotProfile),
}

/// One roster entry as supplied when a session is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: PlayerId,
    pub nickname: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub bot: Option<BotProfile>,
}

impl RosterEntry {
    pub fn human(id: &str, nickname: &str) -> Self {
        Self {
            id: PlayerId::from(id),
            nickname: nickname.to_owned(),
            is_bot: false,
            bot: None,
        }
    }

    pub fn bot(id: &str, nickname: &str) -> Self {
        Self {
            id: PlayerId::from(id),
            nickname: nickname.to_owned(),
            is_bot: true,
            bot: None,
        }
    }

    pub fn role(&self) -> Role {
        if self.is_bot || self.bot.is_some() {
            Role::Bot(self.bot.clone().unwrap_or_default())
        } else {
            Role::Human
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    pub hand: Vec<Card>,
    /// Points accumulated from won rounds.
    pub score: u32,
    pub connected: bool,
    pub role: Role,
}

impl Player {
    pub fn from_roster(entry: &RosterEntry) -> Self {
        Self {
            id: entry.id.clone(),
            nickname: entry.nickname.clone(),
            hand: Vec::new(),
            score: 0,
            connected: true,
            role: entry.role(),
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.role, Role::Bot(_))
    }

    pub fn holds(&self, card_id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Remove a card by identity. Identical faces are never confused.
    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == card_id)?;
        Some(self.hand.remove(pos))
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Lobby,
    /// Transient while hands are dealt inside `start()`.
    Dealing,
    InProgress,
    Paused,
    GameOver,
    Aborted,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::GameOver | Status::Aborted)
    }
}

/// Accumulated draw obligation from stacked penalty cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDraw {
    pub amount: u32,
    /// Kind of the most recent penalty card feeding the obligation.
    pub kind: Option<CardKind>,
}

impl PendingDraw {
    pub fn is_active(&self) -> bool {
        self.amount > 0
    }

    pub fn add(&mut self, kind: CardKind) {
        self.amount += kind.penalty_amount();
        self.kind = Some(kind);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnState {
    pub pending: PendingDraw,
    /// Game clock reading when the current turn began.
    pub turn_started_ms: u64,
    /// Incremented on every turn change; delayed commands are tagged with it.
    pub turn_no: u64,
}

/// Complete state of one game session. Pure data plus invariant helpers;
/// all rule decisions live in the validator, effect processor and
/// orchestrator.
#[derive(Debug, Clone)]
pub struct GameState {
    pub status: Status,
    /// Roster order, which is also the turn order.
    pub players: Vec<Player>,
    pub deck: Deck,
    /// Built by `start()`.
    pub turns: Option<TurnSequencer>,
    pub turn: TurnState,
    pub declarations: DeclarationTracker,
    pub winner: Option<PlayerId>,
    outbox: Vec<(Audience, GameEvent)>,
}

impl GameState {
    pub fn new(roster: &[RosterEntry], deck: Deck, declare_window_ms: u64) -> Self {
        let players: Vec<Player> = roster.iter().map(Player::from_roster).collect();
        let declarations =
            DeclarationTracker::new(players.iter().map(|p| p.id.clone()), declare_window_ms);
        Self {
            status: Status::Lobby,
            players,
            deck,
            turns: None,
            turn: TurnState::default(),
            declarations,
            winner: None,
            outbox: Vec::new(),
        }
    }

    /// Commands that change the game require `InProgress`.
    pub fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            Status::InProgress => Ok(()),
            Status::GameOver => Err(GameError::GameAlreadyEnded),
            _ => Err(GameError::GameNotInProgress),
        }
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| GameError::unknown_player(id.as_str()))
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| GameError::unknown_player(id.as_str()))
    }

    pub fn sequencer(&self) -> Result<&TurnSequencer, GameError> {
        self.turns.as_ref().ok_or(GameError::GameNotInProgress)
    }

    pub fn sequencer_mut(&mut self) -> Result<&mut TurnSequencer, GameError> {
        self.turns.as_mut().ok_or(GameError::GameNotInProgress)
    }

    pub fn current_player(&self) -> Option<&PlayerId> {
        self.turns.as_ref().map(|t| t.current())
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.deck.top()
    }

    /// Color in force: the top discard's color, which for a wild is the
    /// nominated one.
    pub fn active_color(&self) -> Option<Color> {
        self.deck.top().and_then(|c| c.color)
    }

    pub fn emit(&mut self, audience: Audience, event: GameEvent) {
        self.outbox.push((audience, event));
    }

    pub fn broadcast(&mut self, event: GameEvent) {
        self.emit(Audience::All, event);
    }

    pub fn take_outbox(&mut self) -> Vec<(Audience, GameEvent)> {
        std::mem::take(&mut self.outbox)
    }

    pub fn outbox_len(&self) -> usize {
        self.outbox.len()
    }

    /// Drop events queued after `len`. Used when a command fails half-way.
    pub fn truncate_outbox(&mut self, len: usize) {
        self.outbox.truncate(len);
    }

    /// Cards across both piles and every hand.
    pub fn total_cards(&self) -> usize {
        self.deck.pile_len() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Every card of the fixed set is in exactly one place.
    pub fn conservation_holds(&self) -> bool {
        if self.total_cards() != DECK_SIZE {
            return false;
        }
        let mut seen = [false; DECK_SIZE];
        let all = self
            .deck
            .draw_pile()
            .iter()
            .chain(self.deck.discard_pile())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()));
        for card in all {
            let idx = usize::from(card.id.0);
            if idx >= DECK_SIZE || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }
}
