//! What a single player is allowed to see.
//!
//! [`PublicState`] is the snapshot handed to clients and bots: all shared
//! table information, the requester's own hand, and only card counts for
//! everyone else.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Color};
use super::declarations::DeclarationState;
use super::state::{GameState, PendingDraw, PlayerId, Status};
use super::turns::Direction;
use crate::errors::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub nickname: String,
    pub card_count: usize,
    pub score: u32,
    pub connected: bool,
    pub is_bot: bool,
    pub declaration: DeclarationState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicState {
    pub status: Status,
    pub top_card: Option<Card>,
    pub active_color: Option<Color>,
    pub direction: Direction,
    pub current_player: Option<PlayerId>,
    pub turn_order: Vec<PlayerId>,
    pub turn_no: u64,
    pub pending_draw: PendingDraw,
    pub draw_pile_count: usize,
    pub discard_count: usize,
    /// Roster order.
    pub players: Vec<PlayerSummary>,
    pub winner: Option<PlayerId>,
    pub my_hand: Vec<Card>,
}

impl PublicState {
    pub fn summary(&self, id: &PlayerId) -> Option<&PlayerSummary> {
        self.players.iter().find(|p| &p.id == id)
    }
}

/// Build the view of `requester`, who must be seated.
pub fn snapshot(state: &GameState, requester: &PlayerId) -> Result<PublicState, GameError> {
    let me = state.player(requester)?;
    let (direction, current_player, turn_order) = match &state.turns {
        Some(t) => (t.direction(), Some(t.current().clone()), t.order().to_vec()),
        None => (
            Direction::Clockwise,
            None,
            state.players.iter().map(|p| p.id.clone()).collect(),
        ),
    };

    let players = state
        .players
        .iter()
        .map(|p| PlayerSummary {
            id: p.id.clone(),
            nickname: p.nickname.clone(),
            card_count: p.hand.len(),
            score: p.score,
            connected: p.connected,
            is_bot: p.is_bot(),
            declaration: state.declarations.state(&p.id),
        })
        .collect();

    let mut my_hand = me.hand.clone();
    my_hand.sort_by_key(|c| c.id);

    Ok(PublicState {
        status: state.status,
        top_card: state.top_card().copied(),
        active_color: state.active_color(),
        direction,
        current_player: current_player.filter(|_| !state.status.is_terminal()),
        turn_order,
        turn_no: state.turn.turn_no,
        pending_draw: state.turn.pending,
        draw_pile_count: state.deck.draw_len(),
        discard_count: state.deck.discard_len(),
        players,
        winner: state.winner.clone(),
        my_hand,
    })
}
