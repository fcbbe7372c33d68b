//! Card effects, applied after the played card is on the discard pile.

use std::collections::BTreeMap;

use tracing::info;

use super::cards_logic;
use super::cards_types::{Card, CardKind, Color};
use super::state::{GameState, PlayerId, Status};
use super::turns::Direction;
use super::validation::is_valid_color_choice;
use crate::errors::GameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub winner: PlayerId,
    /// Points left in every other player's hand.
    pub hand_points: BTreeMap<PlayerId, u32>,
    /// Sum credited to the winner.
    pub awarded: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    /// New direction when a Reverse was played.
    pub reversed: Option<Direction>,
    /// Player passed over by a Skip (or a two-player Reverse).
    pub skipped: Option<PlayerId>,
    pub game_over: Option<GameOverSummary>,
}

/// Check the nominated color before anything is mutated.
///
/// Wilds need a color. A color sent with a colored card is ignored.
pub fn resolve_color_choice(card: &Card, chosen: Option<Color>) -> Result<Option<Color>, GameError> {
    if !card.is_wild() {
        return Ok(None);
    }
    if !is_valid_color_choice(chosen) {
        return Err(GameError::invalid_color(format!(
            "{} requires a chosen color",
            card.face()
        )));
    }
    Ok(chosen)
}

/// Apply `card`, just played by `player`, to the session.
///
/// The win check runs first: an emptied hand ends the game and no turn
/// movement happens. Otherwise the sequencer is moved per the card kind.
/// The caller starts the next turn.
pub fn apply(state: &mut GameState, player: &PlayerId, card: &Card) -> Result<EffectOutcome, GameError> {
    if state.player(player)?.hand.is_empty() {
        let summary = finish_game(state, player)?;
        return Ok(EffectOutcome {
            game_over: Some(summary),
            ..EffectOutcome::default()
        });
    }

    let mut outcome = EffectOutcome::default();
    let turns = state.sequencer_mut()?;
    match card.kind {
        CardKind::Number(_) | CardKind::Wild => {
            turns.advance();
        }
        CardKind::Skip => {
            outcome.skipped = Some(turns.peek_next().clone());
            turns.skip_next();
        }
        CardKind::Reverse => {
            outcome.reversed = Some(turns.reverse());
            if turns.len() == 2 {
                outcome.skipped = Some(turns.peek_next().clone());
                turns.skip_next();
            } else {
                turns.advance();
            }
        }
        CardKind::DrawTwo | CardKind::WildDrawFour => {
            turns.advance();
            state.turn.pending.add(card.kind);
        }
    }
    Ok(outcome)
}

/// Record the winner, tally the other hands and credit the winner.
fn finish_game(state: &mut GameState, winner: &PlayerId) -> Result<GameOverSummary, GameError> {
    let hand_points: BTreeMap<PlayerId, u32> = state
        .players
        .iter()
        .filter(|p| &p.id != winner)
        .map(|p| (p.id.clone(), cards_logic::hand_points(&p.hand)))
        .collect();
    let awarded = hand_points.values().sum();
    state.player_mut(winner)?.score += awarded;
    state.status = Status::GameOver;
    state.winner = Some(winner.clone());
    state.turn.pending.clear();
    state.declarations.clear_all();
    info!(winner = %winner, awarded, "Game over");
    Ok(GameOverSummary {
        winner: winner.clone(),
        hand_points,
        awarded,
    })
}

/// Begin the turn of whoever the sequencer now points at.
///
/// With `skip_disconnected`, disconnected players are passed over while no
/// draw is pending. At least one player always gets the turn.
pub fn start_turn(
    state: &mut GameState,
    now_ms: u64,
    skip_disconnected: bool,
) -> Result<PlayerId, GameError> {
    if skip_disconnected && !state.turn.pending.is_active() {
        let seats = state.sequencer()?.len();
        for _ in 0..seats {
            let current = state.sequencer()?.current().clone();
            if state.player(&current)?.connected {
                break;
            }
            state.sequencer_mut()?.advance();
        }
    }
    state.turn.turn_no += 1;
    state.turn.turn_started_ms = now_ms;
    Ok(state.sequencer()?.current().clone())
}
