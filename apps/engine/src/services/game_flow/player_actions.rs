use tracing::{debug, info, warn};

use super::GameFlow;
use crate::domain::effects::{self, resolve_color_choice};
use crate::domain::validation::{has_valid_card, is_valid_move, validate_wild_draw_four_legality};
use crate::domain::{
    Audience, Card, CardId, CardKind, Color, GameEvent, PenaltyReason, PlayerId,
};
use crate::errors::GameError;

impl GameFlow {
    /// Play a card from `player`'s hand.
    ///
    /// # Errors
    /// - `NotPlayersTurn` when someone else is to act
    /// - `CardNotInHand` when `card_id` is not held
    /// - `IllegalMove` when the card cannot follow the top or the pending draw
    /// - `InvalidColorChoice` for a wild without a nominated color
    pub fn play_card(
        &mut self,
        player: &PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    ) -> Result<(), GameError> {
        self.state.ensure_in_progress()?;
        self.ensure_turn(player)?;
        let hand = &self.state.player(player)?.hand;
        let card = *hand
            .iter()
            .find(|c| c.id == card_id)
            .ok_or_else(|| GameError::card_not_in_hand(format!("{player} does not hold card {}", card_id.0)))?;
        let top = *self
            .state
            .top_card()
            .ok_or_else(|| GameError::illegal_move("no card on the discard pile"))?;
        if !is_valid_move(&card, &top, &self.state.turn.pending, &self.config) {
            return Err(GameError::illegal_move(format!(
                "{} cannot be played on {}{}",
                card.face(),
                top.face(),
                if self.state.turn.pending.is_active() {
                    format!(" with {} cards pending", self.state.turn.pending.amount)
                } else {
                    String::new()
                }
            )));
        }
        let color = resolve_color_choice(&card, chosen_color)?;
        let bluff = card.kind == CardKind::WildDrawFour
            && !validate_wild_draw_four_legality(&card, &top, hand);

        self.run_command("play_card", |flow| {
            let now = flow.clock_ms;
            let owner = flow.state.player_mut(player)?;
            owner
                .take_card(card_id)
                .ok_or_else(|| GameError::card_not_in_hand(format!("card {}", card_id.0)))?;
            let remaining = owner.hand.len();
            let placed = match color {
                Some(c) => card.with_color(c),
                None => card,
            };
            flow.state.deck.discard(placed);
            flow.state.broadcast(GameEvent::CardPlayed {
                player_id: player.clone(),
                card: placed,
                chosen_color: color,
                bluff,
            });
            debug!(session_id = %flow.session_id, player_id = %player, card = %placed, remaining, bluff, "Card played");
            if flow.state.declarations.on_hand_changed(player, remaining, now).is_some() {
                debug!(session_id = %flow.session_id, player_id = %player, "Declaration window opened");
            }

            let outcome = effects::apply(&mut flow.state, player, &placed)?;
            if let Some(direction) = outcome.reversed {
                flow.state.broadcast(GameEvent::DirectionReversed {
                    clockwise: direction.is_clockwise(),
                });
            }
            if let Some(summary) = outcome.game_over {
                info!(
                    session_id = %flow.session_id,
                    winner = %summary.winner,
                    awarded = summary.awarded,
                    "Round won"
                );
                flow.state.broadcast(GameEvent::GameEnded {
                    winner_id: summary.winner,
                    hand_points: summary.hand_points,
                });
                return Ok(());
            }
            flow.begin_turn()
        })
    }

    /// Draw for the turn: the whole pending obligation, or one card.
    ///
    /// Drawing ends the turn. Returns how many cards were drawn.
    pub fn draw_card(&mut self, player: &PlayerId) -> Result<u32, GameError> {
        self.state.ensure_in_progress()?;
        self.ensure_turn(player)?;
        let pending = self.state.turn.pending;
        if self.config.forced_draw_only && !pending.is_active() {
            let hand = &self.state.player(player)?.hand;
            if let Some(top) = self.state.top_card() {
                if has_valid_card(hand, top, &pending, &self.config) {
                    return Err(GameError::illegal_move(
                        "drawing is only allowed without a playable card",
                    ));
                }
            }
        }
        let count = pending.amount.max(1);

        self.run_command("draw_card", |flow| {
            let cards = flow.draw_into_hand(player, count)?;
            flow.state.turn.pending.clear();
            flow.state.broadcast(GameEvent::CardDrawn {
                player_id: player.clone(),
                count,
            });
            flow.state.emit(
                Audience::Player(player.clone()),
                GameEvent::CardsReceived {
                    player_id: player.clone(),
                    cards,
                },
            );
            debug!(session_id = %flow.session_id, player_id = %player, count, "Cards drawn");
            flow.state.sequencer_mut()?.advance();
            flow.begin_turn()?;
            Ok(count)
        })
    }

    /// Announce a last card. Returns whether the declaration was accepted.
    pub fn declare_last_card(&mut self, player: &PlayerId) -> Result<bool, GameError> {
        self.state.ensure_in_progress()?;
        self.state.player(player)?;
        if !self.state.declarations.is_catchable(player) {
            warn!(session_id = %self.session_id, player_id = %player, "Declaration rejected, not awaiting");
            return Ok(false);
        }
        self.run_command("declare_last_card", |flow| {
            flow.state.declarations.declare(player);
            flow.state.broadcast(GameEvent::Declared {
                player_id: player.clone(),
            });
            info!(session_id = %flow.session_id, player_id = %player, "Last card declared");
            Ok(true)
        })
    }

    /// Catch a player who has not declared their last card. Returns whether
    /// the catch succeeded; on success the accused draws the penalty.
    pub fn catch_missed_declaration(
        &mut self,
        accuser: &PlayerId,
        accused: &PlayerId,
    ) -> Result<bool, GameError> {
        self.state.ensure_in_progress()?;
        self.state.player(accuser)?;
        self.state.player(accused)?;
        if accuser == accused || !self.state.declarations.is_catchable(accused) {
            warn!(
                session_id = %self.session_id,
                accuser = %accuser,
                accused = %accused,
                "Catch rejected"
            );
            return Ok(false);
        }
        self.run_command("catch_missed_declaration", |flow| {
            flow.state.declarations.catch(accuser, accused);
            flow.apply_penalty(accused, PenaltyReason::Caught)?;
            Ok(true)
        })
    }

    /// Close one declaration window if it is still the one identified by
    /// `epoch` and has run out. Returns whether a penalty was applied.
    pub fn expire_declaration(&mut self, player: &PlayerId, epoch: u64) -> Result<bool, GameError> {
        self.state.ensure_in_progress()?;
        self.state.player(player)?;
        let now = self.clock_ms;
        if !self.state.declarations.is_expired(player, epoch, now) {
            return Ok(false);
        }
        self.run_command("expire_declaration", |flow| {
            flow.state.declarations.expire(player, epoch, now);
            flow.apply_penalty(player, PenaltyReason::Expired)?;
            Ok(true)
        })
    }

    /// Penalize every player whose window has run out at the current clock.
    pub fn sweep_declarations(&mut self) -> Result<Vec<PlayerId>, GameError> {
        self.state.ensure_in_progress()?;
        let now = self.clock_ms;
        self.run_command("sweep_declarations", |flow| {
            let expired = flow.state.declarations.expired(now);
            for player in &expired {
                flow.apply_penalty(player, PenaltyReason::Expired)?;
            }
            Ok(expired)
        })
    }

    pub(super) fn ensure_turn(&self, player: &PlayerId) -> Result<(), GameError> {
        self.state.player(player)?;
        let current = self.state.sequencer()?.current();
        if current != player {
            return Err(GameError::not_players_turn(format!(
                "{player} tried to act during {current}'s turn"
            )));
        }
        Ok(())
    }

    /// Draw `count` cards into `player`'s hand and update their declaration
    /// state.
    fn draw_into_hand(&mut self, player: &PlayerId, count: u32) -> Result<Vec<Card>, GameError> {
        let mut cards = Vec::with_capacity(count as usize);
        for _ in 0..count {
            cards.push(self.state.deck.draw()?);
        }
        let hand = &mut self.state.player_mut(player)?.hand;
        hand.extend_from_slice(&cards);
        let len = hand.len();
        self.state
            .declarations
            .on_hand_changed(player, len, self.clock_ms);
        Ok(cards)
    }

    fn apply_penalty(&mut self, player: &PlayerId, reason: PenaltyReason) -> Result<(), GameError> {
        let count = self.config.penalty_card_count;
        let cards = self.draw_into_hand(player, count)?;
        self.state.broadcast(GameEvent::PenaltyApplied {
            player_id: player.clone(),
            count,
            reason,
        });
        self.state.emit(
            Audience::Player(player.clone()),
            GameEvent::CardsReceived {
                player_id: player.clone(),
                cards,
            },
        );
        info!(session_id = %self.session_id, player_id = %player, count, ?reason, "Penalty applied");
        Ok(())
    }
}
