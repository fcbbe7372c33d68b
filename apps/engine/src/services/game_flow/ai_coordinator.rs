use tracing::{debug, info};

use super::GameFlow;
use crate::ai::BotStrategy;
use crate::domain::{PlayerId, Status};
use crate::errors::GameError;

/// Who decides the move for the current seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    /// The seat's own bot.
    Seat,
    /// The fallback strategy standing in for a timed-out human.
    Autoplay,
}

impl GameFlow {
    /// Let the bot whose turn it is act.
    ///
    /// `turn_no` ties a delayed call to the turn it was scheduled for; a
    /// mismatch means the turn already moved on and nothing happens. Returns
    /// whether a move was made.
    pub fn play_bot_turn(&mut self, turn_no: Option<u64>) -> Result<bool, GameError> {
        if !self.is_turn_current(turn_no) {
            return Ok(false);
        }
        let Some(current) = self.state.current_player().cloned() else {
            return Ok(false);
        };
        if !self.is_bot(&current) {
            debug!(session_id = %self.session_id, player_id = %current, "Human player's turn, no bot move");
            return Ok(false);
        }
        self.take_turn(&current, Driver::Seat)?;
        Ok(true)
    }

    /// Play a human's turn for them after the turn timeout. Bot seats and
    /// stale turns are ignored.
    pub fn autoplay_timed_out_turn(&mut self, turn_no: u64) -> Result<bool, GameError> {
        if !self.is_turn_current(Some(turn_no)) {
            return Ok(false);
        }
        let Some(current) = self.state.current_player().cloned() else {
            return Ok(false);
        };
        if self.is_bot(&current) {
            return Ok(false);
        }
        info!(session_id = %self.session_id, player_id = %current, turn_no, "Turn timed out, auto-playing");
        self.take_turn(&current, Driver::Autoplay)?;
        Ok(true)
    }

    /// Play bot turns back to back until a human is to act or the game
    /// stops. Returns how many bot moves were made.
    pub fn run_bots(&mut self, max_moves: usize) -> Result<usize, GameError> {
        let mut moves = 0;
        while moves < max_moves && self.play_bot_turn(None)? {
            moves += 1;
        }
        Ok(moves)
    }

    fn is_turn_current(&self, turn_no: Option<u64>) -> bool {
        if self.state.status != Status::InProgress {
            return false;
        }
        match turn_no {
            Some(n) if n != self.state.turn.turn_no => {
                debug!(session_id = %self.session_id, scheduled = n, current = self.state.turn.turn_no, "Stale turn action ignored");
                false
            }
            _ => true,
        }
    }

    /// Choose and submit a move for `player` through the regular command
    /// entry points, so bots are held to the same rules as humans.
    fn take_turn(&mut self, player: &PlayerId, driver: Driver) -> Result<(), GameError> {
        let hand = self.state.player(player)?.hand.clone();
        let top = *self
            .state
            .top_card()
            .ok_or_else(|| GameError::illegal_move("no card on the discard pile"))?;
        let pending = self.state.turn.pending;

        let bot = match driver {
            Driver::Seat => match self.bots.get_mut(player) {
                Some(bot) => bot,
                None => return Ok(()),
            },
            Driver::Autoplay => &mut self.autoplay,
        };
        let Some(card) = bot.choose_move(&hand, &top, &pending, &self.config) else {
            debug!(session_id = %self.session_id, player_id = %player, ?driver, "No playable card, drawing");
            self.draw_card(player)?;
            return Ok(());
        };
        let color = if card.is_wild() {
            let rest: Vec<_> = hand.iter().filter(|c| c.id != card.id).copied().collect();
            Some(bot.choose_color(&rest))
        } else {
            None
        };
        debug!(session_id = %self.session_id, player_id = %player, card = %card, ?driver, "Bot chose move");
        self.play_card(player, card.id, color)?;

        if driver == Driver::Seat && self.state.status == Status::InProgress {
            let hand_after = self.state.player(player)?.hand.clone();
            let wants_to_declare = self
                .bots
                .get_mut(player)
                .is_some_and(|bot| bot.should_declare(&hand_after));
            if wants_to_declare {
                self.declare_last_card(player)?;
            }
        }
        Ok(())
    }
}
