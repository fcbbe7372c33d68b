use tracing::{debug, info};

use super::GameFlow;
use crate::domain::effects::start_turn;
use crate::domain::{Audience, GameEvent, PlayerId, Status, TurnSequencer};
use crate::errors::GameError;

impl GameFlow {
    /// Deal and open play.
    ///
    /// Shuffles, deals `initial_hand_size` cards to each player in turn
    /// order (one player's whole hand at a time), turns up the opening
    /// discard and hands the turn to the first roster entry. An action card
    /// turned up first has no effect.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.state.status {
            Status::Lobby => {}
            Status::GameOver => return Err(GameError::GameAlreadyEnded),
            Status::Aborted => return Err(GameError::GameNotInProgress),
            _ => return Err(GameError::illegal_move("session already started")),
        }
        self.config.validate_roster_size(self.state.players.len())?;

        self.run_command("start", |flow| {
            let now = flow.clock_ms;
            let hand_size = flow.config.initial_hand_size;
            flow.state.status = Status::Dealing;
            flow.state.deck.shuffle();

            for idx in 0..flow.state.players.len() {
                let mut hand = Vec::with_capacity(hand_size);
                for _ in 0..hand_size {
                    hand.push(flow.state.deck.draw()?);
                }
                flow.state.players[idx].hand = hand;
            }
            let top = flow.state.deck.place_first_discard()?;

            let order: Vec<PlayerId> = flow.state.players.iter().map(|p| p.id.clone()).collect();
            let turns = TurnSequencer::new(order.clone()).ok_or(GameError::InsufficientPlayers {
                min: crate::config::MIN_PLAYERS,
                got: 0,
            })?;
            let direction = turns.direction();
            flow.state.turns = Some(turns);
            flow.state.status = Status::InProgress;

            flow.state.broadcast(GameEvent::GameStarted {
                top_card: top,
                turn_order: order,
                direction,
            });
            for idx in 0..flow.state.players.len() {
                let player = &flow.state.players[idx];
                let (id, cards, len) = (player.id.clone(), player.hand.clone(), player.hand.len());
                flow.state.emit(
                    Audience::Player(id.clone()),
                    GameEvent::HandDealt {
                        player_id: id.clone(),
                        cards,
                    },
                );
                flow.state.declarations.on_hand_changed(&id, len, now);
            }
            info!(
                session_id = %flow.session_id,
                players = flow.state.players.len(),
                top = %top,
                "Game started"
            );
            flow.begin_turn()
        })
    }

    /// Start the turn the sequencer now points at and announce it.
    pub(super) fn begin_turn(&mut self) -> Result<(), GameError> {
        let player = start_turn(&mut self.state, self.clock_ms, self.config.skip_disconnected)?;
        debug!(
            session_id = %self.session_id,
            player_id = %player,
            turn_no = self.state.turn.turn_no,
            "Turn changed"
        );
        self.state
            .broadcast(GameEvent::TurnChanged { player_id: player });
        Ok(())
    }

    /// Record a player's connectivity.
    ///
    /// With `pause_when_all_humans_disconnected`, losing the last connected
    /// human pauses the session and any human coming back resumes it.
    pub fn set_connected(&mut self, player: &PlayerId, connected: bool) -> Result<(), GameError> {
        if self.state.status == Status::GameOver {
            return Err(GameError::GameAlreadyEnded);
        }
        if self.state.status == Status::Aborted {
            return Err(GameError::GameNotInProgress);
        }
        self.state.player(player)?;

        self.run_command("set_connected", |flow| {
            flow.state.player_mut(player)?.connected = connected;
            debug!(session_id = %flow.session_id, player_id = %player, connected, "Connectivity changed");

            if !flow.config.pause_when_all_humans_disconnected {
                return Ok(());
            }
            let humans: Vec<bool> = flow
                .state
                .players
                .iter()
                .filter(|p| !p.is_bot())
                .map(|p| p.connected)
                .collect();
            let any_human_connected = humans.iter().any(|c| *c);
            match flow.state.status {
                Status::InProgress if !humans.is_empty() && !any_human_connected => {
                    flow.state.status = Status::Paused;
                    flow.paused_at_ms = Some(flow.clock_ms);
                    flow.state.broadcast(GameEvent::GamePaused);
                    info!(session_id = %flow.session_id, "Session paused, no humans connected");
                }
                Status::Paused if any_human_connected => {
                    let paused_for = flow
                        .paused_at_ms
                        .take()
                        .map_or(0, |at| flow.clock_ms.saturating_sub(at));
                    let shifted = flow.state.declarations.shift_windows(paused_for);
                    flow.state.status = Status::InProgress;
                    flow.state.turn.turn_started_ms = flow.clock_ms;
                    flow.state.broadcast(GameEvent::GameResumed);
                    info!(
                        session_id = %flow.session_id,
                        paused_for_ms = paused_for,
                        open_windows = shifted,
                        "Session resumed"
                    );
                }
                _ => {}
            }
            Ok(())
        })
    }
}
