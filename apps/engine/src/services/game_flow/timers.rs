//! Delayed actions the session owner must schedule.
//!
//! After each command the owner asks for [`GameFlow::timer_plan`] and
//! reconciles it with what is already scheduled: new entries are started,
//! entries no longer in the plan are superseded. Each action carries the
//! turn number or declaration epoch it was planned for, so one that fires
//! late is simply ignored.

use tracing::debug;

use super::GameFlow;
use crate::domain::{DeclarationState, PlayerId, Status};
use crate::errors::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimedAction {
    /// A bot's move for the given turn.
    BotTurn { turn_no: u64 },
    /// A human ran out of time on the given turn.
    TurnTimeout { turn_no: u64 },
    /// A declaration window closes.
    DeclarationExpiry { player_id: PlayerId, epoch: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAction {
    /// Game clock reading at which the action is due.
    pub due_ms: u64,
    pub action: TimedAction,
}

impl GameFlow {
    /// Everything that should be pending right now. Empty unless the session
    /// is in progress.
    pub fn timer_plan(&self) -> Vec<ScheduledAction> {
        let mut plan = Vec::new();
        if self.state.status != Status::InProgress {
            return plan;
        }
        let turn = self.state.turn;
        if let Some(current) = self.state.current_player() {
            if self.is_bot(current) {
                plan.push(ScheduledAction {
                    due_ms: turn.turn_started_ms + self.config.bot_move_delay_ms,
                    action: TimedAction::BotTurn {
                        turn_no: turn.turn_no,
                    },
                });
            } else if let Some(timeout) = self.config.turn_timeout_ms {
                plan.push(ScheduledAction {
                    due_ms: turn.turn_started_ms + timeout,
                    action: TimedAction::TurnTimeout {
                        turn_no: turn.turn_no,
                    },
                });
            }
        }
        for player in &self.state.players {
            if let DeclarationState::AwaitingDeclaration { epoch, .. } =
                self.state.declarations.state(&player.id)
            {
                if let Some(due_ms) = self.state.declarations.deadline(&player.id) {
                    plan.push(ScheduledAction {
                        due_ms,
                        action: TimedAction::DeclarationExpiry {
                            player_id: player.id.clone(),
                            epoch,
                        },
                    });
                }
            }
        }
        plan
    }

    /// Carry out a fired action. Returns whether it still applied.
    pub fn run_timed_action(&mut self, action: &TimedAction) -> Result<bool, GameError> {
        if self.state.status != Status::InProgress {
            debug!(session_id = %self.session_id, ?action, "Timed action ignored, not in progress");
            return Ok(false);
        }
        match action {
            TimedAction::BotTurn { turn_no } => self.play_bot_turn(Some(*turn_no)),
            TimedAction::TurnTimeout { turn_no } => self.autoplay_timed_out_turn(*turn_no),
            TimedAction::DeclarationExpiry { player_id, epoch } => {
                self.expire_declaration(player_id, *epoch)
            }
        }
    }
}
