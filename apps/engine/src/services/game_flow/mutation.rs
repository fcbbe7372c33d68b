use tracing::{debug, error};

use super::GameFlow;
use crate::domain::{GameEvent, Status};
use crate::errors::GameError;

impl GameFlow {
    /// Run one command against the session.
    ///
    /// Rejected commands leave no events behind. A fatal error, including
    /// card bookkeeping found broken after the command ran, discards the
    /// command's partial events, aborts the session and is returned to the
    /// caller.
    pub(super) fn run_command<T>(
        &mut self,
        command: &'static str,
        mutation: impl FnOnce(&mut Self) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mark = self.state.outbox_len();
        match mutation(self) {
            Ok(_) if !self.state.conservation_holds() => {
                let err = GameError::deck_exhausted(format!(
                    "card conservation violated during {command} ({} cards accounted for)",
                    self.state.total_cards()
                ));
                self.state.truncate_outbox(mark);
                error!(session_id = %self.session_id, command, error = %err, "Card conservation violated, aborting session");
                self.abort(err.to_string());
                Err(err)
            }
            Ok(value) => Ok(value),
            Err(err) if err.is_fatal() => {
                self.state.truncate_outbox(mark);
                error!(session_id = %self.session_id, command, error = %err, "Fatal error, aborting session");
                self.abort(err.to_string());
                Err(err)
            }
            Err(err) => {
                self.state.truncate_outbox(mark);
                debug!(session_id = %self.session_id, command, code = %err.code(), "Command rejected");
                Err(err)
            }
        }
    }

    /// Move to `Aborted` and tell everyone why. No-op once terminal.
    pub fn abort(&mut self, reason: impl Into<String>) {
        if self.state.status.is_terminal() {
            return;
        }
        self.state.status = Status::Aborted;
        self.state.declarations.clear_all();
        self.state.broadcast(GameEvent::GameAborted {
            reason: reason.into(),
        });
    }
}
