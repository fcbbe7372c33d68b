use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::info;

use super::session::{spawn_session, SessionHandle};
use crate::config::GameConfig;
use crate::domain::{EventEnvelope, RosterEntry, SessionId};
use crate::errors::GameError;
use crate::services::game_flow::GameFlow;

/// Process-wide registry of running sessions.
///
/// Sessions share nothing; the map is only how callers find a session's
/// queue. A session stays registered after its game ends until the outcome
/// has been acknowledged.
#[derive(Default)]
pub struct SessionSupervisor {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl SessionSupervisor {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a session in `Lobby` and spawn its worker.
    ///
    /// Without a `seed` one is taken from the OS. The returned receiver is
    /// the session's only event sink.
    pub fn create(
        &self,
        roster: &[RosterEntry],
        config: GameConfig,
        seed: Option<u64>,
    ) -> Result<(SessionHandle, mpsc::UnboundedReceiver<EventEnvelope>), GameError> {
        let session_id = SessionId::new();
        let seed = seed.unwrap_or_else(rand::random);
        let flow = GameFlow::new(session_id, roster, config, seed)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (handle, _task) = spawn_session(flow, events_tx);
        self.sessions.insert(session_id, handle.clone());
        info!(session_id = %session_id, seed, players = roster.len(), "Session registered");
        Ok((handle, events_rx))
    }

    /// Create a session and deal. A session that fails to start is removed
    /// again.
    pub async fn start_session(
        &self,
        roster: &[RosterEntry],
        config: GameConfig,
        seed: Option<u64>,
    ) -> Result<(SessionHandle, mpsc::UnboundedReceiver<EventEnvelope>), GameError> {
        let (handle, events) = self.create(roster, config, seed)?;
        if let Err(err) = handle.start().await {
            self.remove(handle.session_id());
            return Err(err);
        }
        Ok((handle, events))
    }

    pub fn get(&self, session_id: SessionId) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))
    }

    /// The external layer has stored the outcome; drop the session.
    ///
    /// Only finished sessions can be acknowledged.
    pub fn acknowledge_ended(&self, session_id: SessionId) -> Result<(), GameError> {
        let handle = self.get(session_id)?;
        if !handle.status().is_terminal() {
            return Err(GameError::illegal_move(format!(
                "session {session_id} has not ended"
            )));
        }
        self.remove(session_id);
        info!(session_id = %session_id, status = ?handle.status(), "Session outcome acknowledged");
        Ok(())
    }

    /// Cancel a session's timers and refuse anything further.
    pub fn teardown(&self, session_id: SessionId) -> Result<(), GameError> {
        if !self.remove(session_id) {
            return Err(GameError::SessionNotFound(session_id.to_string()));
        }
        info!(session_id = %session_id, "Session torn down");
        Ok(())
    }

    pub fn shutdown(&self) {
        let ids: Vec<SessionId> = self.session_ids();
        for id in ids {
            self.remove(id);
        }
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn remove(&self, session_id: SessionId) -> bool {
        match self.sessions.remove(&session_id) {
            Some((_, handle)) => {
                handle.teardown();
                true
            }
            None => false,
        }
    }
}
