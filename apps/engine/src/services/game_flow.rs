//! Game flow orchestration - the session state machine.
//!
//! [`GameFlow`] owns one session's [`GameState`] and is the only thing that
//! mutates it. Every command entry point validates fully before touching
//! state, so a rejected command is a no-op. Events queued while a command
//! runs are stamped with sequence numbers by [`GameFlow::drain_events`].
//!
//! The flow is synchronous and never reads a clock: the owner sets the game
//! clock with [`GameFlow::set_clock`] before each command. The realtime
//! worker drives it from tokio time, the simulator from a counter.

mod ai_coordinator;
mod lifecycle;
mod mutation;
mod player_actions;
mod timers;

use std::collections::{HashMap, HashSet};

use tracing::debug;

pub use timers::{ScheduledAction, TimedAction};

use crate::ai::{create_seeded_bot, Bot, HeuristicBot};
use crate::config::{GameConfig, MAX_PLAYERS};
use crate::domain::seed_derivation::{derive_autoplay_seed, derive_bot_seed, derive_deck_seed};
use crate::domain::{
    snapshot, Deck, EventEnvelope, GameState, PlayerId, PublicState, Role, RosterEntry, SessionId,
    Status,
};
use crate::errors::GameError;

pub struct GameFlow {
    session_id: SessionId,
    config: GameConfig,
    state: GameState,
    bots: HashMap<PlayerId, Bot>,
    /// Plays timed-out human turns.
    autoplay: Bot,
    next_seq: u64,
    clock_ms: u64,
    /// Clock reading when the session was paused.
    paused_at_ms: Option<u64>,
}

impl GameFlow {
    /// Create a session in `Lobby` with a fixed roster.
    ///
    /// `seed` drives the deck shuffle and every bot that has no seed of its
    /// own, so a session is reproducible from `(roster, config, seed)`.
    pub fn new(
        session_id: SessionId,
        roster: &[RosterEntry],
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if roster.len() > MAX_PLAYERS {
            return Err(GameError::invalid_config(format!(
                "at most {MAX_PLAYERS} players per session, got {}",
                roster.len()
            )));
        }
        let mut seen = HashSet::new();
        for entry in roster {
            if !seen.insert(&entry.id) {
                return Err(GameError::invalid_config(format!(
                    "duplicate player id {}",
                    entry.id
                )));
            }
        }

        let mut bots = HashMap::new();
        for (seat, entry) in roster.iter().enumerate() {
            if let Role::Bot(profile) = entry.role() {
                let bot_seed = profile
                    .seed
                    .unwrap_or_else(|| derive_bot_seed(seed, seat));
                bots.insert(entry.id.clone(), create_seeded_bot(&profile.strategy, bot_seed)?);
            }
        }
        let autoplay = create_seeded_bot(HeuristicBot::NAME, derive_autoplay_seed(seed))?;

        let deck = Deck::initialize(derive_deck_seed(seed));
        let state = GameState::new(roster, deck, config.declare_window_ms);
        debug!(session_id = %session_id, players = roster.len(), bots = bots.len(), "Session created");

        Ok(Self {
            session_id,
            config,
            state,
            bots,
            autoplay,
            next_seq: 1,
            clock_ms: 0,
            paused_at_ms: None,
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for staging specific table situations. Bypasses every
    /// rule check.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Move the game clock. It never runs backwards.
    pub fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }

    pub fn is_bot(&self, player: &PlayerId) -> bool {
        self.bots.contains_key(player)
    }

    /// The read-only view for `requester`.
    pub fn snapshot(&self, requester: &PlayerId) -> Result<PublicState, GameError> {
        snapshot(&self.state, requester)
    }

    /// Stamp queued events with the next sequence numbers and hand them out.
    pub fn drain_events(&mut self) -> Vec<EventEnvelope> {
        self.state
            .take_outbox()
            .into_iter()
            .map(|(audience, event)| {
                let seq = self.next_seq;
                self.next_seq += 1;
                EventEnvelope {
                    seq,
                    session_id: self.session_id,
                    audience,
                    event,
                }
            })
            .collect()
    }
}
