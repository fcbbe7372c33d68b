//! Last-card declaration tracking.
//!
//! A player who is left holding exactly one card must declare it within a
//! window. Until they do, any other player may catch them. Time is a game
//! clock in milliseconds supplied by the caller, so this module never reads
//! a wall clock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclarationState {
    #[default]
    None,
    /// Holding one card without having declared. `epoch` identifies this
    /// particular entry so stale expiry timers can be told apart.
    #[serde(rename_all = "camelCase")]
    AwaitingDeclaration { since_ms: u64, epoch: u64 },
    Declared,
}

/// Why a penalty draw was imposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyReason {
    Expired,
    Caught,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationTracker {
    states: HashMap<PlayerId, DeclarationState>,
    window_ms: u64,
    next_epoch: u64,
}

impl DeclarationTracker {
    pub fn new(players: impl IntoIterator<Item = PlayerId>, window_ms: u64) -> Self {
        Self {
            states: players
                .into_iter()
                .map(|p| (p, DeclarationState::None))
                .collect(),
            window_ms,
            next_epoch: 1,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn state(&self, player: &PlayerId) -> DeclarationState {
        self.states.get(player).copied().unwrap_or_default()
    }

    /// React to a hand size change.
    ///
    /// Reaching one card opens a window and returns its epoch. Any other
    /// size clears the state. A player already awaiting or declared at one
    /// card keeps their state.
    pub fn on_hand_changed(&mut self, player: &PlayerId, hand_len: usize, now_ms: u64) -> Option<u64> {
        let slot = self.states.entry(player.clone()).or_default();
        if hand_len != 1 {
            *slot = DeclarationState::None;
            return None;
        }
        if *slot != DeclarationState::None {
            return None;
        }
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        *slot = DeclarationState::AwaitingDeclaration {
            since_ms: now_ms,
            epoch,
        };
        Some(epoch)
    }

    /// Accepted only while awaiting.
    pub fn declare(&mut self, player: &PlayerId) -> bool {
        match self.states.get_mut(player) {
            Some(slot @ DeclarationState::AwaitingDeclaration { .. }) => {
                *slot = DeclarationState::Declared;
                true
            }
            _ => false,
        }
    }

    pub fn is_catchable(&self, player: &PlayerId) -> bool {
        matches!(
            self.state(player),
            DeclarationState::AwaitingDeclaration { .. }
        )
    }

    /// Succeeds only against a player who is awaiting, and never against
    /// oneself. On success the accused is reset; the caller applies the
    /// penalty draw.
    pub fn catch(&mut self, accuser: &PlayerId, accused: &PlayerId) -> bool {
        if accuser == accused || !self.is_catchable(accused) {
            return false;
        }
        self.reset(accused);
        true
    }

    /// When the open window for `player` closes, if any.
    pub fn deadline(&self, player: &PlayerId) -> Option<u64> {
        match self.state(player) {
            DeclarationState::AwaitingDeclaration { since_ms, .. } => {
                Some(since_ms.saturating_add(self.window_ms))
            }
            _ => None,
        }
    }

    /// Whether the window identified by `epoch` is still open and has run out.
    pub fn is_expired(&self, player: &PlayerId, epoch: u64, now_ms: u64) -> bool {
        matches!(
            self.state(player),
            DeclarationState::AwaitingDeclaration { since_ms, epoch: current }
                if current == epoch && now_ms >= since_ms.saturating_add(self.window_ms)
        )
    }

    /// Expire one specific window. Stale epochs and early calls are ignored.
    pub fn expire(&mut self, player: &PlayerId, epoch: u64, now_ms: u64) -> bool {
        if !self.is_expired(player, epoch, now_ms) {
            return false;
        }
        self.reset(player);
        true
    }

    /// Close every window that has run out and return whose it was.
    pub fn expired(&mut self, now_ms: u64) -> Vec<PlayerId> {
        let window = self.window_ms;
        let mut out: Vec<PlayerId> = self
            .states
            .iter()
            .filter_map(|(id, st)| match st {
                DeclarationState::AwaitingDeclaration { since_ms, .. }
                    if now_ms >= since_ms.saturating_add(window) =>
                {
                    Some(id.clone())
                }
                _ => None,
            })
            .collect();
        out.sort();
        for id in &out {
            self.reset(id);
        }
        out
    }

    /// Push every open window back by `by_ms`, giving each a fresh epoch.
    ///
    /// Used when play resumes after a pause so the paused time is not
    /// counted against anyone. Returns how many windows moved.
    pub fn shift_windows(&mut self, by_ms: u64) -> usize {
        let mut moved = 0;
        for slot in self.states.values_mut() {
            if let DeclarationState::AwaitingDeclaration { since_ms, epoch } = slot {
                *since_ms = since_ms.saturating_add(by_ms);
                *epoch = self.next_epoch;
                self.next_epoch += 1;
                moved += 1;
            }
        }
        moved
    }

    pub fn players_needing_declaration(&self) -> Vec<PlayerId> {
        let mut out: Vec<PlayerId> = self
            .states
            .iter()
            .filter(|(_, st)| matches!(st, DeclarationState::AwaitingDeclaration { .. }))
            .map(|(id, _)| id.clone())
            .collect();
        out.sort();
        out
    }

    pub fn reset(&mut self, player: &PlayerId) {
        if let Some(slot) = self.states.get_mut(player) {
            *slot = DeclarationState::None;
        }
    }

    pub fn clear_all(&mut self) {
        for slot in self.states.values_mut() {
            *slot = DeclarationState::None;
        }
    }
}
