//! Assertions over drained event streams.

use engine::domain::{Audience, EventEnvelope, GameEvent};
use engine::services::game_flow::GameFlow;

pub fn drain(flow: &mut GameFlow) -> Vec<EventEnvelope> {
    flow.drain_events()
}

pub fn names(envelopes: &[EventEnvelope]) -> Vec<&'static str> {
    envelopes.iter().map(|e| e.event.name()).collect()
}

pub fn broadcast_names(envelopes: &[EventEnvelope]) -> Vec<&'static str> {
    envelopes
        .iter()
        .filter(|e| e.audience == Audience::All)
        .map(|e| e.event.name())
        .collect()
}

pub fn last_turn_changed(envelopes: &[EventEnvelope]) -> Option<String> {
    envelopes.iter().rev().find_map(|e| match &e.event {
        GameEvent::TurnChanged { player_id } => Some(player_id.to_string()),
        _ => None,
    })
}

pub fn assert_sequenced(envelopes: &[EventEnvelope]) {
    for pair in envelopes.windows(2) {
        assert_eq!(pair[1].seq, pair[0].seq + 1, "gap in event sequence");
    }
}
