//! Staging specific table situations without dealing.

use engine::config::GameConfig;
use engine::domain::{CardFace, CardId, PlayerId, RosterEntry, SessionId, Status, TurnSequencer};
use engine::services::game_flow::GameFlow;

pub const SEED: u64 = 4242;

pub fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

pub fn humans(ids: &[&str]) -> Vec<RosterEntry> {
    ids.iter()
        .map(|id| RosterEntry::human(id, &id.to_uppercase()))
        .collect()
}

/// A flow in `Lobby` with the given roster.
pub fn lobby(roster: &[RosterEntry], config: GameConfig) -> GameFlow {
    GameFlow::new(SessionId::new(), roster, config, SEED).expect("valid session")
}

/// Put a lobby flow straight into play with exact hands and top card.
///
/// Cards are taken out of the full draw pile, so conservation holds. The
/// first roster entry is to act.
pub fn stage(flow: &mut GameFlow, hands: &[(&str, &[&str])], top: &str) {
    let state = flow.state_mut();
    for (player, tokens) in hands {
        let mut hand = Vec::new();
        for token in *tokens {
            let face: CardFace = token.parse().expect("valid token");
            hand.push(state.deck.take_face(face).expect("face still in draw pile"));
        }
        let len = hand.len();
        state.player_mut(&pid(player)).expect("seated").hand = hand;
        state.declarations.on_hand_changed(&pid(player), len, 0);
    }
    let top: CardFace = top.parse().expect("valid token");
    state.deck.force_top(top).expect("top face still in draw pile");
    let order = state.players.iter().map(|p| p.id.clone()).collect();
    state.turns = TurnSequencer::new(order);
    state.status = Status::InProgress;
}

/// Humans seated in `hands` order, staged and ready.
pub fn staged(hands: &[(&str, &[&str])], top: &str, config: GameConfig) -> GameFlow {
    let ids: Vec<&str> = hands.iter().map(|(id, _)| *id).collect();
    let mut flow = lobby(&humans(&ids), config);
    stage(&mut flow, hands, top);
    flow
}

/// Id of the first card in `player`'s hand showing `token`.
pub fn card_id(flow: &GameFlow, player: &str, token: &str) -> CardId {
    let face: CardFace = token.parse().expect("valid token");
    flow.state()
        .player(&pid(player))
        .expect("seated")
        .hand
        .iter()
        .find(|c| c.face() == face)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("{player} holds no {token}"))
}

pub fn hand_len(flow: &GameFlow, player: &str) -> usize {
    flow.state().player(&pid(player)).expect("seated").hand.len()
}
