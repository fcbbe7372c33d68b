//! Rule scenarios that span the validator, effect processor and sequencer.

use crate::config::GameConfig;
use crate::domain::effects::{apply, start_turn};
use crate::domain::fixtures::CardFixtures;
use crate::domain::state::RosterEntry;
use crate::domain::validation::valid_moves;
use crate::domain::{Card, Deck, GameState, PlayerId, Status, TurnSequencer};

fn card(token: &str) -> Card {
    CardFixtures::parse_hardcoded(&[token])[0]
}

fn table(n: usize) -> GameState {
    let roster: Vec<RosterEntry> = (0..n)
        .map(|i| RosterEntry::human(&format!("p{i}"), &format!("P{i}")))
        .collect();
    let mut state = GameState::new(&roster, Deck::from_piles(Vec::new(), Vec::new(), 5), 3000);
    for p in state.players.iter_mut() {
        p.hand = CardFixtures::parse_hardcoded(&["G1", "G2"]);
    }
    state.turns = TurnSequencer::new(state.players.iter().map(|p| p.id.clone()).collect());
    state.status = Status::InProgress;
    state
}

#[test]
fn two_player_reverse_matches_skip() {
    let mut with_reverse = table(2);
    let mut with_skip = table(2);
    let actor = PlayerId::from("p0");
    apply(&mut with_reverse, &actor, &card("RR")).unwrap();
    apply(&mut with_skip, &actor, &card("RS")).unwrap();
    assert_eq!(with_reverse.current_player(), with_skip.current_player());
    assert_eq!(with_reverse.current_player(), Some(&actor));
}

#[test]
fn plain_plays_cycle_through_every_seat() {
    let mut state = table(4);
    let mut seen = Vec::new();
    for _ in 0..4 {
        let current = state.current_player().cloned().unwrap();
        seen.push(current.clone());
        apply(&mut state, &current, &card("G7")).unwrap();
        start_turn(&mut state, 0, false).unwrap();
    }
    assert_eq!(state.current_player(), Some(&PlayerId::from("p0")));
    assert_eq!(seen.len(), 4);
    assert_eq!(state.turn.turn_no, 4);
}

#[test]
fn stacked_draw_twos_leave_only_stacking_moves() {
    let rules = GameConfig::default();
    let mut state = table(3);
    apply(&mut state, &PlayerId::from("p0"), &card("R+2")).unwrap();
    apply(&mut state, &PlayerId::from("p1"), &card("Y+2")).unwrap();
    assert_eq!(state.turn.pending.amount, 4);

    let top = card("Y+2");
    let hand = CardFixtures::parse_hardcoded(&["Y5", "G+2", "W+4"]);
    let moves = valid_moves(&hand, &top, &state.turn.pending, &rules);
    assert_eq!(moves, vec![hand[1]]);
}
