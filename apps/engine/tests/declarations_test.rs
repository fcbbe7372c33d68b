//! Last-card declarations: the window, catching and the expiry penalty.

mod common;
mod support;

use engine::config::GameConfig;
use engine::domain::{DeclarationState, GameEvent, PenaltyReason, Status};
use engine::services::game_flow::{GameFlow, TimedAction};
use support::events::{broadcast_names, drain};
use support::table::{card_id, hand_len, pid, staged};

/// p1 is about to go down to one card.
fn near_empty() -> GameFlow {
    staged(
        &[("p1", &["R5", "R6"]), ("p2", &["B3", "B4", "B5"]), ("p3", &["G3", "G4"])],
        "R7",
        GameConfig::default(),
    )
}

fn play_down_to_one(flow: &mut GameFlow, at_ms: u64) {
    flow.set_clock(at_ms);
    let r5 = card_id(flow, "p1", "R5");
    flow.play_card(&pid("p1"), r5, None).unwrap();
    drain(flow);
}

fn expiry_epoch(flow: &GameFlow, player: &str) -> u64 {
    flow.timer_plan()
        .into_iter()
        .find_map(|s| match s.action {
            TimedAction::DeclarationExpiry { player_id, epoch } if player_id == pid(player) => {
                Some(epoch)
            }
            _ => None,
        })
        .expect("declaration expiry scheduled")
}

fn declaration(flow: &GameFlow, player: &str) -> DeclarationState {
    flow.state().declarations.state(&pid(player))
}

#[test]
fn undeclared_last_card_is_penalized_when_the_window_runs_out() {
    let mut flow = near_empty();
    play_down_to_one(&mut flow, 1_000);
    assert!(matches!(
        declaration(&flow, "p1"),
        DeclarationState::AwaitingDeclaration { since_ms: 1_000, .. }
    ));

    let plan = flow.timer_plan();
    let due = plan
        .iter()
        .find(|s| matches!(s.action, TimedAction::DeclarationExpiry { .. }))
        .map(|s| s.due_ms);
    assert_eq!(due, Some(4_000));
    let epoch = expiry_epoch(&flow, "p1");

    flow.set_clock(3_999);
    assert!(!flow.expire_declaration(&pid("p1"), epoch).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 1);
    assert!(drain(&mut flow).is_empty());

    flow.set_clock(4_000);
    assert!(flow.expire_declaration(&pid("p1"), epoch).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 3);
    assert_eq!(declaration(&flow, "p1"), DeclarationState::None);

    let events = drain(&mut flow);
    assert_eq!(broadcast_names(&events), vec!["PENALTY_APPLIED"]);
    assert!(events.iter().any(|e| matches!(
        &e.event,
        GameEvent::PenaltyApplied { player_id, count: 2, reason: PenaltyReason::Expired }
            if player_id == &pid("p1")
    )));
    assert!(flow.state().conservation_holds());
}

#[test]
fn stale_expiry_is_ignored() {
    let mut flow = near_empty();
    play_down_to_one(&mut flow, 0);
    let epoch = expiry_epoch(&flow, "p1");
    flow.declare_last_card(&pid("p1")).unwrap();
    drain(&mut flow);

    flow.set_clock(10_000);
    assert!(!flow.expire_declaration(&pid("p1"), epoch).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 1);
    assert!(drain(&mut flow).is_empty());
}

#[test]
fn declaring_in_time_is_safe() {
    let mut flow = near_empty();
    play_down_to_one(&mut flow, 0);

    flow.set_clock(2_500);
    assert!(flow.declare_last_card(&pid("p1")).unwrap());
    assert_eq!(declaration(&flow, "p1"), DeclarationState::Declared);
    assert_eq!(broadcast_names(&drain(&mut flow)), vec!["DECLARED"]);

    flow.set_clock(60_000);
    assert!(flow.sweep_declarations().unwrap().is_empty());
    assert!(!flow.catch_missed_declaration(&pid("p2"), &pid("p1")).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 1);
    assert!(flow
        .timer_plan()
        .iter()
        .all(|s| !matches!(s.action, TimedAction::DeclarationExpiry { .. })));
}

#[test]
fn catching_an_undeclared_player_applies_the_penalty() {
    let mut flow = near_empty();
    play_down_to_one(&mut flow, 0);

    assert!(!flow.catch_missed_declaration(&pid("p1"), &pid("p1")).unwrap());
    assert!(drain(&mut flow).is_empty());

    flow.set_clock(500);
    assert!(flow.catch_missed_declaration(&pid("p3"), &pid("p1")).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 3);
    assert_eq!(declaration(&flow, "p1"), DeclarationState::None);
    let events = drain(&mut flow);
    assert!(events.iter().any(|e| matches!(
        e.event,
        GameEvent::PenaltyApplied { reason: PenaltyReason::Caught, .. }
    )));

    // Nothing left to catch.
    assert!(!flow.catch_missed_declaration(&pid("p2"), &pid("p1")).unwrap());
}

#[test]
fn declaring_without_one_card_is_a_quiet_no_op() {
    let mut flow = near_empty();
    assert!(!flow.declare_last_card(&pid("p2")).unwrap());
    assert!(drain(&mut flow).is_empty());
}

#[test]
fn sweep_penalizes_every_expired_window() {
    let mut flow = staged(
        &[("p1", &["R5", "R6"]), ("p2", &["R3", "B4"]), ("p3", &["G3", "G4", "G5"])],
        "R7",
        GameConfig::default(),
    );
    play_down_to_one(&mut flow, 0);
    flow.set_clock(1_000);
    let r3 = card_id(&flow, "p2", "R3");
    flow.play_card(&pid("p2"), r3, None).unwrap();
    drain(&mut flow);
    assert_eq!(
        flow.state().declarations.players_needing_declaration(),
        vec![pid("p1"), pid("p2")]
    );

    flow.set_clock(3_500);
    assert_eq!(flow.sweep_declarations().unwrap(), vec![pid("p1")]);
    flow.set_clock(4_000);
    assert_eq!(flow.sweep_declarations().unwrap(), vec![pid("p2")]);
    assert_eq!(hand_len(&flow, "p1"), 3);
    assert_eq!(hand_len(&flow, "p2"), 3);
}

#[test]
fn drawing_back_up_closes_the_window() {
    let mut flow = staged(
        &[("p1", &["R5", "R6"]), ("p2", &["B3", "B4"])],
        "R7",
        GameConfig::default(),
    );
    play_down_to_one(&mut flow, 0);
    // p2 draws, then p1 draws back up before declaring.
    flow.draw_card(&pid("p2")).unwrap();
    flow.draw_card(&pid("p1")).unwrap();
    assert_eq!(declaration(&flow, "p1"), DeclarationState::None);
    flow.set_clock(10_000);
    assert!(flow.sweep_declarations().unwrap().is_empty());
}

#[test]
fn paused_time_does_not_count_against_the_window() {
    let mut flow = near_empty();
    play_down_to_one(&mut flow, 0);
    let before = expiry_epoch(&flow, "p1");

    flow.set_clock(100);
    for player in ["p1", "p2", "p3"] {
        flow.set_connected(&pid(player), false).unwrap();
    }
    assert_eq!(flow.status(), Status::Paused);
    assert!(flow.timer_plan().is_empty());

    flow.set_clock(60_100);
    flow.set_connected(&pid("p1"), true).unwrap();
    assert_eq!(flow.status(), Status::InProgress);
    drain(&mut flow);

    // 100ms were used before the pause, so 2_900ms remain.
    let due = flow
        .timer_plan()
        .into_iter()
        .find(|s| matches!(s.action, TimedAction::DeclarationExpiry { .. }))
        .map(|s| s.due_ms);
    assert_eq!(due, Some(63_000));
    let after = expiry_epoch(&flow, "p1");
    assert_ne!(before, after);

    assert!(flow.sweep_declarations().unwrap().is_empty());
    assert!(!flow.expire_declaration(&pid("p1"), before).unwrap());
    assert_eq!(hand_len(&flow, "p1"), 1);

    flow.declare_last_card(&pid("p1")).unwrap();
    assert_eq!(declaration(&flow, "p1"), DeclarationState::Declared);
    assert_eq!(broadcast_names(&drain(&mut flow)), vec!["DECLARED"]);
}
