//! The per-session worker: queued commands, delayed bot moves, timeouts and
//! declaration windows, all on paused tokio time.

mod common;
mod support;

use std::time::Duration;

use engine::config::GameConfig;
use engine::domain::{valid_moves, Color, EventEnvelope, GameEvent, PenaltyReason, RosterEntry, Status};
use engine::errors::GameError;
use engine::realtime::{spawn_session, SessionHandle, SessionSupervisor};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

use support::table::{card_id, pid, staged};

fn collect(rx: &mut UnboundedReceiver<EventEnvelope>) -> Vec<EventEnvelope> {
    let mut out = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        out.push(envelope);
    }
    out
}

fn acted(events: &[EventEnvelope], player: &str) -> bool {
    events.iter().any(|e| match &e.event {
        GameEvent::CardPlayed { player_id, .. } | GameEvent::CardDrawn { player_id, .. } => {
            player_id.as_str() == player
        }
        _ => false,
    })
}

/// Play the first valid card, or draw.
async fn take_turn(handle: &SessionHandle, player: &str, config: &GameConfig) {
    let view = handle.snapshot(pid(player)).await.unwrap();
    let top = view.top_card.unwrap();
    let moves = valid_moves(&view.my_hand, &top, &view.pending_draw, config);
    match moves.first() {
        Some(card) => {
            let color = card.is_wild().then_some(Color::Red);
            handle.play_card(pid(player), card.id, color).await.unwrap();
        }
        None => {
            handle.draw_card(pid(player)).await.unwrap();
        }
    }
}

fn human_vs_bot() -> Vec<RosterEntry> {
    vec![
        RosterEntry::human("alice", "Alice"),
        RosterEntry::bot("bot", "Bot"),
    ]
}

#[tokio::test(start_paused = true)]
async fn bot_moves_after_its_delay() {
    let supervisor = SessionSupervisor::new();
    let config = GameConfig {
        bot_move_delay_ms: 500,
        ..GameConfig::default()
    };
    let (handle, mut rx) = supervisor
        .start_session(&human_vs_bot(), config.clone(), Some(11))
        .await
        .unwrap();
    let started = collect(&mut rx);
    assert_eq!(started[0].event.name(), "GAME_STARTED");

    for _ in 0..10 {
        let view = handle.snapshot(pid("alice")).await.unwrap();
        if view.current_player != Some(pid("alice")) {
            break;
        }
        take_turn(&handle, "alice", &config).await;
    }
    let view = handle.snapshot(pid("alice")).await.unwrap();
    assert_eq!(view.current_player, Some(pid("bot")));
    collect(&mut rx);

    sleep(Duration::from_millis(499)).await;
    assert!(!acted(&collect(&mut rx), "bot"), "bot moved early");

    sleep(Duration::from_millis(2)).await;
    let events = collect(&mut rx);
    assert!(acted(&events, "bot"), "bot did not move: {events:?}");
}

#[tokio::test(start_paused = true)]
async fn timed_out_human_turn_is_auto_played() {
    let supervisor = SessionSupervisor::new();
    let config = GameConfig {
        turn_timeout_ms: Some(10_000),
        ..GameConfig::default()
    };
    let roster = support::table::humans(&["p1", "p2"]);
    let (_handle, mut rx) = supervisor.start_session(&roster, config, Some(3)).await.unwrap();
    collect(&mut rx);

    sleep(Duration::from_millis(9_999)).await;
    assert!(collect(&mut rx).is_empty());

    sleep(Duration::from_millis(2)).await;
    let events = collect(&mut rx);
    assert!(acted(&events, "p1"), "no auto-play: {events:?}");
    assert!(events.iter().any(|e| e.event.name() == "TURN_CHANGED"));
}

#[tokio::test(start_paused = true)]
async fn real_command_supersedes_the_turn_timer() {
    let supervisor = SessionSupervisor::new();
    let config = GameConfig {
        turn_timeout_ms: Some(10_000),
        ..GameConfig::default()
    };
    let roster = support::table::humans(&["p1", "p2"]);
    let (handle, mut rx) = supervisor.start_session(&roster, config, Some(5)).await.unwrap();
    collect(&mut rx);

    sleep(Duration::from_millis(5_000)).await;
    assert_eq!(handle.draw_card(pid("p1")).await.unwrap(), 1);
    collect(&mut rx);

    // p1's original deadline passes without effect.
    sleep(Duration::from_millis(5_500)).await;
    assert!(collect(&mut rx).is_empty());
    let view = handle.snapshot(pid("p1")).await.unwrap();
    assert_eq!(view.my_hand.len(), 8);

    // p2's own deadline, counted from when their turn began, still fires.
    sleep(Duration::from_millis(5_000)).await;
    assert!(acted(&collect(&mut rx), "p2"));
}

#[tokio::test(start_paused = true)]
async fn declaration_window_expires_through_the_queue() {
    let flow = staged(
        &[("p1", &["R5", "R6"]), ("p2", &["B3", "B4", "B5"])],
        "R7",
        GameConfig::default(),
    );
    let r5 = card_id(&flow, "p1", "R5");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let (handle, _task) = spawn_session(flow, tx);

    handle.play_card(pid("p1"), r5, None).await.unwrap();
    collect(&mut rx);

    sleep(Duration::from_millis(2_900)).await;
    assert!(collect(&mut rx).is_empty());

    sleep(Duration::from_millis(200)).await;
    let events = collect(&mut rx);
    assert!(events.iter().any(|e| matches!(
        &e.event,
        GameEvent::PenaltyApplied { player_id, reason: PenaltyReason::Expired, .. }
            if player_id == &pid("p1")
    )));
    let view = handle.snapshot(pid("p1")).await.unwrap();
    assert_eq!(view.my_hand.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn declaring_cancels_the_expiry() {
    let flow = staged(
        &[("p1", &["R5", "R6"]), ("p2", &["B3", "B4", "B5"])],
        "R7",
        GameConfig::default(),
    );
    let r5 = card_id(&flow, "p1", "R5");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let (handle, _task) = spawn_session(flow, tx);

    handle.play_card(pid("p1"), r5, None).await.unwrap();
    sleep(Duration::from_millis(1_000)).await;
    assert!(handle.declare_last_card(pid("p1")).await.unwrap());
    collect(&mut rx);

    sleep(Duration::from_millis(10_000)).await;
    assert!(collect(&mut rx).is_empty());
    let view = handle.snapshot(pid("p1")).await.unwrap();
    assert_eq!(view.my_hand.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_commands_are_serialized() {
    let flow = staged(
        &[("p1", &["R5", "R6"]), ("p2", &["B3", "B4", "B5"])],
        "R7",
        GameConfig::default(),
    );
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let (handle, _task) = spawn_session(flow, tx);

    let (a, b) = tokio::join!(handle.draw_card(pid("p1")), handle.draw_card(pid("p1")));
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(GameError::NotPlayersTurn(_)))));

    let events = collect(&mut rx);
    assert_eq!(events.first().map(|e| e.seq), Some(1));
    for pair in events.windows(2) {
        assert_eq!(pair[1].seq, pair[0].seq + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_timers_and_refuses_commands() {
    let supervisor = SessionSupervisor::new();
    let config = GameConfig {
        turn_timeout_ms: Some(10_000),
        ..GameConfig::default()
    };
    let roster = support::table::humans(&["p1", "p2"]);
    let (handle, mut rx) = supervisor.start_session(&roster, config, Some(9)).await.unwrap();
    collect(&mut rx);

    handle.teardown();
    sleep(Duration::from_millis(1)).await;
    let events = collect(&mut rx);
    assert_eq!(
        events.iter().map(|e| e.event.name()).collect::<Vec<_>>(),
        vec!["GAME_ABORTED"]
    );
    assert_eq!(handle.status(), Status::Aborted);
    assert_eq!(
        handle.draw_card(pid("p1")).await.unwrap_err(),
        GameError::GameNotInProgress
    );

    sleep(Duration::from_millis(30_000)).await;
    assert!(collect(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_follow_human_connectivity() {
    let supervisor = SessionSupervisor::new();
    let config = GameConfig {
        turn_timeout_ms: Some(10_000),
        ..GameConfig::default()
    };
    let roster = vec![
        RosterEntry::human("alice", "Alice"),
        RosterEntry::bot("bot", "Bot"),
    ];
    let (handle, mut rx) = supervisor.start_session(&roster, config, Some(21)).await.unwrap();
    collect(&mut rx);

    handle.set_connected(pid("alice"), false).await.unwrap();
    assert_eq!(handle.status(), Status::Paused);
    assert_eq!(
        handle.draw_card(pid("alice")).await.unwrap_err(),
        GameError::GameNotInProgress
    );

    // No timers run while paused.
    collect(&mut rx);
    sleep(Duration::from_millis(60_000)).await;
    assert!(collect(&mut rx).is_empty());

    handle.set_connected(pid("alice"), true).await.unwrap();
    assert_eq!(handle.status(), Status::InProgress);
    let names: Vec<_> = collect(&mut rx).iter().map(|e| e.event.name()).collect();
    assert_eq!(names, vec!["GAME_RESUMED"]);
}
