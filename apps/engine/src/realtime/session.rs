//! Per-session command worker.
//!
//! A session's [`GameFlow`] lives inside one tokio task and is reached only
//! through an ordered queue, so exactly one command is applied at a time.
//! Bot moves, turn timeouts and declaration windows are delayed commands
//! sent back through the same queue.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::protocol::{Command, Reply};
use crate::domain::{CardId, Color, EventEnvelope, PlayerId, PublicState, SessionId, Status};
use crate::errors::GameError;
use crate::services::game_flow::{GameFlow, ScheduledAction, TimedAction};

const COMMAND_QUEUE_DEPTH: usize = 64;

/// Cloneable way in to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<Status>,
    cancel: CancellationToken,
}

/// Spawn the worker for `flow`. Every event the session emits is sent to
/// `events` in sequence order.
pub fn spawn_session(
    flow: GameFlow,
    events: mpsc::UnboundedSender<EventEnvelope>,
) -> (SessionHandle, JoinHandle<()>) {
    let session_id = flow.session_id();
    let (tx, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (status_tx, status_rx) = watch::channel(flow.status());
    let cancel = CancellationToken::new();

    let worker = SessionWorker {
        session_id,
        flow,
        events,
        status: status_tx,
        started: Instant::now(),
        timers: HashMap::new(),
        loopback: tx.downgrade(),
        cancel: cancel.clone(),
    };
    let task = tokio::spawn(worker.run(rx));
    info!(session_id = %session_id, "Session worker started");

    let handle = SessionHandle {
        session_id,
        commands: tx,
        status: status_rx,
        cancel,
    };
    (handle, task)
}

impl SessionHandle {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Status as of the last command the worker finished.
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the worker: pending timers are cancelled and any later command
    /// fails with `GameNotInProgress`.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub async fn start(&self) -> Result<(), GameError> {
        self.request(|reply| Command::Start { reply }).await
    }

    pub async fn play_card(
        &self,
        player: PlayerId,
        card: CardId,
        color: Option<Color>,
    ) -> Result<(), GameError> {
        self.request(|reply| Command::Play {
            player,
            card,
            color,
            reply,
        })
        .await
    }

    pub async fn draw_card(&self, player: PlayerId) -> Result<u32, GameError> {
        self.request(|reply| Command::Draw { player, reply }).await
    }

    pub async fn declare_last_card(&self, player: PlayerId) -> Result<bool, GameError> {
        self.request(|reply| Command::Declare { player, reply })
            .await
    }

    pub async fn catch_missed_declaration(
        &self,
        accuser: PlayerId,
        accused: PlayerId,
    ) -> Result<bool, GameError> {
        self.request(|reply| Command::Catch {
            accuser,
            accused,
            reply,
        })
        .await
    }

    pub async fn set_connected(&self, player: PlayerId, connected: bool) -> Result<(), GameError> {
        self.request(|reply| Command::SetConnected {
            player,
            connected,
            reply,
        })
        .await
    }

    pub async fn snapshot(&self, player: PlayerId) -> Result<PublicState, GameError> {
        self.request(|reply| Command::Snapshot { player, reply })
            .await
    }

    pub async fn abort(&self, reason: impl Into<String>) -> Result<(), GameError> {
        let reason = reason.into();
        self.request(|reply| Command::Abort { reason, reply })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, GameError> {
        if self.cancel.is_cancelled() {
            return Err(GameError::GameNotInProgress);
        }
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| GameError::GameNotInProgress)?;
        outcome.await.map_err(|_| GameError::SessionClosed)?
    }
}

struct SessionWorker {
    session_id: SessionId,
    flow: GameFlow,
    events: mpsc::UnboundedSender<EventEnvelope>,
    status: watch::Sender<Status>,
    /// Game clock zero.
    started: Instant,
    timers: HashMap<TimedAction, JoinHandle<()>>,
    /// Timers send through this; it does not keep the queue open.
    loopback: mpsc::WeakSender<Command>,
    cancel: CancellationToken,
}

impl SessionWorker {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                next = commands.recv() => match next {
                    Some(command) => self.handle(command),
                    None => break,
                },
            }
        }
        self.shut_down(commands);
    }

    fn handle(&mut self, command: Command) {
        self.flow.set_clock(self.now_ms());
        debug!(session_id = %self.session_id, command = command.name(), now_ms = self.flow.now_ms(), "Handling command");
        match command {
            Command::Start { reply } => {
                let result = self.flow.start();
                self.settle(reply, result);
            }
            Command::Play {
                player,
                card,
                color,
                reply,
            } => {
                let result = self.flow.play_card(&player, card, color);
                self.settle(reply, result);
            }
            Command::Draw { player, reply } => {
                let result = self.flow.draw_card(&player);
                self.settle(reply, result);
            }
            Command::Declare { player, reply } => {
                let result = self.flow.declare_last_card(&player);
                self.settle(reply, result);
            }
            Command::Catch {
                accuser,
                accused,
                reply,
            } => {
                let result = self.flow.catch_missed_declaration(&accuser, &accused);
                self.settle(reply, result);
            }
            Command::SetConnected {
                player,
                connected,
                reply,
            } => {
                let result = self.flow.set_connected(&player, connected);
                self.settle(reply, result);
            }
            Command::Snapshot { player, reply } => {
                let _ = reply.send(self.flow.snapshot(&player));
            }
            Command::Abort { reason, reply } => {
                let result = if self.flow.status().is_terminal() {
                    Err(GameError::GameNotInProgress)
                } else {
                    self.flow.abort(reason);
                    Ok(())
                };
                self.settle(reply, result);
            }
            Command::Timed(action) => {
                self.timers.remove(&action);
                match self.flow.run_timed_action(&action) {
                    Ok(applied) => {
                        debug!(session_id = %self.session_id, ?action, applied, "Timed action fired")
                    }
                    Err(err) => {
                        warn!(session_id = %self.session_id, ?action, error = %err, "Timed action failed")
                    }
                }
                self.publish();
                self.reconcile_timers();
            }
        }
    }

    /// Publish what the command emitted, reschedule timers, then answer.
    fn settle<T>(&mut self, reply: Reply<T>, result: Result<T, GameError>) {
        self.publish();
        self.reconcile_timers();
        let _ = reply.send(result);
    }

    fn publish(&mut self) {
        for envelope in self.flow.drain_events() {
            debug!(session_id = %self.session_id, seq = envelope.seq, event = envelope.event.name(), "Event");
            if self.events.send(envelope).is_err() {
                debug!(session_id = %self.session_id, "Event sink closed");
            }
        }
        self.status.send_replace(self.flow.status());
    }

    /// Bring scheduled timers in line with what the flow wants pending now.
    fn reconcile_timers(&mut self) {
        let plan = self.flow.timer_plan();
        let wanted: HashSet<&TimedAction> = plan.iter().map(|s| &s.action).collect();
        self.timers.retain(|action, timer| {
            let keep = wanted.contains(action);
            if !keep {
                timer.abort();
            }
            keep
        });

        let now = self.flow.now_ms();
        for scheduled in plan {
            if self.timers.contains_key(&scheduled.action) {
                continue;
            }
            let key = scheduled.action.clone();
            let timer = self.schedule(scheduled, now);
            self.timers.insert(key, timer);
        }
    }

    fn schedule(&self, scheduled: ScheduledAction, now_ms: u64) -> JoinHandle<()> {
        let delay = Duration::from_millis(scheduled.due_ms.saturating_sub(now_ms));
        let loopback = self.loopback.clone();
        let cancel = self.cancel.clone();
        debug!(session_id = %self.session_id, action = ?scheduled.action, delay_ms = delay.as_millis() as u64, "Timer scheduled");
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(queue) = loopback.upgrade() {
                        let _ = queue.send(Command::Timed(scheduled.action)).await;
                    }
                }
            }
        })
    }

    fn shut_down(mut self, mut commands: mpsc::Receiver<Command>) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        if !self.flow.status().is_terminal() {
            self.flow.set_clock(self.now_ms());
            self.flow.abort("session torn down");
            self.publish();
        }
        commands.close();
        while let Ok(command) = commands.try_recv() {
            command.reject(GameError::GameNotInProgress);
        }
        info!(session_id = %self.session_id, status = ?self.flow.status(), "Session worker stopped");
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
