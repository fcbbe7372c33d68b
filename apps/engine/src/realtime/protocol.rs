use tokio::sync::oneshot;

use crate::domain::{CardId, Color, PlayerId, PublicState};
use crate::errors::GameError;
use crate::services::game_flow::TimedAction;

/// Where a command's outcome is delivered.
pub type Reply<T> = oneshot::Sender<Result<T, GameError>>;

/// Everything a session worker accepts on its queue.
///
/// Each external command carries its own reply channel. Timed commands come
/// from the worker's own timers and have nobody waiting on them.
#[derive(Debug)]
pub enum Command {
    Start {
        reply: Reply<()>,
    },
    Play {
        player: PlayerId,
        card: CardId,
        color: Option<Color>,
        reply: Reply<()>,
    },
    Draw {
        player: PlayerId,
        reply: Reply<u32>,
    },
    Declare {
        player: PlayerId,
        reply: Reply<bool>,
    },
    Catch {
        accuser: PlayerId,
        accused: PlayerId,
        reply: Reply<bool>,
    },
    SetConnected {
        player: PlayerId,
        connected: bool,
        reply: Reply<()>,
    },
    Snapshot {
        player: PlayerId,
        reply: Reply<PublicState>,
    },
    Abort {
        reason: String,
        reply: Reply<()>,
    },
    Timed(TimedAction),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start { .. } => "start",
            Command::Play { .. } => "play_card",
            Command::Draw { .. } => "draw_card",
            Command::Declare { .. } => "declare_last_card",
            Command::Catch { .. } => "catch_missed_declaration",
            Command::SetConnected { .. } => "set_connected",
            Command::Snapshot { .. } => "snapshot",
            Command::Abort { .. } => "abort",
            Command::Timed(_) => "timed",
        }
    }

    /// Answer the command with `err` without running it.
    pub fn reject(self, err: GameError) {
        // A caller that gave up waiting has dropped its receiver; nothing to do.
        match self {
            Command::Start { reply } => drop(reply.send(Err(err))),
            Command::Play { reply, .. } => drop(reply.send(Err(err))),
            Command::Draw { reply, .. } => drop(reply.send(Err(err))),
            Command::Declare { reply, .. } => drop(reply.send(Err(err))),
            Command::Catch { reply, .. } => drop(reply.send(Err(err))),
            Command::SetConnected { reply, .. } => drop(reply.send(Err(err))),
            Command::Snapshot { reply, .. } => drop(reply.send(Err(err))),
            Command::Abort { reply, .. } => drop(reply.send(Err(err))),
            Command::Timed(_) => {}
        }
    }
}
