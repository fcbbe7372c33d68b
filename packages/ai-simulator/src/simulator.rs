//! Bot-only games driven through the engine's game flow.
//!
//! Every move goes through the same command entry points a live session
//! uses, so a simulated game is held to the full rules. Time is a counter
//! advanced by a fixed step per move; declaration windows that run out are
//! swept before each move.

use std::collections::HashMap;

use engine::config::GameConfig;
use engine::domain::{BotProfile, EventEnvelope, GameEvent, PenaltyReason, PlayerId, RosterEntry, SessionId, Status};
use engine::errors::GameError;
use engine::services::game_flow::GameFlow;

/// Per-seat counters collected from the event stream.
#[derive(Debug, Clone, Default)]
pub struct SeatTally {
    pub cards_played: u32,
    pub cards_drawn: u32,
    pub penalties_expired: u32,
    pub penalties_caught: u32,
    pub declarations: u32,
    pub bluffs: u32,
}

#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub status: Status,
    /// Seat index of the winner, if the game was won.
    pub winner: Option<usize>,
    pub moves: usize,
    pub turns: u64,
    pub events: u64,
    /// Points left in each hand at the end.
    pub hand_points: Vec<u32>,
    pub scores: Vec<u32>,
    pub seats: Vec<SeatTally>,
}

pub struct Simulator {
    roster: Vec<RosterEntry>,
    config: GameConfig,
    max_moves: usize,
    clock_step_ms: u64,
}

impl Simulator {
    pub fn new(strategies: &[&str], config: GameConfig, max_moves: usize, clock_step_ms: u64) -> Self {
        let roster = strategies
            .iter()
            .enumerate()
            .map(|(seat, strategy)| {
                let mut entry = RosterEntry::bot(&format!("seat{seat}"), &format!("{strategy} {seat}"));
                entry.bot = Some(BotProfile {
                    strategy: (*strategy).to_owned(),
                    seed: None,
                });
                entry
            })
            .collect();
        Self {
            roster,
            config,
            max_moves,
            clock_step_ms,
        }
    }

    pub fn simulate_game(&self, seed: u64) -> Result<GameResult, GameError> {
        let mut flow = GameFlow::new(SessionId::new(), &self.roster, self.config.clone(), seed)?;
        let seats: HashMap<PlayerId, usize> = self
            .roster
            .iter()
            .enumerate()
            .map(|(seat, entry)| (entry.id.clone(), seat))
            .collect();
        let mut tally = Tally::new(seats);

        flow.start()?;
        tally.absorb(flow.drain_events());

        let mut clock = 0;
        let mut moves = 0;
        while flow.status() == Status::InProgress && moves < self.max_moves {
            clock += self.clock_step_ms;
            flow.set_clock(clock);
            flow.sweep_declarations()?;
            let made = flow.run_bots(1)?;
            tally.absorb(flow.drain_events());
            if made == 0 {
                break;
            }
            moves += made;
        }

        let state = flow.state();
        let winner = state
            .winner
            .as_ref()
            .and_then(|id| tally.seats.get(id).copied());
        Ok(GameResult {
            seed,
            status: flow.status(),
            winner,
            moves,
            turns: state.turn.turn_no,
            events: tally.events,
            hand_points: state
                .players
                .iter()
                .map(|p| engine::domain::hand_points(&p.hand))
                .collect(),
            scores: state.players.iter().map(|p| p.score).collect(),
            seats: tally.per_seat,
        })
    }
}

struct Tally {
    seats: HashMap<PlayerId, usize>,
    per_seat: Vec<SeatTally>,
    events: u64,
}

impl Tally {
    fn new(seats: HashMap<PlayerId, usize>) -> Self {
        let per_seat = vec![SeatTally::default(); seats.len()];
        Self {
            seats,
            per_seat,
            events: 0,
        }
    }

    fn seat(&mut self, player: &PlayerId) -> Option<&mut SeatTally> {
        let seat = *self.seats.get(player)?;
        self.per_seat.get_mut(seat)
    }

    fn absorb(&mut self, envelopes: Vec<EventEnvelope>) {
        for envelope in envelopes {
            self.events += 1;
            match envelope.event {
                GameEvent::CardPlayed {
                    player_id, bluff, ..
                } => {
                    if let Some(t) = self.seat(&player_id) {
                        t.cards_played += 1;
                        t.bluffs += u32::from(bluff);
                    }
                }
                GameEvent::CardDrawn { player_id, count } => {
                    if let Some(t) = self.seat(&player_id) {
                        t.cards_drawn += count;
                    }
                }
                GameEvent::PenaltyApplied {
                    player_id, reason, ..
                } => {
                    if let Some(t) = self.seat(&player_id) {
                        match reason {
                            PenaltyReason::Expired => t.penalties_expired += 1,
                            PenaltyReason::Caught => t.penalties_caught += 1,
                        }
                    }
                }
                GameEvent::Declared { player_id } => {
                    if let Some(t) = self.seat(&player_id) {
                        t.declarations += 1;
                    }
                }
                _ => {}
            }
        }
    }
}
