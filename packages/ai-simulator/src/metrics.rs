//! Metrics collection and output for simulation results.

use engine::config::GameConfig;
use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub strategies: Vec<String>,
    pub total_games: u32,
    pub rules: GameConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub status: String,
    pub winner: Option<usize>,
    pub moves: usize,
    pub turns: u64,
    pub events: u64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub strategy: String,
    pub score: u32,
    pub hand_points: u32,
    pub cards_played: u32,
    pub cards_drawn: u32,
    pub declarations: u32,
    pub penalties_expired: u32,
    pub penalties_caught: u32,
    pub bluffs: u32,
}

/// One line of the CSV summary.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub status: String,
    pub winner: Option<usize>,
    pub winner_strategy: Option<String>,
    pub winner_score: Option<u32>,
    pub moves: usize,
    pub turns: u64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let winner = m.result.winner.and_then(|seat| m.player_metrics.get(seat));
        Self {
            game_id: m.game_id,
            seed: m.seed,
            status: m.result.status.clone(),
            winner: m.result.winner,
            winner_strategy: winner.map(|p| p.strategy.clone()),
            winner_score: winner.map(|p| p.score),
            moves: m.result.moves,
            turns: m.result.turns,
        }
    }
}

/// Build metrics from one finished game.
pub fn build_game_metrics(
    game_id: u32,
    strategies: &[String],
    total_games: u32,
    rules: &GameConfig,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let player_metrics = result
        .seats
        .iter()
        .enumerate()
        .map(|(seat, tally)| PlayerMetrics {
            seat,
            strategy: strategies.get(seat).cloned().unwrap_or_default(),
            score: result.scores.get(seat).copied().unwrap_or(0),
            hand_points: result.hand_points.get(seat).copied().unwrap_or(0),
            cards_played: tally.cards_played,
            cards_drawn: tally.cards_drawn,
            declarations: tally.declarations,
            penalties_expired: tally.penalties_expired,
            penalties_caught: tally.penalties_caught,
            bluffs: tally.bluffs,
        })
        .collect();

    GameMetrics {
        game_id,
        seed: result.seed,
        timestamp,
        config: RunConfig {
            strategies: strategies.to_vec(),
            total_games,
            rules: rules.clone(),
        },
        result: GameResultMetrics {
            status: format!("{:?}", result.status),
            winner: result.winner,
            moves: result.moves,
            turns: result.turns,
            events: result.events,
            duration_ms,
        },
        player_metrics,
    }
}
