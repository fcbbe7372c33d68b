//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

/// Strategies a seat can run, by registry name.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Strategy {
    Heuristic,
    Random,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Heuristic => engine::ai::HeuristicBot::NAME,
            Strategy::Random => engine::ai::RandomBot::NAME,
        }
    }
}
