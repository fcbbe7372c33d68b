//! Random bot - uniformly random legal moves.
//!
//! Baseline for simulations and a template for new strategies: query the
//! validator for legal moves, never invent a move, seed for determinism.

use rand::prelude::*;
use rand::rngs::StdRng;

use super::config::BotConfig;
use super::trait_def::BotStrategy;
use crate::config::GameConfig;
use crate::domain::validation::valid_moves;
use crate::domain::{Card, Color, PendingDraw};

#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: StdRng,
    declare_probability: f64,
}

impl RandomBot {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            declare_probability: config.declare_probability,
        }
    }
}

impl BotStrategy for RandomBot {
    fn choose_move(
        &mut self,
        hand: &[Card],
        top: &Card,
        pending: &PendingDraw,
        rules: &GameConfig,
    ) -> Option<Card> {
        valid_moves(hand, top, pending, rules)
            .choose(&mut self.rng)
            .copied()
    }

    fn choose_color(&mut self, _hand: &[Card]) -> Color {
        Color::ALL[self.rng.random_range(0..Color::ALL.len())]
    }

    fn should_declare(&mut self, hand: &[Card]) -> bool {
        hand.len() == 1 && self.rng.random_bool(self.declare_probability)
    }
}
