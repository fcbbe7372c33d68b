//! Heuristic bot.
//!
//! Play preference, among the legal moves only:
//! - action cards first, highest point value first;
//! - then number cards, highest face first, to shed points;
//! - wilds last, held back while a colored option exists.
//!
//! Equally ranked candidates are broken at random (or by hand order when
//! `random_tie_break` is off). Color choice is the most frequent color in
//! the remaining hand.

use rand::prelude::*;
use rand::rngs::StdRng;

use super::config::BotConfig;
use super::trait_def::BotStrategy;
use crate::config::GameConfig;
use crate::domain::cards_logic::point_value;
use crate::domain::validation::valid_moves;
use crate::domain::{Card, CardKind, Color, PendingDraw};

#[derive(Debug, Clone)]
pub struct HeuristicBot {
    rng: StdRng,
    config: BotConfig,
}

/// Lower tier plays first; within a tier the higher value wins.
fn rank(card: &Card) -> (u8, std::cmp::Reverse<u32>) {
    let tier = match card.kind {
        CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo => 0,
        CardKind::Number(_) => 1,
        CardKind::Wild | CardKind::WildDrawFour => 2,
    };
    (tier, std::cmp::Reverse(point_value(card)))
}

/// Pick among the best-ranked entries of `items`.
fn pick_best<T: Copy, K: Ord>(
    items: &[T],
    key: impl Fn(&T) -> K,
    rng: &mut StdRng,
    random_tie_break: bool,
) -> Option<T> {
    let best = items.iter().map(&key).min()?;
    let tied: Vec<T> = items.iter().filter(|i| key(*i) == best).copied().collect();
    if random_tie_break {
        tied.choose(rng).copied()
    } else {
        tied.first().copied()
    }
}

/// Most frequent color among the colored cards in `hand`.
fn dominant_color(hand: &[Card], rng: &mut StdRng, random_tie_break: bool) -> Color {
    let counts: Vec<(Color, usize)> = Color::ALL
        .iter()
        .map(|&color| {
            let n = hand
                .iter()
                .filter(|c| !c.is_wild() && c.color == Some(color))
                .count();
            (color, n)
        })
        .collect();
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let pool: Vec<Color> = if max == 0 {
        Color::ALL.to_vec()
    } else {
        counts
            .iter()
            .filter(|(_, n)| *n == max)
            .map(|(c, _)| *c)
            .collect()
    };
    if random_tie_break {
        pool.choose(rng).copied().unwrap_or(Color::Red)
    } else {
        pool.first().copied().unwrap_or(Color::Red)
    }
}

impl HeuristicBot {
    pub const NAME: &'static str = "heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, config }
    }
}

impl BotStrategy for HeuristicBot {
    fn choose_move(
        &mut self,
        hand: &[Card],
        top: &Card,
        pending: &PendingDraw,
        rules: &GameConfig,
    ) -> Option<Card> {
        let moves = valid_moves(hand, top, pending, rules);
        pick_best(&moves, rank, &mut self.rng, self.config.random_tie_break)
    }

    fn choose_color(&mut self, hand: &[Card]) -> Color {
        dominant_color(hand, &mut self.rng, self.config.random_tie_break)
    }

    fn should_declare(&mut self, hand: &[Card]) -> bool {
        hand.len() == 1 && self.rng.random_bool(self.config.declare_probability)
    }
}
