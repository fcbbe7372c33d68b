//! Draw pile and discard pile for one session.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::cards_types::{Card, CardFace, CardId, CardKind, Color};
use crate::errors::GameError;

/// Size of the fixed card set.
pub const DECK_SIZE: usize = 108;

/// Build the fixed 108-card set in a stable order.
///
/// Per color: one 0, two each of 1..=9, two Skip, two Reverse, two DrawTwo.
/// Plus four Wild and four WildDrawFour.
pub fn full_set() -> Vec<Card> {
    let mut faces = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        faces.push((CardKind::Number(0), Some(color)));
        for _ in 0..2 {
            for n in 1..=9 {
                faces.push((CardKind::Number(n), Some(color)));
            }
            faces.push((CardKind::Skip, Some(color)));
            faces.push((CardKind::Reverse, Some(color)));
            faces.push((CardKind::DrawTwo, Some(color)));
        }
    }
    for _ in 0..4 {
        faces.push((CardKind::Wild, None));
        faces.push((CardKind::WildDrawFour, None));
    }

    faces
        .into_iter()
        .enumerate()
        .map(|(i, (kind, color))| Card {
            id: CardId(i as u16),
            kind,
            color,
        })
        .collect()
}

/// Fisher-Yates shuffle.
fn fisher_yates(cards: &mut [Card], rng: &mut StdRng) {
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
}

/// Draw pile (top = end of vec) and discard pile (top = end of vec).
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Full set in the draw pile, unshuffled.
    pub fn initialize(seed: u64) -> Self {
        Self {
            draw_pile: full_set(),
            discard_pile: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Deck with explicit piles. Used to stage specific situations.
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>, seed: u64) -> Self {
        Self {
            draw_pile,
            discard_pile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self) {
        fisher_yates(&mut self.draw_pile, &mut self.rng);
    }

    /// Pop the top of the draw pile, refilling from the discard pile once
    /// if the draw pile is empty.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if let Some(card) = self.draw_pile.pop() {
            return Ok(card);
        }
        self.refill_from_discard();
        self.draw_pile.pop().ok_or_else(|| {
            GameError::deck_exhausted(format!(
                "draw pile empty after refill (discard holds {})",
                self.discard_pile.len()
            ))
        })
    }

    /// Move every discard except the top back into the draw pile and
    /// reshuffle. Returns how many cards moved.
    pub fn refill_from_discard(&mut self) -> usize {
        let Some(top) = self.discard_pile.pop() else {
            return 0;
        };
        let moved = self.discard_pile.len();
        self.draw_pile
            .extend(self.discard_pile.drain(..).map(Card::reset_color));
        self.discard_pile.push(top);
        self.shuffle();
        debug!(moved, "Refilled draw pile from discard");
        moved
    }

    /// Turn up the opening discard. Wilds drawn here go back into the draw
    /// pile, which is reshuffled, until a colored card comes up.
    pub fn place_first_discard(&mut self) -> Result<Card, GameError> {
        if !self.draw_pile.iter().any(|c| !c.is_wild()) {
            return Err(GameError::deck_exhausted(
                "no colored card available for the opening discard",
            ));
        }
        loop {
            let card = self.draw()?;
            if card.is_wild() {
                debug!(card = %card, "Burying wild drawn as opening discard");
                self.draw_pile.push(card);
                self.shuffle();
                continue;
            }
            self.discard_pile.push(card);
            return Ok(card);
        }
    }

    /// Put a played card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    pub fn top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards held by the two piles together.
    pub fn pile_len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Pull a specific face out of the draw pile, keeping conservation intact.
    /// Used to stage hands for scenarios and simulations.
    pub fn take_face(&mut self, face: CardFace) -> Option<Card> {
        let pos = self.draw_pile.iter().position(|c| c.face() == face)?;
        Some(self.draw_pile.remove(pos))
    }

    /// Place a specific face from the draw pile on top of the discard pile.
    pub fn force_top(&mut self, face: CardFace) -> Option<Card> {
        let card = self.take_face(face)?;
        self.discard_pile.push(card);
        Some(card)
    }

    /// Access to the deck's RNG so that dealing and the deck stay on one
    /// deterministic stream for a given seed.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
