// Proptest generators for domain types.
// Cards are drawn from the real 108-card set so identities never repeat.

use proptest::prelude::*;
use proptest::sample::{select, subsequence};

use crate::domain::deck::full_set;
use crate::domain::{Card, CardKind, Color, PendingDraw};

/// Generate a random Color
pub fn color() -> impl Strategy<Value = Color> {
    select(Color::ALL.to_vec())
}

/// Any card from the fixed set; wilds undecided.
pub fn card() -> impl Strategy<Value = Card> {
    select(full_set())
}

/// A top discard: wilds carry a nominated color, as they do on the pile.
pub fn top_card() -> impl Strategy<Value = Card> {
    (card(), color()).prop_map(|(c, color)| c.with_color(color))
}

/// A hand of distinct cards.
pub fn hand(max: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_set(), 0..=max)
}

/// Hand and top that never share a card identity.
pub fn hand_and_top(max: usize) -> impl Strategy<Value = (Vec<Card>, Card)> {
    (hand(max), top_card()).prop_filter("top must not be in hand", |(h, top)| {
        h.iter().all(|c| c.id != top.id)
    })
}

/// No obligation, or one fed by either penalty kind.
pub fn pending() -> impl Strategy<Value = PendingDraw> {
    prop_oneof![
        Just(PendingDraw::default()),
        (1u32..4).prop_map(|n| PendingDraw {
            amount: 2 * n,
            kind: Some(CardKind::DrawTwo),
        }),
        (1u32..3).prop_map(|n| PendingDraw {
            amount: 4 * n,
            kind: Some(CardKind::WildDrawFour),
        }),
    ]
}
