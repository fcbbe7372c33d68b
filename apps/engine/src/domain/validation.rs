//! Move legality.
//!
//! `top` is always the color-resolved top discard: a wild on the pile
//! carries the color its player nominated.

use super::cards_logic::{can_follow, matches_face};
use super::cards_types::{Card, CardKind, Color};
use super::state::PendingDraw;
use crate::config::GameConfig;

/// Plain follow check used when no draw obligation is pending.
pub fn validate_color_or_number_match(card: &Card, top: &Card) -> bool {
    can_follow(card, top)
}

/// A Wild-Draw-Four is legal only when no *other* card in the hand matches
/// the top by color, number or action kind. Wilds in hand never count.
///
/// Playing an illegal one is allowed; the result is reported as a bluff.
pub fn validate_wild_draw_four_legality(card: &Card, top: &Card, hand: &[Card]) -> bool {
    if card.kind != CardKind::WildDrawFour {
        return true;
    }
    !hand
        .iter()
        .filter(|c| c.id != card.id)
        .any(|c| matches_face(c, top))
}

/// Whether `candidate` may be stacked onto a pending obligation.
fn can_stack(candidate: &Card, pending: &PendingDraw, rules: &GameConfig) -> bool {
    if !rules.draw_stacking_enabled || !candidate.kind.is_penalty() {
        return false;
    }
    match pending.kind {
        Some(kind) if kind == candidate.kind => true,
        Some(_) => rules.allow_cross_kind_stacking,
        None => false,
    }
}

/// Every card in `hand` that could legally be played right now.
pub fn valid_moves(
    hand: &[Card],
    top: &Card,
    pending: &PendingDraw,
    rules: &GameConfig,
) -> Vec<Card> {
    if pending.is_active() {
        return hand
            .iter()
            .filter(|c| can_stack(c, pending, rules))
            .copied()
            .collect();
    }
    hand.iter()
        .filter(|c| validate_color_or_number_match(c, top))
        .copied()
        .collect()
}

pub fn is_valid_move(
    card: &Card,
    top: &Card,
    pending: &PendingDraw,
    rules: &GameConfig,
) -> bool {
    if pending.is_active() {
        can_stack(card, pending, rules)
    } else {
        validate_color_or_number_match(card, top)
    }
}

pub fn must_draw(hand: &[Card], top: &Card, pending: &PendingDraw, rules: &GameConfig) -> bool {
    !has_valid_card(hand, top, pending, rules)
}

pub fn has_valid_card(hand: &[Card], top: &Card, pending: &PendingDraw, rules: &GameConfig) -> bool {
    hand.iter().any(|c| is_valid_move(c, top, pending, rules))
}

pub fn count_valid_plays(
    hand: &[Card],
    top: &Card,
    pending: &PendingDraw,
    rules: &GameConfig,
) -> usize {
    hand.iter()
        .filter(|c| is_valid_move(c, top, pending, rules))
        .count()
}

/// A nominated color is required for wilds.
pub fn is_valid_color_choice(color: Option<Color>) -> bool {
    color.is_some()
}

/// A wild matches any color.
pub fn matches_color(card: &Card, color: Color) -> bool {
    card.is_wild() || card.color == Some(color)
}

pub fn matches_number(card: &Card, number: u8) -> bool {
    card.number() == Some(number)
}

pub fn matches_kind(card: &Card, kind: CardKind) -> bool {
    match (card.kind, kind) {
        (CardKind::Number(_), CardKind::Number(_)) => true,
        (a, b) => a == b,
    }
}
