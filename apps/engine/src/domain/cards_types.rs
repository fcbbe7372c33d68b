//! Core card-related types: Card, CardKind, Color, CardId

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    /// Face value 0..=9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardKind {
    pub fn is_wild(self) -> bool {
        matches!(self, CardKind::Wild | CardKind::WildDrawFour)
    }

    /// Skip, Reverse and DrawTwo: colored cards without a face value.
    pub fn is_action(self) -> bool {
        matches!(self, CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo)
    }

    /// Cards that add to the pending draw obligation.
    pub fn is_penalty(self) -> bool {
        matches!(self, CardKind::DrawTwo | CardKind::WildDrawFour)
    }

    pub fn penalty_amount(self) -> u32 {
        match self {
            CardKind::DrawTwo => 2,
            CardKind::WildDrawFour => 4,
            _ => 0,
        }
    }
}

/// Identity of a physical card within the 108-card set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

/// What a card looks like, without identity. Used for parsing tokens and
/// for picking specific cards out of a deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CardFace {
    pub kind: CardKind,
    pub color: Option<Color>,
}

/// A physical card.
///
/// `color` is `None` only for a wild whose color has not been nominated.
/// Two cards with the same face are still different cards; hands are
/// searched by `id`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub color: Option<Color>,
}

impl Card {
    pub fn new(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            kind: face.kind,
            color: face.color,
        }
    }

    pub fn face(&self) -> CardFace {
        CardFace {
            kind: self.kind,
            color: self.color,
        }
    }

    pub fn is_wild(&self) -> bool {
        self.kind.is_wild()
    }

    pub fn number(&self) -> Option<u8> {
        match self.kind {
            CardKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Same physical card carrying a nominated color. Only wilds change.
    pub fn with_color(self, color: Color) -> Self {
        if self.is_wild() {
            Self {
                color: Some(color),
                ..self
            }
        } else {
            self
        }
    }

    /// Wilds lose their nominated color when they go back into the draw pile.
    pub fn reset_color(self) -> Self {
        if self.is_wild() {
            Self {
                color: None,
                ..self
            }
        } else {
            self
        }
    }
}

// Note: Ord on Card is only for stable display ordering: color, then kind,
// then id. Legality never depends on it.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.color
            .cmp(&other.color)
            .then(self.kind.cmp(&other.kind))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
