//! Card token parsing and formatting (e.g., "R5", "GS", "B+2", "W+4:R")
//!
//! Token grammar: a color letter (`R`, `Y`, `G`, `B`) followed by a digit,
//! `S` (skip), `R` (reverse) or `+2` (draw two); or `W` / `W+4` for wilds,
//! optionally suffixed with `:<color>` once a color has been nominated.

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, CardFace, CardKind, Color};
use crate::errors::GameError;

fn parse_err(s: &str) -> GameError {
    GameError::illegal_move(format!("parse card: {s}"))
}

impl Color {
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }
}

impl FromStr for CardFace {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, nominated) = match s.split_once(':') {
            Some((body, color)) => {
                let mut chars = color.chars();
                let color = match (chars.next(), chars.next()) {
                    (Some(ch), None) => Color::from_letter(ch).ok_or_else(|| parse_err(s))?,
                    _ => return Err(parse_err(s)),
                };
                (body, Some(color))
            }
            None => (s, None),
        };

        match body {
            "W" => {
                return Ok(CardFace {
                    kind: CardKind::Wild,
                    color: nominated,
                })
            }
            "W+4" => {
                return Ok(CardFace {
                    kind: CardKind::WildDrawFour,
                    color: nominated,
                })
            }
            _ => {}
        }
        // Only wilds carry a nominated color suffix.
        if nominated.is_some() {
            return Err(parse_err(s));
        }

        let mut chars = body.chars();
        let color = chars
            .next()
            .and_then(Color::from_letter)
            .ok_or_else(|| parse_err(s))?;
        let kind = match chars.as_str() {
            "S" => CardKind::Skip,
            "R" => CardKind::Reverse,
            "+2" => CardKind::DrawTwo,
            rest => {
                let mut digits = rest.chars();
                match (digits.next(), digits.next()) {
                    (Some(d), None) if d.is_ascii_digit() => {
                        CardKind::Number(d as u8 - b'0')
                    }
                    _ => return Err(parse_err(s)),
                }
            }
        };
        Ok(CardFace {
            kind,
            color: Some(color),
        })
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.color) {
            (CardKind::Wild, None) => write!(f, "W"),
            (CardKind::Wild, Some(c)) => write!(f, "W:{}", c.letter()),
            (CardKind::WildDrawFour, None) => write!(f, "W+4"),
            (CardKind::WildDrawFour, Some(c)) => write!(f, "W+4:{}", c.letter()),
            (kind, color) => {
                let letter = color.map(Color::letter).unwrap_or('?');
                match kind {
                    CardKind::Number(n) => write!(f, "{letter}{n}"),
                    CardKind::Skip => write!(f, "{letter}S"),
                    CardKind::Reverse => write!(f, "{letter}R"),
                    CardKind::DrawTwo => write!(f, "{letter}+2"),
                    CardKind::Wild | CardKind::WildDrawFour => unreachable!(), // handled above
                }
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.face(), self.id.0)
    }
}

/// Non-panicking helper to parse face tokens (e.g., "R5", "W+4").
pub fn try_parse_faces<I, S>(tokens: I) -> Result<Vec<CardFace>, GameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<CardFace>())
        .collect()
}
