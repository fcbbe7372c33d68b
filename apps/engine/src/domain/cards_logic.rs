//! Card matching and scoring rules

use super::cards_types::{Card, CardKind, Color};

/// Raw "can this card be played on that one" check.
///
/// Wilds always pass here; whether a Wild-Draw-Four was a bluff needs the
/// rest of the hand and lives in the validator. A top card whose color was
/// never decided accepts anything.
pub fn can_follow(candidate: &Card, top: &Card) -> bool {
    candidate.is_wild() || top.color.is_none() || matches_face(candidate, top)
}

/// Color, number or action-kind match, ignoring the wild pass-through.
pub fn matches_face(candidate: &Card, top: &Card) -> bool {
    if candidate.is_wild() {
        return false;
    }
    if candidate.color.is_some() && candidate.color == top.color {
        return true;
    }
    match (candidate.kind, top.kind) {
        (CardKind::Number(a), CardKind::Number(b)) => a == b,
        (a, b) if a.is_action() => a == b,
        _ => false,
    }
}

/// End-of-round scoring value.
pub fn point_value(card: &Card) -> u32 {
    match card.kind {
        CardKind::Number(n) => u32::from(n),
        CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo => 20,
        CardKind::Wild | CardKind::WildDrawFour => 50,
    }
}

pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(point_value).sum()
}

pub fn hand_has_color(hand: &[Card], color: Color) -> bool {
    hand.iter().any(|c| c.color == Some(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::CardFixtures;

    fn card(token: &str) -> Card {
        CardFixtures::parse_hardcoded(&[token])[0]
    }

    #[test]
    fn color_match_follows() {
        assert!(can_follow(&card("R3"), &card("R5")));
        assert!(can_follow(&card("RS"), &card("R5")));
        assert!(!can_follow(&card("B3"), &card("R5")));
    }

    #[test]
    fn number_match_follows_across_colors() {
        assert!(can_follow(&card("B5"), &card("R5")));
        assert!(!can_follow(&card("B6"), &card("R5")));
    }

    #[test]
    fn action_kind_match_follows_across_colors() {
        assert!(can_follow(&card("BS"), &card("RS")));
        assert!(can_follow(&card("GR"), &card("YR")));
        assert!(can_follow(&card("G+2"), &card("Y+2")));
        assert!(!can_follow(&card("BR"), &card("RS")));
    }

    #[test]
    fn wilds_always_follow_raw_check() {
        assert!(can_follow(&card("W"), &card("R5")));
        assert!(can_follow(&card("W+4"), &card("GS")));
        assert!(!matches_face(&card("W"), &card("R5")));
    }

    #[test]
    fn decided_wild_on_top_matches_by_color_only() {
        let top = card("W:G");
        assert!(can_follow(&card("G9"), &top));
        assert!(!can_follow(&card("R9"), &top));
        // A wild on a wild is still a raw match.
        assert!(can_follow(&card("W"), &top));
        // Kind match against a wild top does not count.
        assert!(!matches_face(&card("R+2"), &card("W+4:B")));
    }

    #[test]
    fn undecided_top_accepts_anything() {
        assert!(can_follow(&card("R1"), &card("W")));
    }

    #[test]
    fn point_values() {
        assert_eq!(point_value(&card("R0")), 0);
        assert_eq!(point_value(&card("B9")), 9);
        assert_eq!(point_value(&card("GS")), 20);
        assert_eq!(point_value(&card("YR")), 20);
        assert_eq!(point_value(&card("R+2")), 20);
        assert_eq!(point_value(&card("W")), 50);
        assert_eq!(point_value(&card("W+4")), 50);
        let hand = CardFixtures::parse_hardcoded(&["R7", "GS", "W+4"]);
        assert_eq!(hand_points(&hand), 77);
    }

    #[test]
    fn test_hand_has_color() {
        let hand = CardFixtures::parse_hardcoded(&["R7", "W"]);
        assert!(hand_has_color(&hand, Color::Red));
        assert!(!hand_has_color(&hand, Color::Blue));
    }
}
