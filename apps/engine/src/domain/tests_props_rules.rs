/// Property-based tests for move legality
use proptest::prelude::*;

use crate::config::GameConfig;
use crate::domain::cards_logic::matches_face;
use crate::domain::validation::{
    count_valid_plays, is_valid_move, must_draw, valid_moves, validate_wild_draw_four_legality,
};
use crate::domain::{test_gens, test_prelude, CardKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: valid moves are drawn from the hand, each passes the single
    /// card check, and must_draw holds exactly when there are none.
    #[test]
    fn prop_valid_moves_consistent(
        (hand, top) in test_gens::hand_and_top(12),
        pending in test_gens::pending(),
        stacking in any::<bool>(),
        cross in any::<bool>(),
    ) {
        let rules = GameConfig {
            draw_stacking_enabled: stacking,
            allow_cross_kind_stacking: cross,
            ..GameConfig::default()
        };
        let moves = valid_moves(&hand, &top, &pending, &rules);
        for m in &moves {
            prop_assert!(hand.contains(m));
            prop_assert!(is_valid_move(m, &top, &pending, &rules));
        }
        prop_assert_eq!(moves.len(), count_valid_plays(&hand, &top, &pending, &rules));
        prop_assert_eq!(moves.is_empty(), must_draw(&hand, &top, &pending, &rules));
    }

    /// Property: under a pending draw only penalty cards are playable, and
    /// none at all with stacking disabled.
    #[test]
    fn prop_pending_draw_restricts_to_penalties(
        (hand, top) in test_gens::hand_and_top(12),
        pending in test_gens::pending(),
        stacking in any::<bool>(),
    ) {
        prop_assume!(pending.is_active());
        let rules = GameConfig { draw_stacking_enabled: stacking, ..GameConfig::default() };
        let moves = valid_moves(&hand, &top, &pending, &rules);
        if !stacking {
            prop_assert!(moves.is_empty());
        }
        for m in &moves {
            prop_assert_eq!(Some(m.kind), pending.kind);
        }
    }

    /// Property: a Wild-Draw-Four is legal iff no non-wild card in the rest
    /// of the hand matches the top.
    #[test]
    fn prop_wild_draw_four_legality(
        (hand, top) in test_gens::hand_and_top(10),
    ) {
        for wd4 in hand.iter().filter(|c| c.kind == CardKind::WildDrawFour) {
            let others_match = hand
                .iter()
                .filter(|c| c.id != wd4.id && !c.is_wild())
                .any(|c| {
                    c.color == top.color
                        || (c.number().is_some() && c.number() == top.number())
                        || (c.kind.is_action() && c.kind == top.kind)
                });
            prop_assert_eq!(validate_wild_draw_four_legality(wd4, &top, &hand), !others_match);
            prop_assert_eq!(
                others_match,
                hand.iter().filter(|c| c.id != wd4.id).any(|c| matches_face(c, &top))
            );
        }
    }
}
