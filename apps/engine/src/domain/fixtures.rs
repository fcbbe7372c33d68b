use std::sync::atomic::{AtomicU16, Ordering};

use super::cards_types::{Card, CardFace, CardId};

/// Ids handed to fixture cards start past the real 108-card set so they can
/// never collide with a dealt card.
static NEXT_FIXTURE_ID: AtomicU16 = AtomicU16::new(1000);

/// Centralized helper for building cards from hardcoded tokens in fixtures,
/// demo data and tests.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card tokens into distinct Card instances.
    ///
    /// Every returned card gets a fresh id, so parsing `["R5", "R5"]` yields
    /// two different physical cards with the same face.
    ///
    /// # Arguments
    /// * `tokens` - Slice of hardcoded card tokens (e.g., ["R5", "GS", "W+4"])
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                let face = s.parse::<CardFace>().expect("hardcoded valid card token");
                Card::new(Self::next_id(), face)
            })
            .collect()
    }

    fn next_id() -> CardId {
        CardId(NEXT_FIXTURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
