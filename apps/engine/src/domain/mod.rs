//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod declarations;
pub mod deck;
pub mod effects;
pub mod events;
pub mod fixtures;
pub mod player_view;
pub mod seed_derivation;
pub mod state;
pub mod turns;
pub mod validation;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_scenarios;

// Re-exports for ergonomics
pub use cards_logic::{can_follow, hand_points, point_value};
pub use cards_types::{Card, CardFace, CardId, CardKind, Color};
pub use declarations::{DeclarationState, DeclarationTracker, PenaltyReason};
pub use deck::{Deck, DECK_SIZE};
pub use events::{Audience, EventEnvelope, GameEvent, SessionId};
pub use player_view::{snapshot, PlayerSummary, PublicState};
pub use state::{
    BotProfile, GameState, PendingDraw, Player, PlayerId, Role, RosterEntry, Status, TurnState,
};
pub use turns::{Direction, TurnSequencer};
pub use validation::{must_draw, valid_moves};
