#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod realtime;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{create_bot, create_seeded_bot, Bot, BotConfig, BotStrategy};
pub use config::GameConfig;
pub use domain::{
    Card, CardId, CardKind, Color, EventEnvelope, GameEvent, PlayerId, PublicState, RosterEntry,
    SessionId, Status,
};
pub use errors::{ErrorCode, GameError};
pub use realtime::{SessionHandle, SessionSupervisor};
pub use services::game_flow::GameFlow;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
