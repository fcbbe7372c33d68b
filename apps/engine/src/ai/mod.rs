//! Bot players - automated decisions for bot seats and timed-out humans.
//!
//! This module provides:
//! - `BotStrategy` trait for the decisions a seat has to make
//! - `HeuristicBot` and `RandomBot` strategies (seedable for tests)
//! - A registry that builds bots by strategy name

mod config;
mod heuristic;
mod random;
mod registry;
mod trait_def;

pub use config::BotConfig;
pub use heuristic::HeuristicBot;
pub use random::RandomBot;
pub use registry::{by_name, create_bot, create_seeded_bot, registered_bots, Bot, BotFactory};
pub use trait_def::{BotError, BotStrategy};
