//! Engine test support utilities
//!
//! Shared by the engine's integration tests: one-time logging setup and
//! unique id generation. Nothing here depends on engine types.

pub mod logging;
pub mod unique_helpers;
