//! Test-only bootstrapping.

pub mod logging;
