//! Session workers and the registry that finds them.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::SessionSupervisor;
pub use protocol::Command;
pub use session::{spawn_session, SessionHandle};
