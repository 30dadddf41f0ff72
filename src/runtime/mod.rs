//! Runtime orchestration.

pub mod session;

pub use session::{Session, COMMAND_SIGIL};
