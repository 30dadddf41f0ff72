//! driftline: a raw-mode interactive line editor front end.
//!
//! Invariant: single output gate — only `render::output::OutputGate::flush(..)`
//! writes to the console.
//!
//! # Public API Overview
//! - Decode raw terminal bytes into edit [`Action`]s with [`Decoder`].
//! - Hold line state in [`LineBuffer`] and submitted lines in [`History`].
//! - Render through [`OutputGate`] using the viewport math in
//!   [`render::viewport`].
//! - Drive everything with [`Session`] over any [`Console`] implementation;
//!   [`ProcessConsole`] is the termios-backed production console.

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

/// Input decoding.
pub use crate::core::action::{Action, Decoder};

/// Editor state.
pub use crate::core::history::{Direction, History, Recall};
pub use crate::core::line::LineBuffer;

/// Console seam and the process-backed implementation.
pub use crate::core::console::Console;
pub use crate::platform::ProcessConsole;
#[cfg(unix)]
pub use crate::platform::{install_panic_cleanup, install_signal_cleanup, SignalHookGuard};

/// Rendering primitives.
pub use crate::render::draw::PROMPT;
pub use crate::render::{Color, ConsoleCmd, OutputGate, Viewport, PROMPT_WIDTH};

/// Session loop.
pub use crate::runtime::{Session, COMMAND_SIGIL};

/// Environment configuration.
pub use crate::config::EnvConfig;
