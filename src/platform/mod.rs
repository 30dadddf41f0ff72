//! Platform-specific terminal integrations.

pub mod process_console;

#[cfg(unix)]
pub use process_console::{
    install_panic_cleanup, install_signal_cleanup, ModeSnapshot, ProcessConsole, SignalHookGuard,
};

#[cfg(not(unix))]
pub use process_console::ProcessConsole;
