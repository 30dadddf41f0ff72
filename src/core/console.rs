//! Console trait: the terminal capability consumed by the core.

use std::io;

/// Minimal terminal interface for the session loop.
///
/// Color, clear, and cursor control are expressed as typed commands
/// (`render::output::ConsoleCmd`) serialized through `write`; the trait only
/// covers what an implementation must genuinely own: the blocking byte
/// stream, raw output, width, and terminal-mode state.
pub trait Console {
    /// Read one input unit, blocking until a byte arrives.
    /// `Ok(None)` means the input stream has ended.
    fn read_unit(&mut self) -> io::Result<Option<u8>>;

    /// Write raw bytes/ANSI control text to the terminal.
    fn write(&mut self, data: &str);

    /// Terminal width in columns.
    fn columns(&self) -> u16;

    /// Capture the current terminal mode so it can be restored later.
    fn save_mode(&mut self) -> io::Result<()>;

    /// Switch to raw per-character input (no line buffering, no local echo).
    fn enter_raw_mode(&mut self) -> io::Result<()>;

    /// Restore the mode captured by `save_mode`.
    fn restore_mode(&mut self) -> io::Result<()>;
}
