//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes flow through `OutputGate::flush(..)`, so a
//! redraw is emitted atomically and never interleaves with other output.

use crate::core::console::Console;

/// Small fixed palette; serialized as classic SGR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Blue,
    Cyan,
    White,
    Yellow,
}

impl Color {
    fn fg_code(self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Blue => "\x1b[34m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::Yellow => "\x1b[33m",
        }
    }

    fn bg_code(self) -> &'static str {
        match self {
            Color::Black => "\x1b[40m",
            Color::Blue => "\x1b[44m",
            Color::Cyan => "\x1b[46m",
            Color::White => "\x1b[47m",
            Color::Yellow => "\x1b[43m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCmd {
    /// Literal text (UTF-8) to be written to the terminal.
    Text(String),
    /// Static literal text to be written to the terminal.
    TextStatic(&'static str),

    SetFg(Color),
    SetBg(Color),
    ResetColor,

    ClearLine,
    ClearScreen,
    /// Move the cursor to the screen home position (top left).
    CursorHome,
    /// Move the cursor to column 0 of the current line.
    CursorColumnStart,
    /// Advance the cursor by N columns.
    CursorForward(u16),

    SetTitle(String),
}

impl ConsoleCmd {
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<ConsoleCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: ConsoleCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = ConsoleCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the console.
    ///
    /// This is the single write gate: `Console::write(..)` must not be
    /// called from anywhere else.
    pub fn flush<C: Console>(&mut self, console: &mut C) {
        for cmd in self.cmds.drain(..) {
            match cmd {
                ConsoleCmd::Text(data) => console.write(&data),
                ConsoleCmd::TextStatic(data) => console.write(data),
                ConsoleCmd::SetFg(color) => console.write(color.fg_code()),
                ConsoleCmd::SetBg(color) => console.write(color.bg_code()),
                ConsoleCmd::ResetColor => console.write("\x1b[0m"),
                ConsoleCmd::ClearLine => console.write("\x1b[2K"),
                ConsoleCmd::ClearScreen => console.write("\x1b[2J"),
                ConsoleCmd::CursorHome => console.write("\x1b[H"),
                ConsoleCmd::CursorColumnStart => console.write("\r"),
                ConsoleCmd::CursorForward(n) => {
                    if n > 0 {
                        console.write(&format!("\x1b[{n}C"));
                    }
                }
                ConsoleCmd::SetTitle(title) => {
                    console.write(&format!("\x1b]0;{title}\x07"));
                }
            }
        }
    }
}
