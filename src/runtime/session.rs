//! Session loop: read, decode, apply, render; line completion; builtins.

use std::collections::HashMap;
use std::io;

use once_cell::sync::Lazy;

use crate::core::action::{Action, Decoder};
use crate::core::console::Console;
use crate::core::history::{Direction, History, Recall};
use crate::core::line::LineBuffer;
use crate::render::draw;
use crate::render::output::OutputGate;

const ENTER: u8 = 0x0a;

/// Leading character marking a line as a builtin command.
pub const COMMAND_SIGIL: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Clear,
    Quit,
}

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    HashMap::from([(":clear", Builtin::Clear), (":quit", Builtin::Quit)])
});

/// How an intercepted sigil line was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Handled,
    Quit,
    /// Unknown command: swallowed, neither executed nor forwarded.
    Swallowed,
}

/// Interactive session over a console.
///
/// Owns the per-line state (buffer, cursor, history index, decoder) and the
/// process-wide history. Termination is a value: `run` returns `Ok(())` when
/// the quit builtin fires, and only the binary exits the process.
pub struct Session<C: Console> {
    console: C,
    gate: OutputGate,
    decoder: Decoder,
    buffer: LineBuffer,
    history: History,
    history_index: usize,
    on_submit: Option<Box<dyn FnMut(String)>>,
}

impl<C: Console> Session<C> {
    pub fn new(console: C) -> Self {
        Self {
            console,
            gate: OutputGate::new(),
            decoder: Decoder::new(),
            buffer: LineBuffer::new(),
            history: History::new(),
            history_index: 0,
            on_submit: None,
        }
    }

    /// Receiver for completed non-sigil lines (the external-evaluator seam).
    pub fn set_on_submit(&mut self, handler: Option<Box<dyn FnMut(String)>>) {
        self.on_submit = handler;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Print the banner and set the window title.
    pub fn welcome(&mut self) {
        draw::welcome(&mut self.gate);
        self.gate.flush(&mut self.console);
    }

    /// Drive read/complete cycles until the quit builtin or a fatal read
    /// error.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let line = self.read_line()?;

            if line.starts_with(COMMAND_SIGIL) {
                if self.intercept(&line) == Dispatch::Quit {
                    return Ok(());
                }
            } else if !line.is_empty() {
                if let Some(handler) = self.on_submit.as_mut() {
                    handler(line);
                }
            }

            self.reset_line_state();
        }
    }

    /// Read one complete line in raw mode. The saved terminal mode is
    /// restored on every exit path, including the error path.
    fn read_line(&mut self) -> io::Result<String> {
        self.console.save_mode()?;
        self.console.enter_raw_mode()?;

        let result = self.read_line_raw();
        let restored = self.console.restore_mode();

        let line = result?;
        restored?;
        Ok(line)
    }

    fn read_line_raw(&mut self) -> io::Result<String> {
        self.decoder.reset();
        self.render_line();

        loop {
            let unit = self.console.read_unit()?.ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "terminal input stream closed while reading a line",
                )
            })?;
            // Enter completes the line and is not fed to the decoder.
            if unit == ENTER {
                break;
            }
            if let Some(action) = self.decoder.feed(unit) {
                self.apply(action);
                self.render_line();
            }
        }

        let line = self.buffer.text().trim().to_string();
        self.history.push(&line);

        draw::completed(&mut self.gate);
        self.gate.flush(&mut self.console);

        Ok(line)
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Insert(ch) => self.buffer.insert(ch),
            Action::Backspace => self.buffer.backspace(),
            Action::ForwardDelete => self.buffer.forward_delete(),
            Action::MoveLeft => self.buffer.move_left(),
            Action::MoveRight => self.buffer.move_right(),
            Action::Home => self.buffer.home(),
            Action::End => self.buffer.end(),
            Action::HistoryOlder => self.navigate(Direction::Older),
            Action::HistoryNewer => self.navigate(Direction::Newer),
            Action::ClearScreen => {
                // Independent of per-line state: buffer and cursor survive.
                draw::clear_screen(&mut self.gate);
            }
            Action::Ignore => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        match self.history.navigate(self.history_index, direction) {
            Recall::Entry { line, index } => {
                self.buffer.replace(&line);
                self.history_index = index;
            }
            Recall::Cleared => {
                self.buffer.clear();
                self.history_index = 0;
            }
            Recall::Unchanged => {}
        }
    }

    fn render_line(&mut self) {
        draw::line(&mut self.gate, &self.buffer, self.console.columns());
        self.gate.flush(&mut self.console);
    }

    fn intercept(&mut self, line: &str) -> Dispatch {
        match BUILTINS.get(line) {
            Some(Builtin::Clear) => {
                draw::clear_screen(&mut self.gate);
                self.gate.flush(&mut self.console);
                Dispatch::Handled
            }
            Some(Builtin::Quit) => {
                draw::farewell(&mut self.gate);
                self.gate.flush(&mut self.console);
                Dispatch::Quit
            }
            None => Dispatch::Swallowed,
        }
    }

    /// Per-line reset; history itself persists for the whole session.
    fn reset_line_state(&mut self) {
        self.buffer.clear();
        self.history_index = 0;
        self.decoder.reset();
    }
}
