//! Frame emission: prompt, scroll indicator, visible text, cursor parking.
//!
//! Every drawing routine only pushes commands into the gate; the caller
//! flushes, keeping each redraw atomic with respect to other writes.

use crate::core::line::LineBuffer;
use crate::render::output::{Color, ConsoleCmd, OutputGate};
use crate::render::viewport;

pub const PROMPT: &str = "drift> ";

const PROMPT_COLOR: Color = Color::Yellow;
const COMPLETED_COLOR: Color = Color::Cyan;
const FAREWELL_COLOR: Color = Color::Blue;

pub const FAREWELL: &str = " > So long, and thanks for all the fish!";

pub const WELCOME_BANNER: [&str; 5] = [
    "driftline - interactive line editor front end",
    "Keystrokes are read raw; arrow keys browse history,",
    "long lines scroll horizontally behind the prompt.",
    "Commands start with ':'.",
    "Type :quit to leave, :clear to clear the screen",
];

pub const WINDOW_TITLE: &str = "driftline interactive session";

fn prompt(gate: &mut OutputGate, color: Color) {
    gate.push(ConsoleCmd::SetFg(color));
    gate.push(ConsoleCmd::TextStatic(PROMPT));
    gate.push(ConsoleCmd::ResetColor);
}

fn scroll_indicator(gate: &mut OutputGate) {
    gate.push(ConsoleCmd::SetBg(Color::White));
    gate.push(ConsoleCmd::SetFg(Color::Black));
    gate.push(ConsoleCmd::TextStatic(" < "));
    gate.push(ConsoleCmd::ResetColor);
    gate.push(ConsoleCmd::SetFg(Color::Cyan));
    gate.push(ConsoleCmd::TextStatic(" ... "));
    gate.push(ConsoleCmd::ResetColor);
}

/// Redraw the edit line: clear, prompt, scrolled window, park the cursor.
pub fn line(gate: &mut OutputGate, buffer: &LineBuffer, columns: u16) {
    let view = viewport::compute(buffer.cursor(), columns);

    gate.push(ConsoleCmd::ClearLine);
    gate.push(ConsoleCmd::CursorColumnStart);
    prompt(gate, PROMPT_COLOR);
    if view.scrolled {
        scroll_indicator(gate);
    }
    gate.push(ConsoleCmd::text(buffer.visible(view.start, view.take)));
    gate.push(ConsoleCmd::CursorColumnStart);
    gate.push(ConsoleCmd::CursorForward(view.cursor_column));
}

/// Seal the line on Enter: prompt recolored as completed, then a newline.
pub fn completed(gate: &mut OutputGate) {
    gate.push(ConsoleCmd::CursorColumnStart);
    prompt(gate, COMPLETED_COLOR);
    gate.push(ConsoleCmd::TextStatic("\n"));
}

pub fn farewell(gate: &mut OutputGate) {
    gate.push(ConsoleCmd::SetFg(FAREWELL_COLOR));
    gate.push(ConsoleCmd::TextStatic(FAREWELL));
    gate.push(ConsoleCmd::ResetColor);
    gate.push(ConsoleCmd::TextStatic("\n"));
}

pub fn welcome(gate: &mut OutputGate) {
    gate.push(ConsoleCmd::SetTitle(WINDOW_TITLE.to_string()));
    for banner_line in WELCOME_BANNER {
        gate.push(ConsoleCmd::TextStatic(banner_line));
        gate.push(ConsoleCmd::TextStatic("\n"));
    }
}

pub fn clear_screen(gate: &mut OutputGate) {
    gate.push(ConsoleCmd::ClearScreen);
    gate.push(ConsoleCmd::CursorHome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::Console;
    use crate::core::line::LineBuffer;
    use std::io;

    #[derive(Default)]
    struct CaptureConsole {
        out: String,
    }

    impl Console for CaptureConsole {
        fn read_unit(&mut self) -> io::Result<Option<u8>> {
            Ok(None)
        }

        fn write(&mut self, data: &str) {
            self.out.push_str(data);
        }

        fn columns(&self) -> u16 {
            80
        }

        fn save_mode(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn enter_raw_mode(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn restore_mode(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render_line(buffer: &LineBuffer) -> String {
        let mut gate = OutputGate::new();
        let mut console = CaptureConsole::default();
        line(&mut gate, buffer, console.columns());
        gate.flush(&mut console);
        console.out
    }

    #[test]
    fn short_line_shows_no_indicator() {
        let mut buffer = LineBuffer::new();
        buffer.replace("let x = 1");
        let frame = render_line(&buffer);
        assert!(frame.contains("let x = 1"));
        assert!(!frame.contains(" < "));
        assert!(!frame.contains(" ... "));
    }

    #[test]
    fn long_line_shows_indicator_and_window_tail() {
        let mut buffer = LineBuffer::new();
        buffer.replace(&"x".repeat(100));
        let frame = render_line(&buffer);
        assert!(frame.contains(" < "));
        assert!(frame.contains(" ... "));
        // 64 visible cells at cursor 100
        assert!(frame.contains(&"x".repeat(64)));
        assert!(!frame.contains(&"x".repeat(65)));
    }

    #[test]
    fn redraw_starts_with_clear_and_carriage_return() {
        let buffer = LineBuffer::new();
        let frame = render_line(&buffer);
        assert!(frame.starts_with("\x1b[2K\r"));
    }

    #[test]
    fn cursor_parked_for_empty_buffer_lands_after_prompt() {
        let buffer = LineBuffer::new();
        let frame = render_line(&buffer);
        assert!(frame.ends_with("\r\x1b[7C"));
    }

    #[test]
    fn completed_prompt_recolors_and_breaks_line() {
        let mut gate = OutputGate::new();
        let mut console = CaptureConsole::default();
        completed(&mut gate);
        gate.flush(&mut console);
        assert_eq!(console.out, "\r\x1b[36mdrift> \x1b[0m\n");
    }

    #[test]
    fn welcome_sets_title_before_banner() {
        let mut gate = OutputGate::new();
        let mut console = CaptureConsole::default();
        welcome(&mut gate);
        gate.flush(&mut console);
        assert!(console.out.starts_with("\x1b]0;driftline interactive session\x07"));
        assert!(console.out.contains(WELCOME_BANNER[0]));
    }
}
