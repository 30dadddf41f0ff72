#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use driftline::Console;

/// Console driven by a pre-scripted byte stream, recording every write.
///
/// `read_unit` returns `Ok(None)` once the script is exhausted, which the
/// session treats as end of input.
#[derive(Default)]
pub struct ScriptedConsole {
    input: VecDeque<u8>,
    pub out: String,
    pub columns: u16,
    pub raw_depth: i32,
    pub saves: usize,
    pub restores: usize,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self {
            columns: 80,
            ..Self::default()
        }
    }

    pub fn with_input(bytes: &[u8]) -> Self {
        let mut console = Self::new();
        console.push_input(bytes);
        console
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Frames as split by the clear-line control that starts each redraw.
    pub fn frames(&self) -> Vec<&str> {
        self.out
            .split("\x1b[2K")
            .filter(|frame| !frame.is_empty())
            .collect()
    }
}

impl Console for ScriptedConsole {
    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, data: &str) {
        self.out.push_str(data);
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn save_mode(&mut self) -> io::Result<()> {
        self.saves += 1;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        self.raw_depth += 1;
        Ok(())
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        self.restores += 1;
        self.raw_depth -= 1;
        Ok(())
    }
}
