//! Single-line edit buffer with cursor.
//!
//! One cell is one `char` and one screen column. Insertion accepts only
//! characters that occupy exactly one column, so cursor arithmetic and
//! viewport column arithmetic never diverge.

use unicode_width::UnicodeWidthChar;

/// Invariant: `0 <= cursor <= cells.len()` after every operation.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    cells: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }

    /// Cells `[start, start + take)`, clamped to the buffer.
    pub fn visible(&self, start: usize, take: usize) -> String {
        self.cells.iter().skip(start).take(take).collect()
    }

    /// Splice a character at the cursor and advance past it. Characters that
    /// are not exactly one column wide (combining marks, CJK fullwidth) are
    /// dropped.
    pub fn insert(&mut self, ch: char) {
        if ch.width() != Some(1) {
            return;
        }
        self.cells.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cells.remove(self.cursor - 1);
        self.cursor -= 1;
    }

    pub fn forward_delete(&mut self) {
        if self.cursor == self.cells.len() {
            return;
        }
        self.cells.remove(self.cursor);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.cells.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.cells.len();
    }

    /// Replace the whole buffer (history recall); cursor lands at the end.
    pub fn replace(&mut self, new_line: &str) {
        self.cells = new_line.chars().collect();
        self.cursor = self.cells.len();
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.cursor = 0;
    }
}
