//! Viewport math: which slice of the buffer is visible and where the screen
//! cursor lands.
//!
//! Pure arithmetic over (cursor, terminal width); recomputed on every
//! mutation and never persisted.

/// Columns taken by the fixed prompt `"drift> "`.
pub const PROMPT_WIDTH: usize = 7;

/// Columns reserved for the left-scroll indicator when the line has scrolled.
pub const SCROLL_INDICATOR_WIDTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Whether the left-scroll indicator is drawn before the text.
    pub scrolled: bool,
    /// First visible buffer cell.
    pub start: usize,
    /// Number of cells drawn.
    pub take: usize,
    /// Column to park the screen cursor at, counted from column 0.
    pub cursor_column: u16,
}

/// Compute the visible window for a buffer cursor inside `columns` terminal
/// columns.
pub fn compute(cursor: usize, columns: u16) -> Viewport {
    let workspace = (columns as usize).saturating_sub(PROMPT_WIDTH);
    let scrolled = cursor >= workspace;
    let text_size = if scrolled {
        workspace.saturating_sub(SCROLL_INDICATOR_WIDTH)
    } else {
        workspace
    };

    let from = cursor as isize - text_size as isize;
    // The unscrolled first screen draws one cell fewer; the cursor column is
    // computed from the uncorrected size.
    let correction = if from <= 0 { 1 } else { 0 };
    let cursor_column =
        PROMPT_WIDTH as isize + workspace as isize - (text_size as isize - cursor as isize);

    Viewport {
        scrolled,
        start: from.max(0) as usize,
        take: text_size.saturating_sub(correction),
        cursor_column: cursor_column.clamp(0, u16::MAX as isize) as u16,
    }
}
