//! Submitted-line history.
//!
//! Entries are append-only for the life of the process. The browsing position
//! (how many steps back from the newest entry) is per-line session state and
//! lives with the caller; `navigate` is a pure transition over it.

/// Direction of a history step. `Older` walks toward the first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Older,
    Newer,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Older => 1,
            Direction::Newer => -1,
        }
    }
}

/// Outcome of a navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Replace the buffer with `line` and adopt `index` as the new position.
    Entry { line: String, index: usize },
    /// Stepped forward past the newest entry: empty the buffer, index 0.
    Cleared,
    /// Stepped backward past the oldest entry: nothing changes.
    Unchanged,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Append the trimmed line; whitespace-only lines are not recorded.
    /// Returns whether an entry was stored.
    pub fn push(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.entries.push(trimmed.to_string());
        true
    }

    /// One browsing step from `current_index` (0 = not browsing). The target
    /// entry is counted back from the newest: `len - (current_index + step)`.
    pub fn navigate(&self, current_index: usize, direction: Direction) -> Recall {
        let next = current_index as isize + direction.step();
        let target = self.entries.len() as isize - next;

        if (0..self.entries.len() as isize).contains(&target) {
            return Recall::Entry {
                line: self.entries[target as usize].clone(),
                index: next as usize,
            };
        }

        if direction == Direction::Newer && current_index <= 1 {
            return Recall::Cleared;
        }

        Recall::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, History, Recall};

    fn seeded(lines: &[&str]) -> History {
        let mut history = History::new();
        for line in lines {
            assert!(history.push(line));
        }
        history
    }

    #[test]
    fn push_preserves_submission_order() {
        let history = seeded(&["one", "two", "three"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.entry(0), Some("one"));
        assert_eq!(history.entry(2), Some("three"));
    }

    #[test]
    fn push_trims_and_skips_blank_lines() {
        let mut history = History::new();
        assert!(!history.push(""));
        assert!(!history.push("   \t "));
        assert!(history.push("  kept  "));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entry(0), Some("kept"));
    }

    #[test]
    fn older_walks_from_newest_to_oldest() {
        let history = seeded(&["first", "second"]);
        let step = history.navigate(0, Direction::Older);
        assert_eq!(
            step,
            Recall::Entry {
                line: "second".to_string(),
                index: 1
            }
        );
        let step = history.navigate(1, Direction::Older);
        assert_eq!(
            step,
            Recall::Entry {
                line: "first".to_string(),
                index: 2
            }
        );
    }

    #[test]
    fn older_past_oldest_is_unchanged() {
        let history = seeded(&["only"]);
        assert_eq!(history.navigate(1, Direction::Older), Recall::Unchanged);
        // And stays that way however often it is pressed.
        assert_eq!(history.navigate(1, Direction::Older), Recall::Unchanged);
    }

    #[test]
    fn newer_from_browsing_start_clears() {
        let history = seeded(&["first", "second"]);
        assert_eq!(history.navigate(1, Direction::Newer), Recall::Cleared);
        assert_eq!(history.navigate(0, Direction::Newer), Recall::Cleared);
    }

    #[test]
    fn older_then_newer_round_trips() {
        let history = seeded(&["a", "b", "c"]);
        let mut index = 0;
        for expected in ["c", "b", "a"] {
            match history.navigate(index, Direction::Older) {
                Recall::Entry { line, index: next } => {
                    assert_eq!(line, expected);
                    index = next;
                }
                other => panic!("expected entry, got {other:?}"),
            }
        }
        for expected in ["b", "c"] {
            match history.navigate(index, Direction::Newer) {
                Recall::Entry { line, index: next } => {
                    assert_eq!(line, expected);
                    index = next;
                }
                other => panic!("expected entry, got {other:?}"),
            }
        }
        assert_eq!(history.navigate(index, Direction::Newer), Recall::Cleared);
    }

    #[test]
    fn navigate_on_empty_history() {
        let history = History::new();
        assert_eq!(history.navigate(0, Direction::Older), Recall::Unchanged);
        assert_eq!(history.navigate(0, Direction::Newer), Recall::Cleared);
    }
}
