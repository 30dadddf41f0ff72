//! Terminal write-log sink.
//!
//! When `DRIFTLINE_WRITE_LOG` points at a file, every byte sent to the
//! terminal is appended there as well. Useful for replaying a session's
//! escape-sequence traffic when debugging redraw behavior.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
pub struct WriteLog {
    path: PathBuf,
    failed: bool,
}

impl WriteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            failed: false,
        }
    }

    /// Append a chunk of terminal output. The first failure disables the log
    /// for the rest of the session; diagnostics must never break rendering.
    pub fn record(&mut self, data: &str) {
        if self.failed || data.is_empty() {
            return;
        }
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(data.as_bytes()));
        if result.is_err() {
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WriteLog;
    use std::fs;

    #[test]
    fn records_append_in_order() {
        let dir = std::env::temp_dir().join(format!("driftline-writelog-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("session.log");
        let _ = fs::remove_file(&path);

        let mut log = WriteLog::new(&path);
        log.record("drift> ");
        log.record("let x = 1");
        assert_eq!(
            fs::read_to_string(&path).expect("read log"),
            "drift> let x = 1"
        );

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn failure_disables_log_without_panicking() {
        let mut log = WriteLog::new("/nonexistent-dir/driftline.log");
        log.record("a");
        log.record("b");
        assert!(log.failed);
    }
}
