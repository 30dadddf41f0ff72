//! Environment configuration.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Mirror every terminal write to this file (diagnostics).
    pub write_log: Option<String>,
    /// Fixed column width, overriding the detected terminal size.
    pub columns_override: Option<u16>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            write_log: env_string_opt("DRIFTLINE_WRITE_LOG"),
            columns_override: env_columns("DRIFTLINE_COLUMNS"),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_columns(key: &str) -> Option<u16> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|&columns| columns > 0)
}
