//! Rendering pipeline.

pub mod draw;
pub mod output;
pub mod viewport;

pub use output::{Color, ConsoleCmd, OutputGate};
pub use viewport::{Viewport, PROMPT_WIDTH, SCROLL_INDICATOR_WIDTH};
