//! Editing-engine state: decoder, line buffer, history, console seam.

pub mod action;
pub mod console;
pub mod history;
pub mod line;
