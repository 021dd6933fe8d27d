//! Bridge between the UI thread and the backend worker that talks HTTP.

pub mod commands;
pub mod runtime;
