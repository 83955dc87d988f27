//! Match-3 (workspace facade crate).
//!
//! Re-exports the workspace crates as `match3::{core,input,term,types}` and
//! hosts the terminal application state shared by the binary and the
//! integration tests.

pub mod app;
pub mod highscores;

pub use match3_core as core;
pub use match3_input as input;
pub use match3_term as term;
pub use match3_types as types;
