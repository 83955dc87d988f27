//! Terminal front end for the match-3 board.
//!
//! Everything renders into a [`FrameBuffer`] that is diffed and flushed by
//! [`TerminalRenderer`]. The board itself is drawn by the core `World`
//! through [`TermCanvas`], so this crate only decides where things go and how
//! tiles look.
//!
//! - `game_view` lays out the board, its frame and the status footer
//! - `menu_view` is the main menu and leaderboard screen
//! - `sound` maps sound effects to the bell and simulates music tracks

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;
pub mod sound;

pub use match3_core as core;
pub use match3_types as types;

pub use canvas::{tile_style, TermCanvas};
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{BoardLayout, GameStatus, GameView, Viewport};
pub use menu_view::{Menu, MenuItem, MenuStatus, MenuView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sound::{SilentMusic, TerminalBell, TRACKS};
