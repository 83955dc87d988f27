//! Core game logic - pure, deterministic, and testable
//!
//! This crate owns the match-3 rules: the board, match detection, the
//! animation state machine that paces every board change, and the cascade
//! that ties them together. It draws and plays sounds only through the
//! [`ports`] traits, so it runs the same in a terminal, a GUI, or a test.
//!
//! - **Deterministic**: the world's RNG is seeded from [`WorldConfig`]
//! - **Tick-driven**: call [`World::tick`] every frame with the elapsed time
//! - **Single animation**: interaction is disabled while one is in flight
//!
//! # Module Structure
//!
//! - [`board`]: grid of cells, no-match fill, gravity planning
//! - [`matcher`]: runs of three or more in rows and columns
//! - [`animation`]: easing, move/destroy payloads, continuations
//! - [`world`]: the cascade orchestrator and player entry points
//! - [`scoring`]: Classic and QuickDeath rules
//! - [`leaderboard`]: best results per mode
//! - [`audio`]: background music rotation
//!
//! # Example
//!
//! ```
//! use match3_core::{GameMode, NullAudio, World, WorldConfig};
//! use match3_core::types::{GameModeKind, Vec2};
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! world.activate(GameMode::new(GameModeKind::Classic));
//!
//! // Most swaps on a fresh board do not match and are rejected.
//! let _ = world.try_switch_cells(Vec2::new(0, 0), Vec2::new(1, 0), false);
//!
//! let mut frames = 0;
//! while !world.is_interaction_enabled() && frames < 10_000 {
//!     world.tick(16, &mut NullAudio);
//!     frames += 1;
//! }
//! assert!(world.is_interaction_enabled());
//! ```

pub mod animation;
pub mod audio;
pub mod board;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod matcher;
pub mod ports;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod world;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use animation::{Animation, AnimationPayload, Continuation, Easing, MoveRecord, Step};
pub use audio::MusicScheduler;
pub use board::{Board, Fall};
pub use error::{BoardError, ConfigError};
pub use events::{EventHandle, EventRegistry};
pub use leaderboard::Leaderboard;
pub use matcher::{find_matches, DestructionResult};
pub use ports::{AudioSink, Canvas, MusicPlayer, NullAudio, RecordingAudio};
pub use rng::SimpleRng;
pub use scoring::{format_seconds, GameMode};
pub use snapshot::WorldSnapshot;
pub use world::{SwitchOutcome, World, WorldConfig, WorldEvent};
