#![forbid(unsafe_code)]

//! Game-state kernel for a rhythm-action session.
//!
//! One state tree, mutated only through typed events. Every dispatch runs
//! the handler on a working copy, recomputes derived fields, validates
//! invariants, then commits. No I/O happens in this crate.

/// Bumped whenever the serialized shape of `GameState` changes.
pub const STATE_SCHEMA_VERSION: u32 = 1;

pub mod cache;
pub mod config;
pub mod derive;
pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod hashing;
pub mod invariants;
pub mod pagination;
pub mod scoring;
pub mod state;
pub mod transitions;

pub use cache::ChallengeCache;
pub use config::LaunchConfig;
pub use domain::{Difficulty, GameState, Hand, Rank, TransitionResult};
pub use engine::GameStore;
pub use error::EngineError;
pub use events::{GameEvent, NamedEvent};
