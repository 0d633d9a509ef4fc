//! Runtime module - real-time orchestration of a typing session
//!
//! Bridges the pure engine in `lunetype-core` with wall-clock timers, host
//! input, and the external collaborators a session needs.
//!
//! # Concurrency model
//!
//! One tokio task owns the [`GameSession`](core::GameSession). Two periodic
//! sources (the spawn timer and the fixed 50ms motion timer) and one event
//! channel (keys, resizes, exit) are multiplexed with `select!`; every
//! handler runs to completion, so no locking is required.
//!
//! # Collaborators
//!
//! - [`IdentityProvider`]: current user id or guest
//! - [`ScoreStore`]: `high_score` / `set_high_score` / `initialize`
//! - results handoff: [`GameLoop::run`] returns a [`GameResult`]
//!
//! # Environment Variables
//!
//! See [`GameConfig::from_env`]:
//!
//! - `LUNETYPE_DIFFICULTY`: `easy` | `normal` | `hard` (default: easy)
//! - `LUNETYPE_WORDS`: word list path (default: `assets/words.txt`)
//! - `LUNETYPE_SCORES`: JSON score store path (default: `lunetype-scores.json`)
//! - `LUNETYPE_USER`: user id; unset means guest play
//! - `LUNETYPE_SEED`: RNG seed (default: derived from the clock)
//! - `LUNETYPE_SCORE_TIMEOUT_MS`: bound on the score report (default: 3000)
//! - `LUNETYPE_LOG_PATH`: log file for the terminal binary

pub mod collab;
pub mod config;
pub mod game_loop;
pub mod report;
pub mod store;
pub mod words;

pub use lunetype_core as core;
pub use lunetype_types as types;

pub use collab::{
    GameResult, Guest, IdentityProvider, ScoreStore, StaticIdentity, StoreError, UserId,
};
pub use config::GameConfig;
pub use game_loop::{GameLoop, HostEvent, LoopError, LoopOutcome};
pub use report::{report_high_score, ReportOutcome};
pub use store::{JsonFileScoreStore, MemoryScoreStore, UserRecord};
pub use words::WordSource;
