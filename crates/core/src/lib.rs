//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole typing-game engine: word drawing, asteroid
//! spawning and motion, target selection, keystroke evaluation, and the
//! session state machine that ties them together. It has **no dependencies**
//! on timers, terminals, or storage, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every rule is exercised without a clock
//! - **Portable**: The same engine can sit behind a terminal, a browser, or a test harness
//!
//! # Module Structure
//!
//! - [`words`]: word list loading and non-repeating draws
//! - [`field`]: live asteroid set, spawn geometry, and motion
//! - [`target`]: active-target selection (lowest asteroid on screen)
//! - [`matcher`]: typed buffer and exact-match completion
//! - [`scoring`]: high-score update policy
//! - [`session`]: `Loading -> Running -> Ending -> Ended` state machine
//! - [`snapshot`]: render projection of a session
//! - [`rng`]: seeded LCG
//!
//! # Example
//!
//! ```
//! use lunetype_core::{GameSession, WordPool};
//! use lunetype_types::{Difficulty, Key, KeyAction, PlayArea};
//!
//! let mut game = GameSession::new(Difficulty::Hard, 12345);
//! game.provide_words(WordPool::from_text("inline", "nebula").unwrap());
//! game.resize(PlayArea::new(800.0, 600.0));
//!
//! game.spawn_tick();
//! for c in "nebula".chars() {
//!     game.on_key(Key::Char(c));
//! }
//! assert_eq!(game.on_key(Key::Enter), KeyAction::AttemptComplete { matched: true });
//! assert_eq!(game.destroyed(), 1);
//! ```
//!
//! # Timing
//!
//! The session never reads a clock. The host calls
//! [`GameSession::spawn_tick`](session::GameSession::spawn_tick) every
//! `Difficulty::spawn_interval_ms()` and
//! [`GameSession::motion_tick`](session::GameSession::motion_tick) every
//! `MOTION_TICK_MS` (50ms), independently of its frame rate.

pub mod field;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod target;
pub mod words;

pub use lunetype_types as types;

pub use field::{Asteroid, AsteroidField};
pub use matcher::{mark_chars_into, TypingMatcher};
pub use rng::SimpleRng;
pub use scoring::{decide, ScoreUpdate};
pub use session::{GameSession, MotionOutcome, SessionResult};
pub use snapshot::{AsteroidSnapshot, GameSnapshot};
pub use target::select_target;
pub use words::{LoadError, WordCycle, WordPool};
