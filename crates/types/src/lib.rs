//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no required dependencies, making them usable
//! from the engine, the async runtime, and any rendering host.
//!
//! # Play-area units
//!
//! Positions and sizes are expressed in abstract play-area units. Hosts map
//! their own geometry onto these units; the terminal host uses 10 units per
//! column and 20 per row.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOTION_TICK_MS` | 50 | Fixed motion cadence, independent of frame rate |
//! | `SPAWN_Y` | -50 | Vertical spawn offset above the visible top |
//! | `MIN_ASTEROID_SIZE` | 100 | Smallest asteroid diameter |
//! | `SIZE_PER_CHAR` | 15 | Diameter contributed by each character of the word |
//! | `BOUNDARY_MARGIN` | 50 | Horizontal safety margin on both sides |
//!
//! # Difficulty table
//!
//! | Difficulty | Speed (units/tick) | Spawn interval |
//! |------------|--------------------|----------------|
//! | EASY | 3 | 5000ms |
//! | NORMAL | 4 | 3500ms |
//! | HARD | 5 | 2000ms |
//!
//! # Examples
//!
//! ```
//! use lunetype_types::{Difficulty, Key, ControlKey};
//!
//! let d = Difficulty::from_str("hard").unwrap();
//! assert_eq!(d.spawn_interval_ms(), 2000);
//! assert!(d.records_high_score());
//!
//! assert_eq!(Key::from_name("Shift"), Key::Control(ControlKey::Shift));
//! assert_eq!(Key::from_name("a"), Key::Char('a'));
//! assert_eq!(Key::from_name("F1"), Key::Unrecognized);
//! ```

/// Motion timer cadence in milliseconds.
pub const MOTION_TICK_MS: u32 = 50;

/// Vertical position of a freshly spawned asteroid (above the visible top).
pub const SPAWN_Y: f32 = -50.0;

/// Minimum asteroid size in play-area units.
pub const MIN_ASTEROID_SIZE: f32 = 100.0;

/// Size contributed per character of the asteroid's word.
pub const SIZE_PER_CHAR: f32 = 15.0;

/// Horizontal margin kept free on both edges of the play area.
pub const BOUNDARY_MARGIN: f32 = 50.0;

/// Game difficulty: controls fall speed and spawn cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// ```
    /// use lunetype_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("normal"), Some(Difficulty::Normal));
    /// assert_eq!(Difficulty::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    /// Fall speed in play-area units per motion tick.
    pub fn speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Normal => 4.0,
            Difficulty::Hard => 5.0,
        }
    }

    /// Milliseconds between asteroid spawns.
    pub fn spawn_interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 5000,
            Difficulty::Normal => 3500,
            Difficulty::Hard => 2000,
        }
    }

    /// Only HARD sessions are eligible to write the persisted high score.
    pub fn records_high_score(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

/// Play-area geometry supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Geometry is usable once the width is known and non-zero.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Navigation and modifier keys that never affect the typed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Shift,
    Control,
    Alt,
    Meta,
    CapsLock,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
}

impl ControlKey {
    pub const ALL: [ControlKey; 15] = [
        ControlKey::Shift,
        ControlKey::Control,
        ControlKey::Alt,
        ControlKey::Meta,
        ControlKey::CapsLock,
        ControlKey::Tab,
        ControlKey::Escape,
        ControlKey::ArrowLeft,
        ControlKey::ArrowRight,
        ControlKey::ArrowUp,
        ControlKey::ArrowDown,
        ControlKey::Home,
        ControlKey::End,
        ControlKey::PageUp,
        ControlKey::PageDown,
    ];

    /// DOM `KeyboardEvent.key` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKey::Shift => "Shift",
            ControlKey::Control => "Control",
            ControlKey::Alt => "Alt",
            ControlKey::Meta => "Meta",
            ControlKey::CapsLock => "CapsLock",
            ControlKey::Tab => "Tab",
            ControlKey::Escape => "Escape",
            ControlKey::ArrowLeft => "ArrowLeft",
            ControlKey::ArrowRight => "ArrowRight",
            ControlKey::ArrowUp => "ArrowUp",
            ControlKey::ArrowDown => "ArrowDown",
            ControlKey::Home => "Home",
            ControlKey::End => "End",
            ControlKey::PageUp => "PageUp",
            ControlKey::PageDown => "PageDown",
        }
    }
}

/// A keystroke, resolved once at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Control(ControlKey),
    Char(char),
    Enter,
    Backspace,
    /// Function keys, chords, multi-character IME tokens and the like.
    Unrecognized,
}

impl Key {
    /// Resolve a DOM `KeyboardEvent.key` name.
    ///
    /// Only single-character names become [`Key::Char`]; any other
    /// unknown name is [`Key::Unrecognized`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => return Key::Enter,
            "Backspace" => return Key::Backspace,
            _ => {}
        }

        if let Some(ctrl) = ControlKey::ALL.iter().find(|k| k.as_str() == name) {
            return Key::Control(*ctrl);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => Key::Unrecognized,
        }
    }
}

/// What a keystroke did to the typing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    AppendChar(char),
    DeleteLastChar,
    /// Enter was pressed; `matched` is true when the buffer equalled the
    /// target word exactly and the target was destroyed.
    AttemptComplete { matched: bool },
    Ignored,
}

/// Per-character feedback for the active word (display only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharMark {
    Unset,
    Correct,
    Incorrect,
}

/// Session lifecycle.
///
/// `Loading -> Running -> Ending -> Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    Loading,
    Running,
    Ending,
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::Running => "running",
            GamePhase::Ending => "ending",
            GamePhase::Ended => "ended",
        }
    }
}
