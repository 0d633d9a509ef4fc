use crate::types::{CharMark, Difficulty, GamePhase, PlayArea};

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidSnapshot {
    pub id: u32,
    pub word: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub active: bool,
}

/// Render projection of a [`crate::GameSession`].
///
/// Hosts draw exclusively from this; it carries no behaviour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub destroyed: u32,
    pub area: Option<PlayArea>,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub active_id: Option<u32>,
    pub active_word: Option<String>,
    /// Feedback for each character of `active_word`.
    pub active_marks: Vec<CharMark>,
    pub typed: String,
    /// The input cursor is shown whenever there is a word to type.
    pub cursor_visible: bool,
}

impl GameSnapshot {
    pub fn active(&self) -> Option<&AsteroidSnapshot> {
        self.asteroids.iter().find(|a| a.active)
    }
}
