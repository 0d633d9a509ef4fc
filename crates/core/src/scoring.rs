//! High-score policy.
//!
//! Only HARD sessions write the persisted high score, and only upward. Any
//! difficulty may show the stored record.

use crate::types::Difficulty;

/// What the Ending phase should do with the score store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// Difficulty is not eligible and no record exists; nothing to write or show.
    Skip,
    /// No record exists yet for this user.
    Initialize(u32),
    /// New best; overwrite the stored value.
    Raise(u32),
    /// The stored value stands (always the case off HARD).
    Keep(u32),
}

impl ScoreUpdate {
    /// Value to persist, if any.
    pub fn write_value(&self) -> Option<u32> {
        match *self {
            ScoreUpdate::Initialize(v) | ScoreUpdate::Raise(v) => Some(v),
            ScoreUpdate::Skip | ScoreUpdate::Keep(_) => None,
        }
    }

    /// Best known high score after the update is applied.
    pub fn best(&self) -> Option<u32> {
        match *self {
            ScoreUpdate::Skip => None,
            ScoreUpdate::Initialize(v) | ScoreUpdate::Raise(v) | ScoreUpdate::Keep(v) => Some(v),
        }
    }
}

/// Decide the high-score update for a finished session.
pub fn decide(difficulty: Difficulty, stored: Option<u32>, destroyed: u32) -> ScoreUpdate {
    if !difficulty.records_high_score() {
        return stored.map_or(ScoreUpdate::Skip, ScoreUpdate::Keep);
    }
    match stored {
        None => ScoreUpdate::Initialize(destroyed),
        Some(prev) if destroyed > prev => ScoreUpdate::Raise(destroyed),
        Some(prev) => ScoreUpdate::Keep(prev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_below_record_keeps() {
        assert_eq!(decide(Difficulty::Hard, Some(10), 7), ScoreUpdate::Keep(10));
    }

    #[test]
    fn test_hard_above_record_raises() {
        let u = decide(Difficulty::Hard, Some(10), 15);
        assert_eq!(u, ScoreUpdate::Raise(15));
        assert_eq!(u.write_value(), Some(15));
    }

    #[test]
    fn test_hard_equal_record_keeps() {
        assert_eq!(decide(Difficulty::Hard, Some(10), 10), ScoreUpdate::Keep(10));
    }

    #[test]
    fn test_first_hard_game_initializes() {
        assert_eq!(decide(Difficulty::Hard, None, 3), ScoreUpdate::Initialize(3));
    }

    #[test]
    fn test_non_hard_never_writes() {
        for d in [Difficulty::Easy, Difficulty::Normal] {
            let u = decide(d, Some(10), 1000);
            assert_eq!(u, ScoreUpdate::Keep(10));
            assert_eq!(u.write_value(), None);
            assert_eq!(u.best(), Some(10));
            assert_eq!(decide(d, None, 1000), ScoreUpdate::Skip);
        }
    }
}
