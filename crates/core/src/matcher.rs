//! Typing matcher - keystroke evaluation against the active target.
//!
//! The matcher owns the typed buffer and remembers which target it belongs
//! to. Whenever the target changes the buffer is cleared, so partial input
//! never carries over to a different word.

use crate::types::{CharMark, Key, KeyAction};

#[derive(Debug, Clone, Default)]
pub struct TypingMatcher {
    buffer: String,
    target: Option<u32>,
}

impl TypingMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    /// Point the matcher at a (possibly new) target.
    ///
    /// Returns true and clears the buffer if the target id changed.
    pub fn retarget(&mut self, target: Option<u32>) -> bool {
        if self.target == target {
            return false;
        }
        self.target = target;
        self.buffer.clear();
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Apply a keystroke.
    ///
    /// `target_word` is the active target's text. Enter yields
    /// `AttemptComplete { matched: true }` only on an exact, case-sensitive
    /// match; the buffer is cleared on success and untouched on failure.
    pub fn on_key(&mut self, key: Key, target_word: Option<&str>) -> KeyAction {
        match key {
            Key::Control(_) | Key::Unrecognized => KeyAction::Ignored,
            Key::Char(c) if c.is_control() => KeyAction::Ignored,
            Key::Char(c) => {
                self.buffer.push(c);
                KeyAction::AppendChar(c)
            }
            Key::Backspace => {
                self.buffer.pop();
                KeyAction::DeleteLastChar
            }
            Key::Enter => {
                let matched = matches!(target_word, Some(w) if w == self.buffer);
                if matched {
                    self.buffer.clear();
                }
                KeyAction::AttemptComplete { matched }
            }
        }
    }

    /// Per-position feedback for `word` against the current buffer.
    pub fn marks(&self, word: &str) -> Vec<CharMark> {
        let mut out = Vec::new();
        mark_chars_into(word, &self.buffer, &mut out);
        out
    }
}

/// Classify every character of `word` against `typed` at the same index.
///
/// Positions past the end of `typed` are `Unset`. Characters typed beyond the
/// end of `word` have no position to mark.
pub fn mark_chars_into(word: &str, typed: &str, out: &mut Vec<CharMark>) {
    out.clear();
    let mut typed_chars = typed.chars();
    for expected in word.chars() {
        let mark = match typed_chars.next() {
            None => CharMark::Unset,
            Some(t) if t == expected => CharMark::Correct,
            Some(_) => CharMark::Incorrect,
        };
        out.push(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ControlKey;

    fn type_str(m: &mut TypingMatcher, s: &str) {
        for c in s.chars() {
            m.on_key(Key::Char(c), None);
        }
    }

    #[test]
    fn test_control_keys_are_ignored() {
        let mut m = TypingMatcher::new();
        type_str(&mut m, "ab");
        for k in ControlKey::ALL {
            assert_eq!(m.on_key(Key::Control(k), Some("ab")), KeyAction::Ignored);
        }
        assert_eq!(m.on_key(Key::Unrecognized, Some("ab")), KeyAction::Ignored);
        assert_eq!(m.buffer(), "ab");
    }

    #[test]
    fn test_control_characters_are_not_typed() {
        let mut m = TypingMatcher::new();
        assert_eq!(m.on_key(Key::Char('\u{7}'), None), KeyAction::Ignored);
        assert_eq!(m.buffer(), "");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut m = TypingMatcher::new();
        assert_eq!(m.on_key(Key::Backspace, None), KeyAction::DeleteLastChar);
        assert_eq!(m.buffer(), "");
        type_str(&mut m, "xy");
        m.on_key(Key::Backspace, None);
        assert_eq!(m.buffer(), "x");
    }

    #[test]
    fn test_enter_exact_match_only() {
        let mut m = TypingMatcher::new();
        type_str(&mut m, "asteroi");
        assert_eq!(
            m.on_key(Key::Enter, Some("asteroid")),
            KeyAction::AttemptComplete { matched: false }
        );
        assert_eq!(m.buffer(), "asteroi");

        type_str(&mut m, "d");
        assert_eq!(
            m.on_key(Key::Enter, Some("asteroid")),
            KeyAction::AttemptComplete { matched: true }
        );
        assert_eq!(m.buffer(), "");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let mut m = TypingMatcher::new();
        type_str(&mut m, "Comet");
        assert_eq!(
            m.on_key(Key::Enter, Some("comet")),
            KeyAction::AttemptComplete { matched: false }
        );
    }

    #[test]
    fn test_enter_without_target_never_matches() {
        let mut m = TypingMatcher::new();
        assert_eq!(
            m.on_key(Key::Enter, None),
            KeyAction::AttemptComplete { matched: false }
        );
    }

    #[test]
    fn test_retarget_clears_buffer_only_on_change() {
        let mut m = TypingMatcher::new();
        m.retarget(Some(1));
        type_str(&mut m, "abc");
        assert!(!m.retarget(Some(1)));
        assert_eq!(m.buffer(), "abc");
        assert!(m.retarget(Some(2)));
        assert_eq!(m.buffer(), "");
    }

    #[test]
    fn test_marks_including_overshoot() {
        let mut m = TypingMatcher::new();
        type_str(&mut m, "nxb");
        assert_eq!(
            m.marks("nebula"),
            vec![
                CharMark::Correct,
                CharMark::Incorrect,
                CharMark::Correct,
                CharMark::Unset,
                CharMark::Unset,
                CharMark::Unset,
            ]
        );

        type_str(&mut m, "ulaXYZ");
        assert_eq!(m.marks("nebula").len(), 6);
    }
}
