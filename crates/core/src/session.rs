//! Game session - the play-screen state machine.
//!
//! `Loading -> Running -> Ending -> Ended`
//!
//! The session is driven by three independent inputs: the spawn timer
//! ([`GameSession::spawn_tick`]), the fixed 50ms motion timer
//! ([`GameSession::motion_tick`]) and keystrokes ([`GameSession::on_key`]).
//! Each call runs to completion, so the asteroid set, the active target and
//! the typed buffer are always mutually consistent between calls.
//!
//! The session does no I/O. Timers, word loading and score reporting belong
//! to the host runtime.

use crate::field::{Asteroid, AsteroidField};
use crate::matcher::{mark_chars_into, TypingMatcher};
use crate::rng::SimpleRng;
use crate::snapshot::{AsteroidSnapshot, GameSnapshot};
use crate::target::select_target;
use crate::types::{Difficulty, GamePhase, Key, KeyAction, PlayArea};
use crate::words::{WordCycle, WordPool};

/// Result of a motion tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionOutcome {
    /// Session is not running; nothing moved.
    Idle,
    Moved {
        /// True when the active target changed on this tick.
        retargeted: bool,
    },
    /// At least one asteroid crossed the bottom edge; the session is now Ending.
    GameOver { crossed: Vec<u32> },
}

/// Final figures handed to the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub destroyed: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    phase: GamePhase,
    rng: SimpleRng,
    pool: Option<WordPool>,
    cycle: WordCycle,
    area: Option<PlayArea>,
    field: AsteroidField,
    matcher: TypingMatcher,
    destroyed: u32,
    motion_ticks: u64,
}

impl GameSession {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self {
            difficulty,
            phase: GamePhase::Loading,
            rng: SimpleRng::new(seed),
            pool: None,
            cycle: WordCycle::new(),
            area: None,
            field: AsteroidField::new(),
            matcher: TypingMatcher::new(),
            destroyed: 0,
            motion_ticks: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }

    pub fn area(&self) -> Option<PlayArea> {
        self.area
    }

    pub fn field(&self) -> &AsteroidField {
        &self.field
    }

    pub fn typed(&self) -> &str {
        self.matcher.buffer()
    }

    pub fn motion_ticks(&self) -> u64 {
        self.motion_ticks
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// The asteroid currently eligible for typing.
    pub fn active_target(&self) -> Option<&Asteroid> {
        self.matcher.target().and_then(|id| self.field.get(id))
    }

    /// Hand over the loaded vocabulary.
    pub fn provide_words(&mut self, pool: WordPool) {
        self.pool = Some(pool);
        self.try_start();
    }

    /// Update play-area geometry.
    ///
    /// Already-spawned asteroids keep their position; only future spawns and
    /// the game-over line use the new geometry.
    pub fn resize(&mut self, area: PlayArea) {
        self.area = Some(area);
        self.try_start();
    }

    fn try_start(&mut self) {
        if self.phase != GamePhase::Loading {
            return;
        }
        let words_ready = self.pool.as_ref().is_some_and(|p| !p.is_empty());
        let area_ready = self.area.is_some_and(|a| a.is_ready());
        if words_ready && area_ready {
            self.phase = GamePhase::Running;
        }
    }

    /// Spawn timer fired. Returns the new asteroid's id.
    pub fn spawn_tick(&mut self) -> Option<u32> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let pool = self.pool.as_ref()?;
        let width = self.area.map(|a| a.width)?;
        if width <= 0.0 {
            return None;
        }

        let word = self.cycle.draw(pool, &mut self.rng)?;
        let id = self.field.spawn(&word, width, &mut self.rng)?.id;
        self.refresh_target();
        Some(id)
    }

    /// Motion timer fired: advance every asteroid and check the bottom edge.
    pub fn motion_tick(&mut self) -> MotionOutcome {
        if self.phase != GamePhase::Running {
            return MotionOutcome::Idle;
        }
        let Some(height) = self.area.map(|a| a.height) else {
            return MotionOutcome::Idle;
        };

        self.motion_ticks += 1;
        let crossed = self.field.advance(self.difficulty.speed(), height);
        let retargeted = self.refresh_target();

        if !crossed.is_empty() {
            self.phase = GamePhase::Ending;
            return MotionOutcome::GameOver { crossed };
        }
        MotionOutcome::Moved { retargeted }
    }

    /// Route a keystroke to the matcher. Only effective while running.
    pub fn on_key(&mut self, key: Key) -> KeyAction {
        if self.phase != GamePhase::Running {
            return KeyAction::Ignored;
        }

        let target = self.active_target().map(|a| (a.id, a.word.clone()));
        let action = self
            .matcher
            .on_key(key, target.as_ref().map(|(_, w)| w.as_str()));

        if let (KeyAction::AttemptComplete { matched: true }, Some((id, _))) = (action, target) {
            self.field.remove(id);
            self.destroyed += 1;
            self.refresh_target();
        }
        action
    }

    /// Re-derive the active target; clears the typed buffer if it changed.
    fn refresh_target(&mut self) -> bool {
        let next = select_target(self.field.asteroids()).map(|a| a.id);
        self.matcher.retarget(next)
    }

    /// Leave `Ending` for the terminal `Ended` state.
    ///
    /// Returns `None` unless the session was `Ending`.
    pub fn finish(&mut self) -> Option<SessionResult> {
        if self.phase != GamePhase::Ending {
            return None;
        }
        self.phase = GamePhase::Ended;
        Some(self.result())
    }

    pub fn result(&self) -> SessionResult {
        SessionResult {
            destroyed: self.destroyed,
            difficulty: self.difficulty,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let active_id = self.matcher.target();

        out.phase = self.phase;
        out.difficulty = self.difficulty;
        out.destroyed = self.destroyed;
        out.area = self.area;
        out.active_id = active_id;

        out.asteroids.clear();
        out.asteroids.extend(self.field.asteroids().iter().map(|a| AsteroidSnapshot {
            id: a.id,
            word: a.word.clone(),
            x: a.x,
            y: a.y,
            size: a.size,
            active: Some(a.id) == active_id,
        }));

        out.typed.clear();
        out.typed.push_str(self.matcher.buffer());

        match self.active_target() {
            Some(a) => {
                mark_chars_into(&a.word, self.matcher.buffer(), &mut out.active_marks);
                out.active_word = Some(a.word.clone());
                out.cursor_visible = true;
            }
            None => {
                out.active_marks.clear();
                out.active_word = None;
                out.cursor_visible = false;
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut AsteroidField {
        &mut self.field
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Difficulty::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CharMark, SPAWN_Y};

    fn running(difficulty: Difficulty, words: &str) -> GameSession {
        let mut s = GameSession::new(difficulty, 12345);
        s.provide_words(WordPool::from_text("inline", words).unwrap());
        s.resize(PlayArea::new(800.0, 600.0));
        assert_eq!(s.phase(), GamePhase::Running);
        s
    }

    fn type_word(s: &mut GameSession, w: &str) {
        for c in w.chars() {
            s.on_key(Key::Char(c));
        }
    }

    #[test]
    fn test_loading_waits_for_words_and_geometry() {
        let mut s = GameSession::new(Difficulty::Easy, 1);
        assert_eq!(s.phase(), GamePhase::Loading);

        s.resize(PlayArea::new(0.0, 0.0));
        assert_eq!(s.phase(), GamePhase::Loading);

        s.provide_words(WordPool::from_text("inline", "comet").unwrap());
        assert_eq!(s.phase(), GamePhase::Loading);

        s.resize(PlayArea::new(800.0, 600.0));
        assert_eq!(s.phase(), GamePhase::Running);
    }

    #[test]
    fn test_nothing_happens_while_loading() {
        let mut s = GameSession::new(Difficulty::Hard, 1);
        s.provide_words(WordPool::from_text("inline", "comet").unwrap());
        assert_eq!(s.spawn_tick(), None);
        assert_eq!(s.motion_tick(), MotionOutcome::Idle);
        assert_eq!(s.on_key(Key::Char('c')), KeyAction::Ignored);
        assert!(s.field().is_empty());
    }

    #[test]
    fn test_first_spawn_becomes_target() {
        let mut s = running(Difficulty::Normal, "comet");
        let id = s.spawn_tick().unwrap();
        let a = s.active_target().unwrap();
        assert_eq!(a.id, id);
        assert_eq!(a.word, "comet");
        assert_eq!(a.y, SPAWN_Y);
    }

    #[test]
    fn test_exact_match_destroys_target() {
        let mut s = running(Difficulty::Easy, "asteroid");
        s.spawn_tick();

        type_word(&mut s, "asteroi");
        assert_eq!(
            s.on_key(Key::Enter),
            KeyAction::AttemptComplete { matched: false }
        );
        assert_eq!(s.destroyed(), 0);
        assert_eq!(s.field().len(), 1);

        type_word(&mut s, "d");
        assert_eq!(
            s.on_key(Key::Enter),
            KeyAction::AttemptComplete { matched: true }
        );
        assert_eq!(s.destroyed(), 1);
        assert!(s.field().is_empty());
        assert_eq!(s.typed(), "");
        assert!(s.active_target().is_none());
    }

    #[test]
    fn test_destroy_removes_only_target_even_with_same_word() {
        let mut s = running(Difficulty::Easy, "twin");
        let first = s.spawn_tick().unwrap();
        s.motion_tick();
        let second = s.spawn_tick().unwrap();
        assert_eq!(s.active_target().unwrap().id, first);

        type_word(&mut s, "twin");
        s.on_key(Key::Enter);
        assert!(s.field().get(first).is_none());
        assert!(s.field().get(second).is_some());
        assert_eq!(s.active_target().unwrap().id, second);
    }

    #[test]
    fn test_buffer_resets_when_target_changes() {
        let mut s = running(Difficulty::Easy, "alpha\nbeta");
        let first = s.spawn_tick().unwrap();
        type_word(&mut s, "al");
        assert_eq!(s.typed(), "al");

        // A lower asteroid appears; it becomes the target.
        s.spawn_tick();
        let second = s.field().asteroids()[1].id;
        s.field_mut().asteroids_mut()[1].y = 300.0;
        let outcome = s.motion_tick();

        assert_eq!(outcome, MotionOutcome::Moved { retargeted: true });
        assert_ne!(first, second);
        assert_eq!(s.active_target().unwrap().id, second);
        assert_eq!(s.typed(), "");
    }

    #[test]
    fn test_buffer_survives_when_target_unchanged() {
        let mut s = running(Difficulty::Easy, "alpha");
        s.spawn_tick();
        type_word(&mut s, "alp");
        assert_eq!(s.motion_tick(), MotionOutcome::Moved { retargeted: false });
        assert_eq!(s.typed(), "alp");
    }

    #[test]
    fn test_game_over_transitions_to_ending() {
        let mut s = running(Difficulty::Hard, "comet");
        let id = s.spawn_tick().unwrap();
        s.field_mut().asteroids_mut()[0].y = 598.0;

        assert_eq!(s.motion_tick(), MotionOutcome::GameOver { crossed: vec![id] });
        assert_eq!(s.phase(), GamePhase::Ending);

        // Nothing advances after the game-over tick.
        assert_eq!(s.motion_tick(), MotionOutcome::Idle);
        assert_eq!(s.spawn_tick(), None);
        assert_eq!(s.on_key(Key::Enter), KeyAction::Ignored);
    }

    #[test]
    fn test_finish_only_from_ending() {
        let mut s = running(Difficulty::Hard, "comet");
        assert!(s.finish().is_none());

        s.spawn_tick();
        s.field_mut().asteroids_mut()[0].y = 10_000.0;
        s.motion_tick();

        let r = s.finish().unwrap();
        assert_eq!(r.destroyed, 0);
        assert_eq!(r.difficulty, Difficulty::Hard);
        assert_eq!(s.phase(), GamePhase::Ended);
        assert!(s.finish().is_none());
    }

    #[test]
    fn test_resize_does_not_reflow_existing_asteroids() {
        let mut s = running(Difficulty::Easy, "comet");
        s.spawn_tick();
        let before = s.field().asteroids()[0].x;
        s.resize(PlayArea::new(200.0, 600.0));
        assert_eq!(s.field().asteroids()[0].x, before);

        s.spawn_tick();
        let later = &s.field().asteroids()[1];
        assert_eq!(later.x, 50.0); // 200 - 2*50 - 100 leaves no horizontal slack
    }

    #[test]
    fn test_snapshot_projects_active_word() {
        let mut s = running(Difficulty::Easy, "nebula");
        let snap = s.snapshot();
        assert!(!snap.cursor_visible);
        assert!(snap.active_marks.is_empty());

        s.spawn_tick();
        type_word(&mut s, "nex");
        let snap = s.snapshot();
        assert!(snap.cursor_visible);
        assert_eq!(snap.active_word.as_deref(), Some("nebula"));
        assert_eq!(snap.typed, "nex");
        assert_eq!(
            &snap.active_marks[..3],
            &[CharMark::Correct, CharMark::Correct, CharMark::Incorrect]
        );
        assert!(snap.active().is_some());
        assert_eq!(snap.phase, GamePhase::Running);
    }
}
