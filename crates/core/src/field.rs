//! Asteroid field - the live set of falling asteroids.
//!
//! Asteroids are kept in spawn order, so ids are strictly increasing along
//! the vector. Only `y` changes after spawn.

use crate::rng::SimpleRng;
use crate::types::{BOUNDARY_MARGIN, MIN_ASTEROID_SIZE, SIZE_PER_CHAR, SPAWN_Y};

/// A falling target bearing a word.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub id: u32,
    pub word: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Asteroid {
    /// Diameter for a word: `max(MIN_ASTEROID_SIZE, chars * SIZE_PER_CHAR)`.
    pub fn size_for(word: &str) -> f32 {
        MIN_ASTEROID_SIZE.max(word.chars().count() as f32 * SIZE_PER_CHAR)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AsteroidField {
    asteroids: Vec<Asteroid>,
    next_id: u32,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an asteroid above the visible area.
    ///
    /// `x` is uniform in `[margin, width - margin - size]`; when the area is
    /// too narrow for that range the asteroid is pinned to the left margin.
    /// Returns `None` (and consumes no id) if the width is unknown or the
    /// word is empty.
    pub fn spawn(&mut self, word: &str, play_width: f32, rng: &mut SimpleRng) -> Option<&Asteroid> {
        if word.is_empty() || play_width <= 0.0 {
            return None;
        }

        let size = Asteroid::size_for(word);
        let span = (play_width - 2.0 * BOUNDARY_MARGIN - size).max(0.0);
        let x = BOUNDARY_MARGIN + rng.next_f32() * span;

        let id = self.next_id;
        self.next_id += 1;

        self.asteroids.push(Asteroid {
            id,
            word: word.to_owned(),
            x,
            y: SPAWN_Y,
            size,
        });
        self.asteroids.last()
    }

    /// Move every asteroid down by `speed`.
    ///
    /// Returns the ids of asteroids whose `y` now exceeds `play_height`.
    pub fn advance(&mut self, speed: f32, play_height: f32) -> Vec<u32> {
        let mut crossed = Vec::new();
        for a in &mut self.asteroids {
            a.y += speed;
            if a.y > play_height {
                crossed.push(a.id);
            }
        }
        crossed
    }

    /// Remove an asteroid by id. No-op if absent.
    pub fn remove(&mut self, id: u32) -> Option<Asteroid> {
        let idx = self.asteroids.iter().position(|a| a.id == id)?;
        Some(self.asteroids.remove(idx))
    }

    pub fn get(&self, id: u32) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    /// Id the next spawn will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    #[cfg(test)]
    pub(crate) fn asteroids_mut(&mut self) -> &mut Vec<Asteroid> {
        &mut self.asteroids
    }
}
