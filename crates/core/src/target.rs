//! Target selection: the active target is the asteroid closest to the bottom.

use crate::field::Asteroid;

/// Return the asteroid with the greatest `y`.
///
/// Ties resolve to the lowest id. `None` for an empty set.
pub fn select_target(asteroids: &[Asteroid]) -> Option<&Asteroid> {
    asteroids.iter().fold(None, |best: Option<&Asteroid>, a| match best {
        Some(b) if b.y > a.y || (b.y == a.y && b.id < a.id) => Some(b),
        _ => Some(a),
    })
}
