//! Terminal input module.
//!
//! Maps `crossterm` key events into the engine's closed [`Key`](types::Key)
//! enum. The mapping is resolved once here so nothing downstream compares
//! key names as strings.

pub mod map;

pub use lunetype_types as types;

pub use map::{map_key_event, should_quit};
