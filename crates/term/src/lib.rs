//! Terminal front end for the typing game.
//!
//! Frames are painted onto a plain glyph canvas and put on screen with
//! crossterm. No widget toolkit: the play field is a fixed layout of framed
//! rows, and asteroid words are placed by scaling play-area units onto cells.
//!
//! - [`canvas`]: glyph grid the view paints into
//! - [`game_view`]: snapshot to canvas projection (pure)
//! - [`screen`]: row-diffing crossterm output

pub mod canvas;
pub mod game_view;
pub mod screen;

pub use lunetype_core as core;
pub use lunetype_types as types;

pub use canvas::{rgb, Canvas, Glyph, Ink, Weight};
pub use crossterm::style::Color;
pub use game_view::{GameView, ResultsCard, Viewport, UNITS_PER_COL, UNITS_PER_ROW};
pub use screen::Screen;
