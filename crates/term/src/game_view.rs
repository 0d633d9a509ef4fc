//! GameView: paints a `core::GameSnapshot` onto a terminal canvas.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom:
//!
//! ```text
//!  LUNETYPE  HARD  DESTROYED 3        <- header
//! ┌──────────────────────────────┐
//! │      (nebula)                │    <- play field
//! │               (orbit)        │
//! └──────────────────────────────┘
//!  > neb_                             <- input line
//!  ENTER fire  BKSP erase  ...        <- hints
//! ```

use crossterm::style::Color;

use crate::canvas::{rgb, Canvas, Glyph, Ink};
use crate::core::{AsteroidSnapshot, GameSnapshot};
use crate::types::{CharMark, Difficulty, GamePhase, PlayArea};

/// Play-area units covered by one terminal column.
pub const UNITS_PER_COL: f32 = 10.0;
/// Play-area units covered by one terminal row.
pub const UNITS_PER_ROW: f32 = 20.0;

const HEADER_ROWS: u16 = 1;
const FOOTER_ROWS: u16 = 2;

const FIELD_BG: Color = rgb(12, 12, 24);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Interior of the play frame in terminal cells, `(cols, rows)`.
    pub fn field_cells(&self) -> (u16, u16) {
        (
            self.width.saturating_sub(2),
            self.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS + 2),
        )
    }
}

/// Figures shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsCard {
    pub destroyed: u32,
    pub difficulty: Difficulty,
    pub high_score: Option<u32>,
}

/// Paints game snapshots and the results card onto a canvas.
pub struct GameView {
    units_per_col: f32,
    units_per_row: f32,
}

impl Default for GameView {
    fn default() -> Self {
        // Roughly 1:2 glyph aspect ratio keeps asteroids falling at an even pace.
        Self {
            units_per_col: UNITS_PER_COL,
            units_per_row: UNITS_PER_ROW,
        }
    }
}

impl GameView {
    /// Play-area geometry for a terminal of this size.
    ///
    /// Feed this to the session on startup and on every resize.
    pub fn play_area(&self, viewport: Viewport) -> PlayArea {
        let (cols, rows) = viewport.field_cells();
        PlayArea::new(
            cols as f32 * self.units_per_col,
            rows as f32 * self.units_per_row,
        )
    }


    /// Paint the play screen onto `canvas`, reshaping it to the viewport.
    ///
    /// Reusing one canvas across frames avoids reallocating it every tick.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height, Glyph::BLANK);

        let (cols, rows) = viewport.field_cells();
        let frame_y = HEADER_ROWS;

        draw_header(canvas, snap);

        canvas.fill(1, frame_y + 1, cols, rows, Glyph::new(' ', Ink::PLAIN.on(FIELD_BG)));
        draw_border(canvas, 0, frame_y, viewport.width, rows + 2, Ink::fg(rgb(120, 120, 150)));

        // Active target last so it stays readable when words overlap.
        for a in snap.asteroids.iter().filter(|a| !a.active) {
            self.draw_asteroid(canvas, a, None, cols, rows);
        }
        if let Some(a) = snap.active() {
            self.draw_asteroid(canvas, a, Some(&snap.active_marks), cols, rows);
        }

        draw_input_line(canvas, snap, viewport);

        let banner = match snap.phase {
            GamePhase::Loading => "LOADING",
            GamePhase::Ending | GamePhase::Ended => "GAME OVER",
            GamePhase::Running => return,
        };
        draw_banner(canvas, viewport.width, frame_y + (rows + 2) / 2, banner);
    }

    /// Paint the play screen onto a fresh canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::default();
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    /// Paint the post-game results card, centred in the viewport.
    pub fn render_results_into(&self, card: &ResultsCard, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height, Glyph::BLANK);

        let (box_w, box_h) = (30u16, 9u16);
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;
        draw_border(canvas, x, y, box_w, box_h, Ink::fg(rgb(200, 200, 200)));

        let label = Ink::PLAIN.bold();
        let left = x as i32 + 3;
        let right = x as i32 + 17;

        canvas.write(left, y + 1, "RESULTS", Ink::fg(rgb(255, 255, 255)).bold());

        canvas.write(left, y + 3, "DESTROYED", label);
        canvas.write_count(right, y + 3, card.destroyed, Ink::PLAIN);

        canvas.write(left, y + 4, "DIFFICULTY", label);
        canvas.write(right, y + 4, card.difficulty.as_str(), difficulty_ink(card.difficulty));

        canvas.write(left, y + 5, "HIGH SCORE", label);
        match card.high_score {
            Some(best) => canvas.write_count(right, y + 5, best, Ink::PLAIN),
            None => canvas.write(right, y + 5, "-", Ink::PLAIN.dim()),
        };

        canvas.write(left, y + 7, "press any key", Ink::PLAIN.dim());
    }

    pub fn render_results(&self, card: &ResultsCard, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::default();
        self.render_results_into(card, viewport, &mut canvas);
        canvas
    }

    fn draw_asteroid(
        &self,
        canvas: &mut Canvas,
        a: &AsteroidSnapshot,
        marks: Option<&[CharMark]>,
        cols: u16,
        rows: u16,
    ) {
        // Rows follow the asteroid's top edge so it stays on screen until the
        // moment it crosses the bottom line.
        let row = (a.y / self.units_per_row).floor();
        if row < 0.0 || row >= rows as f32 {
            return;
        }
        let y = row as u16 + HEADER_ROWS + 1;

        let len = a.word.chars().count() as i32 + 2;
        let center = ((a.x + a.size / 2.0) / self.units_per_col).round() as i32;
        let start = 1 + center - len / 2;

        let bracket = match marks {
            Some(_) => Ink::fg(rgb(255, 210, 80)).bold(),
            None => Ink::fg(rgb(110, 110, 130)),
        };

        // Glyphs outside the frame interior would overwrite the border.
        let mut put = |col: i32, ch: char, ink: Ink| {
            if (1..=cols as i32).contains(&col) {
                canvas.plot(col, y, ch, ink.on(FIELD_BG));
            }
        };

        put(start, '(', bracket);
        for (i, ch) in a.word.chars().enumerate() {
            put(start + 1 + i as i32, ch, mark_ink(marks.and_then(|m| m.get(i))));
        }
        put(start + len - 1, ')', bracket);
    }
}

fn mark_ink(mark: Option<&CharMark>) -> Ink {
    match mark {
        Some(CharMark::Correct) => Ink::fg(rgb(90, 220, 110)).bold(),
        Some(CharMark::Incorrect) => Ink::fg(rgb(230, 80, 80)).bold(),
        Some(CharMark::Unset) => Ink::fg(rgb(255, 255, 255)).bold(),
        None => Ink::fg(rgb(160, 160, 180)),
    }
}

fn difficulty_ink(difficulty: Difficulty) -> Ink {
    let fg = match difficulty {
        Difficulty::Easy => rgb(100, 220, 120),
        Difficulty::Normal => rgb(240, 220, 80),
        Difficulty::Hard => rgb(230, 80, 80),
    };
    Ink::fg(fg).bold()
}

fn draw_header(canvas: &mut Canvas, snap: &GameSnapshot) {
    canvas.write(1, 0, "LUNETYPE", Ink::fg(rgb(170, 190, 255)).bold());
    canvas.write(11, 0, snap.difficulty.as_str(), difficulty_ink(snap.difficulty));
    let end = canvas.write(19, 0, "DESTROYED ", Ink::PLAIN.dim());
    canvas.write_count(end, 0, snap.destroyed, Ink::PLAIN.bold());
}

fn draw_input_line(canvas: &mut Canvas, snap: &GameSnapshot, viewport: Viewport) {
    let Some(y) = viewport.height.checked_sub(FOOTER_ROWS) else {
        return;
    };
    let prompt = Ink::fg(rgb(255, 210, 80)).bold();
    canvas.write(1, y, ">", prompt);

    // Keep the tail of the buffer visible.
    let room = viewport.width.saturating_sub(5) as usize;
    let hidden = snap.typed.chars().count().saturating_sub(room);
    let mut col = 3;
    for ch in snap.typed.chars().skip(hidden) {
        canvas.plot(col, y, ch, Ink::PLAIN);
        col += 1;
    }
    if snap.cursor_visible {
        canvas.plot(col, y, '_', prompt);
    }

    canvas.write(1, y + 1, "ENTER fire  BKSP erase  CTRL+C quit", Ink::PLAIN.dim());
}

/// Box-drawing frame around the `w x h` block at `(x, y)`.
fn draw_border(canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16, ink: Ink) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    canvas.fill(x + 1, y, w - 2, 1, Glyph::new('─', ink));
    canvas.fill(x + 1, bottom, w - 2, 1, Glyph::new('─', ink));
    canvas.fill(x, y + 1, 1, h - 2, Glyph::new('│', ink));
    canvas.fill(right, y + 1, 1, h - 2, Glyph::new('│', ink));

    for (cx, cy, ch) in [(x, y, '┌'), (right, y, '┐'), (x, bottom, '└'), (right, bottom, '┘')] {
        canvas.plot(cx as i32, cy, ch, ink);
    }
}

/// White caption centred on row `y`.
fn draw_banner(canvas: &mut Canvas, width: u16, y: u16, text: &str) {
    let x = width.saturating_sub(text.chars().count() as u16) / 2;
    canvas.write(x as i32, y, text, Ink::fg(rgb(255, 255, 255)).bold());
}
