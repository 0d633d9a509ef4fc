//! Off-screen canvas the game view paints into.
//!
//! One glyph per terminal cell, stored row-major so the screen can compare
//! whole rows as slices. Colours are crossterm colours and go out unchanged.

use crossterm::style::Color;

/// Truecolor shorthand.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Glyph emphasis. Bold and dim are mutually exclusive on a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// Colours and emphasis of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ink {
    pub fg: Color,
    pub bg: Color,
    pub weight: Weight,
}

impl Ink {
    /// Terminal defaults.
    pub const PLAIN: Ink = Ink {
        fg: Color::Reset,
        bg: Color::Reset,
        weight: Weight::Normal,
    };

    pub const fn fg(fg: Color) -> Self {
        Ink { fg, ..Ink::PLAIN }
    }

    pub const fn on(self, bg: Color) -> Self {
        Ink { bg, ..self }
    }

    pub const fn bold(self) -> Self {
        Ink {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Ink {
            weight: Weight::Dim,
            ..self
        }
    }
}

impl Default for Ink {
    fn default() -> Self {
        Ink::PLAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub ink: Ink,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        ink: Ink::PLAIN,
    };

    pub const fn new(ch: char, ink: Ink) -> Self {
        Glyph { ch, ink }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::BLANK
    }
}

/// Grid of glyphs, `cols` wide and `rows` tall.
///
/// Every write clips against the edges, so callers can place words that
/// hang partly off the field without bounds checks of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Canvas {
            cols,
            rows,
            glyphs: vec![Glyph::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Reshape to `cols x rows` and cover every cell with `fill`.
    ///
    /// The backing storage is kept, so a canvas reused frame after frame
    /// stops allocating once it has seen the largest terminal size.
    pub fn reset(&mut self, cols: u16, rows: u16, fill: Glyph) {
        self.cols = cols;
        self.rows = rows;
        self.glyphs.clear();
        self.glyphs.resize(cols as usize * rows as usize, fill);
    }

    /// Glyphs of row `y`; empty below the last row.
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.rows {
            return &[];
        }
        let start = y as usize * self.cols as usize;
        &self.glyphs[start..start + self.cols as usize]
    }

    fn row_mut(&mut self, y: u16) -> &mut [Glyph] {
        if y >= self.rows {
            return &mut [];
        }
        let start = y as usize * self.cols as usize;
        &mut self.glyphs[start..start + self.cols as usize]
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(x as usize).copied()
    }

    /// Set one cell. Columns left of zero or past the edge are dropped.
    pub fn plot(&mut self, x: i32, y: u16, ch: char, ink: Ink) {
        let Ok(x) = usize::try_from(x) else {
            return;
        };
        if let Some(cell) = self.row_mut(y).get_mut(x) {
            *cell = Glyph::new(ch, ink);
        }
    }

    /// Write `text` from column `x`; returns the column after its last char.
    pub fn write(&mut self, x: i32, y: u16, text: &str, ink: Ink) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            self.plot(col, y, ch, ink);
            col += 1;
        }
        col
    }

    /// Decimal `n` from column `x`, without formatting through a `String`.
    pub fn write_count(&mut self, x: i32, y: u16, n: u32, ink: Ink) -> i32 {
        let mut place = 1u32;
        while n / place >= 10 {
            place *= 10;
        }
        let mut col = x;
        loop {
            let digit = (n / place % 10) as u8;
            self.plot(col, y, char::from(b'0' + digit), ink);
            col += 1;
            if place == 1 {
                return col;
            }
            place /= 10;
        }
    }

    /// Cover the `w x h` block whose top-left corner is `(x, y)`.
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for row in y..y.saturating_add(h) {
            let cells = self.row_mut(row);
            let start = (x as usize).min(cells.len());
            let end = (x as usize + w as usize).min(cells.len());
            cells[start..end].fill(glyph);
        }
    }

    /// Characters of row `y`, styling dropped.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
