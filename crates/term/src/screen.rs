//! Screen: puts canvases on a real terminal.
//!
//! Each frame is compared row by row against the one already shown. A row
//! that differs is rewritten from its first to its last changed column with a
//! single cursor move, and glyphs sharing an ink go out as one `Print`.

use std::io::{self, Stdout, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::canvas::{Canvas, Glyph, Ink, Weight};

pub struct Screen<W: Write = Stdout> {
    out: W,
    shown: Option<Canvas>,
    bytes: Vec<u8>,
    raw: bool,
}

impl Screen<Stdout> {
    /// Raw mode, alternate screen, hidden cursor. Undone by [`Screen::close`]
    /// or on drop.
    pub fn open() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut screen = Screen::with_writer(io::stdout());
        screen.raw = true;
        execute!(screen.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(screen)
    }
}

impl<W: Write> Screen<W> {
    /// A screen that writes frames to `out` and leaves terminal modes alone.
    pub fn with_writer(out: W) -> Self {
        Screen {
            out,
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn close(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next frame repaints every row.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `canvas`.
    ///
    /// The canvas is kept as the new on-screen frame and the previous one is
    /// handed back through `canvas`, so one pair of buffers serves the whole
    /// session. Its contents are stale; repaint before the next call.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.shown.as_ref(), canvas, &mut self.bytes)?;
        if !self.bytes.is_empty() {
            self.out.write_all(&self.bytes)?;
            self.out.flush()?;
        }

        if let Some(previous) = self.shown.replace(std::mem::take(canvas)) {
            *canvas = previous;
        }
        Ok(())
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Append the bytes that turn `shown` into `next`.
///
/// With nothing shown yet, or a different size, the terminal is cleared and
/// every row written.
fn encode_frame(shown: Option<&Canvas>, next: &Canvas, out: &mut Vec<u8>) -> io::Result<()> {
    let shown = shown.filter(|s| s.cols() == next.cols() && s.rows() == next.rows());
    if shown.is_none() {
        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Clear(ClearType::All))?;
    }

    let mut pen: Option<Ink> = None;
    let mut text = String::new();
    for y in 0..next.rows() {
        let row = next.row(y);
        let span = match shown {
            Some(s) => match dirty_span(s.row(y), row) {
                Some(span) => span,
                None => continue,
            },
            None => 0..row.len(),
        };
        if span.is_empty() {
            continue;
        }

        queue!(out, MoveTo(span.start as u16, y))?;
        for run in row[span].chunk_by(|a, b| a.ink == b.ink) {
            let ink = run[0].ink;
            if pen != Some(ink) {
                switch_ink(out, pen, ink)?;
                pen = Some(ink);
            }
            text.clear();
            text.extend(run.iter().map(|g| g.ch));
            queue!(out, Print(&text))?;
        }
    }

    if pen.is_some() {
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}

/// Columns from the first to the last glyph that differ.
fn dirty_span(shown: &[Glyph], next: &[Glyph]) -> Option<Range<usize>> {
    let first = shown.iter().zip(next).position(|(a, b)| a != b)?;
    let last = shown.iter().zip(next).rposition(|(a, b)| a != b)?;
    Some(first..last + 1)
}

fn switch_ink(out: &mut Vec<u8>, pen: Option<Ink>, ink: Ink) -> io::Result<()> {
    if pen.map_or(true, |p| p.weight != ink.weight) {
        // SGR 22 clears bold and dim together.
        queue!(out, SetAttribute(Attribute::NormalIntensity))?;
        match ink.weight {
            Weight::Bold => queue!(out, SetAttribute(Attribute::Bold))?,
            Weight::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
            Weight::Normal => {}
        }
    }
    if pen.map_or(true, |p| p.fg != ink.fg || p.bg != ink.bg) {
        queue!(out, SetColors(Colors::new(ink.fg, ink.bg)))?;
    }
    Ok(())
}
