//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; later frames only rewrite the spans of cells that changed. Most
//! frames touch a falling piece (two columns per board cell) and a handful of
//! side-panel values, so nearby changes on one row are merged into one span
//! instead of paying a cursor move for each.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Unchanged cells bridged inside one span. A `MoveTo` costs about as much
/// as reprinting this many cells.
const SPAN_GAP: usize = 4;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    last_frame_bytes: usize,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            last_frame_bytes: 0,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full redraw on the next frame (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Bytes written for the most recent frame.
    pub fn last_frame_bytes(&self) -> usize {
        self.last_frame_bytes
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// After the call `fb` holds stale contents the caller overwrites on the
    /// next render; no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.last_frame_bytes = self.buf.len();
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Pen state while encoding; only the parts of a style that differ from the
/// previous cell are sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        let Some(prev) = prev else {
            out.queue(SetAttribute(Attribute::Reset))?;
            set_attributes(out, style)?;
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            return Ok(());
        };
        if prev == style {
            return Ok(());
        }

        // Attribute::Reset also drops colours, so both are resent after it.
        let attrs_changed = prev.bold != style.bold || prev.dim != style.dim;
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            set_attributes(out, style)?;
        }
        if attrs_changed || prev.fg != style.fg {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.bg != style.bg {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn set_attributes(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Print `len` cells of row `y` starting at column `x`.
fn encode_span(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    pen: &mut Pen,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        pen.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        encode_span(fb, 0, y, fb.width(), &mut pen, out)?;
    }
    pen.finish(out)
}

/// Encode the changed spans between two frames of the same size.
///
/// Identical frames encode to nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    debug_assert_eq!((prev.width(), prev.height()), (next.width(), next.height()));

    let mut pen = Pen::default();
    for (x, y, len) in changed_spans(prev, next) {
        encode_span(next, x, y, len, &mut pen, out)?;
    }
    pen.finish(out)
}

/// `(x, y, len)` for every span of changed cells, with gaps of up to
/// `SPAN_GAP` unchanged cells folded into the surrounding span.
fn changed_spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let w = next.width() as usize;
    if w == 0 {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for (y, (a, b)) in prev.cells().chunks(w).zip(next.cells().chunks(w)).enumerate() {
        let mut open: Option<(usize, usize)> = None;
        for x in (0..w).filter(|&x| a[x] != b[x]) {
            open = match open {
                Some((start, end)) if x - end <= SPAN_GAP => Some((start, x + 1)),
                Some((start, end)) => {
                    spans.push((start as u16, y as u16, (end - start) as u16));
                    Some((x, x + 1))
                }
                None => Some((x, x + 1)),
            };
        }
        if let Some((start, end)) = open {
            spans.push((start as u16, y as u16, (end - start) as u16));
        }
    }
    spans
}
