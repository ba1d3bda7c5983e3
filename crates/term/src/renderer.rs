//! Terminal output for game frames.
//!
//! Each frame is compared row by row with the frame currently on screen.
//! Changed rows are repainted whole, written as runs of equally styled text.
//! A falling piece touches only a few rows per tick, so most frames are
//! small. A size change or [`TerminalRenderer::invalidate`] clears the
//! screen and repaints every row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Paint `fb` and keep it as the on-screen frame.
    ///
    /// `fb` gets the previous frame back so the caller can render into it
    /// without reallocating. Returns the number of rows written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.out.clear();
        let rows = encode_frame_into(self.shown.as_ref(), fb, &mut self.out)?;
        if rows > 0 {
            self.write_out()?;
        }

        let mut spare = self.shown.take().unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(rows)
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Rows of `next` that differ from `prev`, top to bottom.
///
/// Every row counts as changed when there is no previous frame or its size
/// differs.
pub fn changed_rows<'a>(
    prev: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = u16> + 'a {
    let comparable = prev.filter(|p| same_size(p, next));
    (0..next.height()).filter(move |&y| comparable.map_or(true, |p| p.row(y) != next.row(y)))
}

/// Encode the repaint that turns `prev` into `next`. Returns the number of
/// rows written; nothing is emitted when no row changed.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    if !prev.is_some_and(|p| same_size(p, next)) {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut rows = 0;
    let mut text = String::new();
    for y in changed_rows(prev, next) {
        out.queue(cursor::MoveTo(0, y))?;
        for (style, run) in style_runs(next.row(y)) {
            queue_style(out, style)?;
            text.clear();
            text.extend(run.iter().map(|c| c.ch));
            out.queue(Print(text.as_str()))?;
        }
        rows += 1;
    }

    if rows > 0 {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(rows)
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Split a row into maximal runs sharing one style.
fn style_runs(row: &[Cell]) -> impl Iterator<Item = (CellStyle, &[Cell])> + '_ {
    let mut rest = row;
    std::iter::from_fn(move || {
        let style = rest.first()?.style;
        let len = rest.iter().take_while(|c| c.style == style).count();
        let (run, tail) = rest.split_at(len);
        rest = tail;
        Some((style, run))
    })
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(truecolor(style.fg)))?;
    out.queue(SetBackgroundColor(truecolor(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn frame(rows: &[&str]) -> FrameBuffer {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut fb = FrameBuffer::new(width, rows.len() as u16);
        for (y, text) in rows.iter().enumerate() {
            fb.put_str(0, y as u16, text, CellStyle::default());
        }
        fb
    }

    #[test]
    fn first_frame_clears_and_paints_every_row() {
        let next = frame(&["AB", "CD", "EF"]);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(None, &next, &mut out).unwrap(), 3);

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains(CLEAR_ALL));
        for run in ["AB", "CD", "EF"] {
            assert!(text.contains(run));
        }
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let shown = frame(&["....", "..##"]);
        let next = shown.clone();
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&shown), &next, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn only_changed_rows_are_repainted() {
        let shown = frame(&["row0", "row1", "row2", "row3"]);
        let mut next = shown.clone();
        next.put_char(2, 2, 'X', CellStyle::default());

        assert_eq!(changed_rows(Some(&shown), &next).collect::<Vec<_>>(), vec![2]);

        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&shown), &next, &mut out).unwrap(), 1);
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains(CLEAR_ALL));
        // MoveTo is 1-based on the wire.
        assert!(text.contains("\x1b[3;1H"));
        assert!(text.contains("roX2"));
        assert!(!text.contains("row1"));
    }

    #[test]
    fn size_change_repaints_everything() {
        let shown = frame(&["ab", "cd"]);
        let next = frame(&["abc", "def"]);
        assert_eq!(changed_rows(Some(&shown), &next).count(), 2);

        let mut out = Vec::new();
        encode_frame_into(Some(&shown), &next, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains(CLEAR_ALL));
    }

    #[test]
    fn runs_split_on_style_changes() {
        let plain = CellStyle::default();
        let block = CellStyle::new(Rgb::new(0xFF, 0x0D, 0x72), Rgb::new(0xFF, 0x0D, 0x72));
        let mut fb = FrameBuffer::new(6, 1);
        fb.put_str(0, 0, "..", plain);
        fb.put_str(2, 0, "[]", block);
        fb.put_str(4, 0, "..", plain);

        let runs: Vec<(CellStyle, String)> = style_runs(fb.row(0))
            .map(|(style, run)| (style, run.iter().map(|c| c.ch).collect()))
            .collect();
        assert_eq!(
            runs,
            vec![
                (plain, "..".to_string()),
                (block, "[]".to_string()),
                (plain, "..".to_string()),
            ]
        );
        assert_eq!(style_runs(&[]).count(), 0);
    }
}
