//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorIndex, GamePhase, PIECE_KIND_COUNT, PREVIEW_SIZE};

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
}

/// High-score state shown next to the board. Owned by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoardView {
    pub high_score: u64,
    /// The session that just ended set a new high score.
    pub new_record: bool,
    /// A persist request is still in flight.
    pub saving: bool,
}

/// One color per piece template, indexed by color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PIECE_KIND_COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::new(0xFF, 0x0D, 0x72),
                Rgb::new(0x0D, 0xC2, 0xFF),
                Rgb::new(0x0D, 0xFF, 0x72),
                Rgb::new(0xF5, 0x38, 0xFF),
                Rgb::new(0xFF, 0x8E, 0x0D),
                Rgb::new(0xFF, 0xE1, 0x38),
                Rgb::new(0x38, 0x77, 0xFF),
            ],
        }
    }
}

impl Palette {
    pub fn new(colors: [Rgb; PIECE_KIND_COUNT]) -> Self {
        Self { colors }
    }

    /// Parse a comma-separated list of exactly seven `#RRGGBB` colors.
    pub fn parse(s: &str) -> Option<Self> {
        let mut colors = [Rgb::default(); PIECE_KIND_COUNT];
        let mut n = 0usize;
        for part in s.split(',') {
            if n == PIECE_KIND_COUNT {
                return None;
            }
            colors[n] = Rgb::from_hex(part)?;
            n += 1;
        }
        (n == PIECE_KIND_COUNT).then_some(Self { colors })
    }

    /// Out-of-range indices wrap around.
    pub fn color(&self, index: ColorIndex) -> Rgb {
        self.colors[index as usize % PIECE_KIND_COUNT]
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Board cell width in terminal columns.
    pub cell_w: u16,
    /// Board cell height in terminal rows.
    pub cell_h: u16,
    pub palette: Palette,
}

impl Default for ViewConfig {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            palette: Palette::default(),
        }
    }
}

impl ViewConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_CELL_WIDTH`: columns per board cell (1..=8, default 2)
    /// - `TETRIS_CELL_HEIGHT`: rows per board cell (1..=4, default 1)
    /// - `TETRIS_PALETTE`: seven comma-separated `#RRGGBB` colors
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let cell_w = lookup("TETRIS_CELL_WIDTH")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .filter(|w| (1..=8).contains(w))
            .unwrap_or(defaults.cell_w);
        let cell_h = lookup("TETRIS_CELL_HEIGHT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .filter(|h| (1..=4).contains(h))
            .unwrap_or(defaults.cell_h);
        let palette = lookup("TETRIS_PALETTE")
            .and_then(|s| Palette::parse(&s))
            .unwrap_or(defaults.palette);

        Self {
            cell_w,
            cell_h,
            palette,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_W: u16 = 14;

/// A lightweight terminal renderer for the Tetris game.
pub struct GameView {
    config: ViewConfig,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl GameView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scores: &ScoreBoardView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let cols = snap.grid.width() as u16;
        let rows = snap.grid.height() as u16;
        let board_px_w = cols * self.config.cell_w;
        let board_px_h = rows * self.config.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let total_w = frame_w + 2 + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', CellStyle::new(BG, BG));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for (y, row) in snap.grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, start_x + 1, start_y + 1, x as u16, y as u16, *color),
                    None => self.draw_empty_cell(fb, start_x + 1, start_y + 1, x as u16, y as u16),
                }
            }
        }

        // Falling piece; rows above the board are not drawn.
        if let Some(piece) = snap.current {
            for (x, y) in piece.cells() {
                if x >= 0 && (x as u16) < cols && y >= 0 && (y as u16) < rows {
                    self.draw_block(fb, start_x + 1, start_y + 1, x as u16, y as u16, piece.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, scores, viewport, start_x + frame_w + 2, start_y);

        match snap.phase {
            GamePhase::Idle => {
                draw_overlay_lines(fb, start_x, start_y, frame_w, frame_h, &[("PRESS ENTER", None)]);
            }
            GamePhase::GameOver => {
                let mut lines: [(&str, Option<u64>); 5] = [
                    ("GAME OVER", None),
                    ("SCORE ", Some(snap.score)),
                    ("HIGH ", Some(scores.high_score)),
                    ("", None),
                    ("ENTER TO PLAY AGAIN", None),
                ];
                if scores.new_record {
                    lines[3] = ("NEW RECORD", None);
                }
                draw_overlay_lines(fb, start_x, start_y, frame_w, frame_h, &lines);
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, scores: &ScoreBoardView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scores, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(90, 90, 100), BG)
        };
        self.fill_cell_rect(fb, origin_x, origin_y, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, x: u16, y: u16, color: ColorIndex) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(self.config.palette.color(color), BG)
        };
        self.fill_cell_rect(fb, origin_x, origin_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin_x + cell_x * self.config.cell_w;
        let py = origin_y + cell_y * self.config.cell_h;
        fb.fill_rect(px, py, self.config.cell_w, self.config.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: &ScoreBoardView,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGH SCORE", label);
        y = y.saturating_add(1);
        let w = fb.put_u64(panel_x, y, scores.high_score, value);
        if scores.saving {
            let dim = CellStyle { dim: true, ..value };
            fb.put_char(panel_x + w + 1, y, '*', dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.lines as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
    }

    /// Next piece drawn at the top-left of a 4x4 box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        let box_style = CellStyle::new(BG, BG);
        let size = PREVIEW_SIZE as u16;
        fb.fill_rect(x, y, size * self.config.cell_w, size * self.config.cell_h, ' ', box_style);
        for (dx, dy) in piece.shape.minos() {
            if (dx as u16) < size && (dy as u16) < size {
                self.draw_block(fb, x, y, dx as u16, dy as u16, piece.color);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered block of text lines over the board. A line is a label plus an
/// optional number printed after it; empty lines are skipped but keep their
/// slot.
fn draw_overlay_lines(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    lines: &[(&str, Option<u64>)],
) {
    let style = CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
    };
    let top = start_y.saturating_add(frame_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (text, number)) in lines.iter().enumerate() {
        if text.is_empty() && number.is_none() {
            continue;
        }
        let text_w = text.chars().count() as u16 + number.map(digit_count).unwrap_or(0);
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let y = top.saturating_add(i as u16);
        fb.put_str(x, y, text, style);
        if let Some(n) = number {
            fb.put_u64(x + text.chars().count() as u16, y, *n, style);
        }
    }
}

fn digit_count(mut n: u64) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
