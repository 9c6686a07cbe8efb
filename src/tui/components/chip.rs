//! # Chip Layout
//!
//! Shared by the board and the palette: measures chips, flows them into
//! wrapping rows, and draws a single chip.
//!
//! ```text
//! ┌───────┐ ┌─────┐ ┌───────┐
//! │ pizza │ │ AND │ │ tacos │      height 3, 1 column between chips
//! └───────┘ └─────┘ └───────┘
//!                                  1 blank row between rows
//! ┌───┐ ┌───────┐ ┌───┐
//! │ ( │ │ sushi │ │ ) │
//! └───┘ └───────┘ └───┘
//! ```

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::chip::{Chip, ChipKind};
use crate::core::drag::{ChipRect, GeometrySource, Point};

pub const CHIP_HEIGHT: u16 = 3;
pub const CHIP_GAP: u16 = 1;
pub const ROW_GAP: u16 = 1;
/// Borders plus one column of padding on each side.
const CHIP_CHROME: u16 = 4;

/// How a chip should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipLook {
    #[default]
    Normal,
    /// Being dragged.
    Lifted,
    /// Being dragged over the trash.
    Doomed,
}

pub fn chip_width(label: &str) -> u16 {
    let text = u16::try_from(label.width()).unwrap_or(u16::MAX);
    text.saturating_add(CHIP_CHROME)
}

/// Flow chips left to right inside `area`, wrapping to a new row when the
/// next chip does not fit. Rows may run past the bottom of `area`.
pub fn layout_chips<'a, I>(labels: I, area: Rect) -> Vec<Rect>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells = Vec::new();
    let right_edge = area.x.saturating_add(area.width);
    let mut x = area.x;
    let mut y = area.y;
    for label in labels {
        let width = chip_width(label).min(area.width.max(1));
        if x > area.x && x.saturating_add(width) > right_edge {
            x = area.x;
            y = y.saturating_add(CHIP_HEIGHT + ROW_GAP);
        }
        cells.push(Rect::new(x, y, width, CHIP_HEIGHT));
        x = x.saturating_add(width + CHIP_GAP);
    }
    cells
}

/// Number of terminal rows the laid-out chips occupy.
pub fn layout_height(cells: &[Rect], area: Rect) -> u16 {
    cells
        .iter()
        .map(|c| c.bottom())
        .max()
        .map_or(0, |bottom| bottom.saturating_sub(area.y))
}

pub fn chip_at(cells: &[Rect], column: u16, row: u16) -> Option<usize> {
    let pos = Position::new(column, row);
    cells.iter().position(|cell| cell.contains(pos))
}

/// Shorten `label` to at most `max` columns, ending in `…` when cut.
pub fn fit_label(label: &str, max: usize) -> Cow<'_, str> {
    if label.width() <= max {
        return Cow::Borrowed(label);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

fn chip_style(chip: &Chip, look: ChipLook) -> Style {
    let base = match chip.kind {
        ChipKind::Identifier => Style::default().fg(Color::Cyan),
        ChipKind::Condition(_) => Style::default().fg(Color::Yellow),
    };
    match look {
        ChipLook::Normal => base,
        ChipLook::Lifted => base.add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ChipLook::Doomed => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT),
    }
}

/// Draw one chip. Cells that are not fully inside `clip` are skipped.
pub fn render_chip(frame: &mut Frame, chip: &Chip, cell: Rect, clip: Rect, look: ChipLook) {
    if cell.intersection(clip) != cell {
        return;
    }
    let style = chip_style(chip, look);
    let inner = usize::from(cell.width.saturating_sub(CHIP_CHROME));
    let text = fit_label(&chip.label, inner);
    let border = if look == ChipLook::Normal {
        BorderType::Rounded
    } else {
        BorderType::Thick
    };
    let paragraph = Paragraph::new(text.into_owned())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::bordered().border_type(border).border_style(style));
    frame.render_widget(paragraph, cell);
}

/// Chip cells as seen by the drag engine, in geometry units.
pub struct CellGeometry<'a> {
    pub cells: &'a [Rect],
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellGeometry<'_> {
    /// Centre of the terminal cell at (`column`, `row`).
    pub fn point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }
}

impl GeometrySource for CellGeometry<'_> {
    fn chip_rects(&self) -> Vec<ChipRect> {
        self.cells
            .iter()
            .map(|cell| {
                ChipRect::new(
                    f64::from(cell.x) * self.cell_width,
                    f64::from(cell.y) * self.cell_height,
                    f64::from(cell.width) * self.cell_width,
                    f64::from(cell.height) * self.cell_height,
                )
            })
            .collect()
    }
}
