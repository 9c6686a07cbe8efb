//! # ChipBoard Component
//!
//! The in-progress expression. Chips flow left to right and wrap into rows.
//! While a drag is active the board shows the preview order, so the dragged
//! chip already sits where it would land.
//!
//! ## Layout Recording
//!
//! Rendering records every visible chip cell into `ChipBoardState`. The event
//! loop hit-tests mouse presses against those cells and hands them to the drag
//! engine as the geometry snapshot, so the engine sees exactly what the user
//! saw on the last frame. Chips that overflow the board are not recorded;
//! overflow is always a suffix of the sequence, so indices stay aligned.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::chip::Chip;
use crate::tui::component::Component;
use crate::tui::components::chip::{
    CHIP_HEIGHT, ChipLook, chip_at, layout_chips, layout_height, render_chip,
};

/// Persistent layout of the board, refreshed every frame.
#[derive(Debug, Default)]
pub struct ChipBoardState {
    pub cells: Vec<Rect>,
    pub area: Rect,
}

impl ChipBoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the chip under (`column`, `row`) on the last frame.
    pub fn chip_at(&self, column: u16, row: u16) -> Option<usize> {
        chip_at(&self.cells, column, row)
    }
}

/// Rows needed to show every chip at `width`, borders included. Never less
/// than one chip row so the empty hint has room.
pub fn board_height(chips: &[Chip], width: u16) -> u16 {
    let inner = Rect {
        width: width.saturating_sub(2),
        ..Rect::default()
    };
    let cells = layout_chips(chips.iter().map(|c| c.label.as_str()), inner);
    layout_height(&cells, inner).max(CHIP_HEIGHT) + 2
}

/// Where the dragged chip is drawn, if a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifted {
    pub position: usize,
    pub over_trash: bool,
}

pub struct ChipBoard<'a> {
    /// Chips in display order.
    pub chips: &'a [Chip],
    pub lifted: Option<Lifted>,
    pub state: &'a mut ChipBoardState,
}

impl Component for ChipBoard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Expression ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.state.area = inner;
        let mut cells = layout_chips(self.chips.iter().map(|c| c.label.as_str()), inner);
        let visible = cells
            .iter()
            .take_while(|cell| cell.intersection(inner) == **cell)
            .count();
        cells.truncate(visible);
        self.state.cells = cells;

        if self.chips.is_empty() {
            let hint = Paragraph::new("Click a chip in the palette to add it.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, inner);
            return;
        }

        for (i, (chip, cell)) in self.chips.iter().zip(&self.state.cells).enumerate() {
            let look = match self.lifted {
                Some(lifted) if lifted.position == i && lifted.over_trash => ChipLook::Doomed,
                Some(lifted) if lifted.position == i => ChipLook::Lifted,
                _ => ChipLook::Normal,
            };
            render_chip(frame, chip, *cell, inner, look);
        }
    }
}
