//! # Palette Component
//!
//! Source of new chips: the four conditions, then every pool identifier
//! matching the filter. Typing edits the filter; clicking a chip adds it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Block;

use crate::core::chip::{Chip, Condition, IdentifierPool};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::chip::{ChipLook, chip_at, layout_chips, layout_height, render_chip};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Pick(Chip),
    QueryCleared,
}

/// Persistent palette state: the filter text and last frame's hit areas.
#[derive(Debug, Default)]
pub struct PaletteState {
    pub query: String,
    pub hits: Vec<(Rect, Chip)>,
}

impl PaletteState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for PaletteState {
    type Event = PaletteEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PaletteEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                None
            }
            TuiEvent::Backspace => {
                self.query.pop();
                None
            }
            TuiEvent::Escape if !self.query.is_empty() => {
                self.query.clear();
                Some(PaletteEvent::QueryCleared)
            }
            TuiEvent::MouseDown(column, row) => {
                let cells: Vec<Rect> = self.hits.iter().map(|(cell, _)| *cell).collect();
                chip_at(&cells, *column, *row).map(|i| PaletteEvent::Pick(self.hits[i].1.clone()))
            }
            _ => None,
        }
    }
}

/// Chips offered for `query`, conditions first.
pub fn offered(pool: &IdentifierPool, query: &str) -> Vec<Chip> {
    Condition::ALL
        .into_iter()
        .map(Chip::condition)
        .chain(pool.matching(query).into_iter().cloned())
        .collect()
}

/// Rows needed to show every offered chip at `width`, borders included.
pub fn palette_height(pool: &IdentifierPool, query: &str, width: u16) -> u16 {
    let inner = Rect {
        width: width.saturating_sub(2),
        ..Rect::default()
    };
    let chips = offered(pool, query);
    let cells = layout_chips(chips.iter().map(|c| c.label.as_str()), inner);
    layout_height(&cells, inner) + 2
}

pub struct Palette<'a> {
    pub pool: &'a IdentifierPool,
    pub state: &'a mut PaletteState,
}

impl Component for Palette<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let filter = Line::from(format!(" filter: {}_ ", self.state.query));
        let block = Block::bordered()
            .title(" Palette ")
            .title_bottom(filter)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chips = offered(self.pool, &self.state.query);
        let cells = layout_chips(chips.iter().map(|c| c.label.as_str()), inner);
        self.state.hits.clear();
        for (chip, cell) in chips.into_iter().zip(cells) {
            if cell.intersection(inner) != cell {
                continue;
            }
            render_chip(frame, &chip, cell, inner, ChipLook::Normal);
            self.state.hits.push((cell, chip));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn pool() -> IdentifierPool {
        IdentifierPool::from_labels(["pizza", "sushi", "pasta"])
    }

    #[test]
    fn test_offered_conditions_first() {
        let labels: Vec<_> = offered(&pool(), "").into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["AND", "OR", "(", ")", "pizza", "sushi", "pasta"]);
    }

    #[test]
    fn test_offered_filters_identifiers_only() {
        let labels: Vec<_> = offered(&pool(), "PA").into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["AND", "OR", "(", ")", "pasta"]);
    }

    #[test]
    fn test_query_editing() {
        let mut state = PaletteState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('s')), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('u')), None);
        assert_eq!(state.query, "su");
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.query, "s");
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(PaletteEvent::QueryCleared)
        );
        assert!(state.query.is_empty());
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn test_click_picks_rendered_chip() {
        let pool = pool();
        let mut state = PaletteState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal
            .draw(|f| {
                Palette {
                    pool: &pool,
                    state: &mut state,
                }
                .render(f, f.area());
            })
            .unwrap();
        assert_eq!(state.hits.len(), 7);
        let (cell, _) = state.hits[4].clone();
        assert_eq!(
            state.handle_event(&TuiEvent::MouseDown(cell.x, cell.y)),
            Some(PaletteEvent::Pick(Chip::identifier("pizza")))
        );
        assert_eq!(state.handle_event(&TuiEvent::MouseDown(0, 0)), None);
    }

    #[test]
    fn test_palette_height_wraps() {
        assert_eq!(palette_height(&pool(), "", 80), 5);
        // 28 columns inside the border: conditions, pizza sushi, pasta
        assert_eq!(palette_height(&pool(), "", 30), 13);
    }
}
