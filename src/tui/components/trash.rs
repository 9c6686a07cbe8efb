//! # Trash Component
//!
//! Delete target. Dropping a dragged chip here removes it from the
//! expression; identifiers go back to the palette.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub struct Trash {
    /// A drag is active.
    pub armed: bool,
    /// The pointer is over the trash during a drag.
    pub hovered: bool,
}

impl Component for Trash {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (style, border) = match (self.armed, self.hovered) {
            (true, true) => (
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
                BorderType::Thick,
            ),
            (true, false) => (Style::default().fg(Color::Red), BorderType::Plain),
            _ => (Style::default().fg(Color::DarkGray), BorderType::Plain),
        };
        let paragraph = Paragraph::new("✕ Trash")
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_type(border).border_style(style));
        frame.render_widget(paragraph, area);
    }
}

/// Whether (`column`, `row`) lies inside the trash drawn at `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_trash_highlights_when_hovered() {
        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        terminal
            .draw(|f| {
                Trash {
                    armed: true,
                    hovered: true,
                }
                .render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "┏");
        assert_eq!(buffer[(0, 0)].bg, Color::Red);
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Trash"));
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(70, 20, 10, 3);
        assert!(contains(area, 70, 20));
        assert!(contains(area, 79, 22));
        assert!(!contains(area, 80, 22));
        assert!(!contains(area, 75, 19));
    }
}
