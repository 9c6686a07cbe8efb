//! # StatusBar Component
//!
//! Bottom line showing whether the expression is well formed, followed by
//! the last status message.
//!
//! ## Stateless Component
//!
//! StatusBar is purely presentational. It receives the verdict and message
//! as props and renders them:
//!
//! ```rust,ignore
//! let mut status_bar = StatusBar::new(app.verdict(), &app.status_message);
//! status_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Valid**: `"✓ Valid expression | Added pizza"` in green
//! 2. **Invalid**: `"✗ Cannot end with an operator. | Added OR"` in red
//! 3. **No status message**: the ` | ...` suffix is omitted

use crate::core::validator::Verdict;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct StatusBar<'a> {
    pub verdict: Verdict,
    pub status_message: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(verdict: Verdict, status_message: &'a str) -> Self {
        Self {
            verdict,
            status_message,
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let verdict = if self.verdict.is_valid() {
            Span::styled(
                "✓ Valid expression",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("✗ {}", self.verdict.message()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };

        let mut spans = vec![verdict];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
