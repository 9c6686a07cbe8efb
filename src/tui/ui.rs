use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::chip_board::board_height;
use crate::tui::components::palette::palette_height;
use crate::tui::components::{ChipBoard, Lifted, Palette, StatusBar, Trash};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const TRASH_WIDTH: u16 = 12;
// Title line plus the status and trash strip.
const FIXED_ROWS: u16 = 4;

fn title_line(app: &App) -> Line<'static> {
    let placed = app.chips.sequence().len();
    let available = app.chips.pool().len();
    Line::from(vec![
        Span::styled("Sieve", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | {} chips | {} in palette", placed, available)),
        Span::styled(
            " | Esc quit, Ctrl+L clear, Del remove last",
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let area = frame.area();
    let sequence = app.display_sequence();

    // The board is sized to its chips first; the palette gets what is left.
    let available = area.height.saturating_sub(FIXED_ROWS);
    let board_rows = board_height(&sequence, area.width).min(available);
    let palette_rows = palette_height(app.chips.pool(), &tui.palette.query, area.width)
        .min(available - board_rows);
    let layout = Layout::vertical([
        Length(1),
        Length(available - palette_rows),
        Length(palette_rows),
        Length(3),
    ]);
    let [title_area, board_area, palette_area, bottom_area] = layout.areas(area);
    let [status_area, trash_area] =
        Layout::horizontal([Min(0), Length(TRASH_WIDTH)]).areas(bottom_area);

    frame.render_widget(title_line(app), title_area);

    let lifted = app.drag.session().map(|session| Lifted {
        position: session.placeholder().min(sequence.len().saturating_sub(1)),
        over_trash: session.over_delete_target(),
    });
    ChipBoard {
        chips: &sequence,
        lifted,
        state: &mut tui.board,
    }
    .render(frame, board_area);

    Palette {
        pool: app.chips.pool(),
        state: &mut tui.palette,
    }
    .render(frame, palette_area);

    // Status text sits on the middle row, level with the trash label.
    let [_, status_line, _] = Layout::vertical([Length(1), Length(1), Min(0)]).areas(status_area);
    StatusBar::new(app.verdict(), &app.status_message).render(frame, status_line);

    tui.trash_area = trash_area;
    Trash {
        armed: lifted.is_some(),
        hovered: lifted.is_some_and(|l| l.over_trash),
    }
    .render(frame, trash_area);
}
