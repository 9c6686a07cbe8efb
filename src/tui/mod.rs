//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates mouse and keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It is
//! also the geometry source for the drag engine: chip cells recorded on the
//! last frame are scaled into geometry units by `cell_width`/`cell_height`.
//!
//! ## Redraw Strategy
//!
//! The loop only draws when something changed. Mutations come back from
//! `update()` as `Effect::ScheduleValidation`; the loop draws the new layout
//! first, then dispatches a single `Action::Revalidate` and draws again so
//! the status line shows the fresh verdict.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::drag::GeometrySource;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{CellGeometry, ChipBoardState, PaletteEvent, PaletteState, trash};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Layout recorded by the last frame
    pub board: ChipBoardState,
    pub palette: PaletteState,
    pub trash_area: Rect,
    // Geometry units per terminal cell
    pub cell_width: f64,
    pub cell_height: f64,
}

impl TuiState {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            board: ChipBoardState::new(),
            palette: PaletteState::new(),
            trash_area: Rect::default(),
            cell_width,
            cell_height,
        }
    }

    fn geometry(&self) -> CellGeometry<'_> {
        CellGeometry {
            cells: &self.board.cells,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Translate one terminal event into the actions it causes.
///
/// Hit-testing uses the layout recorded by the last frame, so this must run
/// between draws.
pub fn actions_for(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Vec<Action> {
    match event {
        TuiEvent::ForceQuit => vec![Action::Quit],
        TuiEvent::ClearAll => vec![Action::ClearAll],
        TuiEvent::TrashLast => match app.chips.sequence().len() {
            0 => Vec::new(),
            len => vec![Action::TrashChip(len - 1)],
        },
        TuiEvent::Escape => {
            if app.drag.is_dragging() {
                return vec![Action::CancelDrag];
            }
            match tui.palette.handle_event(event) {
                Some(_) => Vec::new(),
                None => vec![Action::Quit],
            }
        }
        TuiEvent::InputChar(_) | TuiEvent::Backspace => {
            tui.palette.handle_event(event);
            Vec::new()
        }
        TuiEvent::MouseDown(column, row) => {
            if app.drag.is_dragging() {
                return Vec::new();
            }
            if let Some(index) = tui.board.chip_at(*column, *row) {
                let geometry = tui.geometry();
                return vec![Action::BeginDrag {
                    index,
                    pointer: geometry.point(*column, *row),
                    geometry: geometry.chip_rects(),
                }];
            }
            match tui.palette.handle_event(event) {
                Some(PaletteEvent::Pick(chip)) => vec![Action::AddChip(chip)],
                _ => Vec::new(),
            }
        }
        TuiEvent::MouseDrag(column, row) => {
            let Some(session) = app.drag.session() else {
                return Vec::new();
            };
            let mut actions = Vec::with_capacity(2);
            let over = trash::contains(tui.trash_area, *column, *row);
            if over != session.over_delete_target() {
                actions.push(Action::DeleteTargetHover(over));
            }
            actions.push(Action::PointerMoved(tui.geometry().point(*column, *row)));
            actions
        }
        TuiEvent::MouseUp(column, row) => {
            if !app.drag.is_dragging() {
                return Vec::new();
            }
            vec![Action::EndDrag {
                over_delete_target: trash::contains(tui.trash_area, *column, *row),
            }]
        }
        TuiEvent::Resize => Vec::new(),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.cell_width, config.cell_height);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();

    let mut needs_redraw = true; // Force first frame
    let mut validation_due = false;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Layout for the latest mutations is on screen; validate once for the batch.
        if validation_due {
            validation_due = false;
            update(&mut app, Action::Revalidate);
            needs_redraw = true;
            continue;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in actions_for(&event, &app, &mut tui) {
                match update(&mut app, action) {
                    Effect::Quit => should_quit = true,
                    Effect::ScheduleValidation => validation_due = true,
                    Effect::None => {}
                }
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    debug!(
        "Exiting with {} chips, {} validation runs",
        app.chips.sequence().len(),
        app.chips.schedule().runs()
    );
    ratatui::restore();
    Ok(())
}
