//! # Actions
//!
//! Everything that can happen in Sieve becomes an `Action`.
//! User clicks a palette chip? That's `Action::AddChip(chip)`.
//! User lets go of a dragged chip? That's `Action::EndDrag { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` telling the event loop what to do next.
//! No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Validation is never run inside a mutating action. Mutations return
//! `Effect::ScheduleValidation`; the loop dispatches `Action::Revalidate`
//! after the next frame has been drawn.

use log::{debug, warn};

use crate::core::chip::Chip;
use crate::core::drag::{ChipRect, DragCommit, Point};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a chip from the palette.
    AddChip(Chip),
    /// Delete the chip at this index without dragging it.
    TrashChip(usize),
    ClearAll,
    BeginDrag {
        index: usize,
        pointer: Point,
        geometry: Vec<ChipRect>,
    },
    PointerMoved(Point),
    /// Pointer entered (`true`) or left (`false`) the trash.
    DeleteTargetHover(bool),
    EndDrag {
        over_delete_target: bool,
    },
    CancelDrag,
    Revalidate,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ScheduleValidation,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    // The drag session indexes into the sequence, so it must not shift mid-drag.
    if app.drag.is_dragging() && matches!(action, Action::TrashChip(_) | Action::ClearAll) {
        warn!("{:?} during an active drag, ignoring", action);
        return Effect::None;
    }
    match action {
        Action::AddChip(chip) => {
            if app.chips.add_from_pool(&chip) {
                app.status_message = format!("Added {}", chip.label);
                Effect::ScheduleValidation
            } else {
                Effect::None
            }
        }
        Action::TrashChip(index) => match app.chips.remove_via_trash(index) {
            Some(chip) => {
                app.status_message = format!("Removed {}", chip.label);
                Effect::ScheduleValidation
            }
            None => Effect::None,
        },
        Action::ClearAll => {
            app.chips.clear_all();
            app.status_message = String::from("Cleared all chips");
            Effect::ScheduleValidation
        }
        Action::BeginDrag {
            index,
            pointer,
            geometry,
        } => {
            if app.drag.is_dragging() {
                warn!("BeginDrag({}) while a drag is active, ignoring", index);
                return Effect::None;
            }
            if index >= app.chips.sequence().len() {
                warn!("BeginDrag on missing chip {}", index);
                return Effect::None;
            }
            app.drag.begin_drag(index, pointer, &geometry);
            Effect::None
        }
        Action::PointerMoved(pointer) => {
            app.drag.drag_to(pointer);
            Effect::None
        }
        Action::DeleteTargetHover(over) => {
            app.drag.set_over_delete_target(over);
            Effect::None
        }
        Action::EndDrag { over_delete_target } => {
            if !app.drag.is_dragging() {
                return Effect::None;
            }
            let commit = app.drag.end_drag(over_delete_target);
            if let DragCommit::Remove { index } = commit
                && let Some(chip) = app.chips.sequence().get(index)
            {
                app.status_message = format!("Removed {}", chip.label);
            }
            app.chips.apply(commit);
            Effect::ScheduleValidation
        }
        Action::CancelDrag => {
            if !app.drag.is_dragging() {
                return Effect::None;
            }
            let commit = app.drag.cancel_drag();
            app.chips.apply(commit);
            app.status_message = String::from("Drag cancelled");
            Effect::ScheduleValidation
        }
        Action::Revalidate => {
            app.chips.revalidate();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
