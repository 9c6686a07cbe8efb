//! # Application State
//!
//! Core business state for Sieve. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── chips: ChipCollection     // sequence + identifier pool + verdict
//! ├── drag: DragEngine          // active drag session, if any
//! └── status_message: String    // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::borrow::Cow;

use crate::core::chip::Chip;
use crate::core::collection::ChipCollection;
use crate::core::config::ResolvedConfig;
use crate::core::drag::{DragConfig, DragEngine};
use crate::core::validator::Verdict;

pub struct App {
    pub chips: ChipCollection,
    pub drag: DragEngine,
    pub status_message: String,
}

impl App {
    pub fn new(chips: ChipCollection, drag_config: DragConfig) -> Self {
        Self {
            chips,
            drag: DragEngine::new(drag_config),
            status_message: String::from("Drag chips to reorder, drop on the trash to delete."),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let chips = ChipCollection::new(config.identifier_pool(), &config.initial);
        Self::new(chips, config.drag)
    }

    /// The sequence as it should be displayed: with the dragged chip moved to
    /// its placeholder while a drag is in progress.
    pub fn display_sequence(&self) -> Cow<'_, [Chip]> {
        self.drag.preview_sequence(self.chips.sequence())
    }

    pub fn verdict(&self) -> Verdict {
        self.chips.verdict()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::drag::Point;
    use crate::test_support::{chip_center, grid, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.verdict().is_valid());
        assert!(!app.drag.is_dragging());
        assert_eq!(app.display_sequence().len(), 3);
    }

    #[test]
    fn test_display_sequence_follows_drag() {
        let mut app = test_app();
        let rects = grid(&[&[40.0, 40.0, 40.0]]);
        app.drag.begin_drag(0, chip_center(&rects, 0), &rects);
        app.drag.drag_to(Point::new(rects[2].right + 10.0, rects[2].top + 2.0));
        let shown: Vec<_> = app.display_sequence().iter().map(|c| c.label.clone()).collect();
        assert_eq!(shown, ["AND", "tacos", "pizza"]);
        assert_eq!(app.chips.labels(), ["pizza", "AND", "tacos"]);
    }
}
