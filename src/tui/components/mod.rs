//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as props:
//! - `StatusBar`: verdict and last status message
//! - `Trash`: the delete target
//!
//! ### Stateful Components (Layout-Recording)
//!
//! Record what they drew so the event loop can hit-test the next mouse event:
//! - `ChipBoard` / `ChipBoardState`: the expression, also the drag geometry feed
//! - `Palette` / `PaletteState`: chips that can be added, plus the filter
//!
//! Both share the flow layout in `chip`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── chip.rs        (chip measuring, wrapping layout, drawing, geometry)
//! ├── chip_board.rs  (the expression)
//! ├── palette.rs     (conditions + filtered identifiers)
//! ├── status_bar.rs  (verdict line)
//! └── trash.rs       (delete target)
//! ```

pub mod chip;
pub mod chip_board;
pub mod palette;
mod status_bar;
pub mod trash;

pub use chip::CellGeometry;
pub use chip_board::{ChipBoard, ChipBoardState, Lifted};
pub use palette::{Palette, PaletteEvent, PaletteState};
pub use status_bar::StatusBar;
pub use trash::Trash;
