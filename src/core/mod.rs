//! # Core Application Logic
//!
//! This module contains Sieve's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────┐
//!                    │          CORE            │
//!                    │  (this module)           │
//!                    │                          │
//!                    │  • chip / pool model     │
//!                    │  • validator             │
//!                    │  • drag engine           │
//!                    │  • collection manager    │
//!                    │  • App + update()        │
//!                    │                          │
//!                    │  No terminal. No UI.     │
//!                    └────────────┬─────────────┘
//!                                 │ ChipRect geometry in,
//!                                 │ Verdict + sequence out
//!                                 ▼
//!                          ┌────────────┐
//!                          │    TUI     │
//!                          │  Adapter   │
//!                          │ (ratatui)  │
//!                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`chip`]: `Chip`, `Condition`, `IdentifierPool`
//! - [`validator`]: `validate()` and its `Verdict`
//! - [`drag`]: `DragEngine`, the reorder/delete gesture
//! - [`collection`]: `ChipCollection`, the only owner of the sequence and pool
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`config`]: TOML config file, env and CLI resolution

pub mod action;
pub mod chip;
pub mod collection;
pub mod config;
pub mod drag;
pub mod state;
pub mod validator;
