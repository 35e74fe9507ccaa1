//! Terminal UI for arranging README sections
//!
//! Three panes: a sections column (ordered selected list stacked over the
//! alphabetized available list, with a `+ Custom` row), a markdown editor
//! for the focused section, and a live preview of the composed document.
//! Sections move between the lists and within the selected order; every
//! change autosaves to the session file on quit.

pub mod app;
pub mod editor_pane;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::{App, Mode};
pub use terminal::{run, EditArgs};
