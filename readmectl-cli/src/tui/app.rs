//! Core application state and mode management

use std::path::PathBuf;

use ratatui::layout::{Position, Rect};
use tracing::{info, warn};

use readmectl_core::{
    compose, write_markdown, EditorOp, SectionEditor, SessionState, TemplateCatalog,
};

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - move between lists, arrange sections
    #[default]
    Normal,
    /// Edit mode - the textarea owns keystrokes for the focused section
    EditBody,
    /// Help overlay is open
    Help,
}

impl Mode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::EditBody => "EDIT",
            Mode::Help => "HELP",
        }
    }

    /// Get color for status bar
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Mode::Normal => Color::Cyan,
            Mode::EditBody => Color::Green,
            Mode::Help => Color::Magenta,
        }
    }
}

/// Which list has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    /// Ordered document sections (upper list)
    #[default]
    Selected,
    /// Alphabetized template pool (lower list)
    Available,
}

impl Column {
    pub fn toggle(self) -> Self {
        match self {
            Column::Selected => Column::Available,
            Column::Available => Column::Selected,
        }
    }
}

/// An in-flight drag of a selected row (keyboard grab or mouse press)
#[derive(Debug, Clone)]
pub struct Drag {
    /// Slug being carried
    pub slug: String,
    /// Index the drag started from
    pub origin: usize,
    /// Tentative drop position (index into selected)
    pub pos: usize,
}

/// List/pane rectangles captured at render time, used for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutSnapshot {
    /// Inner area of the selected list
    pub selected_list: Rect,
    /// Inner area of the available list (row 0 is the `+ Custom` row)
    pub available_list: Rect,
    /// Editor pane area
    pub editor_pane: Rect,
    /// Preview pane inner area
    pub preview: Rect,
}

/// Main application state
pub struct App {
    /// Current input mode
    pub mode: Mode,
    /// Which list is focused
    pub column: Column,
    /// Cursor into selected (document order)
    pub selected_cursor: usize,
    /// Cursor into the available display rows (0 is the `+ Custom` row)
    pub available_cursor: usize,
    /// Scroll offset for the selected list
    pub selected_scroll: usize,
    /// Scroll offset for the available list
    pub available_scroll: usize,
    /// Scroll offset for the preview pane
    pub preview_scroll: u16,
    /// Drag in progress, if any
    pub drag: Option<Drag>,
    /// Show raw markdown instead of the styled preview
    pub show_raw: bool,
    /// Unsaved changes since the last session save
    pub dirty: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (shown in the hint bar)
    pub status_message: Option<String>,
    /// Geometry from the last render
    pub layout: LayoutSnapshot,
    /// Two-list section state
    pub editor: SectionEditor,
    /// Every template the editor can offer
    pub catalog: TemplateCatalog,
    /// Where the session autosaves
    pub session_path: PathBuf,
    /// Where `w` writes the composed README
    pub output_path: PathBuf,
}

impl App {
    /// Create a new App instance
    pub fn new(
        editor: SectionEditor,
        catalog: TemplateCatalog,
        session_path: PathBuf,
        output_path: PathBuf,
    ) -> Self {
        Self {
            mode: Mode::Normal,
            column: Column::Selected,
            selected_cursor: 0,
            available_cursor: 0,
            selected_scroll: 0,
            available_scroll: 0,
            preview_scroll: 0,
            drag: None,
            show_raw: false,
            dirty: false,
            should_quit: false,
            status_message: None,
            layout: LayoutSnapshot::default(),
            editor,
            catalog,
            session_path,
            output_path,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Available slugs in display order (sorted by name)
    pub fn available_rows(&self) -> Vec<String> {
        self.editor.alphabetized_available(&self.catalog)
    }

    /// Slug under the cursor in the selected list
    pub fn current_selected_slug(&self) -> Option<&str> {
        self.editor
            .selected()
            .get(self.selected_cursor)
            .map(String::as_str)
    }

    /// Slug under the cursor in the available list; None on the custom row
    pub fn current_available_slug(&self) -> Option<String> {
        if self.available_cursor == 0 {
            return None;
        }
        self.available_rows().get(self.available_cursor - 1).cloned()
    }

    /// Select next item in the focused list
    pub fn select_next(&mut self) {
        match self.column {
            Column::Selected => {
                let len = self.editor.selected().len();
                if len > 0 && self.selected_cursor + 1 < len {
                    self.selected_cursor += 1;
                }
            }
            Column::Available => {
                let rows = self.editor.available().len() + 1;
                if self.available_cursor + 1 < rows {
                    self.available_cursor += 1;
                }
            }
        }
    }

    /// Select previous item in the focused list
    pub fn select_prev(&mut self) {
        match self.column {
            Column::Selected => self.selected_cursor = self.selected_cursor.saturating_sub(1),
            Column::Available => self.available_cursor = self.available_cursor.saturating_sub(1),
        }
    }

    /// Jump to the top of the focused list
    pub fn select_first(&mut self) {
        match self.column {
            Column::Selected => self.selected_cursor = 0,
            Column::Available => self.available_cursor = 0,
        }
    }

    /// Jump to the bottom of the focused list
    pub fn select_last(&mut self) {
        match self.column {
            Column::Selected => {
                self.selected_cursor = self.editor.selected().len().saturating_sub(1);
            }
            Column::Available => {
                self.available_cursor = self.editor.available().len();
            }
        }
    }

    /// Apply one editor operation and fix up cursors and status.
    /// No-op operations leave the UI state alone.
    pub fn apply_op(&mut self, op: EditorOp) {
        let status = match &op {
            EditorOp::Add { slug } => Some(format!("Added {}", self.catalog.display_name(slug))),
            EditorOp::AddCustom => Some("Added custom section".to_string()),
            EditorOp::Remove { slug } => {
                Some(format!("Removed {}", self.catalog.display_name(slug)))
            }
            EditorOp::Reorder { .. } | EditorOp::Focus { .. } => None,
        };
        let follow_focus = matches!(
            op,
            EditorOp::Add { .. } | EditorOp::AddCustom | EditorOp::Focus { .. }
        );
        let moved_slug = match &op {
            EditorOp::Reorder { from, .. } => Some(from.clone()),
            _ => None,
        };

        if !self.editor.apply(op, &mut self.catalog) {
            return;
        }
        self.dirty = true;

        if follow_focus {
            if let Some(slug) = self.editor.focused() {
                if let Some(idx) = self.editor.selected().iter().position(|s| s == slug) {
                    self.selected_cursor = idx;
                }
            }
        } else if let Some(slug) = moved_slug {
            if let Some(idx) = self.editor.selected().iter().position(|s| *s == slug) {
                self.selected_cursor = idx;
            }
        }

        if let Some(msg) = status {
            self.set_status(msg);
        }
        self.clamp_cursors();
    }

    /// Keep cursors inside their lists after a mutation
    fn clamp_cursors(&mut self) {
        let selected_len = self.editor.selected().len();
        if selected_len == 0 {
            self.selected_cursor = 0;
        } else if self.selected_cursor >= selected_len {
            self.selected_cursor = selected_len - 1;
        }

        // one extra row for `+ Custom`
        let available_rows = self.editor.available().len() + 1;
        if self.available_cursor >= available_rows {
            self.available_cursor = available_rows - 1;
        }
    }

    /// Grab the row under the cursor for a keyboard drag
    pub fn start_drag(&mut self) -> bool {
        if self.column != Column::Selected {
            return false;
        }
        let Some(slug) = self.current_selected_slug() else {
            return false;
        };
        self.drag = Some(Drag {
            slug: slug.to_string(),
            origin: self.selected_cursor,
            pos: self.selected_cursor,
        });
        true
    }

    /// Grab a specific row for a mouse drag
    pub fn begin_mouse_drag(&mut self, row: usize) {
        if let Some(slug) = self.editor.selected().get(row) {
            self.drag = Some(Drag {
                slug: slug.clone(),
                origin: row,
                pos: row,
            });
        }
    }

    /// Shift the tentative drop position by delta rows
    pub fn drag_move(&mut self, delta: isize) {
        let len = self.editor.selected().len();
        if len == 0 {
            return;
        }
        if let Some(drag) = &mut self.drag {
            drag.pos = drag.pos.saturating_add_signed(delta).min(len - 1);
            self.selected_cursor = drag.pos;
        }
    }

    /// Move the tentative drop position to an absolute row
    pub fn drag_to(&mut self, row: usize) {
        let len = self.editor.selected().len();
        if len == 0 {
            return;
        }
        if let Some(drag) = &mut self.drag {
            drag.pos = row.min(len - 1);
            self.selected_cursor = drag.pos;
        }
    }

    /// End the drag without committing; the cursor returns to the item
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            if let Some(idx) = self.editor.selected().iter().position(|s| *s == drag.slug) {
                self.selected_cursor = idx;
            }
        }
    }

    pub fn take_drag(&mut self) -> Option<Drag> {
        self.drag.take()
    }

    /// Commit a keyboard drag: at most one reorder, at drop time
    pub fn drop_drag(&mut self) -> Option<EditorOp> {
        let drag = self.drag.take()?;
        Self::reorder_op(self.editor.selected(), &drag)
    }

    /// Translate a finished drag into the single reorder it stands for.
    /// Dropping on the origin position yields nothing.
    pub fn reorder_op(selected: &[String], drag: &Drag) -> Option<EditorOp> {
        let from_idx = selected.iter().position(|s| *s == drag.slug)?;
        if drag.pos == from_idx {
            return None;
        }
        let to = selected.get(drag.pos)?.clone();
        Some(EditorOp::Reorder {
            from: drag.slug.clone(),
            to,
        })
    }

    /// Selected row under a screen position, if any
    pub fn selected_row_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.layout.selected_list;
        if !area.contains(Position { x, y }) {
            return None;
        }
        let idx = (y - area.y) as usize + self.selected_scroll;
        (idx < self.editor.selected().len()).then_some(idx)
    }

    /// Available display row under a screen position (0 is `+ Custom`)
    pub fn available_row_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.layout.available_list;
        if !area.contains(Position { x, y }) {
            return None;
        }
        let idx = (y - area.y) as usize + self.available_scroll;
        (idx <= self.editor.available().len()).then_some(idx)
    }

    /// Route a wheel event to whatever is under the pointer
    pub fn scroll_at(&mut self, x: u16, y: u16, down: bool) {
        let pos = Position { x, y };
        if self.layout.preview.contains(pos) {
            self.preview_scroll = if down {
                self.preview_scroll.saturating_add(1)
            } else {
                self.preview_scroll.saturating_sub(1)
            };
        } else if self.layout.selected_list.contains(pos) {
            self.column = Column::Selected;
            if down {
                self.select_next();
            } else {
                self.select_prev();
            }
        } else if self.layout.available_list.contains(pos) {
            self.column = Column::Available;
            if down {
                self.select_next();
            } else {
                self.select_prev();
            }
        }
    }

    /// Compose the document from the current selection
    pub fn compose_markdown(&self) -> String {
        compose(&self.editor, &self.catalog)
    }

    /// Write the textarea content back into the focused template. The
    /// textarea cannot represent a trailing newline, so one is restored;
    /// otherwise an untouched body would read as changed.
    pub fn commit_body(&mut self, slug: Option<&str>, content: &str) {
        let Some(slug) = slug else {
            return;
        };
        let body = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{content}\n")
        };
        if self.catalog.update_body(slug, &body) {
            self.dirty = true;
        }
    }

    /// Persist the session; failures surface in the status bar
    pub fn save_session(&mut self) {
        let state = SessionState::capture(&self.editor, &self.catalog);
        match state.save(&self.session_path) {
            Ok(()) => {
                self.dirty = false;
                info!(path = %self.session_path.display(), "session saved");
                self.set_status(format!("Saved session to {}", self.session_path.display()));
            }
            Err(err) => {
                warn!(error = %err, "failed to save session");
                self.set_status(format!("Save failed: {err}"));
            }
        }
    }

    /// Write the composed README to the output path
    pub fn export_readme(&mut self) {
        let markdown = self.compose_markdown();
        match write_markdown(&self.output_path, &markdown) {
            Ok(()) => {
                info!(path = %self.output_path.display(), bytes = markdown.len(), "wrote composed README");
                self.set_status(format!(
                    "Wrote {} ({} bytes)",
                    self.output_path.display(),
                    markdown.len()
                ));
            }
            Err(err) => {
                warn!(error = %err, "failed to write README");
                self.set_status(format!("Write failed: {err}"));
            }
        }
    }

    /// Back to the default section layout
    pub fn reset_layout(&mut self) {
        self.editor.reset(&self.catalog);
        self.selected_cursor = 0;
        self.available_cursor = 0;
        self.drag = None;
        self.dirty = true;
        self.set_status("Reset to default layout");
    }
}
