//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use readmectl_core::EditorOp;

use super::app::{App, Column, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling an input event
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Apply an editor operation
    Op(EditorOp),
    /// Save the session
    Save,
    /// Write the composed README to disk
    Export,
    /// Copy the composed README to the clipboard
    Copy,
    /// Write the textarea back into the focused section
    CommitBody {
        /// Leave edit mode after committing
        exit: bool,
    },
    /// Restore the default section layout
    Reset,
    /// Forward the keystroke to the textarea
    Input(KeyEvent),
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcut (Ctrl+C)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::EditBody => handle_edit_body(key),
        Mode::Help => {
            app.mode = Mode::Normal;
            HandleResult::Continue
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    // An active grab swallows everything except move/drop/cancel
    if app.drag.is_some() {
        return handle_drag(app, key);
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => HandleResult::Quit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            HandleResult::Continue
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            HandleResult::Continue
        }

        // Switch between the two lists
        KeyCode::Tab | KeyCode::BackTab => {
            app.column = app.column.toggle();
            HandleResult::Continue
        }

        // Enter: focus a selected section, or pull one in from available
        KeyCode::Enter => handle_enter(app),

        // Grab the row under the cursor for a keyboard drag
        KeyCode::Char(' ') => {
            if app.start_drag() {
                app.set_status("-- MOVE -- j/k to position, space to drop");
            }
            HandleResult::Continue
        }

        // Send the section back to available
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.column == Column::Selected {
                if let Some(slug) = app.current_selected_slug() {
                    return HandleResult::Op(EditorOp::Remove {
                        slug: slug.to_string(),
                    });
                }
            }
            HandleResult::Continue
        }

        // New custom section
        KeyCode::Char('c') => HandleResult::Op(EditorOp::AddCustom),

        // Edit the body of the section under the cursor
        KeyCode::Char('i') | KeyCode::Char('e') => {
            if app.column == Column::Selected {
                if let Some(slug) = app.current_selected_slug() {
                    let slug = slug.to_string();
                    app.mode = Mode::EditBody;
                    return HandleResult::Op(EditorOp::Focus { slug });
                }
            }
            HandleResult::Continue
        }

        // Preview toggles and scrolling
        KeyCode::Char('r') => {
            app.show_raw = !app.show_raw;
            HandleResult::Continue
        }
        KeyCode::PageDown => {
            app.preview_scroll = app.preview_scroll.saturating_add(5);
            HandleResult::Continue
        }
        KeyCode::PageUp => {
            app.preview_scroll = app.preview_scroll.saturating_sub(5);
            HandleResult::Continue
        }

        // Document actions
        KeyCode::Char('R') => HandleResult::Reset,
        KeyCode::Char('s') => HandleResult::Save,
        KeyCode::Char('w') => HandleResult::Export,
        KeyCode::Char('y') => HandleResult::Copy,

        // Help overlay
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
            HandleResult::Continue
        }

        KeyCode::Esc => {
            app.clear_status();
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

/// Handle keys while a keyboard drag is active
fn handle_drag(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.drag_move(1);
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.drag_move(-1);
            HandleResult::Continue
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.clear_status();
            match app.drop_drag() {
                Some(op) => HandleResult::Op(op),
                None => HandleResult::Continue,
            }
        }
        KeyCode::Esc => {
            app.cancel_drag();
            app.clear_status();
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

/// Enter in normal mode: focus or add, depending on the list
fn handle_enter(app: &mut App) -> HandleResult {
    match app.column {
        Column::Selected => {
            if let Some(slug) = app.current_selected_slug() {
                return HandleResult::Op(EditorOp::Focus {
                    slug: slug.to_string(),
                });
            }
            HandleResult::Continue
        }
        Column::Available => {
            if app.available_cursor == 0 {
                return HandleResult::Op(EditorOp::AddCustom);
            }
            match app.current_available_slug() {
                Some(slug) => HandleResult::Op(EditorOp::Add { slug }),
                None => HandleResult::Continue,
            }
        }
    }
}

/// Handle keys in edit mode; the textarea gets everything unclaimed
fn handle_edit_body(key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => HandleResult::CommitBody { exit: true },
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            HandleResult::CommitBody { exit: false }
        }
        _ => HandleResult::Input(key),
    }
}

/// Handle a mouse event. Presses on list rows select and act, dragging a
/// selected row reorders, and the wheel scrolls whatever is under it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> HandleResult {
    if app.mode != Mode::Normal {
        return HandleResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = app.selected_row_at(mouse.column, mouse.row) {
                app.column = Column::Selected;
                app.selected_cursor = row;
                app.begin_mouse_drag(row);
                return HandleResult::Continue;
            }
            if let Some(row) = app.available_row_at(mouse.column, mouse.row) {
                app.column = Column::Available;
                app.available_cursor = row;
                if row == 0 {
                    return HandleResult::Op(EditorOp::AddCustom);
                }
                if let Some(slug) = app.current_available_slug() {
                    return HandleResult::Op(EditorOp::Add { slug });
                }
            }
            HandleResult::Continue
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.drag.is_some() {
                if let Some(row) = app.selected_row_at(mouse.column, mouse.row) {
                    app.drag_to(row);
                }
            }
            HandleResult::Continue
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = app.take_drag() else {
                return HandleResult::Continue;
            };
            // A release without movement is a click: focus the section
            if drag.pos == drag.origin {
                return HandleResult::Op(EditorOp::Focus { slug: drag.slug });
            }
            match App::reorder_op(app.editor.selected(), &drag) {
                Some(op) => HandleResult::Op(op),
                None => HandleResult::Continue,
            }
        }
        MouseEventKind::ScrollDown => {
            app.scroll_at(mouse.column, mouse.row, true);
            HandleResult::Continue
        }
        MouseEventKind::ScrollUp => {
            app.scroll_at(mouse.column, mouse.row, false);
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use readmectl_core::{SectionEditor, SectionTemplate, TemplateCatalog};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let mut catalog = TemplateCatalog::empty();
        for (slug, name) in [("alpha", "Alpha"), ("beta", "Beta"), ("gamma", "Gamma")] {
            catalog.upsert(SectionTemplate::new(slug, name, format!("## {name}\n")));
        }
        let editor = SectionEditor::from_parts(
            vec!["gamma".into()],
            vec!["alpha".into(), "beta".into()],
            None,
        );
        App::new(
            editor,
            catalog,
            PathBuf::from("session.json"),
            PathBuf::from("README.md"),
        )
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let mut app = test_app();
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('q'))),
            HandleResult::Quit
        ));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut app = test_app();
        app.mode = Mode::EditBody;
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key(&mut app, ev), HandleResult::Quit));
    }

    #[test]
    fn enter_on_selected_emits_focus() {
        let mut app = test_app();
        match handle_key(&mut app, key(KeyCode::Enter)) {
            HandleResult::Op(EditorOp::Focus { slug }) => assert_eq!(slug, "alpha"),
            _ => panic!("expected a focus op"),
        }
    }

    #[test]
    fn enter_on_the_custom_row_emits_add_custom() {
        let mut app = test_app();
        app.column = Column::Available;
        app.available_cursor = 0;
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Enter)),
            HandleResult::Op(EditorOp::AddCustom)
        ));
    }

    #[test]
    fn enter_on_an_available_row_emits_add() {
        let mut app = test_app();
        app.column = Column::Available;
        app.available_cursor = 1;
        match handle_key(&mut app, key(KeyCode::Enter)) {
            HandleResult::Op(EditorOp::Add { slug }) => assert_eq!(slug, "gamma"),
            _ => panic!("expected an add op"),
        }
    }

    #[test]
    fn delete_ignores_the_available_column() {
        let mut app = test_app();
        app.column = Column::Available;
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('d'))),
            HandleResult::Continue
        ));
    }

    #[test]
    fn space_grabs_then_space_drops() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(app.drag.is_some());
        assert!(app.status_message.is_some());

        handle_key(&mut app, key(KeyCode::Char('j')));
        match handle_key(&mut app, key(KeyCode::Char(' '))) {
            HandleResult::Op(EditorOp::Reorder { from, to }) => {
                assert_eq!(from, "alpha");
                assert_eq!(to, "beta");
            }
            _ => panic!("expected a reorder op"),
        }
        assert!(app.drag.is_none());
    }

    #[test]
    fn q_moves_are_swallowed_while_dragging() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('q'))),
            HandleResult::Continue
        ));
        assert!(app.drag.is_some());
    }

    #[test]
    fn esc_cancels_a_drag() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char(' ')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.drag.is_none());
        assert_eq!(app.selected_cursor, 0);
    }

    #[test]
    fn edit_mode_forwards_plain_keys() {
        let mut app = test_app();
        app.mode = Mode::EditBody;
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('x'))),
            HandleResult::Input(_)
        ));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Esc)),
            HandleResult::CommitBody { exit: true }
        ));
    }

    #[test]
    fn any_key_closes_help() {
        let mut app = test_app();
        app.mode = Mode::Help;
        handle_key(&mut app, key(KeyCode::Char('z')));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn mouse_click_on_selected_row_focuses_it() {
        let mut app = test_app();
        app.layout.selected_list = Rect::new(0, 1, 20, 5);

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(handle_mouse(&mut app, down), HandleResult::Continue));
        assert_eq!(app.selected_cursor, 1);

        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        match handle_mouse(&mut app, up) {
            HandleResult::Op(EditorOp::Focus { slug }) => assert_eq!(slug, "beta"),
            _ => panic!("expected a focus op"),
        }
    }

    #[test]
    fn mouse_drag_between_rows_reorders() {
        let mut app = test_app();
        app.layout.selected_list = Rect::new(0, 1, 20, 5);

        let at = |kind, row| MouseEvent {
            kind,
            column: 3,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, at(MouseEventKind::Down(MouseButton::Left), 1));
        handle_mouse(&mut app, at(MouseEventKind::Drag(MouseButton::Left), 2));
        match handle_mouse(&mut app, at(MouseEventKind::Up(MouseButton::Left), 2)) {
            HandleResult::Op(EditorOp::Reorder { from, to }) => {
                assert_eq!(from, "alpha");
                assert_eq!(to, "beta");
            }
            _ => panic!("expected a reorder op"),
        }
    }

    #[test]
    fn mouse_click_on_available_row_adds() {
        let mut app = test_app();
        app.layout.available_list = Rect::new(0, 10, 20, 5);

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 11,
            modifiers: KeyModifiers::NONE,
        };
        match handle_mouse(&mut app, down) {
            HandleResult::Op(EditorOp::Add { slug }) => assert_eq!(slug, "gamma"),
            _ => panic!("expected an add op"),
        }
    }
}
