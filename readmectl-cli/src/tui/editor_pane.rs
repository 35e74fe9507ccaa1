//! Markdown editor pane backed by a textarea

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use super::app::{App, Mode};

const PLACEHOLDER: &str = "Select a section and press i to edit its markdown";

/// Editor pane state: a textarea plus the slug whose body it holds
pub struct EditorPane<'a> {
    textarea: TextArea<'a>,
    slug: Option<String>,
}

impl<'a> EditorPane<'a> {
    /// Create an empty editor pane
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Editor ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        Self {
            textarea,
            slug: None,
        }
    }

    /// Reload the textarea when the focused section changed. Keeping the
    /// slug here means in-progress edits survive redraws.
    pub fn sync(&mut self, app: &App) {
        let focused = app.editor.focused();
        if focused == self.slug.as_deref() {
            return;
        }
        let body = focused
            .and_then(|slug| app.catalog.get(slug))
            .map(|t| t.markdown.as_str())
            .unwrap_or("");
        self.load_content(body);
        self.slug = focused.map(str::to_string);
    }

    /// Render the editor pane
    pub fn render(&mut self, f: &mut Frame, area: Rect, app: &App) {
        let editing = app.mode == Mode::EditBody;

        let title = match &self.slug {
            Some(slug) if editing => format!(" Edit: {} [EDITING] ", app.catalog.display_name(slug)),
            Some(slug) => format!(" Edit: {} ", app.catalog.display_name(slug)),
            None => " Editor ".to_string(),
        };
        let border_color = if editing { Color::Green } else { Color::DarkGray };

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        );

        if editing {
            self.textarea
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            self.textarea.set_cursor_style(Style::default());
        }

        f.render_widget(&self.textarea, area);
    }

    /// Forward a keystroke to the textarea
    pub fn input(&mut self, key: crossterm::event::KeyEvent) {
        self.textarea.input(key);
    }

    /// Get current content
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Slug of the section the pane is editing, if any
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Replace the textarea content, keeping the styling
    fn load_content(&mut self, content: &str) {
        let mut new_textarea = TextArea::from(content.lines().map(|s| s.to_string()));
        new_textarea.set_placeholder_text(PLACEHOLDER);
        new_textarea.set_block(self.textarea.block().cloned().unwrap_or_default());
        new_textarea.set_cursor_style(self.textarea.cursor_style());
        self.textarea = new_textarea;
    }
}

impl<'a> Default for EditorPane<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmectl_core::{EditorOp, SectionEditor, SectionTemplate, TemplateCatalog};
    use std::path::PathBuf;

    fn test_app() -> App {
        let mut catalog = TemplateCatalog::empty();
        catalog.upsert(SectionTemplate::new("alpha", "Alpha", "## Alpha\n\nBody.\n"));
        catalog.upsert(SectionTemplate::new("beta", "Beta", "## Beta\n"));
        let editor = SectionEditor::from_parts(
            vec![],
            vec!["alpha".into(), "beta".into()],
            Some("alpha".into()),
        );
        App::new(
            editor,
            catalog,
            PathBuf::from("session.json"),
            PathBuf::from("README.md"),
        )
    }

    #[test]
    fn sync_loads_the_focused_body() {
        let app = test_app();
        let mut pane = EditorPane::new();
        pane.sync(&app);

        assert_eq!(pane.slug(), Some("alpha"));
        assert_eq!(pane.content(), "## Alpha\n\nBody.");
    }

    #[test]
    fn sync_is_a_noop_while_focus_is_stable() {
        let mut app = test_app();
        let mut pane = EditorPane::new();
        pane.sync(&app);

        // edits in flight survive redraw syncs
        pane.textarea.insert_str("typed ");
        let edited = pane.content();
        pane.sync(&app);
        assert_eq!(pane.content(), edited);

        // but switching focus reloads
        app.apply_op(EditorOp::Focus { slug: "beta".into() });
        pane.sync(&app);
        assert_eq!(pane.slug(), Some("beta"));
        assert_eq!(pane.content(), "## Beta");
    }
}
