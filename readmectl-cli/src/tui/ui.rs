//! UI rendering using ratatui

use chrono::Local;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Column, Drag, Mode};
use super::editor_pane::EditorPane;

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for carried rows and warnings
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

const HELP_TEXT: &str = "\
Sections
  j/k or arrows   move the cursor
  Tab             switch between Selected and Available
  Enter           focus a section / add one from the pool
  Space           grab the section; j/k to carry, space to drop
  d or Delete     send the section back to the pool
  c               add a custom section
  i or e          edit the focused section's markdown
  R               reset to the default layout

Document
  r               toggle raw markdown in the preview
  PgUp/PgDn       scroll the preview
  s               save the session
  w               write the README to disk
  y               copy the README to the clipboard

Editing
  Esc             keep changes and return
  Ctrl-s          keep changes, stay in the editor

q quits; the session autosaves on exit.";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App, editor_pane: &mut EditorPane) {
    let area = frame.area();

    // Main layout: status bar + content + hint bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Status bar
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Hint bar
        ])
        .split(area);

    render_status_bar(frame, app, rows[0]);

    // Content: sections column + editor + preview
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Section lists
            Constraint::Percentage(35), // Markdown editor
            Constraint::Percentage(35), // Preview
        ])
        .split(rows[1]);

    let lists = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(cols[0]);

    render_selected_list(frame, app, lists[0]);
    render_available_list(frame, app, lists[1]);

    app.layout.editor_pane = cols[1];
    editor_pane.render(frame, cols[1], app);

    render_preview(frame, app, cols[2]);

    render_hint_bar(frame, app, rows[2]);

    if app.mode == Mode::Help {
        render_help_overlay(frame);
    }
}

/// Selected order with an in-flight drag applied, for display only
fn preview_order(selected: &[String], drag: &Drag) -> Vec<String> {
    let mut rows: Vec<String> = selected.iter().filter(|s| **s != drag.slug).cloned().collect();
    let pos = drag.pos.min(rows.len());
    rows.insert(pos, drag.slug.clone());
    rows
}

/// Keep the cursor inside the visible window
fn clamp_scroll(scroll: usize, cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    if cursor < scroll {
        cursor
    } else if cursor >= scroll + visible {
        cursor + 1 - visible
    } else {
        scroll
    }
}

/// Render the ordered document sections
fn render_selected_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.column == Column::Selected && app.mode == Mode::Normal;
    let dragging = app.drag.is_some();

    let title = if dragging { " Selected [MOVE] " } else { " Selected " };
    let border_color = if dragging {
        HIGHLIGHT
    } else if is_focused {
        ACCENT
    } else {
        SECONDARY
    };
    let block = Block::default()
        .title(title)
        .title_style(if is_focused || dragging {
            Style::default().fg(border_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SECONDARY)
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    app.layout.selected_list = inner;
    let visible = inner.height as usize;

    let display = match &app.drag {
        Some(drag) => preview_order(app.editor.selected(), drag),
        None => app.editor.selected().to_vec(),
    };
    app.selected_scroll = clamp_scroll(app.selected_scroll, app.selected_cursor, visible);

    let drag_slug = app.drag.as_ref().map(|d| d.slug.clone());
    let focused_slug = app.editor.focused().map(str::to_string);

    let items: Vec<ListItem> = display
        .iter()
        .enumerate()
        .skip(app.selected_scroll)
        .take(visible)
        .map(|(idx, slug)| {
            let is_cursor = idx == app.selected_cursor;
            let is_dragged = drag_slug.as_deref() == Some(slug.as_str());
            let is_section_focus = focused_slug.as_deref() == Some(slug.as_str());

            let marker = if is_section_focus { "\u{25cf} " } else { "  " };
            let content = format!("{}{}", marker, app.catalog.display_name(slug));

            let style = if is_dragged {
                Style::default()
                    .fg(Color::Black)
                    .bg(HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else if is_cursor && is_focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else if is_section_focus {
                Style::default().fg(SUCCESS)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    let list = if items.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "  No sections yet: Tab down to the pool",
            Style::default().fg(DIM),
        )));
        List::new(vec![placeholder]).block(block)
    } else {
        List::new(items).block(block)
    };

    frame.render_widget(list, area);

    if display.len() > visible {
        render_scroll_indicator(frame, area, app.selected_cursor, display.len());
    }
}

/// Render the alphabetized template pool; row 0 creates a custom section
fn render_available_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.column == Column::Available && app.mode == Mode::Normal;

    let rows = app.available_rows();
    let title = format!(" Available ({}) ", rows.len());
    let border_color = if is_focused { ACCENT } else { SECONDARY };
    let block = Block::default()
        .title(title)
        .title_style(if is_focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SECONDARY)
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    app.layout.available_list = inner;
    let visible = inner.height as usize;
    app.available_scroll = clamp_scroll(app.available_scroll, app.available_cursor, visible);

    let cursor_style = Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD);

    let mut items: Vec<ListItem> = Vec::with_capacity(rows.len() + 1);
    items.push(ListItem::new(Line::from(Span::styled(
        "+ Custom",
        if is_focused && app.available_cursor == 0 {
            cursor_style
        } else {
            Style::default().fg(SUCCESS)
        },
    ))));
    for (idx, slug) in rows.iter().enumerate() {
        let is_cursor = is_focused && app.available_cursor == idx + 1;
        let content = format!("  {}", app.catalog.display_name(slug));
        let style = if is_cursor {
            cursor_style
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(Line::from(Span::styled(content, style))));
    }

    let list = List::new(
        items
            .into_iter()
            .skip(app.available_scroll)
            .take(visible)
            .collect::<Vec<_>>(),
    )
    .block(block);

    frame.render_widget(list, area);

    if rows.len() + 1 > visible {
        render_scroll_indicator(frame, area, app.available_cursor, rows.len() + 1);
    }
}

/// Position indicator in the top-right corner of a list
fn render_scroll_indicator(frame: &mut Frame, area: Rect, cursor: usize, len: usize) {
    let indicator = format!(" {}/{} ", cursor + 1, len);
    let indicator_area = Rect {
        x: area.x + area.width.saturating_sub(indicator.len() as u16 + 2),
        y: area.y,
        width: indicator.len() as u16 + 2,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(indicator).style(Style::default().fg(DIM)),
        indicator_area,
    );
}

/// Render the composed document preview
fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.show_raw { " Preview [RAW] " } else { " Preview " };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(SECONDARY))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    app.layout.preview = block.inner(area);

    let markdown = app.compose_markdown();
    let content = if markdown.is_empty() {
        Text::from(Span::styled(
            "Add sections to see the document",
            Style::default().fg(DIM),
        ))
    } else if app.show_raw {
        Text::raw(markdown)
    } else {
        Text::from(markdown_lines(&markdown))
    };

    // keep scrolling bounded to the content
    let max_scroll = content.lines.len().saturating_sub(1) as u16;
    app.preview_scroll = app.preview_scroll.min(max_scroll);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Map markdown to styled preview lines
fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(markdown, Options::empty());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut in_code = false;
    let mut bold = false;
    let mut italic = false;
    let mut heading: Option<HeadingLevel> = None;

    fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    }
    fn blank(lines: &mut Vec<Line<'static>>) {
        if !matches!(lines.last(), Some(line) if line.spans.is_empty()) {
            lines.push(Line::default());
        }
    }

    for event in parser {
        match event {
            MdEvent::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    flush(&mut lines, &mut spans);
                    heading = Some(level);
                }
                Tag::CodeBlock(_) => {
                    flush(&mut lines, &mut spans);
                    in_code = true;
                }
                Tag::Item => {
                    flush(&mut lines, &mut spans);
                    spans.push(Span::styled("  \u{2022} ", Style::default().fg(ACCENT)));
                }
                Tag::Strong => bold = true,
                Tag::Emphasis => italic = true,
                _ => {}
            },
            MdEvent::End(tag) => match tag {
                TagEnd::Heading(_) => {
                    flush(&mut lines, &mut spans);
                    blank(&mut lines);
                    heading = None;
                }
                TagEnd::Paragraph => {
                    flush(&mut lines, &mut spans);
                    blank(&mut lines);
                }
                TagEnd::CodeBlock => {
                    in_code = false;
                    blank(&mut lines);
                }
                TagEnd::Item => flush(&mut lines, &mut spans),
                TagEnd::List(_) => blank(&mut lines),
                TagEnd::Strong => bold = false,
                TagEnd::Emphasis => italic = false,
                _ => {}
            },
            MdEvent::Text(text) => {
                if in_code {
                    for code_line in text.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("    {code_line}"),
                            Style::default().fg(SUCCESS),
                        )));
                    }
                } else {
                    let mut style = Style::default();
                    if let Some(level) = heading {
                        style = style.add_modifier(Modifier::BOLD);
                        if matches!(level, HeadingLevel::H1 | HeadingLevel::H2) {
                            style = style.fg(ACCENT);
                        }
                    }
                    if bold {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if italic {
                        style = style.add_modifier(Modifier::ITALIC);
                    }
                    spans.push(Span::styled(text.into_string(), style));
                }
            }
            MdEvent::Code(code) => {
                spans.push(Span::styled(
                    code.into_string(),
                    Style::default().fg(HIGHLIGHT),
                ));
            }
            MdEvent::Html(html) | MdEvent::InlineHtml(html) => {
                spans.push(Span::styled(
                    html.into_string(),
                    Style::default().fg(DIM),
                ));
            }
            MdEvent::SoftBreak | MdEvent::HardBreak => flush(&mut lines, &mut spans),
            MdEvent::Rule => {
                flush(&mut lines, &mut spans);
                lines.push(Line::from(Span::styled(
                    "\u{2500}".repeat(40),
                    Style::default().fg(DIM),
                )));
            }
            _ => {}
        }
    }
    flush(&mut lines, &mut spans);

    while matches!(lines.last(), Some(line) if line.spans.is_empty()) {
        lines.pop();
    }
    lines
}

/// Render the status bar (top bar)
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (mode_name, mode_color) = if app.drag.is_some() {
        ("MOVE", HIGHLIGHT)
    } else {
        (app.mode.display_name(), app.mode.color())
    };

    let now = Local::now();
    let time_str = now.format("%H:%M:%S").to_string();

    let session_name = app
        .session_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.session_path.display().to_string());

    let counts = format!(
        "{} selected / {} available",
        app.editor.selected().len(),
        app.editor.available().len()
    );

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode_name),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(session_name, Style::default().fg(ACCENT)),
    ];
    if app.dirty {
        spans.push(Span::styled(" [+]", Style::default().fg(HIGHLIGHT)));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(counts, Style::default().fg(SECONDARY)));

    // Right-aligned time
    let width = area.width as usize;
    let current_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let padding = width.saturating_sub(current_len + time_str.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        format!("{} ", time_str),
        Style::default().fg(SECONDARY),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(SECONDARY)),
    );
    frame.render_widget(paragraph, area);
}

/// Render the hint bar (bottom bar)
fn render_hint_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(ref msg) = app.status_message {
        Line::from(Span::styled(msg.as_str(), Style::default().fg(HIGHLIGHT)))
    } else {
        let hints = if app.drag.is_some() {
            "j/k: position | Space/Enter: drop | Esc: cancel"
        } else {
            match (app.mode, app.column) {
                (Mode::EditBody, _) => "Esc: done | Ctrl-s: apply and keep editing",
                (Mode::Help, _) => "Press any key to close",
                (Mode::Normal, Column::Selected) => {
                    "j/k: nav | Space: move | i: edit | d: remove | Tab: pool | w: write | ?: help | q: quit"
                }
                (Mode::Normal, Column::Available) => {
                    "j/k: nav | Enter: add | c: custom | Tab: document | ?: help | q: quit"
                }
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(SECONDARY)))
    };

    frame.render_widget(Paragraph::new(content), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let lines: Vec<&str> = HELP_TEXT.lines().collect();
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 64.min(area.width.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help (press any key to close) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));

    let paragraph = Paragraph::new(HELP_TEXT)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}
