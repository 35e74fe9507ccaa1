//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use readmectl_core::{ReadmectlConfig, SectionEditor, SessionState, TemplateCatalog};

use super::app::{App, Mode};
use super::editor_pane::EditorPane;
use super::event::{handle_key, handle_mouse, poll_event, HandleResult};
use super::ui;

#[derive(Parser, Debug, Default)]
pub struct EditArgs {
    /// Session file to resume and autosave (defaults to the config value)
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Where `w` writes the composed README
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Directory of extra section templates, merged over the built-ins
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,
}

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Build the app state from config, templates, and any saved session
fn build_app(args: &EditArgs) -> Result<App> {
    let config = ReadmectlConfig::load().context("Failed to load config")?;

    let mut catalog = TemplateCatalog::builtin();
    if let Some(dir) = args.templates_dir.as_ref().or(config.templates_dir.as_ref()) {
        let loaded = catalog
            .load_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
        info!(count = loaded, dir = %dir.display(), "loaded user templates");
    }

    let session_path = args
        .session
        .clone()
        .unwrap_or_else(|| config.session_or_default());
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_or_default());

    let editor = if session_path.exists() {
        let state = SessionState::load(&session_path)
            .with_context(|| format!("Failed to load session {}", session_path.display()))?;
        info!(path = %session_path.display(), "resuming session");
        state.restore(&mut catalog)
    } else {
        SectionEditor::with_defaults(&catalog)
    };

    Ok(App::new(editor, catalog, session_path, output_path))
}

/// Run the TUI application
pub fn run(args: EditArgs) -> Result<()> {
    let mut app = build_app(&args)?;
    let mut editor_pane = EditorPane::new();

    let mut terminal = init_terminal()?;

    // Main event loop
    let result = run_loop(&mut terminal, &mut app, &mut editor_pane);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    editor_pane: &mut EditorPane,
) -> Result<()> {
    loop {
        editor_pane.sync(app);

        // Render UI
        terminal.draw(|frame| ui::render(frame, app, editor_pane))?;

        // Poll for events (with 100ms timeout for responsive UI)
        if let Some(event) = poll_event(Duration::from_millis(100))? {
            let result = match event {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal resized, will be handled on next draw
                    HandleResult::Continue
                }
                _ => HandleResult::Continue,
            };

            match result {
                HandleResult::Continue => {}
                HandleResult::Quit => app.should_quit = true,
                HandleResult::Op(op) => app.apply_op(op),
                HandleResult::Save => app.save_session(),
                HandleResult::Export => app.export_readme(),
                HandleResult::Copy => copy_to_clipboard(app),
                HandleResult::CommitBody { exit } => {
                    app.commit_body(editor_pane.slug(), &editor_pane.content());
                    if exit {
                        app.mode = Mode::Normal;
                    }
                }
                HandleResult::Reset => app.reset_layout(),
                HandleResult::Input(key) => editor_pane.input(key),
            }
        }

        if app.should_quit {
            // session autosaves on the way out
            if app.dirty {
                app.save_session();
            }
            break;
        }
    }

    Ok(())
}

/// Put the composed document on the system clipboard
fn copy_to_clipboard(app: &mut App) {
    let markdown = app.compose_markdown();
    match cli_clipboard::set_contents(markdown.clone()) {
        Ok(()) => app.set_status(format!("Copied {} bytes to clipboard", markdown.len())),
        Err(err) => app.set_status(format!("Clipboard failed: {err}")),
    }
}
