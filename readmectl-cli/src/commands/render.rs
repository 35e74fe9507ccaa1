//! Compose a README from a saved session without opening the editor

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use readmectl_core::{compose, write_markdown, ReadmectlConfig, SessionState, TemplateCatalog};
use tracing::info;

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Session file to compose from (default: from config, then .readmectl.json)
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Where to write the composed README (default: from config, then README.md)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the composed markdown to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Extra directory of *.md templates to include (overrides config)
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,
}

pub fn run_render(args: RenderArgs) -> Result<()> {
    let config = ReadmectlConfig::load().context("failed to load config")?;

    let mut catalog = TemplateCatalog::builtin();
    if let Some(dir) = args.templates_dir.or_else(|| config.templates_dir.clone()) {
        catalog
            .load_dir(&dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
    }

    let session_path = args.session.unwrap_or_else(|| config.session_or_default());
    let state = SessionState::load(&session_path)
        .with_context(|| format!("failed to load session {}", session_path.display()))?;
    let editor = state.restore(&mut catalog);

    let markdown = compose(&editor, &catalog);

    if args.stdout {
        print!("{markdown}");
        return Ok(());
    }

    let output = args.output.unwrap_or_else(|| config.output_or_default());
    write_markdown(&output, &markdown)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(path = %output.display(), bytes = markdown.len(), "wrote composed README");
    println!(
        "Wrote {} ({} sections, {} bytes)",
        output.display(),
        editor.selected().len(),
        markdown.len()
    );
    Ok(())
}
