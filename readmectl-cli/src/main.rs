//! readmectl CLI - README composition from reorderable section templates
//!
//! This is the main entry point for the readmectl command-line tool, which provides:
//! - An interactive three-pane editor for arranging and editing sections (`edit`, the default)
//! - Template catalog listing (`sections`)
//! - Non-interactive composition from a saved session (`render`)
//! - Configuration management (`config` subcommand)
//! - Shell completion generation (`completions` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config_cmd;
mod tracing_setup;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "readmectl",
    author,
    version,
    about = "Compose a README from reorderable section templates",
    long_about = "Pick README sections from a template catalog, reorder them with keyboard \
                  or mouse drags, edit their markdown, and write the composed document. \
                  Running with no subcommand opens the interactive editor."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive section editor (default)
    Edit(tui::EditArgs),
    /// List every known section template
    Sections(commands::sections::SectionsArgs),
    /// Compose a README from a saved session without opening the editor
    Render(commands::render::RenderArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
    /// Manage readmectl configuration (init, show, path)
    Config(config_cmd::ConfigArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli
        .command
        .unwrap_or_else(|| Commands::Edit(tui::EditArgs::default()))
    {
        Commands::Edit(args) => tui::run(args)?,
        Commands::Sections(args) => commands::run_sections(args)?,
        Commands::Render(args) => commands::run_render(args)?,
        Commands::Completions(args) => run_completions(args)?,
        Commands::Config(args) => config_cmd::run_config(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
