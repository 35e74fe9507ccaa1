//! Config management commands (init, show, path)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use readmectl_core::ReadmectlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Show the resolved configuration
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = ReadmectlConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Starter template ships with the repository
    let template_content = include_str!("../../.readmectl-config.template.toml");
    std::fs::write(&config_path, template_content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point templates_dir at your own section templates (optional)");

    Ok(())
}

fn run_show() -> Result<()> {
    let config = ReadmectlConfig::load()?;

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;

    if toml_str.is_empty() {
        println!("# no configuration set, using defaults");
    } else {
        println!("{}", toml_str);
    }
    println!("# output default: {}", config.output_or_default().display());
    println!("# session default: {}", config.session_or_default().display());

    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", ReadmectlConfig::config_path().display());
    Ok(())
}
