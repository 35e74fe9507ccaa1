//! List every section template the editor would offer

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use readmectl_core::{ReadmectlConfig, TemplateCatalog};
use tracing::debug;

#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Extra directory of *.md templates to include (overrides config)
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run_sections(args: SectionsArgs) -> Result<()> {
    let config = ReadmectlConfig::load().context("failed to load config")?;

    let mut catalog = TemplateCatalog::builtin();
    if let Some(dir) = args.templates_dir.or(config.templates_dir) {
        let loaded = catalog
            .load_dir(&dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
        debug!(count = loaded, dir = %dir.display(), "loaded user templates");
    }

    match args.format {
        OutputFormat::Text => {
            for template in catalog.iter() {
                println!("{:<24} {}", template.slug, template.name);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = catalog
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "slug": t.slug,
                        "name": t.name,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
