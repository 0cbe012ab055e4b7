//! entity-search config - Inspect configuration

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// List the config files consulted, in merge order
    Path,
}

#[derive(Serialize)]
struct ConfigPathEntry {
    path: String,
    exists: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => paths(ctx),
    }
}

fn show(ctx: &AppContext) -> Result<()> {
    if ctx.output_format.is_machine() {
        return emit_json(&ctx.config);
    }
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn paths(ctx: &AppContext) -> Result<()> {
    let entries: Vec<ConfigPathEntry> = ctx
        .config_sources()
        .into_iter()
        .map(|path| ConfigPathEntry {
            exists: path.exists(),
            path: path.display().to_string(),
        })
        .collect();

    if ctx.output_format == OutputFormat::Human {
        let mut layout = HumanLayout::new().with_color(ctx.use_color());
        layout.title("Config files (later entries win)");
        for entry in &entries {
            let marker = if entry.exists { "found" } else { "missing" };
            layout.bullet(&format!("{} ({marker})", entry.path));
        }
        println!("{}", layout.build());
        return Ok(());
    }
    emit_json(&entries)
}
