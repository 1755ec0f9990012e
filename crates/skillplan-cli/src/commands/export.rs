//! Plan export command for CLI.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use skillplan_core::export::{to_json, to_text, TextOptions};
use skillplan_core::{Config, PlanStore};

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Plan as JSON
    Json,
    /// Printable timetable
    Text,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: ExportFormat,
    /// Write to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open()?;
    let state = store.load()?;
    let plan = state.plan()?;

    let content = match args.format {
        ExportFormat::Json => to_json(plan)? + "\n",
        ExportFormat::Text => {
            let config = Config::load_or_default();
            let options = TextOptions {
                percent_decimals: config.display.percent_decimals,
                now: None,
            };
            to_text(plan, &state.progress, options)
        }
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, content)?;
            println!("Exported to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
