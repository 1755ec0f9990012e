use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "skillplan", version, about = "Skill study timetable planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Skill list management
    Skill {
        #[command(subcommand)]
        action: commands::skill::SkillAction,
    },
    /// Generate and inspect the timetable
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Per-block progress tracking
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Export the current plan
    Export(commands::export::ExportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SKILLPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Skill { action } => commands::skill::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Block { action } => commands::block::run(action),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
