//! Block progress commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use skillplan_core::progress::is_past;
use skillplan_core::{BlockKey, PlanStore, ScheduleBlock};

#[derive(Subcommand)]
pub enum BlockAction {
    /// List the blocks of one day with their progress
    List {
        /// Date (YYYY-MM-DD); defaults to today
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a work block done, or undone if it already is
    Toggle {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
        /// Block index as shown by 'block list'
        index: usize,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockStatus<'a> {
    index: usize,
    #[serde(flatten)]
    block: &'a ScheduleBlock,
    completed: bool,
    past: bool,
}

pub fn run(action: BlockAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open()?;

    match action {
        BlockAction::List { date, json } => {
            let date = date.unwrap_or_else(super::today);
            let state = store.load()?;
            let day = state
                .plan()?
                .day(date)
                .ok_or_else(|| format!("no schedule for {date}"))?;

            let now = super::now();
            let statuses: Vec<_> = day
                .blocks
                .iter()
                .enumerate()
                .map(|(index, block)| BlockStatus {
                    index,
                    block,
                    completed: state.progress.is_completed(BlockKey::new(date, index)),
                    past: is_past(date, block, now),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in &statuses {
                    let b = status.block;
                    let mark = match (b.is_work(), status.completed) {
                        (true, true) => "[x]",
                        (true, false) => "[ ]",
                        (false, _) => "   ",
                    };
                    println!(
                        "{:>2}  {}-{}  {:<6} {mark} {}{}",
                        status.index,
                        b.start,
                        b.end,
                        b.kind,
                        b.skill_name.as_deref().unwrap_or(""),
                        if status.past { "  (past)" } else { "" }
                    );
                }
            }
        }
        BlockAction::Toggle { date, index } => {
            let done = store.update(|state| {
                let plan = state.plan.as_ref().ok_or(skillplan_core::StoreError::NoPlan)?;
                state
                    .progress
                    .toggle(plan, BlockKey::new(date, index))
                    .map_err(skillplan_core::CoreError::from)
            })?;
            println!(
                "Block {index} on {date} marked {}",
                if done { "done" } else { "not done" }
            );
        }
    }
    Ok(())
}
