//! Plan generation commands for CLI.

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use skillplan_core::export::{to_text, TextOptions};
use skillplan_core::{allocate, ClockTime, Config, Lunch, PlanMode, PlanStore, Settings};

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Fixed hours per day until every skill is covered
    Daily,
    /// Every date of a fixed range
    Monthly,
}

impl From<ModeArg> for PlanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Daily => PlanMode::Daily,
            ModeArg::Monthly => PlanMode::Monthly,
        }
    }
}

/// Overrides applied on top of the configured planner defaults.
#[derive(Args)]
pub struct GenerateArgs {
    /// Day generation mode
    #[arg(long, value_enum, default_value = "daily")]
    mode: ModeArg,
    /// Hours to schedule per day (daily mode)
    #[arg(long)]
    daily_hours: Option<f64>,
    /// First date (monthly mode range start; daily mode start instead of today)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last date, inclusive (monthly mode)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Working window start (HH:MM)
    #[arg(long)]
    start: Option<ClockTime>,
    /// Working window end (HH:MM)
    #[arg(long)]
    end: Option<ClockTime>,
    /// Work block length in minutes
    #[arg(long)]
    work: Option<u32>,
    /// Break length in minutes
    #[arg(long = "break")]
    break_mins: Option<u32>,
    /// Lunch start (HH:MM); enables lunch
    #[arg(long)]
    lunch: Option<ClockTime>,
    /// Lunch duration in minutes
    #[arg(long)]
    lunch_mins: Option<u32>,
    /// Disable lunch even if configured
    #[arg(long, conflicts_with = "lunch")]
    no_lunch: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn settings(&self, config: &Config) -> Settings {
        let mode = PlanMode::from(self.mode);
        let mut settings = config.planner_settings(mode);

        if mode == PlanMode::Daily {
            if let Some(hours) = self.daily_hours {
                settings.daily_hours = Some(hours);
            }
        } else {
            settings.start_date = self.from;
            settings.end_date = self.to;
        }
        if let Some(start) = self.start {
            settings.start_time = start;
        }
        if let Some(end) = self.end {
            settings.end_time = end;
        }
        if let Some(work) = self.work {
            settings.work_block_mins = work;
        }
        if let Some(brk) = self.break_mins {
            settings.break_mins = brk;
        }

        if self.no_lunch {
            settings.lunch = None;
        } else if let Some(start) = self.lunch {
            settings.lunch = Some(Lunch {
                start,
                duration: self.lunch_mins.unwrap_or(config.planner.lunch.duration_mins),
            });
        } else if let (Some(lunch), Some(mins)) = (settings.lunch.as_mut(), self.lunch_mins) {
            lunch.duration = mins;
        }

        settings
    }
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Allocate the stored skills and save the resulting plan
    Generate(GenerateArgs),
    /// Show the current plan
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the per-skill summary
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open()?;
    let config = Config::load_or_default();

    match action {
        PlanAction::Generate(args) => {
            let settings = args.settings(&config);
            let anchor = match settings.mode {
                PlanMode::Daily => args.from.unwrap_or_else(super::today),
                PlanMode::Monthly => super::today(),
            };

            let mut state = store.load()?;
            let plan = allocate(&state.skills, &settings, anchor)?;
            tracing::info!(days = plan.days.len(), "generated plan");

            if args.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                let options = TextOptions {
                    percent_decimals: config.display.percent_decimals,
                    now: None,
                };
                print!("{}", to_text(&plan, &Default::default(), options));
            }

            state.set_plan(settings, plan);
            store.save(&state)?;
        }
        PlanAction::Show { json } => {
            let state = store.load()?;
            let plan = state.plan()?;
            if json {
                println!("{}", serde_json::to_string_pretty(plan)?);
            } else {
                let options = TextOptions {
                    percent_decimals: config.display.percent_decimals,
                    now: config.display.show_past_marker.then(super::now),
                };
                print!("{}", to_text(plan, &state.progress, options));
            }
        }
        PlanAction::Summary { json } => {
            let state = store.load()?;
            let plan = state.plan()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan.summary)?);
            } else {
                let decimals = config.display.percent_decimals;
                let done = state.progress.completed_minutes_by_skill(plan);
                for entry in &plan.summary {
                    let completed = done.get(&entry.skill_id).copied().unwrap_or(0);
                    println!(
                        "{:<24} {:>6}m  {:>6.decimals$}%  done {:>6}m",
                        entry.skill_name, entry.minutes, entry.percent, completed
                    );
                }
                println!(
                    "completed {} blocks, {:.0}% of {} planned minutes",
                    state.progress.completed_count(),
                    state.progress.completion_ratio(plan) * 100.0,
                    plan.total_work_minutes()
                );
            }
        }
    }
    Ok(())
}
