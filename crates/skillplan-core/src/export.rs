//! Plan export as JSON or as a printable timetable.

use std::fmt;

use chrono::NaiveDateTime;

use crate::model::{BlockKind, Plan};
use crate::progress::{is_past, BlockKey, ProgressOverlay};

/// Pretty-printed JSON of the plan.
pub fn to_json(plan: &Plan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}

/// Options for [`to_text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Decimal places for summary percentages.
    pub percent_decimals: usize,
    /// When set, blocks that ended before this instant are marked `(past)`.
    pub now: Option<NaiveDateTime>,
}

/// Printable timetable: one section per day, then the summary table.
pub fn to_text(plan: &Plan, progress: &ProgressOverlay, options: TextOptions) -> String {
    Timetable {
        plan,
        progress,
        options,
    }
    .to_string()
}

struct Timetable<'a> {
    plan: &'a Plan,
    progress: &'a ProgressOverlay,
    options: TextOptions,
}

impl fmt::Display for Timetable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in &self.plan.days {
            writeln!(f, "{} ({})", day.date, day.date.format("%a"))?;
            for (index, block) in day.blocks.iter().enumerate() {
                write!(
                    f,
                    "  {:>2}  {}-{}  {:<6} {:>4}m",
                    index, block.start, block.end, block.kind, block.minutes
                )?;
                if block.kind == BlockKind::Work {
                    let done = self.progress.is_completed(BlockKey::new(day.date, index));
                    let label = block.skill_name.as_deref().unwrap_or("-");
                    write!(f, "  [{}] {label}", if done { "x" } else { " " })?;
                }
                if self.options.now.is_some_and(|now| is_past(day.date, block, now)) {
                    f.write_str("  (past)")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Summary")?;
        if self.plan.summary.is_empty() {
            writeln!(f, "  (no time allocated)")?;
        }
        let decimals = self.options.percent_decimals;
        for entry in &self.plan.summary {
            writeln!(
                f,
                "  {:<24} {:>6}m  {:>6.decimals$}%",
                entry.skill_name, entry.minutes, entry.percent
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use crate::model::{PlanMode, Priority, Settings, Skill};
    use chrono::NaiveDate;
    use indoc::indoc;

    fn scenario_plan() -> Plan {
        let skills = vec![Skill::new("rust", "Rust", Priority::High, 2.0)];
        let settings = Settings {
            mode: PlanMode::Daily,
            daily_hours: Some(2.0),
            start_date: None,
            end_date: None,
            start_time: "09:00".parse().unwrap(),
            end_time: "11:00".parse().unwrap(),
            work_block_mins: 50,
            break_mins: 10,
            lunch: None,
        };
        allocate(&skills, &settings, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()).unwrap()
    }

    #[test]
    fn text_timetable_layout() {
        let plan = scenario_plan();
        let mut progress = ProgressOverlay::new();
        progress
            .toggle(&plan, BlockKey::new(plan.days[0].date, 0))
            .unwrap();

        let text = to_text(
            &plan,
            &progress,
            TextOptions {
                percent_decimals: 1,
                now: None,
            },
        );
        let expected = indoc! {"
            2026-03-02 (Mon)
               0  09:00-09:50  work     50m  [x] Rust
               1  09:50-10:00  break    10m
               2  10:00-10:50  work     50m  [ ] Rust
               3  10:50-11:00  buffer   10m

            Summary
              Rust                        100m   100.0%
        "};
        assert_eq!(text, expected);
    }

    #[test]
    fn past_marker_uses_clock() {
        let plan = scenario_plan();
        let now = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let text = to_text(
            &plan,
            &ProgressOverlay::new(),
            TextOptions {
                percent_decimals: 0,
                now: Some(now),
            },
        );
        assert_eq!(text.matches("(past)").count(), 2);
    }

    #[test]
    fn empty_plan_prints_placeholder_summary() {
        let text = to_text(&Plan::default(), &ProgressOverlay::new(), TextOptions::default());
        assert_eq!(text, "Summary\n  (no time allocated)\n");
    }

    #[test]
    fn json_export_round_trips() {
        let plan = scenario_plan();
        let json = to_json(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
