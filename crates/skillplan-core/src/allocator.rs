//! Skill allocator.
//!
//! Fills the work slots of each day's grid with skill minutes, strictly by
//! priority tier and then input order, and aggregates the per-skill summary.
//!
//! Day generation is a [`DayPlan`] strategy chosen once per run:
//! - [`RollForward`] for daily mode: consecutive days from `today` until the
//!   skills are exhausted or the budgeted horizon is reached
//! - [`FixedRange`] for monthly mode: every date of the inclusive range

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::error::PlanError;
use crate::grid::DayGrid;
use crate::model::{BlockKind, ClockTime, Plan, PlanMode, ScheduleBlock, ScheduleDay, Settings, Skill, SummaryEntry};
use crate::validation::{validate_settings, validate_skills, MAX_PLAN_DAYS};

/// Remaining minutes per skill for one allocation run, in consumption order.
#[derive(Debug, Clone)]
pub struct RemainingMinutes<'a> {
    entries: Vec<(&'a Skill, u32)>,
    cursor: usize,
}

impl<'a> RemainingMinutes<'a> {
    /// Order skills by priority tier, keeping input order within a tier.
    pub fn new(skills: &'a [Skill]) -> Self {
        let mut entries: Vec<_> = skills.iter().map(|s| (s, s.estimated_minutes())).collect();
        entries.sort_by_key(|(skill, _)| skill.priority);
        let mut tracker = Self { entries, cursor: 0 };
        tracker.skip_exhausted();
        tracker
    }

    /// The skill currently being scheduled and its remaining minutes.
    pub fn current(&self) -> Option<(&'a Skill, u32)> {
        self.entries.get(self.cursor).copied()
    }

    /// Deduct `minutes` from the current skill, advancing past it once it
    /// is fully satisfied.
    pub fn consume(&mut self, minutes: u32) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.1 = entry.1.saturating_sub(minutes);
        }
        self.skip_exhausted();
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, m)| u64::from(*m)).sum()
    }

    /// Skills in consumption order.
    pub fn ordered_skills(&self) -> impl Iterator<Item = &'a Skill> + '_ {
        self.entries.iter().map(|(skill, _)| *skill)
    }

    fn skip_exhausted(&mut self) {
        while matches!(self.entries.get(self.cursor), Some((_, 0))) {
            self.cursor += 1;
        }
    }
}

/// Day generation strategy.
pub trait DayPlan {
    /// Next date to schedule, or `None` when the run is complete.
    fn next_day(&mut self, remaining: &RemainingMinutes<'_>) -> Option<NaiveDate>;
}

/// Daily mode: consecutive dates from a start date, bounded by a horizon.
#[derive(Debug, Clone)]
pub struct RollForward {
    next: NaiveDate,
    produced: u32,
    horizon: u32,
}

impl RollForward {
    pub fn new(start: NaiveDate, horizon: u32) -> Self {
        Self {
            next: start,
            produced: 0,
            horizon,
        }
    }

    /// Days implied by spreading `total_minutes` at `daily_minutes` per day.
    pub fn horizon_for(total_minutes: u64, daily_minutes: u32) -> u64 {
        total_minutes.div_ceil(u64::from(daily_minutes.max(1)))
    }
}

impl DayPlan for RollForward {
    fn next_day(&mut self, remaining: &RemainingMinutes<'_>) -> Option<NaiveDate> {
        if remaining.is_exhausted() || self.produced >= self.horizon {
            return None;
        }
        let date = self.next;
        self.next = date.checked_add_days(Days::new(1))?;
        self.produced += 1;
        Some(date)
    }
}

/// Monthly mode: every date in an inclusive range.
#[derive(Debug, Clone)]
pub struct FixedRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl FixedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl DayPlan for FixedRange {
    fn next_day(&mut self, _remaining: &RemainingMinutes<'_>) -> Option<NaiveDate> {
        let date = self.next?;
        self.next = date
            .checked_add_days(Days::new(1))
            .filter(|next| *next <= self.end);
        Some(date)
    }
}

/// Allocate `skills` over the days described by `settings`.
///
/// `today` anchors daily mode; monthly mode ignores it. The result depends
/// only on the arguments.
///
/// # Errors
/// Fails with [`PlanError::NoSkills`] for an empty list, with the grid
/// builder's errors for a bad window, rhythm or lunch, with
/// [`PlanError::InvalidSettings`] for missing or inverted mode fields, and
/// with [`PlanError::UnreachableTarget`] when daily mode cannot make progress
/// (no work slots, a daily budget below the shortest work slot, or a horizon
/// past [`MAX_PLAN_DAYS`]).
pub fn allocate(skills: &[Skill], settings: &Settings, today: NaiveDate) -> Result<Plan, PlanError> {
    validate_skills(skills)?;
    let grid = DayGrid::from_settings(settings)?;
    validate_settings(settings)?;

    let mut remaining = RemainingMinutes::new(skills);
    let total_estimated = remaining.total();

    let (mut days_plan, daily_budget): (Box<dyn DayPlan>, Option<u32>) = match settings.mode {
        PlanMode::Daily => {
            let daily_minutes = settings
                .daily_minutes()
                .ok_or_else(|| PlanError::InvalidSettings("dailyHours is required in daily mode".to_string()))?;
            let Some(shortest) = grid.shortest_work_slot() else {
                return Err(PlanError::UnreachableTarget(format!(
                    "a {}-minute window with {}-minute work blocks has no work capacity",
                    settings.window_minutes(),
                    settings.work_block_mins
                )));
            };
            if daily_minutes < shortest {
                return Err(PlanError::UnreachableTarget(format!(
                    "{daily_minutes} minutes per day is shorter than the shortest {shortest}-minute work block"
                )));
            }
            let horizon = RollForward::horizon_for(total_estimated, daily_minutes);
            if horizon > u64::from(MAX_PLAN_DAYS) {
                return Err(PlanError::UnreachableTarget(format!(
                    "{total_estimated} minutes at {daily_minutes} minutes per day needs {horizon} days, the limit is {MAX_PLAN_DAYS}"
                )));
            }
            (
                Box::new(RollForward::new(today, horizon as u32)) as Box<dyn DayPlan>,
                Some(daily_minutes),
            )
        }
        PlanMode::Monthly => {
            let (Some(start), Some(end)) = (settings.start_date, settings.end_date) else {
                return Err(PlanError::InvalidSettings(
                    "startDate and endDate are required in monthly mode".to_string(),
                ));
            };
            (Box::new(FixedRange::new(start, end)) as Box<dyn DayPlan>, None)
        }
    };

    let mut days = Vec::new();
    while let Some(date) = days_plan.next_day(&remaining) {
        let blocks = fill_day(grid.slots(), &mut remaining, daily_budget);
        tracing::debug!(
            %date,
            work_minutes = blocks.iter().filter(|b| b.is_work()).map(|b| b.minutes).sum::<u32>(),
            "scheduled day"
        );
        days.push(ScheduleDay { date, blocks });
    }

    let unallocated = remaining.total();
    if unallocated > 0 {
        tracing::warn!(
            unallocated_minutes = unallocated,
            days = days.len(),
            "plan ended before every skill was covered"
        );
    }

    let summary = summarize(&days, remaining.ordered_skills());
    tracing::debug!(
        days = days.len(),
        skills = summary.len(),
        allocated_minutes = total_estimated - unallocated,
        "allocation complete"
    );

    Ok(Plan { days, summary })
}

/// Assign skill minutes to the work slots of one day.
///
/// Work slots are split when a skill runs out mid-slot; whatever no skill
/// (or no remaining daily budget) can fill becomes buffer.
fn fill_day(
    slots: &[ScheduleBlock],
    remaining: &mut RemainingMinutes<'_>,
    daily_budget: Option<u32>,
) -> Vec<ScheduleBlock> {
    let mut budget = daily_budget.unwrap_or(u32::MAX);
    let mut blocks = Vec::with_capacity(slots.len());

    for slot in slots {
        match slot.kind {
            BlockKind::Work => {}
            BlockKind::Buffer => {
                push_buffer(&mut blocks, slot.start, slot.end);
                continue;
            }
            BlockKind::Break | BlockKind::Lunch => {
                blocks.push(slot.clone());
                continue;
            }
        }

        let mut cursor = slot.start;
        while cursor < slot.end && budget > 0 {
            let Some((skill, left)) = remaining.current() else {
                break;
            };
            let take = cursor.minutes_until(slot.end).min(left).min(budget);
            let block_end = cursor.add_minutes(take);
            blocks.push(ScheduleBlock::work(cursor, block_end, skill));
            remaining.consume(take);
            budget -= take;
            cursor = block_end;
        }

        if cursor < slot.end {
            push_buffer(&mut blocks, cursor, slot.end);
        }
    }

    blocks
}

/// Append a buffer, extending a directly preceding buffer instead of
/// emitting two in a row.
fn push_buffer(blocks: &mut Vec<ScheduleBlock>, start: ClockTime, end: ClockTime) {
    match blocks.last_mut() {
        Some(last) if last.kind == BlockKind::Buffer && last.end == start => {
            last.end = end;
            last.minutes = last.start.minutes_until(end);
        }
        _ => blocks.push(ScheduleBlock::new(BlockKind::Buffer, start, end)),
    }
}

/// Per-skill totals across `days`, in `order`, skipping skills with no minutes.
pub fn summarize<'a>(days: &[ScheduleDay], order: impl Iterator<Item = &'a Skill>) -> Vec<SummaryEntry> {
    let mut minutes_by_skill: HashMap<&str, u32> = HashMap::new();
    for block in days.iter().flat_map(|d| &d.blocks) {
        if let (BlockKind::Work, Some(id)) = (block.kind, block.skill_id.as_deref()) {
            *minutes_by_skill.entry(id).or_default() += block.minutes;
        }
    }

    let total: u32 = minutes_by_skill.values().sum();
    if total == 0 {
        return Vec::new();
    }

    order
        .filter_map(|skill| {
            let minutes = *minutes_by_skill.get(skill.id.as_str())?;
            (minutes > 0).then(|| SummaryEntry {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
                minutes,
                percent: f64::from(minutes) / f64::from(total) * 100.0,
            })
        })
        .collect()
}
