//! Block grid builder.
//!
//! Produces the slot template for a single day: fixed-length work blocks
//! separated by breaks, an optional lunch interruption, and a trailing buffer.
//! The slots exactly tile the working window:
//! - blocks are chronological and contiguous (`block[i].end == block[i + 1].start`)
//! - the first block starts at the window start, the last ends at the window end
//! - no block has zero length

use crate::error::PlanError;
use crate::model::{BlockKind, ClockTime, Lunch, ScheduleBlock, Settings};

/// Shortest allowed work block, in minutes.
pub const MIN_WORK_BLOCK_MINUTES: u32 = 25;

/// One day's slot template, before any skill has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    slots: Vec<ScheduleBlock>,
}

impl DayGrid {
    /// Build the template described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, PlanError> {
        let slots = build_day_grid(
            settings.start_time,
            settings.end_time,
            settings.work_block_mins,
            settings.break_mins,
            settings.lunch.as_ref(),
        )?;
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[ScheduleBlock] {
        &self.slots
    }

    /// Length of the shortest work slot, if the template has any.
    pub fn shortest_work_slot(&self) -> Option<u32> {
        self.slots
            .iter()
            .filter(|s| s.kind == BlockKind::Work)
            .map(|s| s.minutes)
            .min()
    }

    /// Total minutes of work slots in the template.
    pub fn work_capacity(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.kind == BlockKind::Work)
            .map(|s| s.minutes)
            .sum()
    }
}

/// Build the ordered slot sequence for one day.
///
/// # Errors
/// - [`PlanError::InvalidWindow`] if `end <= start`
/// - [`PlanError::InvalidRhythm`] if `work_block_mins` is below 25
/// - [`PlanError::InvalidLunch`] if the lunch interval is empty or leaves the window
pub fn build_day_grid(
    start: ClockTime,
    end: ClockTime,
    work_block_mins: u32,
    break_mins: u32,
    lunch: Option<&Lunch>,
) -> Result<Vec<ScheduleBlock>, PlanError> {
    if end <= start {
        return Err(PlanError::InvalidWindow { start, end });
    }
    if work_block_mins < MIN_WORK_BLOCK_MINUTES {
        return Err(PlanError::InvalidRhythm {
            message: format!(
                "work block must be at least {MIN_WORK_BLOCK_MINUTES} minutes, got {work_block_mins}"
            ),
        });
    }
    if let Some(lunch) = lunch {
        validate_lunch(lunch, start, end)?;
    }

    let mut slots = Vec::new();
    let mut cursor = start;
    let mut pending_lunch = lunch.copied();

    // Before lunch: blocks crossing the lunch start are cut short.
    while let Some(l) = pending_lunch {
        if cursor >= l.start {
            slots.push(ScheduleBlock::new(BlockKind::Lunch, l.start, l.end()));
            cursor = l.end();
            pending_lunch = None;
            break;
        }

        let work_end = cursor.add_minutes(work_block_mins).min(l.start);
        slots.push(ScheduleBlock::new(BlockKind::Work, cursor, work_end));
        cursor = work_end;

        if break_mins > 0 && cursor < l.start {
            let break_end = cursor.add_minutes(break_mins).min(l.start);
            slots.push(ScheduleBlock::new(BlockKind::Break, cursor, break_end));
            cursor = break_end;
        }
    }

    // After lunch (or without one): only full work blocks, remainder is buffer.
    while cursor.minutes_until(end) >= work_block_mins {
        let work_end = cursor.add_minutes(work_block_mins);
        slots.push(ScheduleBlock::new(BlockKind::Work, cursor, work_end));
        cursor = work_end;

        if break_mins > 0 && cursor.minutes_until(end) >= break_mins + work_block_mins {
            let break_end = cursor.add_minutes(break_mins);
            slots.push(ScheduleBlock::new(BlockKind::Break, cursor, break_end));
            cursor = break_end;
        }
    }

    if cursor < end {
        slots.push(ScheduleBlock::new(BlockKind::Buffer, cursor, end));
    }

    Ok(slots)
}

fn validate_lunch(lunch: &Lunch, start: ClockTime, end: ClockTime) -> Result<(), PlanError> {
    if lunch.duration == 0 {
        return Err(PlanError::InvalidLunch {
            message: "duration must be positive".to_string(),
        });
    }
    let fits = lunch
        .start
        .minutes()
        .checked_add(lunch.duration)
        .is_some_and(|lunch_end| lunch_end <= end.minutes());
    if lunch.start < start || !fits {
        return Err(PlanError::InvalidLunch {
            message: format!(
                "lunch {} for {} minutes falls outside the window {start}-{end}",
                lunch.start, lunch.duration
            ),
        });
    }
    Ok(())
}
