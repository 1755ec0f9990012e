//! Completion overlay for a generated plan.
//!
//! The overlay is owned by the caller and keyed by (date, block index); the
//! plan it refers to is never modified.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::model::{Plan, ScheduleBlock};

/// Identifies one block of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockKey {
    pub date: NaiveDate,
    pub index: usize,
}

impl BlockKey {
    pub fn new(date: NaiveDate, index: usize) -> Self {
        Self { date, index }
    }
}

/// Set of work blocks the learner has marked as done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOverlay {
    #[serde(default)]
    completed: BTreeSet<BlockKey>,
}

impl ProgressOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the completion flag of a work block. Returns the new state.
    pub fn toggle(&mut self, plan: &Plan, key: BlockKey) -> Result<bool, ProgressError> {
        let block = lookup(plan, key)?;
        if !block.is_work() {
            return Err(ProgressError::NotWorkBlock {
                date: key.date,
                index: key.index,
            });
        }
        if self.completed.remove(&key) {
            Ok(false)
        } else {
            self.completed.insert(key);
            Ok(true)
        }
    }

    pub fn is_completed(&self, key: BlockKey) -> bool {
        self.completed.contains(&key)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Completed work minutes per skill id. Keys with no matching block are ignored.
    pub fn completed_minutes_by_skill(&self, plan: &Plan) -> BTreeMap<String, u32> {
        let mut totals = BTreeMap::new();
        for key in &self.completed {
            let Ok(block) = lookup(plan, *key) else {
                continue;
            };
            if let Some(id) = &block.skill_id {
                *totals.entry(id.clone()).or_insert(0) += block.minutes;
            }
        }
        totals
    }

    /// Completed work minutes over all planned work minutes, in `0.0..=1.0`.
    pub fn completion_ratio(&self, plan: &Plan) -> f64 {
        let planned = plan.total_work_minutes();
        if planned == 0 {
            return 0.0;
        }
        let done: u32 = self.completed_minutes_by_skill(plan).values().sum();
        f64::from(done) / f64::from(planned)
    }
}

/// Whether `block` on `date` has already ended at `now`.
pub fn is_past(date: NaiveDate, block: &ScheduleBlock, now: NaiveDateTime) -> bool {
    match block.end.to_naive_time() {
        Some(end) => date.and_time(end) <= now,
        // 24:00 ends at the following midnight.
        None => date.succ_opt().map_or(false, |next| next.and_hms_opt(0, 0, 0) <= Some(now)),
    }
}

fn lookup(plan: &Plan, key: BlockKey) -> Result<&ScheduleBlock, ProgressError> {
    plan.day(key.date)
        .and_then(|day| day.blocks.get(key.index))
        .ok_or(ProgressError::UnknownBlock {
            date: key.date,
            index: key.index,
        })
}
