//! Input checks run before allocation.
//!
//! The grid builder validates the window, rhythm and lunch itself; this
//! module covers the skill list and the mode-specific settings fields.

use std::collections::HashSet;

use crate::error::PlanError;
use crate::model::{PlanMode, Settings, Skill};

/// Longest plan one allocation may produce, in days.
pub const MAX_PLAN_DAYS: u32 = 3660;

/// Check the skill list: non-empty, unique ids, non-empty and
/// case-insensitively unique names, positive estimates.
pub fn validate_skills(skills: &[Skill]) -> Result<(), PlanError> {
    if skills.is_empty() {
        return Err(PlanError::NoSkills);
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for skill in skills {
        let invalid = |message: &str| PlanError::InvalidSkill {
            id: skill.id.clone(),
            message: message.to_string(),
        };

        if skill.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !ids.insert(skill.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        let name = skill.name.trim();
        if name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !names.insert(name.to_lowercase()) {
            return Err(invalid(&format!("duplicate name '{name}'")));
        }
        if skill.estimated_minutes() == 0 {
            return Err(invalid("estimated hours must be positive"));
        }
    }
    Ok(())
}

/// Check the fields the selected mode depends on.
pub fn validate_settings(settings: &Settings) -> Result<(), PlanError> {
    match settings.mode {
        PlanMode::Daily => match settings.daily_minutes() {
            Some(minutes) if minutes > 0 => Ok(()),
            Some(_) => Err(PlanError::InvalidSettings(
                "dailyHours must be positive".to_string(),
            )),
            None => Err(PlanError::InvalidSettings(
                "dailyHours is required in daily mode".to_string(),
            )),
        },
        PlanMode::Monthly => {
            let (Some(start), Some(end)) = (settings.start_date, settings.end_date) else {
                return Err(PlanError::InvalidSettings(
                    "startDate and endDate are required in monthly mode".to_string(),
                ));
            };
            if start > end {
                return Err(PlanError::InvalidSettings(format!(
                    "startDate ({start}) must not be after endDate ({end})"
                )));
            }
            let days = (end - start).num_days() + 1;
            if days > i64::from(MAX_PLAN_DAYS) {
                return Err(PlanError::InvalidSettings(format!(
                    "date range spans {days} days, the limit is {MAX_PLAN_DAYS}"
                )));
            }
            Ok(())
        }
    }
}
