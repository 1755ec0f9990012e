//! JSON-backed planner state.
//!
//! Holds the learner's skill list, the settings of the last run, the
//! generated plan and the completion overlay in a single document at
//! `<data dir>/state.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, StoreError};
use crate::model::{Plan, Settings, Skill};
use crate::progress::ProgressOverlay;

/// Everything persisted between CLI invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub progress: ProgressOverlay,
}

impl PlannerState {
    /// Add a skill, rejecting blank names, estimates that round to zero
    /// minutes and case-insensitive name clashes.
    pub fn add_skill(&mut self, skill: Skill) -> Result<(), StoreError> {
        let invalid = |message: &str| StoreError::InvalidSkill {
            name: skill.name.clone(),
            message: message.to_string(),
        };
        if skill.name.trim().is_empty() {
            return Err(invalid("name must not be blank"));
        }
        if skill.estimated_minutes() == 0 {
            return Err(invalid("estimated time must be at least one minute"));
        }
        let name = skill.name.trim().to_lowercase();
        if self.skills.iter().any(|s| s.name.trim().to_lowercase() == name) {
            return Err(StoreError::DuplicateSkill(skill.name));
        }
        self.skills.push(skill);
        Ok(())
    }

    /// Remove a skill by id or case-insensitive name.
    pub fn remove_skill(&mut self, id_or_name: &str) -> Result<Skill, StoreError> {
        let needle = id_or_name.trim().to_lowercase();
        let index = self
            .skills
            .iter()
            .position(|s| s.id == id_or_name || s.name.trim().to_lowercase() == needle)
            .ok_or_else(|| StoreError::SkillNotFound(id_or_name.to_string()))?;
        Ok(self.skills.remove(index))
    }

    /// Replace the current plan. The completion overlay refers to block
    /// positions of the old plan, so it is cleared.
    pub fn set_plan(&mut self, settings: Settings, plan: Plan) {
        self.settings = Some(settings);
        self.plan = Some(plan);
        self.progress = ProgressOverlay::default();
    }

    pub fn plan(&self) -> Result<&Plan, StoreError> {
        self.plan.as_ref().ok_or(StoreError::NoPlan)
    }
}

/// File-backed store for [`PlannerState`].
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    /// Store at the default location.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::open_at(data_dir()?.join("state.json")))
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state, or an empty state if nothing has been saved yet.
    pub fn load(&self) -> Result<PlannerState, StoreError> {
        let read_failed = |message: String| StoreError::ReadFailed {
            path: self.path.clone(),
            message,
        };
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| read_failed(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PlannerState::default()),
            Err(e) => Err(read_failed(e.to_string())),
        }
    }

    /// Write the state, replacing the file atomically.
    pub fn save(&self, state: &PlannerState) -> Result<(), StoreError> {
        let write_failed = |message: String| StoreError::WriteFailed {
            path: self.path.clone(),
            message,
        };
        let content = serde_json::to_string_pretty(state).map_err(|e| write_failed(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| write_failed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| write_failed(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), skills = state.skills.len(), "saved planner state");
        Ok(())
    }

    /// Load, apply `f`, and save if it succeeds.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut PlannerState) -> Result<T, E>) -> Result<T, CoreError>
    where
        E: Into<CoreError>,
    {
        let mut state = self.load()?;
        let value = f(&mut state).map_err(|e| -> CoreError { e.into() })?;
        self.save(&state)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::open_at(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), PlannerState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::open_at(dir.path().join("state.json"));
        let mut state = PlannerState::default();
        state.add_skill(Skill::new("1", "Rust", Priority::High, 4.0)).unwrap();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn skill_names_are_unique_ignoring_case() {
        let mut state = PlannerState::default();
        state.add_skill(Skill::new("1", "Rust", Priority::High, 4.0)).unwrap();
        assert!(matches!(
            state.add_skill(Skill::new("2", "RUST", Priority::Low, 1.0)),
            Err(StoreError::DuplicateSkill(_))
        ));
    }

    #[test]
    fn blank_names_and_zero_minute_estimates_are_rejected() {
        let mut state = PlannerState::default();
        assert!(matches!(
            state.add_skill(Skill::new("1", "   ", Priority::High, 1.0)),
            Err(StoreError::InvalidSkill { .. })
        ));
        assert!(matches!(
            state.add_skill(Skill::new("2", "Rust", Priority::High, 0.001)),
            Err(StoreError::InvalidSkill { .. })
        ));
        assert!(state.skills.is_empty());
    }

    #[test]
    fn remove_by_id_or_name() {
        let mut state = PlannerState::default();
        state.add_skill(Skill::new("1", "Rust", Priority::High, 4.0)).unwrap();
        state.add_skill(Skill::new("2", "Go", Priority::Low, 1.0)).unwrap();
        assert_eq!(state.remove_skill("go").unwrap().id, "2");
        assert_eq!(state.remove_skill("1").unwrap().name, "Rust");
        assert!(matches!(state.remove_skill("1"), Err(StoreError::SkillNotFound(_))));
    }

    #[test]
    fn update_does_not_save_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::open_at(dir.path().join("state.json"));
        let result = store.update(|state| state.remove_skill("missing"));
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            PlanStore::open_at(path).load(),
            Err(StoreError::ReadFailed { .. })
        ));
    }
}
