//! TOML-based application configuration.
//!
//! Stores the defaults used when generating a plan:
//! - Working window and work/break rhythm
//! - Daily hour budget
//! - Optional lunch slot
//! - Display preferences for printed timetables
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::model::{ClockTime, Lunch, PlanMode, Settings};

/// Planner defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_start_time")]
    pub start_time: ClockTime,
    #[serde(default = "default_end_time")]
    pub end_time: ClockTime,
    #[serde(default = "default_work_block")]
    pub work_block_mins: u32,
    #[serde(default = "default_break")]
    pub break_mins: u32,
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,
    #[serde(default)]
    pub lunch: LunchConfig,
}

/// Lunch slot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunchConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_lunch_start")]
    pub start: ClockTime,
    #[serde(default = "default_lunch_duration")]
    pub duration_mins: u32,
}

/// Printed timetable preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: usize,
    #[serde(default = "default_true")]
    pub show_past_marker: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_start_time() -> ClockTime {
    ClockTime::hm(9, 0)
}
fn default_end_time() -> ClockTime {
    ClockTime::hm(17, 0)
}
fn default_lunch_start() -> ClockTime {
    ClockTime::hm(12, 0)
}
fn default_work_block() -> u32 {
    50
}
fn default_break() -> u32 {
    10
}
fn default_daily_hours() -> f64 {
    2.0
}
fn default_lunch_duration() -> u32 {
    60
}
fn default_percent_decimals() -> usize {
    1
}
fn default_true() -> bool {
    true
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            end_time: default_end_time(),
            work_block_mins: default_work_block(),
            break_mins: default_break(),
            daily_hours: default_daily_hours(),
            lunch: LunchConfig::default(),
        }
    }
}

impl Default for LunchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start: default_lunch_start(),
            duration_mins: default_lunch_duration(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            percent_decimals: default_percent_decimals(),
            show_past_marker: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// All leaf keys with their current values, in dot-path form.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                        walk(&path, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// Allocation settings for `mode` built from the planner defaults.
    ///
    /// Monthly dates are left unset; the caller supplies the range.
    pub fn planner_settings(&self, mode: PlanMode) -> Settings {
        let planner = &self.planner;
        Settings {
            mode,
            daily_hours: (mode == PlanMode::Daily).then_some(planner.daily_hours),
            start_date: None,
            end_date: None,
            start_time: planner.start_time,
            end_time: planner.end_time,
            work_block_mins: planner.work_block_mins,
            break_mins: planner.break_mins,
            lunch: planner.lunch.enabled.then(|| Lunch {
                start: planner.lunch.start,
                duration: planner.lunch.duration_mins,
            }),
        }
    }
}
