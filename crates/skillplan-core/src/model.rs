//! Data model shared by the grid builder, the allocator and the storage layer.
//!
//! Every type here serializes to plain JSON records with camelCase keys,
//! `YYYY-MM-DD` dates and `HH:MM` clock times.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time within one day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Build from hour and minute. Returns `None` outside 00:00..=23:59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self(hour * 60 + minute))
    }

    /// Build from hour and minute, clamping to the end of the day.
    pub const fn hm(hour: u32, minute: u32) -> Self {
        let minutes = hour * 60 + minute;
        if minutes > MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY)
        } else {
            Self(minutes)
        }
    }

    /// Build from minutes since midnight. `24:00` is allowed so that a
    /// cursor may reach the very end of the day.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Shift forward by `minutes`, saturating at the end of the day.
    pub fn add_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes).min(MINUTES_PER_DAY))
    }

    /// Minutes from `self` until `later`; zero if `later` is not after `self`.
    pub fn minutes_until(self, later: ClockTime) -> u32 {
        later.0.saturating_sub(self.0)
    }

    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(ClockTime::from)
            .map_err(|e| format!("invalid time '{s}' (expected HH:MM): {e}"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "24:00" {
            return Ok(Self(MINUTES_PER_DAY));
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Consumption tier of a skill. Tiers are drained High → Medium → Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.pad(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}' (expected high, medium or low)")),
        }
    }
}

/// A skill the learner wants to master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub priority: Priority,
    pub estimated_hours: f64,
}

impl Skill {
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: Priority, estimated_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            estimated_hours,
        }
    }

    /// Estimated total minutes, rounded to the nearest minute.
    pub fn estimated_minutes(&self) -> u32 {
        hours_to_minutes(self.estimated_hours)
    }
}

/// Day generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// Fixed hours per day, rolling forward until the skills are covered.
    Daily,
    /// Fixed inclusive date range.
    Monthly,
}

/// Daily lunch interruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lunch {
    pub start: ClockTime,
    /// Duration in minutes.
    #[serde(alias = "durationMins")]
    pub duration: u32,
}

impl Lunch {
    pub fn end(&self) -> ClockTime {
        self.start.add_minutes(self.duration)
    }
}

/// Allocation settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: PlanMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub work_block_mins: u32,
    pub break_mins: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Lunch>,
}

impl Settings {
    /// Daily budget in minutes, when `daily_hours` is set.
    pub fn daily_minutes(&self) -> Option<u32> {
        self.daily_hours.map(hours_to_minutes)
    }

    /// Length of the working window in minutes.
    pub fn window_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time)
    }
}

/// Kind of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Work,
    Break,
    Lunch,
    Buffer,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BlockKind::Work => "work",
            BlockKind::Break => "break",
            BlockKind::Lunch => "lunch",
            BlockKind::Buffer => "buffer",
        };
        f.pad(label)
    }
}

/// One contiguous interval of a schedule day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    pub start: ClockTime,
    pub end: ClockTime,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
}

impl ScheduleBlock {
    /// Unlabelled block (break, lunch, buffer, or an unassigned work slot).
    pub fn new(kind: BlockKind, start: ClockTime, end: ClockTime) -> Self {
        Self {
            start,
            end,
            kind,
            minutes: start.minutes_until(end),
            skill_id: None,
            skill_name: None,
        }
    }

    /// Work block assigned to `skill`.
    pub fn work(start: ClockTime, end: ClockTime, skill: &Skill) -> Self {
        Self {
            skill_id: Some(skill.id.clone()),
            skill_name: Some(skill.name.clone()),
            ..Self::new(BlockKind::Work, start, end)
        }
    }

    pub fn is_work(&self) -> bool {
        self.kind == BlockKind::Work
    }
}

/// One calendar date and its ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub blocks: Vec<ScheduleBlock>,
}

impl ScheduleDay {
    pub fn work_minutes(&self) -> u32 {
        self.blocks.iter().filter(|b| b.is_work()).map(|b| b.minutes).sum()
    }

    pub fn total_minutes(&self) -> u32 {
        self.blocks.iter().map(|b| b.minutes).sum()
    }
}

/// Aggregate allocation for one skill across a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub skill_id: String,
    pub skill_name: String,
    pub minutes: u32,
    pub percent: f64,
}

/// Output of one allocation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub days: Vec<ScheduleDay>,
    pub summary: Vec<SummaryEntry>,
}

impl Plan {
    pub fn day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn total_work_minutes(&self) -> u32 {
        self.days.iter().map(ScheduleDay::work_minutes).sum()
    }
}

fn hours_to_minutes(hours: f64) -> u32 {
    if hours.is_finite() && hours > 0.0 {
        (hours * 60.0).round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_and_formats() {
        let t: ClockTime = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 5);
        assert_eq!(t.to_string(), "09:05");
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("9am".parse::<ClockTime>().is_err());
    }

    #[test]
    fn clock_time_serializes_as_string() {
        let t = ClockTime::from_hm(13, 30).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"13:30\"");
        let back: ClockTime = serde_json::from_str("\"13:30\"").unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn priority_orders_high_first() {
        let mut tiers = vec![Priority::Low, Priority::High, Priority::Medium];
        tiers.sort();
        assert_eq!(tiers, vec![Priority::High, Priority::Medium, Priority::Low]);
        assert_eq!("MED".parse::<Priority>().unwrap(), Priority::Medium);
    }

    #[test]
    fn estimated_minutes_rounds() {
        let skill = Skill::new("a", "Rust", Priority::High, 1.5);
        assert_eq!(skill.estimated_minutes(), 90);
        let odd = Skill::new("b", "Go", Priority::Low, 0.0083);
        assert_eq!(odd.estimated_minutes(), 0);
    }

    #[test]
    fn block_json_shape() {
        let skill = Skill::new("s1", "Rust", Priority::High, 2.0);
        let block = ScheduleBlock::work(
            ClockTime::from_hm(9, 0).unwrap(),
            ClockTime::from_hm(9, 50).unwrap(),
            &skill,
        );
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "work");
        assert_eq!(json["minutes"], 50);
        assert_eq!(json["skillId"], "s1");
        assert_eq!(json["start"], "09:00");

        let buffer = ScheduleBlock::new(BlockKind::Buffer, block.end, block.end.add_minutes(10));
        let json = serde_json::to_value(&buffer).unwrap();
        assert!(json.get("skillId").is_none());
    }

    #[test]
    fn settings_accept_external_json() {
        let raw = r#"{
            "mode": "monthly",
            "startDate": "2026-03-01",
            "endDate": "2026-03-31",
            "startTime": "09:00",
            "endTime": "17:00",
            "workBlockMins": 50,
            "breakMins": 10,
            "lunch": { "start": "13:00", "duration": 60 }
        }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.mode, PlanMode::Monthly);
        assert_eq!(settings.window_minutes(), 480);
        assert_eq!(settings.lunch.unwrap().end().to_string(), "14:00");
        assert_eq!(settings.daily_minutes(), None);
    }
}
