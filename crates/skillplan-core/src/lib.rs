//! # skillplan Core Library
//!
//! Turns a list of skills (priority + estimated hours) into a day-by-day
//! timetable of work blocks, breaks and an optional lunch, bounded by a daily
//! working window. All business logic lives here; the `skillplan` CLI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Block Grid Builder** ([`grid`]): one day's slot template that exactly
//!   tiles the working window
//! - **Skill Allocator** ([`allocator`]): fills work slots by priority tier,
//!   rolls days forward (daily mode) or walks a date range (monthly mode), and
//!   computes the per-skill summary
//! - **Progress** ([`progress`]): caller-owned completion overlay
//! - **Storage**: JSON planner state and TOML configuration
//!
//! The grid builder and the allocator are pure functions of their inputs.

pub mod allocator;
pub mod error;
pub mod export;
pub mod grid;
pub mod model;
pub mod progress;
pub mod storage;
pub mod validation;

pub use allocator::{allocate, DayPlan, FixedRange, RemainingMinutes, RollForward};
pub use error::{ConfigError, CoreError, PlanError, ProgressError, StoreError};
pub use grid::{build_day_grid, DayGrid};
pub use model::{
    BlockKind, ClockTime, Lunch, Plan, PlanMode, Priority, ScheduleBlock, ScheduleDay, Settings, Skill,
    SummaryEntry,
};
pub use progress::{BlockKey, ProgressOverlay};
pub use storage::{Config, PlanStore, PlannerState};
