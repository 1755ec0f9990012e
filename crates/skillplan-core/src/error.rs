//! Core error types for skillplan-core.
//!
//! Allocation failures are reported through [`PlanError`]; the surrounding
//! storage and configuration layers have their own error enums, all of which
//! fold into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

use crate::model::ClockTime;

/// Core error type for skillplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Allocation errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Progress overlay errors
    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),
}

/// Errors raised by the block grid builder and the skill allocator.
///
/// Every variant is deterministic for a given input; the engine never
/// returns a partial plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid working window: end ({end}) must be after start ({start})")]
    InvalidWindow { start: ClockTime, end: ClockTime },

    #[error("Invalid rhythm: {message}")]
    InvalidRhythm { message: String },

    #[error("Invalid lunch: {message}")]
    InvalidLunch { message: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid skill '{id}': {message}")]
    InvalidSkill { id: String, message: String },

    #[error("No skills to schedule")]
    NoSkills,

    #[error("Unreachable target: {0}")]
    UnreachableTarget(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Plan store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read state from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to write state to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("A skill named '{0}' already exists")]
    DuplicateSkill(String),

    #[error("Invalid skill '{name}': {message}")]
    InvalidSkill { name: String, message: String },

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("No plan has been generated yet")]
    NoPlan,
}

/// Errors raised when editing the progress overlay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("No block {index} on {date}")]
    UnknownBlock { date: chrono::NaiveDate, index: usize },

    #[error("Block {index} on {date} is not a work block")]
    NotWorkBlock { date: chrono::NaiveDate, index: usize },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
