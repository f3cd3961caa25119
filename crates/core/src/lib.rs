//! studytrack core data models.
//!
//! This crate defines the entities the engagement tracker persists, plus the
//! clock abstraction and process configuration shared by every component.

#![warn(missing_docs)]

// Core identities
mod id;

// Entities
mod student;
mod daily_log;
mod intervention;
mod action;

// Shared infrastructure
mod clock;
mod config;

// Re-exports
pub use id::*;

pub use student::{Student, StudentStatus};
pub use daily_log::DailyLog;
pub use intervention::{Intervention, InterventionStatus};
pub use action::MentorAction;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, FailSafe, Thresholds};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
