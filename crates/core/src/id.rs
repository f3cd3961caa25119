//! Unique identifiers for studytrack entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(Ulid);

impl StudentId {
    /// Generate a new StudentId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for StudentId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a DailyLog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyLogId(Ulid);

impl DailyLogId {
    /// Generate a new DailyLogId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for DailyLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DailyLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for an Intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterventionId(Ulid);

impl InterventionId {
    /// Generate a new InterventionId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for InterventionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InterventionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for InterventionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a MentorAction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentorActionId(Ulid);

impl MentorActionId {
    /// Generate a new MentorActionId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MentorActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MentorActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
