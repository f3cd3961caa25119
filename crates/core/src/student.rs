//! Student model - the subject of the engagement lifecycle.

use serde::{Deserialize, Serialize};
use crate::id::{InterventionId, StudentId};
use crate::Time;

/// A student tracked by the engagement system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier
    pub id: StudentId,

    /// Display name
    pub name: String,

    /// Contact email, if known
    pub email: Option<String>,

    /// Current lifecycle status
    pub status: StudentStatus,

    /// Most recent intervention (lookup reference, not ownership)
    pub last_intervention_id: Option<InterventionId>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Student {
    /// Create a new student in the initial `OnTrack` status.
    pub fn new(name: impl Into<String>, email: Option<String>, now: Time) -> Self {
        Self {
            id: StudentId::new(),
            name: name.into(),
            email,
            status: StudentStatus::OnTrack,
            last_intervention_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Where a student currently sits in the engagement lifecycle.
///
/// Exactly one value at any time; the status is the single source of truth
/// for what the student may currently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    /// Passing daily check-ins
    #[serde(rename = "On Track")]
    OnTrack,

    /// Flagged for direct mentor triage; never produced by the check-in flow
    #[serde(rename = "Needs Intervention")]
    NeedsIntervention,

    /// Working an assigned remediation task
    Remedial,

    /// Awaiting mentor triage after a failed check-in
    Locked,
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::OnTrack => write!(f, "On Track"),
            StudentStatus::NeedsIntervention => write!(f, "Needs Intervention"),
            StudentStatus::Remedial => write!(f, "Remedial"),
            StudentStatus::Locked => write!(f, "Locked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_student_starts_on_track() {
        let now = chrono::Utc::now();
        let student = Student::new("Avery Lee", Some("avery@example.com".to_string()), now);
        assert_eq!(student.status, StudentStatus::OnTrack);
        assert!(student.last_intervention_id.is_none());
        assert_eq!(student.created_at, student.updated_at);
    }

    #[test]
    fn status_serializes_to_human_strings() {
        let json = serde_json::to_string(&StudentStatus::OnTrack).unwrap();
        assert_eq!(json, "\"On Track\"");
        let back: StudentStatus = serde_json::from_str("\"Locked\"").unwrap();
        assert_eq!(back, StudentStatus::Locked);
    }
}
