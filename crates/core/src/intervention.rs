//! Intervention model - a remediation task assigned to a student.

use serde::{Deserialize, Serialize};
use crate::id::{InterventionId, StudentId};
use crate::Time;

/// A remediation task assigned to a student who failed a check-in.
///
/// At most one intervention per student may be `Assigned` at any time.
/// Retired interventions keep their row (status `Completed`/`Cancelled`);
/// nothing deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    /// Unique identifier
    pub id: InterventionId,

    /// Student the task belongs to
    pub student_id: StudentId,

    /// Who assigned it ("system", "system-auto", or a mentor identity)
    pub assigned_by: String,

    /// Task description
    pub task: String,

    /// Current status
    pub status: InterventionStatus,

    /// When the task was assigned
    pub assigned_at: Time,

    /// When the task was completed, if it has been
    pub completed_at: Option<Time>,

    /// Deadline by which a mentor is expected to act. Only set on
    /// system-created interventions awaiting triage; cleared once a
    /// mentor (or the fail-safe) responds.
    pub mentor_deadline: Option<Time>,
}

impl Intervention {
    /// Create a new assigned intervention.
    pub fn new(
        student_id: StudentId,
        assigned_by: impl Into<String>,
        task: impl Into<String>,
        mentor_deadline: Option<Time>,
        now: Time,
    ) -> Self {
        Self {
            id: InterventionId::new(),
            student_id,
            assigned_by: assigned_by.into(),
            task: task.into(),
            status: InterventionStatus::Assigned,
            assigned_at: now,
            completed_at: None,
            mentor_deadline,
        }
    }

    /// Whether the intervention is still live.
    pub fn is_assigned(&self) -> bool {
        self.status == InterventionStatus::Assigned
    }
}

/// Lifecycle status of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionStatus {
    /// Live; the student is expected to work it
    Assigned,
    /// Finished by the student
    Completed,
    /// Withdrawn without completion
    Cancelled,
}

impl std::fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterventionStatus::Assigned => write!(f, "assigned"),
            InterventionStatus::Completed => write!(f, "completed"),
            InterventionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}
