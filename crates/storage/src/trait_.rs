//! Storage trait abstraction.

use async_trait::async_trait;
use studytrack_core::{
    DailyLog, Intervention, InterventionId, MentorAction, Student, StudentId, StudentStatus, Time,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Row not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend cannot serve requests right now
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed access to the four engagement entities.
///
/// This trait allows different storage backends to be plugged in. Methods
/// take `&self`; adapters use interior mutability so the request path and
/// the escalation sweep can share one `Arc<dyn Storage>` and interleave.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Student operations ===

    /// Insert a new student record.
    async fn create_student(&self, student: &Student) -> Result<()>;

    /// Load a student by ID.
    async fn load_student(&self, id: StudentId) -> Result<Option<Student>>;

    /// List all students.
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Set a student's status, refreshing `updated_at`.
    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
        now: Time,
    ) -> Result<()>;

    /// Point a student at their most recent intervention.
    async fn update_last_intervention(
        &self,
        id: StudentId,
        intervention_id: InterventionId,
        now: Time,
    ) -> Result<()>;

    // === Daily log operations ===

    /// Append one check-in record. Logs are never updated or deleted.
    async fn append_daily_log(&self, log: &DailyLog) -> Result<()>;

    /// Most recent check-ins for a student, newest first.
    async fn recent_daily_logs(&self, student_id: StudentId, limit: usize)
        -> Result<Vec<DailyLog>>;

    // === Intervention operations ===

    /// Insert a new intervention.
    async fn create_intervention(&self, intervention: &Intervention) -> Result<()>;

    /// Load an intervention by ID.
    async fn load_intervention(&self, id: InterventionId) -> Result<Option<Intervention>>;

    /// The student's currently assigned intervention, newest first if the
    /// invariant was ever violated upstream.
    async fn active_intervention(&self, student_id: StudentId) -> Result<Option<Intervention>>;

    /// Re-assign an existing intervention: replace task and assigner and
    /// drop the mentor-response deadline. Status stays `Assigned`.
    async fn update_assignment(
        &self,
        id: InterventionId,
        task: &str,
        assigned_by: &str,
    ) -> Result<()>;

    /// Put a mentor-response deadline back on an intervention that lost
    /// its deadline to an earlier assignment.
    async fn set_mentor_deadline(&self, id: InterventionId, deadline: Time) -> Result<()>;

    /// Mark an intervention completed with a completion timestamp.
    async fn complete_intervention(&self, id: InterventionId, completed_at: Time) -> Result<()>;

    /// Assigned interventions whose mentor deadline is set and has passed.
    async fn overdue_interventions(&self, now: Time) -> Result<Vec<Intervention>>;

    // === Mentor action operations ===

    /// Append one audit entry. Actions are write-once.
    async fn append_mentor_action(&self, action: &MentorAction) -> Result<()>;

    /// Whether an action with this label was already recorded for the
    /// intervention. Used by the sweep's idempotency check only.
    async fn has_mentor_action(&self, intervention_id: InterventionId, action: &str)
        -> Result<bool>;
}
