//! Operation payloads and caller-side validation.
//!
//! Out-of-contract values are rejected here, before any store access;
//! the state machine itself only ever sees in-range payloads.

use studytrack_core::StudentId;

/// Errors for values outside the operation contracts.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Quiz score outside 0..=10
    #[error("quiz_score must be between 0 and 10, got {0}")]
    QuizScoreOutOfRange(i64),

    /// Focus minutes negative or absurdly large
    #[error("focus_minutes out of range, got {0}")]
    FocusMinutesOutOfRange(i64),

    /// Blank remediation task
    #[error("intervention task must not be empty")]
    EmptyTask,
}

/// One daily check-in submission.
#[derive(Debug, Clone)]
pub struct CheckinPayload {
    /// Student checking in
    pub student_id: StudentId,
    /// Quiz score, 0 through 10
    pub quiz_score: u8,
    /// Focused-study minutes
    pub focus_minutes: u32,
}

impl CheckinPayload {
    /// Validate raw values into a payload the state machine accepts.
    pub fn new(
        student_id: StudentId,
        quiz_score: i64,
        focus_minutes: i64,
    ) -> Result<Self, ValidationError> {
        if !(0..=10).contains(&quiz_score) {
            return Err(ValidationError::QuizScoreOutOfRange(quiz_score));
        }
        let focus_minutes = u32::try_from(focus_minutes)
            .map_err(|_| ValidationError::FocusMinutesOutOfRange(focus_minutes))?;
        Ok(Self {
            student_id,
            quiz_score: quiz_score as u8,
            focus_minutes,
        })
    }
}

/// A mentor (or the fail-safe) assigning a remediation task.
#[derive(Debug, Clone)]
pub struct AssignPayload {
    /// Student receiving the task
    pub student_id: StudentId,
    /// Remediation task description
    pub task: String,
    /// Assigning identity
    pub mentor: String,
}

impl AssignPayload {
    /// Validate a task assignment.
    pub fn new(
        student_id: StudentId,
        task: impl Into<String>,
        mentor: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let task = task.into();
        if task.trim().is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        Ok(Self {
            student_id,
            task,
            mentor: mentor.into(),
        })
    }
}
