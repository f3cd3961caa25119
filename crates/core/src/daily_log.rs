//! Daily log model - append-only record of check-in attempts.

use serde::{Deserialize, Serialize};
use crate::id::{DailyLogId, StudentId};
use crate::Time;

/// One daily check-in attempt. Never mutated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    /// Unique identifier
    pub id: DailyLogId,

    /// Student who checked in
    pub student_id: StudentId,

    /// Quiz score, 0 through 10
    pub quiz_score: u8,

    /// Focused-study duration in minutes
    pub focus_minutes: u32,

    /// When the check-in was recorded
    pub created_at: Time,
}

impl DailyLog {
    /// Record a new check-in attempt.
    pub fn new(student_id: StudentId, quiz_score: u8, focus_minutes: u32, now: Time) -> Self {
        Self {
            id: DailyLogId::new(),
            student_id,
            quiz_score,
            focus_minutes,
            created_at: now,
        }
    }
}
