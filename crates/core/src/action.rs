//! Mentor action model - write-once audit entries.

use serde::{Deserialize, Serialize};
use crate::id::{InterventionId, MentorActionId};
use crate::Time;

/// An immutable audit entry recording an escalation or approval step.
///
/// Actions are appended and never updated. The escalation sweep reads them
/// back only to check whether a given action was already recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorAction {
    /// Unique identifier
    pub id: MentorActionId,

    /// Intervention the action refers to, if any
    pub intervention_id: Option<InterventionId>,

    /// Acting identity (a mentor, "head-mentor", or "system-auto")
    pub mentor: String,

    /// Action label, e.g. "escalate" or "auto_unlock"
    pub action: String,

    /// Free-form context for the action
    pub payload: Option<serde_json::Value>,

    /// When the action was recorded
    pub created_at: Time,
}

impl MentorAction {
    /// Record a new action.
    pub fn new(
        intervention_id: Option<InterventionId>,
        mentor: impl Into<String>,
        action: impl Into<String>,
        payload: Option<serde_json::Value>,
        now: Time,
    ) -> Self {
        Self {
            id: MentorActionId::new(),
            intervention_id,
            mentor: mentor.into(),
            action: action.into(),
            payload,
            created_at: now,
        }
    }
}
