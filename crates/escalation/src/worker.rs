//! Fail-safe escalation worker.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

use studytrack_core::{Clock, Config, Intervention, MentorAction, Time};
use studytrack_lifecycle::{AssignPayload, InterventionService, ServiceError};
use studytrack_storage::{Storage, StorageError};

/// Mentor identity recorded on auto-unlock assignments.
pub const AUTO_MENTOR: &str = "system-auto";

/// Identity escalations are routed to.
pub const HEAD_MENTOR: &str = "head-mentor";

/// Task auto-assigned when no mentor responds inside the unlock window.
pub const DEFAULT_UNLOCK_TASK: &str = "Auto-assigned: Watch Lecture 3";

/// Audit label for an escalation.
pub const ACTION_ESCALATE: &str = "escalate";

/// Audit label for an automatic unlock.
pub const ACTION_AUTO_UNLOCK: &str = "auto_unlock";

/// Errors from a single escalation action.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// Lifecycle operation failed
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Storage operation failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Counts from one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Overdue interventions found
    pub scanned: usize,
    /// Escalation entries appended
    pub escalated: usize,
    /// Students auto-unlocked
    pub unlocked: usize,
    /// Already handled on an earlier sweep
    pub skipped: usize,
}

enum Acted {
    Escalated,
    Unlocked,
    Skipped,
}

/// Recurring sweep over interventions whose mentor deadline has passed.
///
/// Overdue-but-recent interventions get an `escalate` audit entry for a
/// human outside the normal mentor to pick up. Interventions outstanding
/// longer than the auto-unlock window get a default task through the same
/// assignment operation mentors use, freeing the student from Locked.
pub struct EscalationWorker {
    storage: Arc<dyn Storage>,
    service: Arc<InterventionService>,
    clock: Arc<dyn Clock>,
    config: Config,
}

impl EscalationWorker {
    /// Create a worker sharing the lifecycle service's store and clock.
    pub fn new(
        storage: Arc<dyn Storage>,
        service: Arc<InterventionService>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            storage,
            service,
            clock,
            config,
        }
    }

    /// One pass over every overdue intervention.
    ///
    /// Each decision is derived from current store state only, so a crashed
    /// or partially failed pass is safe to retry from scratch next period.
    pub async fn sweep(&self) -> SweepStats {
        let now = self.clock.now();
        let overdue = match self.storage.overdue_interventions(now).await {
            Ok(list) => list,
            Err(err) => {
                // An unprovisioned or unreachable store means "nothing to
                // do"; the next period retries.
                warn!(error = %err, "escalation sweep could not query overdue interventions");
                return SweepStats::default();
            }
        };

        let mut stats = SweepStats {
            scanned: overdue.len(),
            ..SweepStats::default()
        };
        let unlock_threshold = now - Duration::hours(self.config.fail_safe.auto_unlock_hours);

        for intervention in &overdue {
            let acted = if intervention.assigned_at < unlock_threshold {
                self.auto_unlock(intervention).await
            } else {
                self.escalate(intervention, now).await
            };
            match acted {
                Ok(Acted::Escalated) => stats.escalated += 1,
                Ok(Acted::Unlocked) => stats.unlocked += 1,
                Ok(Acted::Skipped) => stats.skipped += 1,
                Err(err) => {
                    // Keep sweeping; this intervention is retried next period.
                    error!(
                        intervention = %intervention.id,
                        student = %intervention.student_id,
                        error = %err,
                        "escalation action failed"
                    );
                }
            }
        }

        if stats.scanned > 0 {
            info!(
                scanned = stats.scanned,
                escalated = stats.escalated,
                unlocked = stats.unlocked,
                skipped = stats.skipped,
                "escalation sweep finished"
            );
        }
        stats
    }

    async fn auto_unlock(&self, intervention: &Intervention) -> Result<Acted, WorkerError> {
        info!(
            intervention = %intervention.id,
            student = %intervention.student_id,
            "auto-unlocking intervention past the unlock window"
        );

        // Reuses the mentor assignment path, so it inherits the same
        // per-student consistency discipline and clears the deadline,
        // which is what keeps this from firing twice.
        let payload = AssignPayload {
            student_id: intervention.student_id,
            task: DEFAULT_UNLOCK_TASK.to_string(),
            mentor: AUTO_MENTOR.to_string(),
        };
        self.service.assign_intervention(payload).await?;

        let action = MentorAction::new(
            Some(intervention.id),
            AUTO_MENTOR,
            ACTION_AUTO_UNLOCK,
            Some(serde_json::json!({
                "reason": "No mentor response within auto-unlock window",
            })),
            self.clock.now(),
        );
        self.storage.append_mentor_action(&action).await?;
        Ok(Acted::Unlocked)
    }

    async fn escalate(&self, intervention: &Intervention, now: Time) -> Result<Acted, WorkerError> {
        if self
            .storage
            .has_mentor_action(intervention.id, ACTION_ESCALATE)
            .await?
        {
            // Already escalated on an earlier sweep; a human is on it.
            return Ok(Acted::Skipped);
        }

        info!(
            intervention = %intervention.id,
            student = %intervention.student_id,
            "escalating overdue intervention to head mentor"
        );

        let action = MentorAction::new(
            Some(intervention.id),
            HEAD_MENTOR,
            ACTION_ESCALATE,
            Some(serde_json::json!({
                "reason": "Mentor deadline exceeded",
                "deadline": intervention.mentor_deadline,
            })),
            now,
        );
        self.storage.append_mentor_action(&action).await?;
        Ok(Acted::Escalated)
    }

    /// Run the sweep on a fixed period until the stop signal flips.
    ///
    /// The first sweep fires immediately. A sweep always finishes its
    /// current batch; the stop signal is only observed between sweeps.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.sweep_period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!(
            period_secs = self.config.sweep_period.as_secs(),
            "escalation worker started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("escalation worker stopping");
                        break;
                    }
                }
            }
        }
    }
}
