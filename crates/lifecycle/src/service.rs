//! Intervention lifecycle service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use studytrack_core::{
    Clock, Config, DailyLog, Intervention, InterventionId, InterventionStatus, Student, StudentId,
    StudentStatus,
};
use studytrack_notify::{MentorAlert, Notifier, StatusBroadcaster, StatusUpdate};
use studytrack_storage::{Storage, StorageError};

use crate::evaluator::{CheckinEvaluator, Outcome};
use crate::payload::{AssignPayload, CheckinPayload};

/// Task text on interventions created by a failing check-in, before any
/// mentor has acted.
pub const PENDING_TASK: &str = "Pending mentor assignment";

/// Assigner recorded on system-created interventions.
pub const SYSTEM_ASSIGNER: &str = "system";

/// Errors from lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced student does not exist
    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    /// Referenced intervention does not exist
    #[error("intervention {0} not found")]
    InterventionNotFound(InterventionId),

    /// Intervention belongs to a different student
    #[error("intervention {intervention} does not belong to student {student}")]
    InterventionMismatch {
        /// Student named in the request
        student: StudentId,
        /// Intervention named in the request
        intervention: InterventionId,
    },

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Student-facing result of a daily check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CheckinStatus {
    /// Check-in passed
    #[serde(rename = "On Track")]
    OnTrack,
    /// Check-in failed; a mentor has been asked to act
    #[serde(rename = "Pending Mentor Review")]
    PendingMentorReview,
}

/// Result of a daily check-in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CheckinOutcome {
    /// Status after the check-in
    pub status: CheckinStatus,
    /// Live intervention, present iff the check-in failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<InterventionId>,
}

/// Snapshot returned by [`InterventionService::student_state`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct StudentState {
    /// Student the snapshot describes
    pub student_id: StudentId,
    /// Current lifecycle status
    pub status: StudentStatus,
    /// Live intervention, present for Locked and Remedial students
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_intervention: Option<ActiveIntervention>,
}

/// Live intervention summary inside a [`StudentState`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ActiveIntervention {
    /// Intervention identifier
    pub id: InterventionId,
    /// Task description
    pub task: String,
    /// Intervention status
    pub status: InterventionStatus,
}

/// Owns the student status state machine and the intervention lifecycle.
///
/// Collaborators are injected; the service keeps no cached state of its
/// own, so every decision is derived from the store. Mutating operations
/// for one student serialize through a per-student critical section, which
/// is what upholds the at-most-one-assigned-intervention invariant when a
/// check-in and a mentor assignment race.
pub struct InterventionService {
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    broadcaster: Arc<dyn StatusBroadcaster>,
    clock: Arc<dyn Clock>,
    config: Config,
    evaluator: CheckinEvaluator,
    student_locks: Mutex<HashMap<StudentId, Arc<Mutex<()>>>>,
}

impl InterventionService {
    /// Create the service with its injected collaborators.
    pub fn new(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        broadcaster: Arc<dyn StatusBroadcaster>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let evaluator = CheckinEvaluator::new(config.thresholds);
        Self {
            storage,
            notifier,
            broadcaster,
            clock,
            config,
            evaluator,
            student_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn student_lock(&self, id: StudentId) -> Arc<Mutex<()>> {
        self.student_locks
            .lock()
            .await
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load_student(&self, id: StudentId) -> Result<Student> {
        self.storage
            .load_student(id)
            .await?
            .ok_or(ServiceError::StudentNotFound(id))
    }

    fn broadcast(
        &self,
        student_id: StudentId,
        status: StudentStatus,
        intervention: Option<Intervention>,
    ) {
        self.broadcaster.status_changed(StatusUpdate {
            student_id,
            status,
            intervention,
            timestamp: self.clock.now(),
        });
    }

    /// Handle one daily check-in.
    ///
    /// The log row is appended before the outcome is evaluated so the
    /// check-in history survives any later failure. On a fail, the durable
    /// transition commits before the mentor notification is attempted;
    /// notification failure is logged and swallowed.
    pub async fn handle_checkin(&self, payload: CheckinPayload) -> Result<CheckinOutcome> {
        let lock = self.student_lock(payload.student_id).await;
        let _guard = lock.lock().await;

        let student = self.load_student(payload.student_id).await?;
        let now = self.clock.now();

        let log = DailyLog::new(student.id, payload.quiz_score, payload.focus_minutes, now);
        self.storage.append_daily_log(&log).await?;

        match self
            .evaluator
            .evaluate(payload.quiz_score, payload.focus_minutes)
        {
            Outcome::Pass => {
                if student.status != StudentStatus::OnTrack {
                    self.storage
                        .update_student_status(student.id, StudentStatus::OnTrack, now)
                        .await?;
                    self.broadcast(student.id, StudentStatus::OnTrack, None);
                    info!(student = %student.id, "check-in passed, student restored to On Track");
                }
                Ok(CheckinOutcome {
                    status: CheckinStatus::OnTrack,
                    intervention_id: None,
                })
            }
            Outcome::Fail => {
                let deadline =
                    now + Duration::hours(self.config.fail_safe.mentor_response_deadline_hours);

                // Reuse the live intervention if one exists; a second failing
                // check-in must not open a second one. A kept deadline stays
                // put so repeated failures cannot push the escalation window
                // forward, but an intervention that lost its deadline to a
                // mentor assignment gets a fresh one, or the sweep would
                // never see this lock-out.
                let intervention = match self.storage.active_intervention(student.id).await? {
                    Some(mut existing) => {
                        if existing.mentor_deadline.is_none() {
                            self.storage.set_mentor_deadline(existing.id, deadline).await?;
                            existing.mentor_deadline = Some(deadline);
                        }
                        existing
                    }
                    None => {
                        let intervention = Intervention::new(
                            student.id,
                            SYSTEM_ASSIGNER,
                            PENDING_TASK,
                            Some(deadline),
                            now,
                        );
                        self.storage.create_intervention(&intervention).await?;
                        intervention
                    }
                };

                self.storage
                    .update_student_status(student.id, StudentStatus::Locked, now)
                    .await?;
                self.storage
                    .update_last_intervention(student.id, intervention.id, now)
                    .await?;

                let alert = MentorAlert {
                    student_id: student.id,
                    name: Some(student.name.clone()),
                    email: student.email.clone(),
                    quiz_score: payload.quiz_score,
                    focus_minutes: payload.focus_minutes,
                    daily_log_id: Some(log.id),
                    timestamp: now,
                };
                if let Err(err) = self.notifier.notify_mentor(&alert).await {
                    // The transition is already durable; delivery is best effort.
                    warn!(student = %student.id, error = %err, "mentor notification failed");
                }

                self.broadcast(student.id, StudentStatus::Locked, Some(intervention.clone()));
                info!(
                    student = %student.id,
                    intervention = %intervention.id,
                    "check-in failed, student locked pending mentor review"
                );

                Ok(CheckinOutcome {
                    status: CheckinStatus::PendingMentorReview,
                    intervention_id: Some(intervention.id),
                })
            }
        }
    }

    /// Assign (or re-assign) a remediation task and move the student to
    /// Remedial.
    ///
    /// If a live intervention exists its task and assigner are replaced and
    /// its mentor-response deadline is dropped: the mentor has responded, so
    /// the deadline no longer applies and the escalation sweep stops
    /// tracking it. Repeated calls with the same task are idempotent.
    pub async fn assign_intervention(&self, payload: AssignPayload) -> Result<()> {
        let lock = self.student_lock(payload.student_id).await;
        let _guard = lock.lock().await;

        let student = self.load_student(payload.student_id).await?;
        let now = self.clock.now();

        let intervention = match self.storage.active_intervention(student.id).await? {
            Some(existing) => {
                self.storage
                    .update_assignment(existing.id, &payload.task, &payload.mentor)
                    .await?;
                Intervention {
                    task: payload.task.clone(),
                    assigned_by: payload.mentor.clone(),
                    mentor_deadline: None,
                    ..existing
                }
            }
            None => {
                let intervention = Intervention::new(
                    student.id,
                    payload.mentor.clone(),
                    payload.task.clone(),
                    None,
                    now,
                );
                self.storage.create_intervention(&intervention).await?;
                intervention
            }
        };

        self.storage
            .update_student_status(student.id, StudentStatus::Remedial, now)
            .await?;
        self.storage
            .update_last_intervention(student.id, intervention.id, now)
            .await?;

        self.broadcast(student.id, StudentStatus::Remedial, Some(intervention.clone()));
        info!(
            student = %student.id,
            intervention = %intervention.id,
            mentor = %payload.mentor,
            "intervention assigned"
        );
        Ok(())
    }

    /// Complete an intervention and restore the student to On Track.
    ///
    /// Completion always fully restores the student regardless of prior
    /// status.
    pub async fn mark_complete(
        &self,
        student_id: StudentId,
        intervention_id: InterventionId,
    ) -> Result<()> {
        let lock = self.student_lock(student_id).await;
        let _guard = lock.lock().await;

        self.load_student(student_id).await?;
        let intervention = self
            .storage
            .load_intervention(intervention_id)
            .await?
            .ok_or(ServiceError::InterventionNotFound(intervention_id))?;
        if intervention.student_id != student_id {
            return Err(ServiceError::InterventionMismatch {
                student: student_id,
                intervention: intervention_id,
            });
        }

        let now = self.clock.now();
        self.storage
            .complete_intervention(intervention_id, now)
            .await?;
        self.storage
            .update_student_status(student_id, StudentStatus::OnTrack, now)
            .await?;

        self.broadcast(student_id, StudentStatus::OnTrack, None);
        info!(student = %student_id, intervention = %intervention_id, "intervention completed");
        Ok(())
    }

    /// Current status snapshot for one student.
    pub async fn student_state(&self, student_id: StudentId) -> Result<StudentState> {
        let student = self.load_student(student_id).await?;

        let active = match student.status {
            StudentStatus::Locked | StudentStatus::Remedial => {
                self.storage.active_intervention(student_id).await?
            }
            _ => None,
        };

        Ok(StudentState {
            student_id: student.id,
            status: student.status,
            active_intervention: active.map(|i| ActiveIntervention {
                id: i.id,
                task: i.task,
                status: i.status,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studytrack_core::ManualClock;
    use studytrack_notify::NotifyError;
    use studytrack_storage::MemoryStorage;

    struct RecordingNotifier {
        alerts: std::sync::Mutex<Vec<MentorAlert>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                alerts: std::sync::Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                alerts: std::sync::Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn alert_count(&self) -> usize {
            self.alerts.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify_mentor(&self, alert: &MentorAlert) -> std::result::Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::NotConfigured);
            }
            self.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    struct RecordingBroadcaster {
        updates: std::sync::Mutex<Vec<StatusUpdate>>,
    }

    impl RecordingBroadcaster {
        fn new() -> Self {
            Self {
                updates: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn last_status(&self) -> Option<StudentStatus> {
            self.updates.lock().unwrap().last().map(|u| u.status)
        }
    }

    impl StatusBroadcaster for RecordingBroadcaster {
        fn status_changed(&self, update: StatusUpdate) {
            self.updates.lock().unwrap().push(update);
        }
    }

    struct Harness {
        storage: Arc<MemoryStorage>,
        clock: Arc<ManualClock>,
        notifier: Arc<RecordingNotifier>,
        broadcaster: Arc<RecordingBroadcaster>,
        service: InterventionService,
    }

    fn harness_with(notifier: RecordingNotifier) -> Harness {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
        let notifier = Arc::new(notifier);
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let service = InterventionService::new(
            storage.clone(),
            notifier.clone(),
            broadcaster.clone(),
            clock.clone(),
            Config::default(),
        );
        Harness {
            storage,
            clock,
            notifier,
            broadcaster,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(RecordingNotifier::new())
    }

    async fn seed_student(harness: &Harness) -> StudentId {
        let student = Student::new(
            "Avery Lee",
            Some("avery@example.com".to_string()),
            harness.clock.now(),
        );
        harness.storage.create_student(&student).await.unwrap();
        student.id
    }

    fn checkin(student_id: StudentId, quiz: i64, focus: i64) -> CheckinPayload {
        CheckinPayload::new(student_id, quiz, focus).unwrap()
    }

    #[tokio::test]
    async fn passing_checkin_stays_on_track() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(student_id, 9, 90)).await.unwrap();
        assert_eq!(outcome.status, CheckinStatus::OnTrack);
        assert!(outcome.intervention_id.is_none());
        assert_eq!(h.notifier.alert_count(), 0);

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::OnTrack);
    }

    #[tokio::test]
    async fn passing_checkin_restores_on_track() {
        let h = harness();
        let student_id = seed_student(&h).await;
        h.storage
            .update_student_status(student_id, StudentStatus::Remedial, h.clock.now())
            .await
            .unwrap();

        let outcome = h.service.handle_checkin(checkin(student_id, 8, 61)).await.unwrap();
        assert_eq!(outcome.status, CheckinStatus::OnTrack);

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::OnTrack);
        assert_eq!(h.broadcaster.last_status(), Some(StudentStatus::OnTrack));
    }

    #[tokio::test]
    async fn failing_checkin_locks_and_creates_intervention() {
        let h = harness();
        let student_id = seed_student(&h).await;
        let now = h.clock.now();

        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        assert_eq!(outcome.status, CheckinStatus::PendingMentorReview);
        let intervention_id = outcome.intervention_id.unwrap();

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Locked);
        assert_eq!(student.last_intervention_id, Some(intervention_id));

        let intervention = h
            .storage
            .load_intervention(intervention_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(intervention.assigned_by, SYSTEM_ASSIGNER);
        assert_eq!(intervention.task, PENDING_TASK);
        assert_eq!(
            intervention.mentor_deadline,
            Some(now + Duration::hours(12))
        );

        assert_eq!(h.notifier.alert_count(), 1);
        assert_eq!(h.broadcaster.last_status(), Some(StudentStatus::Locked));
    }

    #[tokio::test]
    async fn second_failing_checkin_reuses_intervention() {
        let h = harness();
        let student_id = seed_student(&h).await;
        let start = h.clock.now();

        let first = h.service.handle_checkin(checkin(student_id, 3, 10)).await.unwrap();
        h.clock.advance(Duration::hours(1));
        let second = h.service.handle_checkin(checkin(student_id, 4, 20)).await.unwrap();

        assert_eq!(first.intervention_id, second.intervention_id);
        assert_eq!(h.storage.intervention_count().await, 1);
        // Both check-ins were logged even though only one intervention exists.
        let logs = h.storage.recent_daily_logs(student_id, 10).await.unwrap();
        assert_eq!(logs.len(), 2);

        // The repeat failure did not push the escalation window forward.
        let intervention = h
            .storage
            .load_intervention(first.intervention_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            intervention.mentor_deadline,
            Some(start + Duration::hours(12))
        );
    }

    #[tokio::test]
    async fn failing_checkin_after_assignment_restores_deadline() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        let intervention_id = outcome.intervention_id.unwrap();

        let payload = AssignPayload::new(student_id, "Watch Lecture 3", "mentor@org").unwrap();
        h.service.assign_intervention(payload).await.unwrap();

        h.clock.advance(Duration::hours(2));
        let again = h.service.handle_checkin(checkin(student_id, 4, 20)).await.unwrap();
        assert_eq!(again.intervention_id, Some(intervention_id));

        // The reused intervention had its deadline cleared by the mentor's
        // assignment; the new lock-out puts one back so the sweep sees it.
        let intervention = h
            .storage
            .load_intervention(intervention_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            intervention.mentor_deadline,
            Some(h.clock.now() + Duration::hours(12))
        );
        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Locked);
    }

    #[tokio::test]
    async fn checkin_for_unknown_student_is_not_found() {
        let h = harness();
        let err = h
            .service
            .handle_checkin(checkin(StudentId::new(), 5, 70))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::StudentNotFound(_)));
    }

    #[tokio::test]
    async fn notification_failure_does_not_roll_back_transition() {
        let h = harness_with(RecordingNotifier::failing());
        let student_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(student_id, 2, 5)).await.unwrap();
        assert_eq!(outcome.status, CheckinStatus::PendingMentorReview);

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Locked);
    }

    #[tokio::test]
    async fn assignment_reuses_live_intervention_and_clears_deadline() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        let intervention_id = outcome.intervention_id.unwrap();

        let payload = AssignPayload::new(student_id, "Watch Lecture 3", "mentor@org").unwrap();
        h.service.assign_intervention(payload).await.unwrap();

        assert_eq!(h.storage.intervention_count().await, 1);
        let intervention = h
            .storage
            .load_intervention(intervention_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(intervention.task, "Watch Lecture 3");
        assert_eq!(intervention.assigned_by, "mentor@org");
        assert!(intervention.mentor_deadline.is_none());

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Remedial);
    }

    #[tokio::test]
    async fn assignment_creates_intervention_when_none_live() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let payload = AssignPayload::new(student_id, "Review chapter 2", "mentor@org").unwrap();
        h.service.assign_intervention(payload).await.unwrap();

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Remedial);

        let intervention = h
            .storage
            .active_intervention(student_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(intervention.task, "Review chapter 2");
        assert!(intervention.mentor_deadline.is_none());
    }

    #[tokio::test]
    async fn repeated_assignment_is_idempotent() {
        let h = harness();
        let student_id = seed_student(&h).await;

        for _ in 0..2 {
            let payload = AssignPayload::new(student_id, "Watch Lecture 3", "mentor@org").unwrap();
            h.service.assign_intervention(payload).await.unwrap();
        }

        assert_eq!(h.storage.intervention_count().await, 1);
        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::Remedial);
    }

    #[tokio::test]
    async fn completion_restores_on_track_from_locked() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        let intervention_id = outcome.intervention_id.unwrap();

        h.service.mark_complete(student_id, intervention_id).await.unwrap();

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::OnTrack);
        let intervention = h
            .storage
            .load_intervention(intervention_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(intervention.status, InterventionStatus::Completed);
        assert!(intervention.completed_at.is_some());
    }

    #[tokio::test]
    async fn completion_restores_on_track_from_remedial() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let payload = AssignPayload::new(student_id, "Watch Lecture 3", "mentor@org").unwrap();
        h.service.assign_intervention(payload).await.unwrap();
        let intervention = h
            .storage
            .active_intervention(student_id)
            .await
            .unwrap()
            .unwrap();

        h.service.mark_complete(student_id, intervention.id).await.unwrap();

        let student = h.storage.load_student(student_id).await.unwrap().unwrap();
        assert_eq!(student.status, StudentStatus::OnTrack);
    }

    #[tokio::test]
    async fn completing_unknown_intervention_is_not_found() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let err = h
            .service
            .mark_complete(student_id, InterventionId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InterventionNotFound(_)));
    }

    #[tokio::test]
    async fn completing_someone_elses_intervention_is_a_mismatch() {
        let h = harness();
        let student_id = seed_student(&h).await;
        let other_id = seed_student(&h).await;

        let outcome = h.service.handle_checkin(checkin(other_id, 5, 70)).await.unwrap();
        let foreign_intervention = outcome.intervention_id.unwrap();

        let err = h
            .service
            .mark_complete(student_id, foreign_intervention)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InterventionMismatch { .. }));
    }

    #[tokio::test]
    async fn state_reports_active_intervention_when_locked() {
        let h = harness();
        let student_id = seed_student(&h).await;

        let state = h.service.student_state(student_id).await.unwrap();
        assert_eq!(state.status, StudentStatus::OnTrack);
        assert!(state.active_intervention.is_none());

        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        let state = h.service.student_state(student_id).await.unwrap();
        assert_eq!(state.status, StudentStatus::Locked);
        let active = state.active_intervention.unwrap();
        assert_eq!(Some(active.id), outcome.intervention_id);
        assert_eq!(active.task, PENDING_TASK);
    }

    #[tokio::test]
    async fn checkin_to_completion_round_trip() {
        let h = harness();
        let student_id = seed_student(&h).await;

        // Failing check-in: quiz below threshold even though focus passes.
        let outcome = h.service.handle_checkin(checkin(student_id, 5, 70)).await.unwrap();
        assert_eq!(outcome.status, CheckinStatus::PendingMentorReview);
        let intervention_id = outcome.intervention_id.unwrap();

        let state = h.service.student_state(student_id).await.unwrap();
        assert_eq!(state.status, StudentStatus::Locked);
        assert_eq!(state.active_intervention.unwrap().id, intervention_id);

        let payload = AssignPayload::new(student_id, "Watch Lecture 3", "mentor@org").unwrap();
        h.service.assign_intervention(payload).await.unwrap();
        let state = h.service.student_state(student_id).await.unwrap();
        assert_eq!(state.status, StudentStatus::Remedial);

        h.service.mark_complete(student_id, intervention_id).await.unwrap();
        let state = h.service.student_state(student_id).await.unwrap();
        assert_eq!(state.status, StudentStatus::OnTrack);
        assert!(state.active_intervention.is_none());
    }
}
