//! In-memory storage backend.
//!
//! Backs unit tests and ephemeral runs; data lives only as long as the
//! process.

use std::collections::HashMap;

use studytrack_core::{
    DailyLog, Intervention, InterventionId, InterventionStatus, MentorAction, Student, StudentId,
    StudentStatus, Time,
};
use tokio::sync::RwLock;

use super::{Result, Storage, StorageError};

#[derive(Default)]
struct Tables {
    students: HashMap<StudentId, Student>,
    daily_logs: Vec<DailyLog>,
    interventions: HashMap<InterventionId, Intervention>,
    mentor_actions: Vec<MentorAction>,
}

/// HashMap-backed storage behind a single RwLock.
#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the audit trail, for test assertions.
    pub async fn mentor_actions(&self) -> Vec<MentorAction> {
        self.tables.read().await.mentor_actions.clone()
    }

    /// Number of interventions ever created, for test assertions.
    pub async fn intervention_count(&self) -> usize {
        self.tables.read().await.interventions.len()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn create_student(&self, student: &Student) -> Result<()> {
        self.tables
            .write()
            .await
            .students
            .insert(student.id, student.clone());
        Ok(())
    }

    async fn load_student(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self.tables.read().await.students.get(&id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let mut students: Vec<Student> =
            self.tables.read().await.students.values().cloned().collect();
        students.sort_by_key(|s| s.created_at);
        Ok(students)
    }

    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
        now: Time,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let student = tables
            .students
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("student {}", id)))?;
        student.status = status;
        student.updated_at = now;
        Ok(())
    }

    async fn update_last_intervention(
        &self,
        id: StudentId,
        intervention_id: InterventionId,
        now: Time,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let student = tables
            .students
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("student {}", id)))?;
        student.last_intervention_id = Some(intervention_id);
        student.updated_at = now;
        Ok(())
    }

    async fn append_daily_log(&self, log: &DailyLog) -> Result<()> {
        self.tables.write().await.daily_logs.push(log.clone());
        Ok(())
    }

    async fn recent_daily_logs(
        &self,
        student_id: StudentId,
        limit: usize,
    ) -> Result<Vec<DailyLog>> {
        let tables = self.tables.read().await;
        let mut logs: Vec<DailyLog> = tables
            .daily_logs
            .iter()
            .filter(|l| l.student_id == student_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        logs.truncate(limit);
        Ok(logs)
    }

    async fn create_intervention(&self, intervention: &Intervention) -> Result<()> {
        self.tables
            .write()
            .await
            .interventions
            .insert(intervention.id, intervention.clone());
        Ok(())
    }

    async fn load_intervention(&self, id: InterventionId) -> Result<Option<Intervention>> {
        Ok(self.tables.read().await.interventions.get(&id).cloned())
    }

    async fn active_intervention(&self, student_id: StudentId) -> Result<Option<Intervention>> {
        let tables = self.tables.read().await;
        let mut live: Vec<&Intervention> = tables
            .interventions
            .values()
            .filter(|i| i.student_id == student_id && i.is_assigned())
            .collect();
        live.sort_by_key(|i| i.assigned_at);
        Ok(live.last().map(|i| (*i).clone()))
    }

    async fn update_assignment(
        &self,
        id: InterventionId,
        task: &str,
        assigned_by: &str,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let intervention = tables
            .interventions
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("intervention {}", id)))?;
        intervention.task = task.to_string();
        intervention.assigned_by = assigned_by.to_string();
        intervention.mentor_deadline = None;
        Ok(())
    }

    async fn set_mentor_deadline(&self, id: InterventionId, deadline: Time) -> Result<()> {
        let mut tables = self.tables.write().await;
        let intervention = tables
            .interventions
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("intervention {}", id)))?;
        intervention.mentor_deadline = Some(deadline);
        Ok(())
    }

    async fn complete_intervention(&self, id: InterventionId, completed_at: Time) -> Result<()> {
        let mut tables = self.tables.write().await;
        let intervention = tables
            .interventions
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("intervention {}", id)))?;
        intervention.status = InterventionStatus::Completed;
        intervention.completed_at = Some(completed_at);
        Ok(())
    }

    async fn overdue_interventions(&self, now: Time) -> Result<Vec<Intervention>> {
        let tables = self.tables.read().await;
        let mut overdue: Vec<Intervention> = tables
            .interventions
            .values()
            .filter(|i| i.is_assigned() && i.mentor_deadline.map_or(false, |d| d < now))
            .cloned()
            .collect();
        overdue.sort_by_key(|i| i.assigned_at);
        Ok(overdue)
    }

    async fn append_mentor_action(&self, action: &MentorAction) -> Result<()> {
        self.tables.write().await.mentor_actions.push(action.clone());
        Ok(())
    }

    async fn has_mentor_action(
        &self,
        intervention_id: InterventionId,
        action: &str,
    ) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .mentor_actions
            .iter()
            .any(|a| a.intervention_id == Some(intervention_id) && a.action == action))
    }
}
