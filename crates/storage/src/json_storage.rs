//! JSON file storage implementation.
//!
//! Stores each entity as one JSON file under a data directory. Durable
//! enough for a single-node deployment; anything heavier plugs in behind
//! the same trait.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use studytrack_core::{
    DailyLog, Intervention, InterventionId, InterventionStatus, MentorAction, Student, StudentId,
    StudentStatus, Time,
};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
    // Serializes read-modify-write updates so two writers cannot clobber
    // each other's row state.
    write_lock: Mutex<()>,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the entity directories.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("students")).await?;
        fs::create_dir_all(root.join("daily_logs")).await?;
        fs::create_dir_all(root.join("interventions")).await?;
        fs::create_dir_all(root.join("mentor_actions")).await?;

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn student_path(&self, id: StudentId) -> PathBuf {
        self.root.join("students").join(format!("{}.json", id))
    }
    fn daily_log_path(&self, log: &DailyLog) -> PathBuf {
        self.root.join("daily_logs").join(format!("{}.json", log.id))
    }
    fn intervention_path(&self, id: InterventionId) -> PathBuf {
        self.root.join("interventions").join(format!("{}.json", id))
    }
    fn mentor_action_path(&self, action: &MentorAction) -> PathBuf {
        self.root
            .join("mentor_actions")
            .join(format!("{}.json", action.id))
    }

    async fn load_student_required(&self, id: StudentId) -> Result<Student> {
        read_json(&self.student_path(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("student {}", id)))
    }

    async fn load_intervention_required(&self, id: InterventionId) -> Result<Intervention> {
        read_json(&self.intervention_path(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("intervention {}", id)))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn create_student(&self, student: &Student) -> Result<()> {
        write_json(&self.student_path(student.id), student).await
    }

    async fn load_student(&self, id: StudentId) -> Result<Option<Student>> {
        read_json(&self.student_path(id)).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let mut students: Vec<Student> = list_dir(&self.root.join("students")).await?;
        students.sort_by_key(|s| s.created_at);
        Ok(students)
    }

    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
        now: Time,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut student = self.load_student_required(id).await?;
        student.status = status;
        student.updated_at = now;
        write_json(&self.student_path(id), &student).await
    }

    async fn update_last_intervention(
        &self,
        id: StudentId,
        intervention_id: InterventionId,
        now: Time,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut student = self.load_student_required(id).await?;
        student.last_intervention_id = Some(intervention_id);
        student.updated_at = now;
        write_json(&self.student_path(id), &student).await
    }

    async fn append_daily_log(&self, log: &DailyLog) -> Result<()> {
        write_json(&self.daily_log_path(log), log).await
    }

    async fn recent_daily_logs(
        &self,
        student_id: StudentId,
        limit: usize,
    ) -> Result<Vec<DailyLog>> {
        let all: Vec<DailyLog> = list_dir(&self.root.join("daily_logs")).await?;
        let mut logs: Vec<DailyLog> = all
            .into_iter()
            .filter(|l| l.student_id == student_id)
            .collect();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        logs.truncate(limit);
        Ok(logs)
    }

    async fn create_intervention(&self, intervention: &Intervention) -> Result<()> {
        write_json(&self.intervention_path(intervention.id), intervention).await
    }

    async fn load_intervention(&self, id: InterventionId) -> Result<Option<Intervention>> {
        read_json(&self.intervention_path(id)).await
    }

    async fn active_intervention(&self, student_id: StudentId) -> Result<Option<Intervention>> {
        let all: Vec<Intervention> = list_dir(&self.root.join("interventions")).await?;
        let mut live: Vec<Intervention> = all
            .into_iter()
            .filter(|i| i.student_id == student_id && i.is_assigned())
            .collect();
        live.sort_by_key(|i| i.assigned_at);
        Ok(live.pop())
    }

    async fn update_assignment(
        &self,
        id: InterventionId,
        task: &str,
        assigned_by: &str,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut intervention = self.load_intervention_required(id).await?;
        intervention.task = task.to_string();
        intervention.assigned_by = assigned_by.to_string();
        intervention.mentor_deadline = None;
        write_json(&self.intervention_path(id), &intervention).await
    }

    async fn set_mentor_deadline(&self, id: InterventionId, deadline: Time) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut intervention = self.load_intervention_required(id).await?;
        intervention.mentor_deadline = Some(deadline);
        write_json(&self.intervention_path(id), &intervention).await
    }

    async fn complete_intervention(&self, id: InterventionId, completed_at: Time) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut intervention = self.load_intervention_required(id).await?;
        intervention.status = InterventionStatus::Completed;
        intervention.completed_at = Some(completed_at);
        write_json(&self.intervention_path(id), &intervention).await
    }

    async fn overdue_interventions(&self, now: Time) -> Result<Vec<Intervention>> {
        let all: Vec<Intervention> = list_dir(&self.root.join("interventions")).await?;
        let mut overdue: Vec<Intervention> = all
            .into_iter()
            .filter(|i| i.is_assigned() && i.mentor_deadline.map_or(false, |d| d < now))
            .collect();
        overdue.sort_by_key(|i| i.assigned_at);
        Ok(overdue)
    }

    async fn append_mentor_action(&self, action: &MentorAction) -> Result<()> {
        write_json(&self.mentor_action_path(action), action).await
    }

    async fn has_mentor_action(
        &self,
        intervention_id: InterventionId,
        action: &str,
    ) -> Result<bool> {
        let all: Vec<MentorAction> = list_dir(&self.root.join("mentor_actions")).await?;
        Ok(all
            .iter()
            .any(|a| a.intervention_id == Some(intervention_id) && a.action == action))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// List every JSON entity in a directory. A directory that does not exist
/// yet is an empty result, not an error.
async fn list_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut out = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let data = fs::read_to_string(&path).await?;
        out.push(serde_json::from_str(&data)?);
    }
    Ok(out)
}
