//! Mentor notification channel.

use async_trait::async_trait;
use serde::Serialize;
use studytrack_core::{DailyLogId, StudentId, Time};

/// Errors raised by a notification channel.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// No webhook URL configured
    #[error("mentor webhook not configured")]
    NotConfigured,

    /// Delivery failed
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Payload delivered to the mentor channel when a student fails a check-in.
#[derive(Debug, Clone, Serialize)]
pub struct MentorAlert {
    /// Student who failed the check-in
    pub student_id: StudentId,
    /// Display name, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Quiz score from the failing check-in
    pub quiz_score: u8,
    /// Focus minutes from the failing check-in
    pub focus_minutes: u32,
    /// Log row for the failing check-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_log_id: Option<DailyLogId>,
    /// When the check-in was evaluated
    pub timestamp: Time,
}

/// Channel that delivers mentor alerts.
///
/// Failures must never propagate past the caller's logging; delivery is
/// not on the critical path of any status transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert.
    async fn notify_mentor(&self, alert: &MentorAlert) -> Result<(), NotifyError>;
}

/// Posts alerts as JSON to a configured webhook (n8n or similar).
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookNotifier {
    /// Create a notifier for the given webhook URL.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_mentor(&self, alert: &MentorAlert) -> Result<(), NotifyError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(NotifyError::NotConfigured)?;
        self.client
            .post(url)
            .json(alert)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Logs alerts instead of delivering them. Development fallback when no
/// webhook is configured.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify_mentor(&self, alert: &MentorAlert) -> Result<(), NotifyError> {
        tracing::info!(
            student = %alert.student_id,
            quiz_score = alert.quiz_score,
            focus_minutes = alert.focus_minutes,
            "mentor notification (console mode)"
        );
        Ok(())
    }
}
