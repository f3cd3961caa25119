//! Post-transition status fan-out.

use serde::Serialize;
use studytrack_core::{Intervention, StudentId, StudentStatus, Time};

/// Snapshot pushed to listeners after a status transition.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    /// Student whose status changed
    pub student_id: StudentId,
    /// Status after the transition
    pub status: StudentStatus,
    /// Live intervention, if the transition left one active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<Intervention>,
    /// When the transition committed
    pub timestamp: Time,
}

/// Fire-and-forget listener interface.
///
/// Informational only; delivery is not part of lifecycle correctness and
/// implementations must not block.
pub trait StatusBroadcaster: Send + Sync {
    /// Push one snapshot.
    fn status_changed(&self, update: StatusUpdate);
}

/// Broadcaster that drops every update.
#[derive(Debug, Default)]
pub struct NullBroadcaster;

impl StatusBroadcaster for NullBroadcaster {
    fn status_changed(&self, _update: StatusUpdate) {}
}

/// Fans updates out over a tokio broadcast channel.
///
/// Transport adapters (websocket, SSE) subscribe on their side of the
/// channel; a send with no live receivers is not an error.
pub struct ChannelBroadcaster {
    tx: tokio::sync::broadcast::Sender<StatusUpdate>,
}

impl ChannelBroadcaster {
    /// Create a broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = tokio::sync::broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe a new listener.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StatusUpdate> {
        self.tx.subscribe()
    }
}

impl StatusBroadcaster for ChannelBroadcaster {
    fn status_changed(&self, update: StatusUpdate) {
        // Lagging or absent receivers are their own problem.
        let _ = self.tx.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_broadcaster_delivers_to_subscriber() {
        let broadcaster = ChannelBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        let update = StatusUpdate {
            student_id: StudentId::new(),
            status: StudentStatus::Locked,
            intervention: None,
            timestamp: chrono::Utc::now(),
        };
        broadcaster.status_changed(update.clone());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.student_id, update.student_id);
        assert_eq!(received.status, StudentStatus::Locked);
    }

    #[test]
    fn send_without_receivers_is_fine() {
        let broadcaster = ChannelBroadcaster::new(8);
        broadcaster.status_changed(StatusUpdate {
            student_id: StudentId::new(),
            status: StudentStatus::OnTrack,
            intervention: None,
            timestamp: chrono::Utc::now(),
        });
    }
}
