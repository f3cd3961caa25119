//! Outbound collaborator interfaces: mentor notifications and realtime
//! status fan-out.
//!
//! Both channels are best-effort. The lifecycle commits its durable
//! transition first and tolerates failures here.

#![warn(missing_docs)]

pub mod notifier;
pub mod broadcast;

pub use broadcast::{ChannelBroadcaster, NullBroadcaster, StatusBroadcaster, StatusUpdate};
pub use notifier::{ConsoleNotifier, MentorAlert, Notifier, NotifyError, WebhookNotifier};
