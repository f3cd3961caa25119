//! Deadline-driven escalation of unanswered interventions.
//!
//! A recurring sweep promotes interventions past their mentor deadline to
//! either an escalation audit entry or an automatic unlock, so no student
//! stays locked indefinitely when no mentor responds.

#![warn(missing_docs)]

pub mod worker;

pub use worker::{
    EscalationWorker, SweepStats, WorkerError, ACTION_AUTO_UNLOCK, ACTION_ESCALATE, AUTO_MENTOR,
    DEFAULT_UNLOCK_TASK, HEAD_MENTOR,
};
