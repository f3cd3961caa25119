//! studytrack CLI - daily engagement tracking with mentor escalation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use studytrack_core::{Clock, Config, InterventionId, Student, StudentId, SystemClock};
use studytrack_escalation::EscalationWorker;
use studytrack_lifecycle::{AssignPayload, CheckinPayload, InterventionService};
use studytrack_notify::{ConsoleNotifier, Notifier, NullBroadcaster, WebhookNotifier};
use studytrack_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "studytrack")]
#[command(about = "Daily engagement tracking with mentor escalation", long_about = None)]
struct Cli {
    /// Data directory for the JSON store
    #[arg(long, default_value = ".studytrack")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a student record
    Seed {
        /// Display name
        name: String,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
    },
    /// List students
    Students,
    /// Submit a daily check-in
    Checkin {
        /// Student ID
        student_id: String,
        /// Quiz score (0-10)
        #[arg(long)]
        quiz: i64,
        /// Focused-study minutes
        #[arg(long)]
        focus: i64,
    },
    /// Assign a remediation task
    Assign {
        /// Student ID
        student_id: String,
        /// Task description
        #[arg(long)]
        task: String,
        /// Acting mentor identity
        #[arg(long, default_value = "mentor@org")]
        mentor: String,
    },
    /// Mark an intervention complete
    Complete {
        /// Student ID
        student_id: String,
        /// Intervention ID
        intervention_id: String,
    },
    /// Show a student's current state
    State {
        /// Student ID
        student_id: String,
    },
    /// Show a student's recent check-ins
    History {
        /// Student ID
        student_id: String,
        /// Number of entries
        #[arg(long, default_value = "7")]
        limit: usize,
    },
    /// Run one escalation sweep
    Sweep,
    /// Run the periodic escalation worker until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let storage: Arc<dyn Storage> = Arc::new(JsonStorage::new(&cli.data_dir).await?);
    let notifier: Arc<dyn Notifier> = if config.webhook_url.is_some() {
        Arc::new(WebhookNotifier::new(config.webhook_url.clone()))
    } else {
        Arc::new(ConsoleNotifier)
    };
    let clock = Arc::new(SystemClock);
    let service = Arc::new(InterventionService::new(
        storage.clone(),
        notifier,
        Arc::new(NullBroadcaster),
        clock.clone(),
        config.clone(),
    ));

    match cli.command {
        Commands::Seed { name, email } => {
            let student = Student::new(name, email, clock.now());
            storage.create_student(&student).await?;
            println!("{}", student.id);
        }
        Commands::Students => {
            for student in storage.list_students().await? {
                println!("{}  {:<24} {}", student.id, student.name, student.status);
            }
        }
        Commands::Checkin {
            student_id,
            quiz,
            focus,
        } => {
            let student_id: StudentId = student_id.parse()?;
            let payload = CheckinPayload::new(student_id, quiz, focus)?;
            let outcome = service.handle_checkin(payload).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Assign {
            student_id,
            task,
            mentor,
        } => {
            let student_id: StudentId = student_id.parse()?;
            let payload = AssignPayload::new(student_id, task, mentor)?;
            service.assign_intervention(payload).await?;
            let state = service.student_state(student_id).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Complete {
            student_id,
            intervention_id,
        } => {
            let student_id: StudentId = student_id.parse()?;
            let intervention_id: InterventionId = intervention_id.parse()?;
            service.mark_complete(student_id, intervention_id).await?;
            let state = service.student_state(student_id).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::State { student_id } => {
            let student_id: StudentId = student_id.parse()?;
            let state = service.student_state(student_id).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::History { student_id, limit } => {
            let student_id: StudentId = student_id.parse()?;
            for log in storage.recent_daily_logs(student_id, limit).await? {
                println!(
                    "{}  quiz={:<2} focus={}min",
                    log.created_at.format("%Y-%m-%d %H:%M"),
                    log.quiz_score,
                    log.focus_minutes
                );
            }
        }
        Commands::Sweep => {
            let worker = EscalationWorker::new(storage, service, clock, config);
            let stats = worker.sweep().await;
            println!(
                "scanned={} escalated={} unlocked={} skipped={}",
                stats.scanned, stats.escalated, stats.unlocked, stats.skipped
            );
        }
        Commands::Watch => {
            let worker = EscalationWorker::new(storage, service, clock, config);
            let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
            let handle = tokio::spawn(worker.run(stop_rx));

            tokio::signal::ctrl_c().await?;
            info!("shutting down");
            let _ = stop_tx.send(true);
            handle.await?;
        }
    }

    Ok(())
}
