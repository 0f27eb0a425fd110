mod daily_words;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::db::Database;
use crate::services::llm_provider::GeminiProvider;

const DEFAULT_DAILY_WORDS_CRON: &str = "0 0 0 * * *";

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Owns the cron scheduler and the shutdown channel for background jobs.
/// The only job in this service is the daily word addition.
pub struct WorkerManager {
    scheduler: Mutex<JobScheduler>,
    shutdown_tx: broadcast::Sender<()>,
    database: Option<Arc<Database>>,
    llm: Arc<GeminiProvider>,
}

impl WorkerManager {
    pub async fn new(
        database: Option<Arc<Database>>,
        llm: Arc<GeminiProvider>,
    ) -> Result<Self, WorkerError> {
        let scheduler = JobScheduler::new().await.map_err(WorkerError::Scheduler)?;
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            scheduler: Mutex::new(scheduler),
            shutdown_tx,
            database,
            llm,
        })
    }

    pub async fn start(&self) -> Result<(), WorkerError> {
        let enabled = std::env::var("ENABLE_DAILY_WORDS_WORKER")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        if !enabled {
            info!("daily words worker disabled via env");
            return Ok(());
        }

        let Some(database) = self.database.clone() else {
            info!("no word store configured, daily words worker not scheduled");
            return Ok(());
        };
        if !self.llm.is_available() {
            info!("LLM not configured, daily words worker not scheduled");
            return Ok(());
        }

        let schedule = std::env::var("DAILY_WORDS_CRON")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DAILY_WORDS_CRON.to_string());

        let llm = Arc::clone(&self.llm);
        let shutdown_rx = self.shutdown_tx.subscribe();
        let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let database = Arc::clone(&database);
            let llm = Arc::clone(&llm);
            let mut rx = shutdown_rx.resubscribe();
            Box::pin(async move {
                tokio::select! {
                    _ = rx.recv() => {},
                    _ = daily_words::run_once(database, llm) => {}
                }
            })
        })
        .map_err(WorkerError::Scheduler)?;

        let scheduler = self.scheduler.lock().await;
        scheduler.add(job).await.map_err(WorkerError::Scheduler)?;
        scheduler.start().await.map_err(WorkerError::Scheduler)?;
        info!(%schedule, "daily words worker scheduled");

        Ok(())
    }

    pub async fn stop(&self) {
        info!("stopping workers...");
        let _ = self.shutdown_tx.send(());

        let mut scheduler = self.scheduler.lock().await;
        if let Err(e) = scheduler.shutdown().await {
            error!(error = %e, "scheduler shutdown failed");
        }
    }
}
