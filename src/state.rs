use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::db::Database;
use crate::services::llm_provider::GeminiProvider;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    database: Option<Arc<Database>>,
    llm: Arc<GeminiProvider>,
}

impl AppState {
    pub fn new(database: Option<Arc<Database>>, llm: Arc<GeminiProvider>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            database,
            llm,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn database(&self) -> Option<Arc<Database>> {
        self.database.clone()
    }

    pub fn llm(&self) -> Arc<GeminiProvider> {
        Arc::clone(&self.llm)
    }
}
