use std::sync::Arc;

use tracing::{error, info};

use crate::db::Database;
use crate::services::daily_words;
use crate::services::llm_provider::GeminiProvider;

pub(crate) async fn run_once(database: Arc<Database>, llm: Arc<GeminiProvider>) {
    match daily_words::run(llm.as_ref(), database.as_ref()).await {
        Ok(inserted) => info!(inserted, "daily words job finished"),
        Err(e) => error!(error = %e, "daily words job failed"),
    }
}
