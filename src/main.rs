use std::sync::Arc;

use tower_http::trace::TraceLayer;

use daneo_backend_rust::config::Config;
use daneo_backend_rust::db::Database;
use daneo_backend_rust::logging;
use daneo_backend_rust::routes;
use daneo_backend_rust::services::llm_provider::GeminiProvider;
use daneo_backend_rust::state::AppState;
use daneo_backend_rust::workers::WorkerManager;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let database = match Database::from_env().await {
        Ok(database) => Some(Arc::new(database)),
        Err(err) => {
            tracing::warn!(error = %err, "word store not initialized");
            None
        }
    };

    let llm = Arc::new(GeminiProvider::from_env());
    if !llm.is_available() {
        tracing::warn!("GOOGLE_AI_API_KEY not set, AI endpoints will answer 503");
    }

    let worker_manager = match WorkerManager::new(database.clone(), Arc::clone(&llm)).await {
        Ok(manager) => {
            if let Err(e) = manager.start().await {
                tracing::error!(error = %e, "failed to start workers");
            }
            Some(manager)
        }
        Err(e) => {
            tracing::warn!(error = %e, "worker manager not initialized");
            None
        }
    };

    let state = AppState::new(database, llm);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(routes::cors_layer());

    let addr = config.bind_addr();
    tracing::info!(%addr, "daneo-backend-rust listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped, initiating graceful shutdown sequence");

    if let Some(ref manager) = worker_manager {
        manager.stop().await;
    }

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
