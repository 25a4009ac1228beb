//! LifeLink Server — University Blood-Donation Coordination Backend
//!
//! Main entry point that wires all crates together and runs the
//! matching pipeline: the request watcher plus the retention scheduler.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use lifelink_core::config::AppConfig;
use lifelink_core::error::AppError;
use lifelink_core::traits::ChangeFeed;
use lifelink_database::store::{DonorDirectory, NotificationStore, RequestStore};
use lifelink_database::{DatabasePool, repositories};
use lifelink_realtime::MemoryChangeFeed;
use lifelink_service::{EligibleDonorResolver, MatchingEngine, NotificationDispatcher};
use lifelink_worker::jobs::NotificationRetentionJob;
use lifelink_worker::{CronScheduler, RequestWatcher};

#[tokio::main]
async fn main() {
    let env = std::env::var("LIFELINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main pipeline run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LifeLink v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    lifelink_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let donor_repo: Arc<dyn DonorDirectory> =
        Arc::new(repositories::DonorRepository::new(db.pool().clone()));
    let request_repo: Arc<dyn RequestStore> =
        Arc::new(repositories::RequestRepository::new(db.pool().clone()));
    let notification_repo: Arc<dyn NotificationStore> =
        Arc::new(repositories::NotificationRepository::new(db.pool().clone()));

    // ── Step 3: Change feed ──────────────────────────────────────
    let feed: Arc<dyn ChangeFeed> = Arc::new(MemoryChangeFeed::from_config(&config.feed));

    // ── Step 4: Matching engine ──────────────────────────────────
    let resolver = EligibleDonorResolver::new(Arc::clone(&donor_repo));
    let dispatcher = NotificationDispatcher::new(Arc::clone(&notification_repo));
    let engine = Arc::new(MatchingEngine::new(
        resolver,
        dispatcher,
        Arc::clone(&request_repo),
    ));

    // ── Step 5: Request watcher ──────────────────────────────────
    let watcher_handle = if config.watcher.enabled {
        let watcher = RequestWatcher::new(
            Arc::clone(&feed),
            Arc::clone(&engine),
            Arc::clone(&request_repo),
            config.watcher.clone(),
        );
        Some(watcher.start().await?)
    } else {
        tracing::warn!("Request watcher disabled by configuration");
        None
    };

    // ── Step 6: Retention scheduler ──────────────────────────────
    let scheduler = if config.worker.enabled {
        let retention = Arc::new(NotificationRetentionJob::new(
            Arc::clone(&notification_repo),
            &config.worker,
        ));
        let mut scheduler = CronScheduler::new(retention).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Retention worker disabled by configuration");
        None
    };

    tracing::info!("LifeLink pipeline running; press Ctrl+C to stop");

    // ── Step 7: Wait for shutdown ────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;
    tracing::info!("Shutdown signal received");

    if let Some(handle) = watcher_handle {
        handle.stop().await?;
    }
    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("LifeLink shut down cleanly");
    Ok(())
}
