use std::str::FromStr;
use std::sync::atomic::AtomicU8;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::auth::Credential;
use crate::domain::models::user::User;
use crate::domain::ports::{ImageStore, Notifier};
use crate::domain::services::auth_service::AuthService;
use crate::infra::fixtures::seed_demo_data;
use crate::infra::images::{HttpImageStore, PlaceholderImageStore};
use crate::infra::notify::log_notifier::LogNotifier;
use crate::infra::notify::webhook_notifier::WebhookNotifier;
use crate::infra::repositories::{
    memory_booking_repo::MemoryBookingRepo, memory_credential_repo::MemoryCredentialRepo,
    memory_modality_repo::MemoryModalityRepo, memory_session_repo::MemorySessionRepo,
    memory_user_repo::MemoryUserRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_credential_repo::SqliteCredentialRepo, sqlite_modality_repo::SqliteModalityRepo,
    sqlite_session_repo::SqliteSessionRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

/// Selects the backing mode: a reachable DATABASE_URL gives the durable sqlx
/// store; anything else falls back to seeded in-memory repositories. The
/// fallback is logged, never fatal.
pub async fn bootstrap_state(config: &Config) -> AppState {
    if let Some(url) = &config.database_url {
        match connect_sqlite(url).await {
            Ok(pool) => {
                info!("Initializing SQLite store with WAL mode...");
                let state = build_sqlite_state(config, pool);
                seed_admin(&state).await;
                return state;
            }
            Err(e) => {
                warn!("Database unavailable ({}); falling back to local in-memory mode", e);
            }
        }
    } else {
        info!("No DATABASE_URL configured; running in local in-memory mode");
    }

    let state = build_memory_state(config);
    seed_admin(&state).await;
    if let Err(e) = seed_demo_data(&state).await {
        warn!("Failed to seed demo fixtures: {:?}", e);
    }
    state
}

/// In-memory state without demo fixtures. Integration tests build on this.
pub fn build_memory_state(config: &Config) -> AppState {
    AppState {
        config: config.clone(),
        user_repo: Arc::new(MemoryUserRepo::new()),
        credential_repo: Arc::new(MemoryCredentialRepo::new()),
        modality_repo: Arc::new(MemoryModalityRepo::new()),
        session_repo: Arc::new(MemorySessionRepo::new()),
        booking_repo: Arc::new(MemoryBookingRepo::new()),
        auth_service: Arc::new(AuthService::new(config.clone())),
        notifier: Arc::new(LogNotifier::new()),
        image_store: Arc::new(PlaceholderImageStore::new(config.placeholder_image_url.clone())),
        release_hour: Arc::new(AtomicU8::new(config.booking_release_hour)),
    }
}

fn build_sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let notifier: Arc<dyn Notifier> = match &config.notify_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone(), config.notify_token.clone())),
        None => Arc::new(LogNotifier::new()),
    };

    let image_store: Arc<dyn ImageStore> = match &config.image_upload_url {
        Some(url) => Arc::new(HttpImageStore::new(url.clone(), config.notify_token.clone())),
        None => Arc::new(PlaceholderImageStore::new(config.placeholder_image_url.clone())),
    };

    AppState {
        config: config.clone(),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        credential_repo: Arc::new(SqliteCredentialRepo::new(pool.clone())),
        modality_repo: Arc::new(SqliteModalityRepo::new(pool.clone())),
        session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool)),
        auth_service: Arc::new(AuthService::new(config.clone())),
        notifier,
        image_store,
        release_hour: Arc::new(AtomicU8::new(config.booking_release_hour)),
    }
}

async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        sqlx::Error::Protocol(format!("migration failed: {}", e))
    })?;

    Ok(pool)
}

async fn seed_admin(state: &AppState) {
    let email = state.config.admin_email.clone();

    match state.user_repo.find_by_email(&email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let hash = match state.auth_service.hash_password(&state.config.admin_password) {
                Ok(h) => h,
                Err(e) => {
                    warn!("Failed to hash admin password: {:?}", e);
                    return;
                }
            };

            let admin = User::new_admin("Administrator".into(), email.clone());
            let credential = Credential::new(email.clone(), hash);

            if let Err(e) = state.credential_repo.create(&credential).await {
                warn!("Failed to seed admin credential: {:?}", e);
                return;
            }
            if let Err(e) = state.user_repo.create(&admin).await {
                warn!("Failed to seed admin profile: {:?}", e);
                return;
            }
            info!("Seeded admin account: {}", email);
        }
        Err(e) => warn!("Admin seed check failed: {:?}", e),
    }
}
