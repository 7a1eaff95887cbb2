use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use chrono_tz::Tz;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{GuestRepository, InvitationRepository, KeyValueStore, UserRepository};
use crate::domain::services::{
    auth_service::AuthService, card::CardRenderer, draft_service::DraftService,
    invitation_service::InvitationService, rsvp::RsvpService,
};
use crate::infra::templates::load_templates;
use crate::infra::repositories::{
    postgres_guest_repo::PostgresGuestRepo, postgres_invitation_repo::PostgresInvitationRepo,
    postgres_kv_store::PostgresKeyValueStore, postgres_user_repo::PostgresUserRepo,
    sqlite_guest_repo::SqliteGuestRepo, sqlite_invitation_repo::SqliteInvitationRepo,
    sqlite_kv_store::SqliteKeyValueStore, sqlite_user_repo::SqliteUserRepo,
};

/// Storage adapters for one backend.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub kv: Arc<dyn KeyValueStore>,
}

impl Repositories {
    pub fn sqlite(pool: &SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserRepo::new(pool.clone())),
            invitations: Arc::new(SqliteInvitationRepo::new(pool.clone())),
            guests: Arc::new(SqliteGuestRepo::new(pool.clone())),
            kv: Arc::new(SqliteKeyValueStore::new(pool.clone())),
        }
    }

    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            invitations: Arc::new(PostgresInvitationRepo::new(pool.clone())),
            guests: Arc::new(PostgresGuestRepo::new(pool.clone())),
            kv: Arc::new(PostgresKeyValueStore::new(pool.clone())),
        }
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        Repositories::postgres(&pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        Repositories::sqlite(&pool)
    };

    let fontdb = CardRenderer::load_fonts(config.font_dir.as_deref());
    build_state(config, repos, fontdb)
}

/// Wires services over already-migrated repositories.
pub fn build_state(config: &Config, repos: Repositories, fontdb: Arc<resvg::usvg::fontdb::Database>) -> AppState {
    let templates = Arc::new(load_templates().expect("Failed to load templates"));
    let timezone = display_timezone(&config.display_timezone);

    let auth_service = Arc::new(AuthService::new(repos.users, config.session_secret.as_deref()));
    let invitation_service = Arc::new(InvitationService::new(repos.invitations.clone(), repos.guests.clone(), timezone));
    let rsvp_service = Arc::new(RsvpService::new(repos.invitations.clone(), repos.guests.clone()));
    let draft_service = Arc::new(DraftService::new(
        repos.kv,
        chrono::Duration::seconds(config.draft_ttl_secs),
    ));
    let card_renderer = Arc::new(CardRenderer::new(templates.clone(), fontdb, timezone, &config.app_base_url));

    AppState {
        config: config.clone(),
        invitation_repo: repos.invitations,
        guest_repo: repos.guests,
        auth_service,
        invitation_service,
        rsvp_service,
        draft_service,
        card_renderer,
        templates,
    }
}

fn display_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("Unknown DISPLAY_TIMEZONE {:?}, falling back to UTC", name);
        Tz::UTC
    })
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
