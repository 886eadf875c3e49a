use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::{AppState, Repositories};
use crate::infra::repositories::{
    postgres_account_repo::PostgresAccountRepo, postgres_auth_repo::PostgresAuthRepo,
    postgres_budget_allocation_repo::PostgresBudgetAllocationRepo, postgres_budget_repo::PostgresBudgetRepo,
    postgres_club_repo::PostgresClubRepo, postgres_counter_repo::PostgresCounterRepo,
    postgres_event_repo::PostgresEventRepo, postgres_member_repo::PostgresMemberRepo,
    postgres_prize_repo::PostgresPrizeRepo, postgres_report_repo::PostgresReportRepo,
    sqlite_account_repo::SqliteAccountRepo, sqlite_auth_repo::SqliteAuthRepo,
    sqlite_budget_allocation_repo::SqliteBudgetAllocationRepo, sqlite_budget_repo::SqliteBudgetRepo,
    sqlite_club_repo::SqliteClubRepo, sqlite_counter_repo::SqliteCounterRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_member_repo::SqliteMemberRepo,
    sqlite_prize_repo::SqlitePrizeRepo, sqlite_report_repo::SqliteReportRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let timeout = config.storage_timeout();

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500))
            .options([("statement_timeout", timeout.as_millis().to_string())]);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(timeout)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_repositories(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(timeout)
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_repositories(pool)
    };

    AppState::new(config.clone(), repos).expect("Failed to build application state")
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        counters: Arc::new(SqliteCounterRepo::new(pool.clone())),
        clubs: Arc::new(SqliteClubRepo::new(pool.clone())),
        members: Arc::new(SqliteMemberRepo::new(pool.clone())),
        events: Arc::new(SqliteEventRepo::new(pool.clone())),
        budgets: Arc::new(SqliteBudgetRepo::new(pool.clone())),
        allocations: Arc::new(SqliteBudgetAllocationRepo::new(pool.clone())),
        reports: Arc::new(SqliteReportRepo::new(pool.clone())),
        prizes: Arc::new(SqlitePrizeRepo::new(pool.clone())),
        accounts: Arc::new(SqliteAccountRepo::new(pool.clone())),
        auth: Arc::new(SqliteAuthRepo::new(pool)),
    }
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        counters: Arc::new(PostgresCounterRepo::new(pool.clone())),
        clubs: Arc::new(PostgresClubRepo::new(pool.clone())),
        members: Arc::new(PostgresMemberRepo::new(pool.clone())),
        events: Arc::new(PostgresEventRepo::new(pool.clone())),
        budgets: Arc::new(PostgresBudgetRepo::new(pool.clone())),
        allocations: Arc::new(PostgresBudgetAllocationRepo::new(pool.clone())),
        reports: Arc::new(PostgresReportRepo::new(pool.clone())),
        prizes: Arc::new(PostgresPrizeRepo::new(pool.clone())),
        accounts: Arc::new(PostgresAccountRepo::new(pool.clone())),
        auth: Arc::new(PostgresAuthRepo::new(pool)),
    }
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
