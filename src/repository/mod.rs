//! Repository layer for database operations

pub mod books;
pub mod copies;
pub mod locations;
pub mod members;
pub mod reports;
pub mod transactions;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::{config::DatabaseConfig, error::{AppError, AppResult}};

/// Schema migrations embedded at compile time
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
    pub members: members::MembersRepository,
    pub locations: locations::LocationsRepository,
    pub transactions: transactions::TransactionsRepository,
    pub reports: reports::ReportsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            transactions: transactions::TransactionsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the pool described by `config` and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            // SQLite ships with foreign keys off
            .foreign_keys(true)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);

        if config.is_in_memory() {
            // Every connection to :memory: is a separate database, so keep exactly one alive
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url = %config.url, "Connected to database");

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Round-trip to the store
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// `%fragment%` for a case-insensitive LIKE against a lowered column
pub(crate) fn like_pattern(fragment: Option<&str>) -> Option<String> {
    fragment
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| format!("%{}%", f.to_lowercase()))
}

/// Clamp caller paging to sane bounds
pub(crate) fn page(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> (i64, i64) {
    let limit = limit.unwrap_or(default_limit).clamp(1, 1000);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}
