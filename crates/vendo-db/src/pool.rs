//! # Database Pool Management
//!
//! Opens and configures the SQLite pool behind the snapshot store.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(data_dir.join("vendo.db"))                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await                                           │
//! │       ├── build connect options (WAL, busy timeout, create-if-missing)  │
//! │       ├── build the pool                                                │
//! │       └── apply embedded migrations                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteSlot::new(db) ──► CartStore::load(slot) / ...                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The workload is tiny (one row read per store at startup, one upsert per
//! committed mutation), so the pool is sized for responsiveness rather
//! than throughput. WAL mode keeps the startup reads from ever waiting on
//! an in-flight write-back.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::snapshot::SnapshotRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. `:memory:` opens an in-memory
    /// database (tests).
    pub path: PathBuf,

    /// Pool size. Defaults to 4; the snapshot workload rarely needs more
    /// than one connection at a time.
    pub max_connections: u32,

    /// How long a busy database may block a statement before it errors.
    pub busy_timeout: Duration,

    /// Apply embedded migrations while opening. Defaults to true; disable
    /// only when a migration run is orchestrated separately.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file at `path` (created on first open).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Overrides the pool size.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enables or disables migration on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// An isolated in-memory database for tests.
    ///
    /// The pool is pinned to a single connection: an in-memory SQLite
    /// database lives and dies with its connection, so a second
    /// connection would see a different (empty) database.
    pub fn in_memory() -> Self {
        DbConfig {
            path: PathBuf::from(":memory:"),
            max_connections: 1,
            busy_timeout: Duration::from_secs(1),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open database handle.
///
/// Cloning is cheap (the pool is reference-counted), so the handle can be
/// shared between the slot adapter and diagnostics code.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database: builds the pool and applies migrations.
    ///
    /// SQLite is configured the way a local client store wants it:
    /// - WAL journal, so store hydration reads never block on write-backs
    /// - NORMAL synchronous; losing the very last write-back on a crash
    ///   is acceptable because the in-memory state is authoritative
    /// - `create_if_missing`, since first launch has no database yet
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.path.display(), "Opening snapshot database");

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    /// The underlying pool, for queries the repository does not cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the snapshot repository.
    pub fn snapshots(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.pool.clone())
    }

    /// Closes the pool. Call on shutdown; operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing snapshot database");
        self.pool.close().await;
    }

    /// True when the database can still execute statements.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
