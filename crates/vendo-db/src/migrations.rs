//! # Database Migrations
//!
//! Embedded SQL migrations for the snapshot schema, applied on open.
//!
//! Two versioning layers coexist and must not be confused:
//! - these SQL migrations version the *table shape*
//! - the snapshot envelope version (vendo-store) versions the *payload*
//!
//! A schema change here never forces a payload migration, and vice versa.
//!
//! ## Adding a Migration
//! Drop a new `NNN_description.sql` into `migrations/sqlite/` with the
//! next sequence number. Existing files are immutable once shipped; the
//! checksum of every applied migration is recorded and re-verified.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// All SQL files under `migrations/sqlite/`, embedded at compile time so
/// the binary needs no runtime access to migration files.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration, in filename order, each inside its
/// own transaction. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;

    info!(total = MIGRATOR.migrations.len(), "Schema migrations applied");
    Ok(())
}

/// Migration bookkeeping, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations embedded in this build.
    pub total: usize,
    /// Migrations recorded as applied in the database.
    pub applied: usize,
}

/// Reads how many of the embedded migrations the database has applied.
pub async fn status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok(MigrationStatus {
        total: MIGRATOR.migrations.len(),
        applied: applied as usize,
    })
}
