// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite schema helpers shared by repository implementations.
//!
//! Applies migrations on start-up so `db --init` and every other
//! subcommand see a consistent database.

use sqlx::migrate::MigrateDatabase;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Runs pending migrations against the provided SQLite pool.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("ensuring database schema is up to date");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("database schema is up to date");
    Ok(())
}

/// Creates the SQLite database file if it doesn't already exist.
/// `SqlitePool::connect` fails against a missing file unless the
/// connection options explicitly allow creation, so callers that only
/// have a bare URL go through this first.
pub async fn create_database_if_missing(database_url: &str) -> Result<(), sqlx::Error> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        debug!(%database_url, "database does not exist, creating");
        sqlx::Sqlite::create_database(database_url).await?;
        info!(%database_url, "created new SQLite database");
    }
    Ok(())
}

/// Drops the SQLite database file if it exists (`db --drop`).
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    if sqlx::Sqlite::database_exists(database_url).await? {
        sqlx::Sqlite::drop_database(database_url).await?;
        info!(%database_url, "dropped SQLite database");
    }
    Ok(())
}

/// Creates, connects to, and migrates a database in one call. The
/// `db --init` and `ftp|nfs|smb|local` entry points both go through this so
/// a first-ever collection run doesn't need a separate `db --init` step.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_database_if_missing(database_url).await?;
    let pool = SqlitePool::connect(database_url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn create_database_if_missing_is_idempotent() {
        let temp = NamedTempFile::new().unwrap();
        let db_path = temp.path().to_str().unwrap();
        let db_url = format!("sqlite://{db_path}");
        drop(temp);

        create_database_if_missing(&db_url).await.unwrap();
        create_database_if_missing(&db_url).await.unwrap();
    }

    #[tokio::test]
    async fn initialize_database_creates_expected_tables() {
        let temp = NamedTempFile::new().unwrap();
        let db_path = temp.path().to_str().unwrap();
        let db_url = format!("sqlite://{db_path}");
        drop(temp);

        let pool = initialize_database(&db_url).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('workspace', 'host', 'file', 'path', 'match_rule')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let temp = NamedTempFile::new().unwrap();
        let db_path = temp.path().to_str().unwrap();
        let db_url = format!("sqlite://{db_path}");
        drop(temp);

        create_database_if_missing(&db_url).await.unwrap();
        let pool = SqlitePool::connect(&db_url).await.unwrap();

        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn drop_database_removes_an_existing_file() {
        let temp = NamedTempFile::new().unwrap();
        let db_path = temp.path().to_str().unwrap();
        let db_url = format!("sqlite://{db_path}");
        drop(temp);

        create_database_if_missing(&db_url).await.unwrap();
        assert!(sqlx::Sqlite::database_exists(&db_url).await.unwrap());

        drop_database(&db_url).await.unwrap();
        assert!(!sqlx::Sqlite::database_exists(&db_url).await.unwrap());
    }
}
