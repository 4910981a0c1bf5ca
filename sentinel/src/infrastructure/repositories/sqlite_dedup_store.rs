// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite-Backed Dedup Store
//!
//! The only `DedupStore` implementation. Deduplication is enforced by the
//! `(workspace_id, sha256)` primary key on `file`: concurrent
//! `upsert_file` calls race an `INSERT ... ON CONFLICT DO NOTHING`, and
//! SQLite's own transaction isolation picks the winner. A small sharded
//! mutex sits in front of that race so that two analyzer tasks hashing
//! the same bytes in this process serialize before either one reaches
//! the pool, rather than both paying for a round trip only one of them
//! needed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex as SyncMutex;
use sentinel_domain::entities::{File, Host, ObservedPath, Review, Rule, Workspace};
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{DedupStore, UpsertOutcome};
use sentinel_domain::value_objects::{
    Accuracy, ArchiveChain, HostId, PathId, Protocol, Relevance, ReviewVerdict, RuleId, Sha256Digest, SearchLocation, WorkspaceId,
};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

const UPSERT_SHARDS: usize = 32;
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(25);

pub struct SqliteDedupStore {
    pool: SqlitePool,
    upsert_locks: Vec<SyncMutex<()>>,
}

impl SqliteDedupStore {
    pub fn new(pool: SqlitePool) -> Self {
        let upsert_locks = (0..UPSERT_SHARDS).map(|_| SyncMutex::new(())).collect();
        Self { pool, upsert_locks }
    }

    /// Picks the in-process lock guarding concurrent upserts of the same
    /// content. Purely a local contention reducer; correctness still
    /// comes from the database's own conflict resolution.
    fn upsert_shard(&self, sha256: Sha256Digest) -> &SyncMutex<()> {
        let idx = sha256.as_bytes()[0] as usize % self.upsert_locks.len();
        &self.upsert_locks[idx]
    }
}

fn db_err(e: sqlx::Error) -> HunterError {
    match &e {
        sqlx::Error::PoolTimedOut => HunterError::ResourceExhausted(e.to_string()),
        sqlx::Error::Io(_) => HunterError::TransientIo(e.to_string()),
        sqlx::Error::Database(db_err) if is_busy_or_locked(db_err.message()) => HunterError::TransientIo(e.to_string()),
        _ => HunterError::DatabaseError(e.to_string()),
    }
}

fn is_busy_or_locked(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("database is locked") || message.contains("busy")
}

/// Retries a fallible operation with bounded exponential backoff when the
/// error is transient (see [`HunterError::is_recoverable`]). Gives up and
/// surfaces the last error after [`MAX_ATTEMPTS`] attempts.
async fn retry_transient<T, F, Fut>(mut op: F) -> Result<T, HunterError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, HunterError>>,
{
    let mut delay = INITIAL_BACKOFF;
    for attempt in 1..=MAX_ATTEMPTS {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable() && attempt < MAX_ATTEMPTS => {
                tracing::warn!(%e, attempt, "transient database error, retrying after backoff");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
    unreachable!("loop always returns by the final attempt")
}

#[async_trait]
impl DedupStore for SqliteDedupStore {
    async fn create_workspace(&self, name: &str) -> Result<Workspace, HunterError> {
        let workspace = Workspace::new(name);
        retry_transient(|| async {
            sqlx::query("INSERT INTO workspace (id, name, created_at) VALUES (?, ?, ?)")
                .bind(workspace.id.to_string())
                .bind(&workspace.name)
                .bind(workspace.created_at.to_rfc3339())
                .execute(&self.pool)
                .await
                .map_err(db_err)
        })
        .await?;
        Ok(workspace)
    }

    async fn find_workspace(&self, name: &str) -> Result<Option<Workspace>, HunterError> {
        let row = retry_transient(|| async {
            sqlx::query("SELECT id, name, created_at FROM workspace WHERE name = ?").bind(name).fetch_optional(&self.pool).await.map_err(db_err)
        })
        .await?;

        row.map(|row| {
            let id: String = row.get("id");
            let created_at: String = row.get("created_at");
            Ok(Workspace {
                id: WorkspaceId::from_str(&id).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
                name: row.get("name"),
                created_at: DateTime::parse_from_rfc3339(&created_at).map_err(|e| HunterError::DatabaseError(e.to_string()))?.with_timezone(&Utc),
            })
        })
        .transpose()
    }

    async fn upsert_host(&self, host: &Host) -> Result<(), HunterError> {
        retry_transient(|| async {
            sqlx::query(
                "INSERT INTO host (id, workspace_id, protocol, address, port, share, completed)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET completed = excluded.completed",
            )
            .bind(host.id.to_string())
            .bind(host.workspace_id.to_string())
            .bind(host.protocol.as_str())
            .bind(&host.address)
            .bind(host.port.map(|p| p as i64))
            .bind(&host.share)
            .bind(host.completed as i64)
            .execute(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;
        Ok(())
    }

    async fn mark_host_complete(&self, host_id: HostId) -> Result<(), HunterError> {
        retry_transient(|| async {
            sqlx::query("UPDATE host SET completed = 1 WHERE id = ?").bind(host_id.to_string()).execute(&self.pool).await.map_err(db_err)
        })
        .await?;
        Ok(())
    }

    async fn upsert_file(&self, workspace_id: WorkspaceId, file: &File) -> Result<UpsertOutcome, HunterError> {
        let _guard = self.upsert_shard(file.sha256).lock();

        let result = retry_transient(|| async {
            sqlx::query(
                "INSERT INTO file (workspace_id, sha256, size, mime_hint, matched_rule, category)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT(workspace_id, sha256) DO NOTHING",
            )
            .bind(workspace_id.to_string())
            .bind(file.sha256.to_hex())
            .bind(file.size as i64)
            .bind(&file.mime_hint)
            .bind(file.matched_rule.to_string())
            .bind(&file.category)
            .execute(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;

        if result.rows_affected() == 1 {
            Ok(UpsertOutcome::Inserted)
        } else {
            Ok(UpsertOutcome::AlreadyPresent)
        }
    }

    async fn find_file(&self, workspace_id: WorkspaceId, sha256: Sha256Digest) -> Result<Option<File>, HunterError> {
        let row = retry_transient(|| async {
            sqlx::query(
                "SELECT sha256, size, mime_hint, matched_rule, category, review_verdict, review_comment
                 FROM file WHERE workspace_id = ? AND sha256 = ?",
            )
            .bind(workspace_id.to_string())
            .bind(sha256.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;

        row.map(|row| row_to_file(row, workspace_id)).transpose()
    }

    async fn add_path(&self, path: &ObservedPath) -> Result<(), HunterError> {
        let archive_chain = serde_json::to_string(&path.archive_chain).map_err(|e| HunterError::InternalError(e.to_string()))?;
        retry_transient(|| async {
            sqlx::query(
                "INSERT INTO path (id, host_id, file_sha256, full_path, archive_chain, matched_rule, observed_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(path.id.to_string())
            .bind(path.host_id.to_string())
            .bind(path.file_sha256.to_hex())
            .bind(&path.full_path)
            .bind(&archive_chain)
            .bind(path.matched_rule.to_string())
            .bind(path.observed_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;
        Ok(())
    }

    async fn load_rule_snapshot(&self, workspace_id: WorkspaceId) -> Result<Vec<Rule>, HunterError> {
        let rows = retry_transient(|| async {
            sqlx::query(
                "SELECT id, original_index, search_location, search_pattern, category, relevance, accuracy, priority
                 FROM match_rule WHERE workspace_id = ? ORDER BY original_index ASC",
            )
            .bind(workspace_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;

        rows.into_iter().map(row_to_rule).collect()
    }

    async fn save_rule_snapshot(&self, workspace_id: WorkspaceId, rules: &[Rule]) -> Result<(), HunterError> {
        retry_transient(|| async {
            let mut tx = self.pool.begin().await.map_err(db_err)?;

            sqlx::query("DELETE FROM match_rule WHERE workspace_id = ?")
                .bind(workspace_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;

            for rule in rules {
                sqlx::query(
                    "INSERT INTO match_rule (id, workspace_id, original_index, search_location, search_pattern, category, relevance, accuracy, priority)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(rule.id.to_string())
                .bind(workspace_id.to_string())
                .bind(rule.original_index as i64)
                .bind(rule.search_location.as_str())
                .bind(&rule.search_pattern)
                .bind(&rule.category)
                .bind(rule.relevance.to_string())
                .bind(rule.accuracy.to_string())
                .bind(rule.priority)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            }

            tx.commit().await.map_err(db_err)
        })
        .await?;
        Ok(())
    }

    async fn list_for_review(&self, workspace_id: WorkspaceId) -> Result<Vec<(File, ObservedPath)>, HunterError> {
        let rows = retry_transient(|| async {
            sqlx::query(
                "SELECT f.sha256, f.size, f.mime_hint, f.matched_rule, f.category, f.review_verdict, f.review_comment,
                        p.id as path_id, p.host_id, p.full_path, p.archive_chain, p.observed_at, m.priority
                 FROM file f
                 JOIN path p ON p.file_sha256 = f.sha256
                 JOIN host h ON h.id = p.host_id AND h.workspace_id = f.workspace_id
                 LEFT JOIN match_rule m ON m.id = f.matched_rule
                 WHERE f.workspace_id = ?
                 ORDER BY m.priority DESC, f.category ASC, p.full_path ASC",
            )
            .bind(workspace_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        })
        .await?;

        rows.into_iter()
            .map(|row| {
                let file = row_to_file(row.clone(), workspace_id)?;
                let path = row_to_path(row)?;
                Ok((file, path))
            })
            .collect()
    }

    async fn record_review(&self, review: &Review) -> Result<(), HunterError> {
        retry_transient(|| async {
            sqlx::query("UPDATE file SET review_verdict = ?, review_comment = ? WHERE workspace_id = ? AND sha256 = ?")
                .bind(review.verdict.as_str())
                .bind(&review.comment)
                .bind(review.workspace_id.to_string())
                .bind(review.file_sha256.to_hex())
                .execute(&self.pool)
                .await
                .map_err(db_err)
        })
        .await?;
        Ok(())
    }
}

fn row_to_file(row: sqlx::sqlite::SqliteRow, workspace_id: WorkspaceId) -> Result<File, HunterError> {
    let sha256_hex: String = row.get("sha256");
    let matched_rule: String = row.get("matched_rule");
    let review_verdict: Option<String> = row.get("review_verdict");

    Ok(File {
        sha256: Sha256Digest::from_hex(&sha256_hex).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        workspace_id,
        size: row.get::<i64, _>("size") as u64,
        bytes: None,
        mime_hint: row.get("mime_hint"),
        matched_rule: RuleId::from_str(&matched_rule).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        category: row.get("category"),
        review_verdict: review_verdict.map(|v| ReviewVerdict::from_str(&v)).transpose().map_err(HunterError::DatabaseError)?,
        review_comment: row.get("review_comment"),
    })
}

fn row_to_path(row: sqlx::sqlite::SqliteRow) -> Result<ObservedPath, HunterError> {
    let path_id: String = row.get("path_id");
    let host_id: String = row.get("host_id");
    let file_sha256: String = row.get("sha256");
    let archive_chain: String = row.get("archive_chain");
    let matched_rule: String = row.get("matched_rule");
    let observed_at: String = row.get("observed_at");

    Ok(ObservedPath {
        id: PathId::from_str(&path_id).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        host_id: HostId::from_str(&host_id).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        file_sha256: Sha256Digest::from_hex(&file_sha256).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        full_path: row.get("full_path"),
        archive_chain: serde_json::from_str::<ArchiveChain>(&archive_chain).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        matched_rule: RuleId::from_str(&matched_rule).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        observed_at: DateTime::parse_from_rfc3339(&observed_at).map_err(|e| HunterError::DatabaseError(e.to_string()))?.with_timezone(&Utc),
    })
}

fn row_to_rule(row: sqlx::sqlite::SqliteRow) -> Result<Rule, HunterError> {
    let id: String = row.get("id");
    let search_location: String = row.get("search_location");
    let relevance: String = row.get("relevance");
    let accuracy: String = row.get("accuracy");

    Ok(Rule {
        id: RuleId::from_str(&id).map_err(|e| HunterError::DatabaseError(e.to_string()))?,
        original_index: row.get::<i64, _>("original_index") as usize,
        search_location: SearchLocation::from_str(&search_location).map_err(HunterError::DatabaseError)?,
        search_pattern: row.get("search_pattern"),
        category: row.get("category"),
        relevance: Relevance::from_str(&relevance).map_err(HunterError::DatabaseError)?,
        accuracy: Accuracy::from_str(&accuracy).map_err(HunterError::DatabaseError)?,
        priority: row.get("priority"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::schema::initialize_database;
    use sentinel_domain::value_objects::LocalCredentials;
    use tempfile::NamedTempFile;

    async fn test_store() -> (SqliteDedupStore, NamedTempFile) {
        let temp = NamedTempFile::new().unwrap();
        let db_url = format!("sqlite://{}", temp.path().to_str().unwrap());
        let pool = initialize_database(&db_url).await.unwrap();
        (SqliteDedupStore::new(pool), temp)
    }

    #[tokio::test]
    async fn retry_transient_gives_up_after_max_attempts_on_persistent_transient_errors() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result: Result<(), HunterError> = retry_transient(|| async {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(HunterError::TransientIo("database is locked".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn retry_transient_succeeds_once_the_transient_condition_clears() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result = retry_transient(|| async {
            let n = attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n < 1 {
                Err(HunterError::TransientIo("database is locked".to_string()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_transient_does_not_retry_non_recoverable_errors() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result: Result<(), HunterError> = retry_transient(|| async {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(HunterError::DatabaseError("unique constraint violated".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn workspace_round_trips_by_name() {
        let (store, _temp) = test_store().await;
        let created = store.create_workspace("audit-2026").await.unwrap();
        let found = store.find_workspace("audit-2026").await.unwrap().unwrap();
        assert_eq!(created.id, found.id);
        assert!(store.find_workspace("does-not-exist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_upsert_of_same_sha256_reports_already_present() {
        let (store, _temp) = test_store().await;
        let workspace = store.create_workspace("ws").await.unwrap();

        let first_rule = RuleId::new();
        let second_rule = RuleId::new();
        let file_a = File::new_content_less(workspace.id, Sha256Digest::of(b"x"), 10, first_rule, "credentials");
        let file_b = File::new_content_less(workspace.id, Sha256Digest::of(b"x"), 10, second_rule, "backup");

        assert_eq!(store.upsert_file(workspace.id, &file_a).await.unwrap(), UpsertOutcome::Inserted);
        assert_eq!(store.upsert_file(workspace.id, &file_b).await.unwrap(), UpsertOutcome::AlreadyPresent);

        let stored = store.find_file(workspace.id, Sha256Digest::of(b"x")).await.unwrap().unwrap();
        assert_eq!(stored.matched_rule, first_rule);
        assert_eq!(stored.category, "credentials");
    }

    #[tokio::test]
    async fn paths_are_never_coalesced() {
        let (store, _temp) = test_store().await;
        let workspace = store.create_workspace("ws").await.unwrap();
        let host = Host::new(workspace.id, Protocol::Local, "localhost");
        store.upsert_host(&host).await.unwrap();

        let rule = RuleId::new();
        let file = File::new_content_less(workspace.id, Sha256Digest::of(b"y"), 5, rule, "secrets");
        store.upsert_file(workspace.id, &file).await.unwrap();

        for name in ["/a/one", "/b/two"] {
            let path = ObservedPath::new(host.id, file.sha256, name, ArchiveChain::root(), rule);
            store.add_path(&path).await.unwrap();
        }

        let results = store.list_for_review(workspace.id).await.unwrap();
        assert_eq!(results.len(), 2);
        let _ = LocalCredentials::default();
    }

    #[tokio::test]
    async fn review_verdict_persists_on_the_file_row() {
        let (store, _temp) = test_store().await;
        let workspace = store.create_workspace("ws").await.unwrap();
        let rule = RuleId::new();
        let file = File::new_content_less(workspace.id, Sha256Digest::of(b"z"), 3, rule, "pii");
        store.upsert_file(workspace.id, &file).await.unwrap();

        let review = Review {
            workspace_id: workspace.id,
            file_sha256: file.sha256,
            verdict: ReviewVerdict::Irrelevant,
            comment: Some("test fixture, not real PII".to_string()),
        };
        store.record_review(&review).await.unwrap();

        let updated = store.find_file(workspace.id, file.sha256).await.unwrap().unwrap();
        assert_eq!(updated.review_verdict, Some(ReviewVerdict::Irrelevant));
    }

    #[tokio::test]
    async fn review_in_one_workspace_does_not_leak_into_another_with_the_same_content() {
        let (store, _temp) = test_store().await;
        let ws_a = store.create_workspace("ws-a").await.unwrap();
        let ws_b = store.create_workspace("ws-b").await.unwrap();

        let same_bytes_digest = Sha256Digest::of(b"shared across engagements");
        let file_a = File::new_content_less(ws_a.id, same_bytes_digest, 9, RuleId::new(), "pii");
        let file_b = File::new_content_less(ws_b.id, same_bytes_digest, 9, RuleId::new(), "pii");
        store.upsert_file(ws_a.id, &file_a).await.unwrap();
        store.upsert_file(ws_b.id, &file_b).await.unwrap();

        let review = Review {
            workspace_id: ws_a.id,
            file_sha256: same_bytes_digest,
            verdict: ReviewVerdict::Irrelevant,
            comment: Some("reviewed in ws-a only".to_string()),
        };
        store.record_review(&review).await.unwrap();

        let updated_a = store.find_file(ws_a.id, same_bytes_digest).await.unwrap().unwrap();
        let untouched_b = store.find_file(ws_b.id, same_bytes_digest).await.unwrap().unwrap();
        assert_eq!(updated_a.review_verdict, Some(ReviewVerdict::Irrelevant));
        assert_eq!(untouched_b.review_verdict, None);
    }

    #[tokio::test]
    async fn rule_snapshot_round_trips_and_replaces_prior_version() {
        let (store, _temp) = test_store().await;
        let workspace = store.create_workspace("ws").await.unwrap();

        let rule = Rule {
            id: RuleId::new(),
            original_index: 0,
            search_location: SearchLocation::FileContent,
            search_pattern: "(?i)password".to_string(),
            category: "credentials".to_string(),
            relevance: Relevance::High,
            accuracy: Accuracy::Medium,
            priority: 248,
        };
        store.save_rule_snapshot(workspace.id, std::slice::from_ref(&rule)).await.unwrap();
        let loaded = store.load_rule_snapshot(workspace.id).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].search_pattern, "(?i)password");

        store.save_rule_snapshot(workspace.id, &[]).await.unwrap();
        assert!(store.load_rule_snapshot(workspace.id).await.unwrap().is_empty());
    }
}
