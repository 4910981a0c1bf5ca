// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # DedupStore
//!
//! Port for the content-addressed deduplication store. The
//! infrastructure layer provides a `sqlx`-backed SQLite implementation;
//! this trait is the only thing the analyzer depends on.

use crate::entities::{File, Host, ObservedPath, Rule, Workspace};
use crate::error::HunterError;
use crate::value_objects::{HostId, Sha256Digest, WorkspaceId};
use async_trait::async_trait;

/// Result of [`DedupStore::upsert_file`]: whether this call's (rule,
/// category) pair became the file's permanent matched rule, or whether an
/// earlier concurrent caller already won that race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    AlreadyPresent,
}

#[async_trait]
pub trait DedupStore: Send + Sync {
    async fn create_workspace(&self, name: &str) -> Result<Workspace, HunterError>;

    async fn find_workspace(&self, name: &str) -> Result<Option<Workspace>, HunterError>;

    async fn upsert_host(&self, host: &Host) -> Result<(), HunterError>;

    async fn mark_host_complete(&self, host_id: HostId) -> Result<(), HunterError>;

    /// Idempotent by `file.sha256` within the workspace. The
    /// earliest-committing caller's `matched_rule`/`category` become
    /// permanent; later callers' values are discarded silently.
    async fn upsert_file(&self, workspace_id: WorkspaceId, file: &File) -> Result<UpsertOutcome, HunterError>;

    async fn find_file(&self, workspace_id: WorkspaceId, sha256: Sha256Digest) -> Result<Option<File>, HunterError>;

    /// Never coalesced: a file observed at N paths yields N rows.
    async fn add_path(&self, path: &ObservedPath) -> Result<(), HunterError>;

    async fn load_rule_snapshot(&self, workspace_id: WorkspaceId) -> Result<Vec<Rule>, HunterError>;

    async fn save_rule_snapshot(&self, workspace_id: WorkspaceId, rules: &[Rule]) -> Result<(), HunterError>;

    /// Matches for review, sorted `(priority desc, category, path)` at
    /// query time.
    async fn list_for_review(&self, workspace_id: WorkspaceId) -> Result<Vec<(File, ObservedPath)>, HunterError>;

    /// Scoped by `review.workspace_id` in addition to `review.file_sha256`,
    /// since the same content can exist as distinct rows in more than one
    /// workspace.
    async fn record_review(&self, review: &crate::entities::Review) -> Result<(), HunterError>;
}
