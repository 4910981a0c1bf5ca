// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Collection Coordinator
//!
//! Runs one or more [`EnumerationDriver`]s against a bounded work queue,
//! draining it with a fixed pool of analyzer workers. Archive re-entry
//! feeds matched container members back onto the same queue rather than
//! recursing, so queue depth — not call-stack depth — is what nesting
//! costs.
//!
//! Governs concurrency with a single semaphore sized to the worker pool,
//! the same bounded-resource pattern used throughout this codebase for
//! anything that can be handed out and must eventually be handed back.

use crate::infrastructure::metrics::CollectionMetrics;
use sentinel_bootstrap::shutdown::CancellationToken;
use sentinel_domain::aggregates::RuleSet;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{ArchiveExtractor, DedupStore};
use sentinel_domain::services::analyzer::{AnalysisOutcome, Analyzer, AnalyzerConfig};
use sentinel_domain::services::matcher::RegexMatcher;
use sentinel_domain::value_objects::{Credentials, EnumerationRoot, FileReference, HostId, WorkspaceId};
use sentinel_domain::repositories::EnumerationDriver;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Number of concurrent analyzer workers draining the queue.
    pub worker_count: usize,
    /// Backpressure bound: an enumeration driver blocks on `send` once the
    /// queue is full, rather than the queue growing unbounded ahead of
    /// slow analysis (large files, remote content fetches).
    pub queue_capacity: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4).saturating_sub(1).max(1);
        Self { worker_count: workers, queue_capacity: 4096 }
    }
}

/// One protocol driver plus the roots and credentials to enumerate it
/// with; `run` drives every host concurrently with the analyzer pool.
pub struct HostEnumeration {
    pub host: HostId,
    pub driver: Arc<dyn EnumerationDriver>,
    pub roots: Vec<EnumerationRoot>,
    pub credentials: Credentials,
}

/// Summary counters returned once a collection run drains to completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionSummary {
    pub matched: u64,
    pub deduped: u64,
    pub gated: u64,
    pub archived: u64,
    pub unmatched: u64,
}

pub struct CollectionCoordinator {
    analyzer: Arc<Analyzer<RegexMatcher>>,
    config: CoordinatorConfig,
    metrics: Arc<CollectionMetrics>,
}

impl CollectionCoordinator {
    pub fn new(
        rule_set: RuleSet,
        analyzer_config: AnalyzerConfig,
        dedup_store: Arc<dyn DedupStore>,
        archive_extractor: Arc<dyn ArchiveExtractor>,
        metrics: Arc<CollectionMetrics>,
        config: CoordinatorConfig,
    ) -> Self {
        let analyzer = Analyzer::new(rule_set, RegexMatcher::new(), analyzer_config, dedup_store, archive_extractor);
        Self { analyzer: Arc::new(analyzer), config, metrics }
    }

    /// Enumerates every host, analyzing file references as they arrive,
    /// until every driver finishes and every in-flight analysis
    /// (including re-submitted archive members) has drained. Returns once
    /// shutdown is requested via `token` or the queue is empty.
    ///
    /// The returned [`CollectionSummary`] is accompanied by the set of
    /// hosts whose `enumerate()` call returned `Ok`; a host that isn't in
    /// that set either errored or panicked and must not be marked
    /// complete by the caller.
    pub async fn run(
        &self,
        workspace_id: WorkspaceId,
        hosts: Vec<HostEnumeration>,
        token: CancellationToken,
    ) -> Result<(CollectionSummary, std::collections::HashSet<HostId>), HunterError> {
        let (tx, rx) = mpsc::channel::<FileReference>(self.config.queue_capacity);

        let mut enumerators = JoinSet::new();
        for host in hosts {
            let tx = tx.clone();
            let host_id = host.host;
            enumerators.spawn(async move { (host_id, host.driver.enumerate(&host.roots, &host.credentials, tx).await) });
        }
        drop(tx);

        let summary = self.drain(workspace_id, rx, token).await;

        let mut completed_hosts = std::collections::HashSet::new();
        while let Some(result) = enumerators.join_next().await {
            let (host_id, outcome) = result.map_err(|e| HunterError::InternalError(format!("enumeration task panicked: {e}")))?;
            match outcome {
                Ok(()) => {
                    completed_hosts.insert(host_id);
                }
                Err(e) => {
                    self.metrics.enumeration_errors_total.inc();
                    tracing::warn!(%e, host = %host_id, "enumeration driver returned an error; host marked incomplete");
                }
            }
        }

        Ok((summary, completed_hosts))
    }

    async fn drain(&self, workspace_id: WorkspaceId, mut rx: mpsc::Receiver<FileReference>, token: CancellationToken) -> CollectionSummary {
        let (resubmit_tx, mut resubmit_rx) = mpsc::channel::<FileReference>(self.config.queue_capacity);
        let permits = Arc::new(tokio::sync::Semaphore::new(self.config.worker_count));
        let mut workers = JoinSet::new();
        let mut summary = CollectionSummary::default();

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::info!("collection cancelled, draining in-flight work");
                    break;
                }

                Some(reference) = resubmit_rx.recv() => {
                    self.spawn_one(&mut workers, &permits, workspace_id, reference, resubmit_tx.clone()).await;
                }

                Some(reference) = rx.recv() => {
                    self.spawn_one(&mut workers, &permits, workspace_id, reference, resubmit_tx.clone()).await;
                }

                Some(result) = workers.join_next(), if !workers.is_empty() => {
                    self.metrics.files_scanned_total.inc();
                    self.record(&mut summary, result);
                }

                else => break,
            }
        }

        drop(resubmit_tx);
        while let Some(result) = workers.join_next().await {
            self.metrics.files_scanned_total.inc();
            self.record(&mut summary, result);
        }

        summary
    }

    async fn spawn_one(
        &self,
        workers: &mut JoinSet<Result<AnalysisOutcome, HunterError>>,
        permits: &Arc<tokio::sync::Semaphore>,
        workspace_id: WorkspaceId,
        reference: FileReference,
        resubmit: mpsc::Sender<FileReference>,
    ) {
        let analyzer = self.analyzer.clone();
        let permits = permits.clone();
        workers.spawn(async move {
            let _permit = permits.acquire_owned().await.expect("semaphore never closed");
            let outcome = analyzer.analyze(workspace_id, reference).await?;
            if let AnalysisOutcome::Archived { container_path, members } = outcome {
                for member in members {
                    if resubmit.send(member).await.is_err() {
                        break;
                    }
                }
                return Ok(AnalysisOutcome::Archived { container_path, members: Vec::new() });
            }
            Ok(outcome)
        });
    }

    fn record(&self, summary: &mut CollectionSummary, result: Result<Result<AnalysisOutcome, HunterError>, tokio::task::JoinError>) {
        match result {
            Ok(Ok(AnalysisOutcome::Matched { .. })) => {
                summary.matched += 1;
                self.metrics.files_matched_total.inc();
            }
            Ok(Ok(AnalysisOutcome::Deduped { .. })) => {
                summary.deduped += 1;
                self.metrics.files_deduped_total.inc();
            }
            Ok(Ok(AnalysisOutcome::Gated { .. })) => summary.gated += 1,
            Ok(Ok(AnalysisOutcome::Archived { .. })) => {
                summary.archived += 1;
                self.metrics.archives_expanded_total.inc();
            }
            Ok(Ok(AnalysisOutcome::Unmatched)) => summary.unmatched += 1,
            Ok(Err(e)) if e.is_skip_and_continue() => {
                tracing::warn!(%e, "skipping archive member");
            }
            Ok(Err(e)) => tracing::error!(%e, "analysis failed"),
            Err(e) => tracing::error!(%e, "analyzer worker panicked"),
        }
    }
}
