// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Run Collection Use Case
//!
//! Backs the `local` / `ftp` / `nfs` / `smb` subcommands. Opens (creating
//! if absent) the named workspace, registers a [`Host`] for the target,
//! picks the matching [`EnumerationDriver`], and hands both to the
//! [`CollectionCoordinator`] until every root drains or shutdown is
//! requested.

use crate::application::commands::RunCollectionCommand;
use crate::application::coordinator::{CollectionCoordinator, CollectionSummary, HostEnumeration};
use crate::infrastructure::archive::ChainedExtractor;
use crate::infrastructure::drivers::{FtpDriver, LocalDriver, NfsDriver, SmbDriver};
use crate::infrastructure::metrics::CollectionMetrics;
use sentinel_bootstrap::shutdown::CancellationToken;
use sentinel_domain::aggregates::RuleSet;
use sentinel_domain::entities::Host;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{DedupStore, EnumerationDriver};
use sentinel_domain::services::analyzer::AnalyzerConfig;
use sentinel_domain::value_objects::Protocol;
use std::sync::Arc;

pub struct RunCollectionUseCase {
    dedup_store: Arc<dyn DedupStore>,
    rule_set: RuleSet,
    analyzer_config: AnalyzerConfig,
    metrics: Arc<CollectionMetrics>,
}

impl RunCollectionUseCase {
    pub fn new(dedup_store: Arc<dyn DedupStore>, rule_set: RuleSet, analyzer_config: AnalyzerConfig, metrics: Arc<CollectionMetrics>) -> Self {
        Self { dedup_store, rule_set, analyzer_config, metrics }
    }

    pub async fn execute(&self, command: RunCollectionCommand, shutdown: CancellationToken) -> Result<CollectionSummary, HunterError> {
        let workspace = match self.dedup_store.find_workspace(&command.workspace).await? {
            Some(existing) => existing,
            None => self.dedup_store.create_workspace(&command.workspace).await?,
        };

        let address = command.address.clone().unwrap_or_else(|| "localhost".to_string());
        let mut host = Host::new(workspace.id, command.protocol, address);
        if let Some(ref share) = command.share {
            host = host.with_share(share.clone());
        }
        self.dedup_store.upsert_host(&host).await?;

        let driver: Arc<dyn EnumerationDriver> = build_driver(&host, &command);

        let coordinator = CollectionCoordinator::new(
            self.rule_set.clone(),
            self.analyzer_config.clone(),
            self.dedup_store.clone(),
            Arc::new(ChainedExtractor::new()),
            self.metrics.clone(),
            Default::default(),
        );

        let hosts = vec![HostEnumeration { host: host.id, driver, roots: command.roots, credentials: command.credentials }];

        let (summary, completed_hosts) = coordinator.run(workspace.id, hosts, shutdown).await?;
        if completed_hosts.contains(&host.id) {
            self.dedup_store.mark_host_complete(host.id).await?;
        } else {
            tracing::warn!(host = %host.id, "enumeration did not complete cleanly; leaving host incomplete");
        }

        tracing::info!(
            workspace = %workspace.name,
            matched = summary.matched,
            deduped = summary.deduped,
            gated = summary.gated,
            archived = summary.archived,
            unmatched = summary.unmatched,
            "collection run finished"
        );

        Ok(summary)
    }
}

fn build_driver(host: &Host, command: &RunCollectionCommand) -> Arc<dyn EnumerationDriver> {
    match command.protocol {
        Protocol::Local => Arc::new(LocalDriver::new(host.id)),
        Protocol::Ftp => Arc::new(FtpDriver::new(host.id, host.address.clone())),
        Protocol::Nfs => Arc::new(NfsDriver::new(host.id, host.address.clone())),
        Protocol::Smb => Arc::new(SmbDriver::new(host.id, host.address.clone(), host.share.clone().unwrap_or_default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::{initialize_database, SqliteDedupStore};
    use sentinel_bootstrap::shutdown::ShutdownCoordinator;
    use sentinel_domain::entities::RuleDescriptor;
    use sentinel_domain::value_objects::{Credentials, EnumerationRoot, LocalCredentials};
    use std::time::Duration;

    #[tokio::test]
    async fn walks_a_local_root_and_records_a_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("id_rsa"), b"private key material").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"nothing interesting").unwrap();

        let db_dir = tempfile::tempdir().unwrap();
        let database_url = format!("sqlite://{}/test.db", db_dir.path().display());
        let pool = initialize_database(&database_url).await.unwrap();
        let dedup_store: Arc<dyn DedupStore> = Arc::new(SqliteDedupStore::new(pool));

        let rule_set = RuleSet::compile(vec![RuleDescriptor {
            search_location: "file_name".to_string(),
            search_pattern: "id_rsa".to_string(),
            category: "credentials".to_string(),
            relevance: "high".to_string(),
            accuracy: "high".to_string(),
        }])
        .unwrap();

        let metrics = Arc::new(CollectionMetrics::new().unwrap());
        let use_case = RunCollectionUseCase::new(dedup_store, rule_set, AnalyzerConfig::default(), metrics);

        let command = RunCollectionCommand {
            workspace: "ws1".to_string(),
            protocol: Protocol::Local,
            address: None,
            share: None,
            roots: vec![EnumerationRoot(dir.path().to_path_buf())],
            credentials: Credentials::Local(LocalCredentials::default()),
        };

        let shutdown = ShutdownCoordinator::new(Duration::from_secs(5));
        let summary = use_case.execute(command, shutdown.token()).await.unwrap();

        assert_eq!(summary.matched, 1);
        assert_eq!(summary.unmatched, 1);
    }
}
