// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Manage Database Use Case
//!
//! Backs the `db --init` / `db --drop` / `db -a <workspace>` subcommand.
//! `--init`/`--drop` touch the schema directly; `-a` opens (creating if
//! absent) a named workspace so a later `local`/`ftp`/`nfs`/`smb` run has
//! somewhere to attach its findings.

use crate::application::commands::DatabaseCommand;
use crate::infrastructure::repositories::{drop_database, initialize_database, SqliteDedupStore};
use sentinel_domain::entities::Workspace;
use sentinel_domain::error::HunterError;

pub struct ManageDatabaseUseCase {
    database_url: String,
}

impl ManageDatabaseUseCase {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self { database_url: database_url.into() }
    }

    pub async fn execute(&self, command: DatabaseCommand) -> Result<Option<Workspace>, HunterError> {
        match command {
            DatabaseCommand::Init => {
                initialize_database(&self.database_url).await.map_err(|e| HunterError::database_error(e.to_string()))?;
                tracing::info!(database = %self.database_url, "database schema initialized");
                Ok(None)
            }
            DatabaseCommand::Drop => {
                drop_database(&self.database_url).await.map_err(|e| HunterError::database_error(e.to_string()))?;
                tracing::info!(database = %self.database_url, "database dropped");
                Ok(None)
            }
            DatabaseCommand::Open { workspace } => {
                let pool = initialize_database(&self.database_url).await.map_err(|e| HunterError::database_error(e.to_string()))?;
                let store = SqliteDedupStore::new(pool);
                let opened = match store.find_workspace(&workspace).await? {
                    Some(existing) => existing,
                    None => store.create_workspace(&workspace).await?,
                };
                tracing::info!(workspace = %opened.name, "workspace opened");
                Ok(Some(opened))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_domain::repositories::DedupStore;

    #[tokio::test]
    async fn opening_a_workspace_twice_reuses_the_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let database_url = format!("sqlite://{}/test.db", dir.path().display());
        let use_case = ManageDatabaseUseCase::new(database_url);

        use_case.execute(DatabaseCommand::Init).await.unwrap();
        let first = use_case.execute(DatabaseCommand::Open { workspace: "ws1".to_string() }).await.unwrap().unwrap();
        let second = use_case.execute(DatabaseCommand::Open { workspace: "ws1".to_string() }).await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
    }
}
