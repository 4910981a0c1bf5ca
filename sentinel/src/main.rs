// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Composition root: parses and validates CLI arguments, wires the
//! application layer's use cases against their infrastructure
//! dependencies, and maps the result to a process exit code.

use sentinel::application::commands::{DatabaseCommand, RunCollectionCommand};
use sentinel::application::use_cases::{ManageDatabaseUseCase, RunCollectionUseCase};
use sentinel::infrastructure::config;
use sentinel::infrastructure::logging::init_tracing;
use sentinel::infrastructure::metrics::CollectionMetrics;
use sentinel::infrastructure::repositories::{initialize_database, SqliteDedupStore};
use sentinel_bootstrap::cli::{DbAction, ValidatedCommand};
use sentinel_bootstrap::config::BootstrapConfig;
use sentinel_bootstrap::shutdown::ShutdownCoordinator;
use sentinel_bootstrap::{bootstrap_cli, result_to_exit_code, signals};
use sentinel_domain::aggregates::RuleSet;
use sentinel_domain::error::HunterError;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("argument error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    let bootstrap_config = BootstrapConfig::resolve(cli.config.clone(), cli.database.clone(), cli.verbose);
    result_to_exit_code(run(cli.command, bootstrap_config).await)
}

async fn run(command: ValidatedCommand, bootstrap_config: BootstrapConfig) -> Result<(), HunterError> {
    let database_url = format!("sqlite://{}", bootstrap_config.database_path.display());

    match command {
        ValidatedCommand::Db(action) => {
            let db_command = match action {
                DbAction::Init => DatabaseCommand::Init,
                DbAction::Drop => DatabaseCommand::Drop,
                DbAction::Open(workspace) => DatabaseCommand::Open { workspace },
            };
            ManageDatabaseUseCase::new(database_url).execute(db_command).await?;
            Ok(())
        }

        ValidatedCommand::Collect { protocol, workspace, address, share, roots, credentials } => {
            let rule_config = config::load(&bootstrap_config.config_path).map_err(|e| HunterError::MalformedRule(format!("config error: {e}")))?;
            let analyzer_config = rule_config.analyzer_config();
            let rule_set = RuleSet::compile(rule_config.rules)?;

            let pool = initialize_database(&database_url).await.map_err(|e| HunterError::database_error(e.to_string()))?;
            let dedup_store = Arc::new(SqliteDedupStore::new(pool));
            let metrics = Arc::new(CollectionMetrics::new()?);

            let shutdown = ShutdownCoordinator::new(bootstrap_config.shutdown_grace_period);
            signals::install(shutdown.clone());

            let use_case = RunCollectionUseCase::new(dedup_store, rule_set, analyzer_config, metrics);
            let command = RunCollectionCommand { workspace, protocol, address, share, roots, credentials };
            use_case.execute(command, shutdown.token()).await?;
            Ok(())
        }

        ValidatedCommand::Review { .. } | ValidatedCommand::Report { .. } => {
            Err(HunterError::internal_error("review/report are not implemented in the collection engine"))
        }
    }
}
