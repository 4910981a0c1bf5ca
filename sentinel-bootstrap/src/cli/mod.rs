// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling with security-first design.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  1. parser::parse_cli()             │  Parse CLI with clap
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  2. validate_cli()                  │  Security validation
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  3. ValidatedCli                    │  Safe, validated config
//! └─────────────────────────────────────┘
//! ```
//!
//! `review` and `report` are intentionally out of scope for this binary:
//! they parse and validate like any other subcommand, but
//! [`ValidatedCommand::Review`] and [`ValidatedCommand::Report`] are left
//! for the caller to reject with a "not implemented in the collection
//! engine" message rather than a parse error.

pub mod parser;
pub mod validator;

pub use parser::{parse_cli, Cli, Commands};
pub use validator::{ParseError, SecureArgParser};

use sentinel_domain::value_objects::{Credentials, EnumerationRoot, FtpCredentials, LocalCredentials, NfsCredentials, Protocol, SmbCredentials};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub config: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub enum DbAction {
    Init,
    Drop,
    Open(String),
}

#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Csv,
    Xlsx,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Db(DbAction),
    Collect {
        protocol: Protocol,
        workspace: String,
        /// Host/server address for remote protocols; `None` for `local`.
        address: Option<String>,
        /// Share name, SMB only.
        share: Option<String>,
        roots: Vec<EnumerationRoot>,
        credentials: Credentials,
    },
    Review {
        workspace: String,
    },
    Report {
        workspace: String,
        format: ReportFormat,
        output: PathBuf,
    },
}

pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parse_cli();
    validate_cli(cli)
}

fn read_password_env(var: &str) -> Result<String, ParseError> {
    std::env::var(var).map_err(|_| ParseError::InvalidValue {
        arg: "password-env".to_string(),
        reason: format!("environment variable {var} is not set"),
    })
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let config = match cli.config {
        Some(ref path) => {
            SecureArgParser::validate_argument(&path.to_string_lossy())?;
            Some(path.clone())
        }
        None => None,
    };

    let database = match cli.database {
        Some(ref path) => {
            SecureArgParser::validate_argument(&path.to_string_lossy())?;
            Some(path.clone())
        }
        None => None,
    };

    let command = match cli.command {
        Commands::Db(args) => {
            let action = if args.init {
                DbAction::Init
            } else if args.drop {
                DbAction::Drop
            } else {
                let workspace = args.workspace.ok_or_else(|| ParseError::InvalidValue {
                    arg: "db".to_string(),
                    reason: "one of --init, --drop, or -a <workspace> is required".to_string(),
                })?;
                DbAction::Open(SecureArgParser::validate_workspace(&workspace)?)
            };
            ValidatedCommand::Db(action)
        }
        Commands::Local(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            let mut roots = Vec::with_capacity(args.roots.len());
            for root in &args.roots {
                let validated = SecureArgParser::validate_existing_path(root)?;
                roots.push(EnumerationRoot(validated));
            }
            ValidatedCommand::Collect {
                protocol: Protocol::Local,
                workspace,
                address: None,
                share: None,
                roots,
                credentials: Credentials::Local(LocalCredentials::default()),
            }
        }
        Commands::Ftp(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            SecureArgParser::validate_argument(&args.host)?;
            SecureArgParser::validate_argument(&args.user)?;
            let password = read_password_env(&args.password_env)?;
            ValidatedCommand::Collect {
                protocol: Protocol::Ftp,
                workspace,
                address: Some(args.host),
                share: None,
                roots: vec![EnumerationRoot(PathBuf::from(args.root))],
                credentials: Credentials::Ftp(FtpCredentials {
                    user: args.user,
                    password,
                    tls: false,
                }),
            }
        }
        Commands::Nfs(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            SecureArgParser::validate_argument(&args.host)?;
            SecureArgParser::validate_argument(&args.export)?;
            ValidatedCommand::Collect {
                protocol: Protocol::Nfs,
                workspace,
                address: Some(args.host),
                share: None,
                roots: vec![EnumerationRoot(PathBuf::from(args.export))],
                credentials: Credentials::Nfs(NfsCredentials::default()),
            }
        }
        Commands::Smb(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            SecureArgParser::validate_argument(&args.host)?;
            SecureArgParser::validate_argument(&args.share)?;
            SecureArgParser::validate_argument(&args.user)?;
            let password = read_password_env(&args.password_env)?;
            ValidatedCommand::Collect {
                protocol: Protocol::Smb,
                workspace,
                address: Some(args.host),
                share: Some(args.share),
                roots: vec![EnumerationRoot(PathBuf::from(args.root))],
                credentials: Credentials::Smb(SmbCredentials::UserPassword { user: args.user, password }),
            }
        }
        Commands::Review(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            ValidatedCommand::Review { workspace }
        }
        Commands::Report(args) => {
            let workspace = SecureArgParser::validate_workspace(&args.workspace)?;
            let format = match (args.csv, args.xlsx) {
                (true, false) => ReportFormat::Csv,
                (false, true) => ReportFormat::Xlsx,
                (false, false) => ReportFormat::Csv,
                (true, true) => {
                    return Err(ParseError::InvalidValue {
                        arg: "report".to_string(),
                        reason: "--csv and --xlsx are mutually exclusive".to_string(),
                    })
                }
            };
            let output = SecureArgParser::validate_output_path(&args.output)?;
            ValidatedCommand::Report { workspace, format, output }
        }
    };

    Ok(ValidatedCli {
        command,
        config,
        database,
        verbose: cli.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn local_collect_validates_existing_root() {
        let cli = Cli::try_parse_from(["sentinel", "local", "--root", "/tmp", "-w", "ws1"]).unwrap();
        let validated = validate_cli(cli).expect("validation should succeed for /tmp");
        match validated.command {
            ValidatedCommand::Collect { protocol, workspace, .. } => {
                assert_eq!(protocol, Protocol::Local);
                assert_eq!(workspace, "ws1");
            }
            _ => panic!("expected Collect command"),
        }
    }

    #[test]
    fn db_open_rejects_unsafe_workspace_names() {
        let cli = Cli::try_parse_from(["sentinel", "db", "-a", "../escape"]).unwrap();
        assert!(validate_cli(cli).is_err());
    }

    #[test]
    fn ftp_requires_password_env_to_be_set() {
        std::env::remove_var("SENTINEL_TEST_FTP_PW_MISSING");
        let cli = Cli::try_parse_from([
            "sentinel",
            "ftp",
            "--host",
            "ftp.example.com",
            "--user",
            "svc",
            "--password-env",
            "SENTINEL_TEST_FTP_PW_MISSING",
            "-w",
            "ws1",
        ])
        .unwrap();
        assert!(validate_cli(cli).is_err());
    }

    #[test]
    fn report_defaults_to_csv_when_neither_flag_given() {
        let cli = Cli::try_parse_from(["sentinel", "report", "-w", "ws1", "-o", "/tmp/out.csv"]).unwrap();
        let validated = validate_cli(cli).unwrap();
        match validated.command {
            ValidatedCommand::Report { format: ReportFormat::Csv, .. } => {}
            _ => panic!("expected default Csv format"),
        }
    }
}
