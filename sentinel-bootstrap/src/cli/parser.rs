// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Structure
//!
//! `clap`-derived argument structure for the collection engine's five
//! subcommands: `db`, `ftp`, `nfs`, `smb`, `local`, `review`, `report`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sentinel", about = "Sensitive-file hunter collection engine", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the rule/threshold configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the dedup store's SQLite database.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Administrative operations against the dedup database.
    Db(DbArgs),
    /// Collect against an FTP host.
    Ftp(FtpArgs),
    /// Collect against an NFS export.
    Nfs(NfsArgs),
    /// Collect against an SMB share.
    Smb(SmbArgs),
    /// Collect against the local filesystem.
    Local(LocalArgs),
    /// Hand off collected findings to the external reviewer.
    Review(WorkspaceOnlyArgs),
    /// Hand off collected findings to the external reporter.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct DbArgs {
    /// Create the database schema.
    #[arg(long)]
    pub init: bool,

    /// Drop the database schema.
    #[arg(long)]
    pub drop: bool,

    /// Open (and implicitly create if absent) the named workspace.
    #[arg(short = 'a', long = "workspace")]
    pub workspace: Option<String>,
}

#[derive(Debug, Args)]
pub struct WorkspaceOnlyArgs {
    /// Workspace to operate against.
    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Workspace to operate against.
    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,

    /// Emit CSV.
    #[arg(long, conflicts_with = "xlsx")]
    pub csv: bool,

    /// Emit XLSX.
    #[arg(long, conflicts_with = "csv")]
    pub xlsx: bool,

    /// Output file path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct FtpArgs {
    #[arg(long)]
    pub host: String,

    #[arg(long, default_value_t = 21)]
    pub port: u16,

    #[arg(long)]
    pub user: String,

    /// Name of the environment variable holding the password.
    #[arg(long)]
    pub password_env: String,

    /// Root path to start enumeration from.
    #[arg(long, default_value = "/")]
    pub root: String,

    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,
}

#[derive(Debug, Args)]
pub struct NfsArgs {
    #[arg(long)]
    pub host: String,

    #[arg(long)]
    pub export: String,

    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,
}

#[derive(Debug, Args)]
pub struct SmbArgs {
    #[arg(long)]
    pub host: String,

    #[arg(long)]
    pub share: String,

    #[arg(long)]
    pub user: String,

    /// Name of the environment variable holding the password.
    #[arg(long)]
    pub password_env: String,

    #[arg(long, default_value = "/")]
    pub root: String,

    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,
}

#[derive(Debug, Args)]
pub struct LocalArgs {
    /// One or more filesystem roots to walk.
    #[arg(long = "root", required = true)]
    pub roots: Vec<PathBuf>,

    #[arg(short = 'w', long = "workspace")]
    pub workspace: String,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn local_requires_workspace_and_root() {
        let result = Cli::try_parse_from(["sentinel", "local", "--root", "/data", "-w", "ws1"]);
        assert!(result.is_ok());
    }

    #[test]
    fn db_requires_exactly_one_action() {
        let result = Cli::try_parse_from(["sentinel", "db"]);
        assert!(result.is_err());
    }

    #[test]
    fn report_rejects_csv_and_xlsx_together() {
        let result = Cli::try_parse_from([
            "sentinel", "report", "-w", "ws1", "--csv", "--xlsx", "-o", "out.csv",
        ]);
        assert!(result.is_err());
    }
}
