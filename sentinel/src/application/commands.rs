// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Commands
//!
//! Immutable, self-contained inputs to the use cases in this module,
//! built directly from [`sentinel_bootstrap::cli::ValidatedCommand`].
//! `main` owns the translation from CLI args to these; use cases own
//! everything from here on.

use sentinel_domain::value_objects::{Credentials, EnumerationRoot, Protocol};

/// Drives `db --init` / `db --drop` / `db -a <workspace>`.
#[derive(Debug, Clone)]
pub enum DatabaseCommand {
    Init,
    Drop,
    Open { workspace: String },
}

/// Drives `local` / `ftp` / `nfs` / `smb`.
#[derive(Debug, Clone)]
pub struct RunCollectionCommand {
    pub workspace: String,
    pub protocol: Protocol,
    /// Host/server address for remote protocols; `None` for `local`.
    pub address: Option<String>,
    /// Share name, SMB only.
    pub share: Option<String>,
    pub roots: Vec<EnumerationRoot>,
    pub credentials: Credentials,
}
