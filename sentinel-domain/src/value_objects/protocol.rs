// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Protocol & Credentials
//!
//! The four interchangeable enumeration drivers and the per-host
//! connection details each one needs. Closed set, matching the
//! `SearchLocation` pattern: a tagged variant, not a runtime string.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Ftp,
    Nfs,
    Smb,
    Local,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Ftp => "ftp",
            Protocol::Nfs => "nfs",
            Protocol::Smb => "smb",
            Protocol::Local => "local",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SMB supports three distinct auth modes.
#[derive(Debug, Clone)]
pub enum SmbCredentials {
    UserPassword { user: String, password: String },
    /// Pass-the-hash: the NTLM hash is used directly, never derived from a
    /// password the driver can see.
    NtlmHash { user: String, ntlm_hash: String },
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct FtpCredentials {
    pub user: String,
    pub password: String,
    pub tls: bool,
}

impl FtpCredentials {
    pub fn anonymous() -> Self {
        Self {
            user: "anonymous".to_string(),
            password: "anonymous@".to_string(),
            tls: false,
        }
    }
}

/// NFS user/group mapping is purely informational — it never gates
/// enumeration, it only annotates observed paths.
#[derive(Debug, Clone, Default)]
pub struct NfsCredentials {
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

/// Local driver has no connection credentials; `cross_filesystem_boundaries`
/// governs whether the walk is allowed to cross filesystem boundaries.
#[derive(Debug, Clone, Default)]
pub struct LocalCredentials {
    pub cross_filesystem_boundaries: bool,
}

#[derive(Debug, Clone)]
pub enum Credentials {
    Ftp(FtpCredentials),
    Nfs(NfsCredentials),
    Smb(SmbCredentials),
    Local(LocalCredentials),
}

/// A connection root to enumerate: a directory path for `local`/`nfs`/`smb`
/// shares, or a remote path for `ftp`.
#[derive(Debug, Clone)]
pub struct EnumerationRoot(pub PathBuf);
