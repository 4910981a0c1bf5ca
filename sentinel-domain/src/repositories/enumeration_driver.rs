// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # EnumerationDriver
//!
//! Port for protocol-specific recursive enumeration. One
//! implementation per [`crate::value_objects::Protocol`]: local
//! filesystem (`walkdir`), FTP (`suppaftp`), SMB (`smb`), NFS
//! (`nfs3_client`). Drivers emit [`crate::value_objects::FileReference`]
//! values onto the work queue; they never analyze content themselves.

use crate::error::HunterError;
use crate::value_objects::{Credentials, EnumerationRoot, FileReference};
use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

#[async_trait]
pub trait EnumerationDriver: Send + Sync {
    /// Walks `roots` under `credentials`, sending every regular file it
    /// finds to `sink`. Returns once every root has been fully walked or
    /// the driver observes cancellation; a mid-walk protocol refusal is
    /// surfaced as `Err` and the host is marked incomplete.
    async fn enumerate(
        &self,
        roots: &[EnumerationRoot],
        credentials: &Credentials,
        sink: Sender<FileReference>,
    ) -> Result<(), HunterError>;
}
