// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! NFSv3 enumeration via `nfs3_client`. UID/GID mapping is purely
//! annotative here, never used to gate enumeration.

use async_trait::async_trait;
use nfs3_client::Nfs3Connection;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::EnumerationDriver;
use sentinel_domain::value_objects::{ArchiveChain, ByteFetcher, Credentials, EnumerationRoot, FileReference, HostId, NfsCredentials};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub struct NfsDriver {
    host: HostId,
    server: String,
}

impl NfsDriver {
    pub fn new(host: HostId, server: String) -> Self {
        Self { host, server }
    }
}

struct NfsFetcher {
    server: String,
    remote_path: String,
}

#[async_trait]
impl ByteFetcher for NfsFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError> {
        let mut connection = Nfs3Connection::connect(&self.server)
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.server)))?;
        connection
            .read_file(&self.remote_path)
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.remote_path)))
    }
}

#[async_trait]
impl EnumerationDriver for NfsDriver {
    async fn enumerate(&self, roots: &[EnumerationRoot], credentials: &Credentials, sink: Sender<FileReference>) -> Result<(), HunterError> {
        let _nfs_credentials: &NfsCredentials = match credentials {
            Credentials::Nfs(c) => c,
            other => return Err(HunterError::InternalError(format!("nfs driver received non-nfs credentials: {other:?}"))),
        };

        let mut connection = Nfs3Connection::connect(&self.server)
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.server)))?;

        let mut pending: Vec<String> = roots.iter().map(|r| r.0.display().to_string()).collect();
        while let Some(dir) = pending.pop() {
            let entries = connection.read_dir(&dir).await.map_err(|e| HunterError::ProtocolRefusal(format!("{dir}: {e}")))?;
            for entry in entries {
                let full_path = format!("{}/{}", dir.trim_end_matches('/'), entry.name());
                if entry.is_directory() {
                    pending.push(full_path);
                    continue;
                }
                if !entry.is_file() {
                    continue;
                }
                let fetcher = NfsFetcher { server: self.server.clone(), remote_path: full_path.clone() };
                let reference = FileReference {
                    host: self.host,
                    full_path,
                    archive_chain: ArchiveChain::root(),
                    size: entry.size(),
                    byte_fetcher: Arc::new(fetcher),
                };
                if sink.send(reference).await.is_err() {
                    return Err(HunterError::Cancelled("enumeration sink closed".to_string()));
                }
            }
        }
        Ok(())
    }
}
