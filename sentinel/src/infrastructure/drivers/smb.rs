// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SMB enumeration via the `smb` crate. Supports user/password,
//! NTLM pass-the-hash, and anonymous auth, mirroring the three
//! [`SmbCredentials`] variants one-to-one.

use async_trait::async_trait;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::EnumerationDriver;
use sentinel_domain::value_objects::{ArchiveChain, ByteFetcher, Credentials, EnumerationRoot, FileReference, HostId, SmbCredentials};
use smb::{Client, ClientConfig, ConnectionConfig};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub struct SmbDriver {
    host: HostId,
    server: String,
    share: String,
}

impl SmbDriver {
    pub fn new(host: HostId, server: String, share: String) -> Self {
        Self { host, server, share }
    }
}

fn client_config(credentials: &SmbCredentials) -> ClientConfig {
    let mut config = ClientConfig::default();
    match credentials {
        SmbCredentials::UserPassword { user, password } => {
            config.auth = smb::AuthConfig::UserPassword { username: user.clone(), password: password.clone() };
        }
        SmbCredentials::NtlmHash { user, ntlm_hash } => {
            config.auth = smb::AuthConfig::NtlmHash { username: user.clone(), ntlm_hash: ntlm_hash.clone() };
        }
        SmbCredentials::Anonymous => {
            config.auth = smb::AuthConfig::Anonymous;
        }
    }
    config
}

struct SmbFetcher {
    server: String,
    share: String,
    credentials: SmbCredentials,
    remote_path: String,
}

#[async_trait]
impl ByteFetcher for SmbFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError> {
        let client = Client::connect(&self.server, ConnectionConfig::default(), client_config(&self.credentials))
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.server)))?;
        let tree = client.tree_connect(&self.share).await.map_err(|e| HunterError::ProtocolRefusal(format!("share {}: {e}", self.share)))?;
        let bytes = tree
            .open_file(&self.remote_path)
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.remote_path)))?
            .read_all()
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.remote_path)))?;
        Ok(bytes)
    }
}

#[async_trait]
impl EnumerationDriver for SmbDriver {
    async fn enumerate(&self, roots: &[EnumerationRoot], credentials: &Credentials, sink: Sender<FileReference>) -> Result<(), HunterError> {
        let smb_credentials = match credentials {
            Credentials::Smb(c) => c.clone(),
            other => return Err(HunterError::InternalError(format!("smb driver received non-smb credentials: {other:?}"))),
        };

        let client = Client::connect(&self.server, ConnectionConfig::default(), client_config(&smb_credentials))
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.server)))?;
        let tree = client.tree_connect(&self.share).await.map_err(|e| HunterError::ProtocolRefusal(format!("share {}: {e}", self.share)))?;

        let mut pending: Vec<String> = roots.iter().map(|r| r.0.display().to_string()).collect();
        while let Some(dir) = pending.pop() {
            let entries = tree.list_directory(&dir).await.map_err(|e| HunterError::ProtocolRefusal(format!("{dir}: {e}")))?;
            for entry in entries {
                let full_path = format!("{}/{}", dir.trim_end_matches('/'), entry.name());
                if entry.is_directory() {
                    pending.push(full_path);
                    continue;
                }
                let fetcher = SmbFetcher {
                    server: self.server.clone(),
                    share: self.share.clone(),
                    credentials: smb_credentials.clone(),
                    remote_path: full_path.clone(),
                };
                let reference = FileReference {
                    host: self.host,
                    full_path: format!("\\\\{}\\{}\\{}", self.server, self.share, full_path.trim_start_matches('/')),
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
