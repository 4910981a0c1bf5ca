// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! FTP enumeration via `suppaftp`.
//!
//! Relies on `MLSD` for structured directory listings; a server that only
//! supports the legacy `LIST` format is a protocol refusal rather than a
//! best-effort text parse, since `LIST` output is not standardized enough
//! to parse reliably across servers.

use async_trait::async_trait;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::EnumerationDriver;
use sentinel_domain::value_objects::{ArchiveChain, ByteFetcher, Credentials, EnumerationRoot, FileReference, FtpCredentials, HostId};
use std::sync::Arc;
use suppaftp::AsyncFtpStream;
use tokio::sync::mpsc::Sender;

pub struct FtpDriver {
    host: HostId,
    address: String,
}

impl FtpDriver {
    pub fn new(host: HostId, address: String) -> Self {
        Self { host, address }
    }
}

struct FtpFetcher {
    address: String,
    credentials: FtpCredentials,
    remote_path: String,
}

#[async_trait]
impl ByteFetcher for FtpFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError> {
        let mut stream = connect(&self.address, &self.credentials).await?;
        let bytes = stream
            .retr_as_buffer(&self.remote_path)
            .await
            .map_err(|e| HunterError::TransientIo(format!("{}: {e}", self.remote_path)))?
            .into_inner();
        let _ = stream.quit().await;
        Ok(bytes)
    }
}

async fn connect(address: &str, credentials: &FtpCredentials) -> Result<AsyncFtpStream, HunterError> {
    let mut stream = AsyncFtpStream::connect(address)
        .await
        .map_err(|e| HunterError::TransientIo(format!("connect {address}: {e}")))?;
    if credentials.tls {
        stream = stream.into_secure(suppaftp::types::FtpMode::ExtendedPassive).await.map_err(|e| HunterError::ProtocolRefusal(format!("TLS upgrade failed: {e}")))?;
    }
    stream
        .login(&credentials.user, &credentials.password)
        .await
        .map_err(|e| HunterError::ProtocolRefusal(format!("login refused: {e}")))?;
    Ok(stream)
}

#[async_trait]
impl EnumerationDriver for FtpDriver {
    async fn enumerate(&self, roots: &[EnumerationRoot], credentials: &Credentials, sink: Sender<FileReference>) -> Result<(), HunterError> {
        let ftp_credentials = match credentials {
            Credentials::Ftp(c) => c.clone(),
            other => return Err(HunterError::InternalError(format!("ftp driver received non-ftp credentials: {other:?}"))),
        };

        let mut stream = connect(&self.address, &ftp_credentials).await?;

        let mut pending: Vec<String> = roots.iter().map(|r| r.0.display().to_string()).collect();
        while let Some(dir) = pending.pop() {
            let entries = stream.mlsd(Some(&dir)).await.map_err(|e| HunterError::FtpUnsupported(format!("{dir}: {e}")))?;
            for entry in entries {
                let full_path = format!("{}/{}", dir.trim_end_matches('/'), entry.name());
                if entry.is_directory() {
                    pending.push(full_path);
                    continue;
                }
                if !entry.is_file() {
                    continue;
                }
                let size = entry.size() as u64;
                let fetcher = FtpFetcher {
                    address: self.address.clone(),
                    credentials: ftp_credentials.clone(),
                    remote_path: full_path.clone(),
                };
                let reference = FileReference {
                    host: self.host,
                    full_path,
                    archive_chain: ArchiveChain::root(),
                    size,
                    byte_fetcher: Arc::new(fetcher),
                };
                if sink.send(reference).await.is_err() {
                    let _ = stream.quit().await;
                    return Err(HunterError::Cancelled("enumeration sink closed".to_string()));
                }
            }
        }
        let _ = stream.quit().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_credentials_use_well_known_login() {
        let creds = FtpCredentials::anonymous();
        assert_eq!(creds.user, "anonymous");
    }
}
