// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Reference & Byte Fetcher
//!
//! A lightweight record placed on the work queue, pointing at a file
//! without its bytes. The byte fetcher is a deferred operation so the
//! size gate can decide whether to transfer at all before any bytes move.

use crate::error::HunterError;
use crate::value_objects::{ArchiveChain, HostId};
use async_trait::async_trait;
use std::sync::Arc;

/// Deferred byte transfer. Enumeration drivers implement this so the
/// analyzer's size gate can refuse a fetch above the configured threshold
/// without ever opening the connection.
#[async_trait]
pub trait ByteFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError>;
}

/// A [`ByteFetcher`] over bytes already resident in memory — used by the
/// archive extractor when re-submitting a member file reference, and in
/// tests.
pub struct InMemoryFetcher(pub Vec<u8>);

#[async_trait]
impl ByteFetcher for InMemoryFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError> {
        Ok(self.0.clone())
    }
}

/// A file discovered by an enumeration driver or yielded by the archive
/// extractor, not yet analyzed.
pub struct FileReference {
    pub host: HostId,
    /// Full path as observed by the driver, or the member path relative to
    /// the innermost archive when `archive_chain` is non-empty.
    pub full_path: String,
    pub archive_chain: ArchiveChain,
    pub size: u64,
    pub byte_fetcher: Arc<dyn ByteFetcher>,
}

impl std::fmt::Debug for FileReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileReference")
            .field("host", &self.host)
            .field("full_path", &self.full_path)
            .field("archive_chain", &self.archive_chain)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl FileReference {
    pub fn basename(&self) -> &str {
        self.full_path.rsplit(['/', '\\']).next().unwrap_or(&self.full_path)
    }

    /// Whether the extension marks this as a configured archive container.
    pub fn has_archive_extension(&self, supported_archives: &[String]) -> bool {
        let basename = self.basename().to_ascii_lowercase();
        supported_archives
            .iter()
            .any(|ext| basename.ends_with(&format!(".{}", ext.to_ascii_lowercase())))
    }

    pub fn observable_path(&self) -> String {
        self.archive_chain.render_observable_path(&self.full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(path: &str, size: u64) -> FileReference {
        FileReference {
            host: HostId::new(),
            full_path: path.to_string(),
            archive_chain: ArchiveChain::root(),
            size,
            byte_fetcher: Arc::new(InMemoryFetcher(vec![0u8; size as usize])),
        }
    }

    #[test]
    fn basename_strips_directories() {
        let r = reference("a/b/c/secret.key", 10);
        assert_eq!(r.basename(), "secret.key");
    }

    #[test]
    fn archive_extension_matches_case_insensitively() {
        let r = reference("nested/Secrets.ZIP", 10);
        assert!(r.has_archive_extension(&["zip".to_string()]));
    }

    #[tokio::test]
    async fn in_memory_fetcher_returns_its_bytes() {
        let fetcher = InMemoryFetcher(vec![1, 2, 3]);
        assert_eq!(fetcher.fetch().await.unwrap(), vec![1, 2, 3]);
    }
}
