// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Local filesystem enumeration via `walkdir`. Symlinks are followed, with
//! a visited-directory stack guarding against the cycles that following
//! them would otherwise walk into forever.

use async_trait::async_trait;
use same_file::Handle;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::EnumerationDriver;
use sentinel_domain::value_objects::{ArchiveChain, Credentials, EnumerationRoot, FileReference, HostId};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub struct LocalDriver {
    host: HostId,
}

impl LocalDriver {
    pub fn new(host: HostId) -> Self {
        Self { host }
    }
}

struct LocalFetcher {
    path: std::path::PathBuf,
}

#[async_trait]
impl sentinel_domain::value_objects::ByteFetcher for LocalFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, HunterError> {
        tokio::fs::read(&self.path).await.map_err(|e| HunterError::IoError(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl EnumerationDriver for LocalDriver {
    async fn enumerate(&self, roots: &[EnumerationRoot], credentials: &Credentials, sink: Sender<FileReference>) -> Result<(), HunterError> {
        let cross_boundaries = match credentials {
            Credentials::Local(local) => local.cross_filesystem_boundaries,
            other => return Err(HunterError::InternalError(format!("local driver received non-local credentials: {other:?}"))),
        };

        for root in roots {
            walk_root(&root.0, cross_boundaries, self.host, &sink).await?;
        }
        Ok(())
    }
}

async fn walk_root(root: &Path, cross_boundaries: bool, host: HostId, sink: &Sender<FileReference>) -> Result<(), HunterError> {
    let root = root.to_path_buf();
    let root_device = if cross_boundaries { None } else { device_id(&root) };

    // Ancestors still open on the current branch, paired with the depth
    // they were pushed at so a step back up the tree drops them.
    let mut ancestors: Vec<(usize, Handle)> = Vec::new();

    let mut walker = walkdir::WalkDir::new(&root).follow_links(true).into_iter();
    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) => {
                tracing::warn!(%e, "walk error, skipping entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            ancestors.retain(|(depth, _)| *depth < entry.depth());

            if let Some(expected) = root_device {
                if device_id(entry.path()) != Some(expected) {
                    walker.skip_current_dir();
                    continue;
                }
            }

            match Handle::from_path(entry.path()) {
                Ok(handle) => {
                    if ancestors.iter().any(|(_, seen)| seen == &handle) {
                        tracing::warn!(path = %entry.path().display(), "symlink cycle detected, not descending");
                        walker.skip_current_dir();
                        continue;
                    }
                    ancestors.push((entry.depth(), handle));
                }
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), %e, "failed to open directory handle, skipping");
                    walker.skip_current_dir();
                }
            }
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), %e, "failed to stat file, skipping");
                continue;
            }
        };

        let reference = FileReference {
            host,
            full_path: entry.path().display().to_string(),
            archive_chain: ArchiveChain::root(),
            size: metadata.len(),
            byte_fetcher: Arc::new(LocalFetcher { path: entry.path().to_path_buf() }),
        };

        if sink.send(reference).await.is_err() {
            return Err(HunterError::Cancelled("enumeration sink closed".to_string()));
        }
    }
    Ok(())
}

#[cfg(unix)]
fn device_id(path: &Path) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata(path).ok().map(|m| m.dev())
}

#[cfg(not(unix))]
fn device_id(_path: &Path) -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn walks_nested_directories_and_emits_regular_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("top.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("nested/deep.txt"), b"bb").unwrap();

        let driver = LocalDriver::new(HostId::new());
        let (tx, mut rx) = mpsc::channel(16);
        let roots = vec![EnumerationRoot(dir.path().to_path_buf())];
        let creds = Credentials::Local(Default::default());

        driver.enumerate(&roots, &creds, tx).await.unwrap();

        let mut seen = Vec::new();
        while let Some(reference) = rx.recv().await {
            seen.push(reference.full_path);
        }
        assert_eq!(seen.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn a_symlink_cycle_is_detected_and_does_not_hang() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("real")).unwrap();
        std::fs::write(dir.path().join("real/file.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("real/loop")).unwrap();

        let driver = LocalDriver::new(HostId::new());
        let (tx, mut rx) = mpsc::channel(16);
        let roots = vec![EnumerationRoot(dir.path().to_path_buf())];
        let creds = Credentials::Local(Default::default());

        driver.enumerate(&roots, &creds, tx).await.unwrap();

        let mut seen = Vec::new();
        while let Some(reference) = rx.recv().await {
            seen.push(reference.full_path);
        }
        assert_eq!(seen.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn a_symlinked_directory_without_a_cycle_is_still_followed() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("target")).unwrap();
        std::fs::write(dir.path().join("target/inner.txt"), b"y").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

        let driver = LocalDriver::new(HostId::new());
        let (tx, mut rx) = mpsc::channel(16);
        let roots = vec![EnumerationRoot(dir.path().to_path_buf())];
        let creds = Credentials::Local(Default::default());

        driver.enumerate(&roots, &creds, tx).await.unwrap();

        let mut seen = Vec::new();
        while let Some(reference) = rx.recv().await {
            seen.push(reference.full_path);
        }
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn rejects_non_local_credentials() {
        let driver = LocalDriver::new(HostId::new());
        let (tx, _rx) = mpsc::channel(1);
        let roots = vec![EnumerationRoot(std::path::PathBuf::from("/tmp"))];
        let creds = Credentials::Nfs(Default::default());
        let err = driver.enumerate(&roots, &creds, tx).await.unwrap_err();
        assert!(matches!(err, HunterError::InternalError(_)));
    }
}
