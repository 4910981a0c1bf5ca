// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `.zip` archive support via the `zip` crate.

use async_trait::async_trait;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{ArchiveExtractor, ArchiveMember};
use std::io::{Cursor, Read};

pub struct ZipExtractor;

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    fn recognizes(&self, name_hint: &str, container_bytes: &[u8]) -> bool {
        if name_hint.to_ascii_lowercase().ends_with(".zip") {
            return true;
        }
        infer::archive::is_zip(container_bytes)
    }

    async fn members(&self, container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError> {
        let bytes = container_bytes.to_vec();
        tokio::task::spawn_blocking(move || extract(&bytes))
            .await
            .map_err(|e| HunterError::InternalError(format!("zip extraction task panicked: {e}")))?
    }
}

fn extract(container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError> {
    let cursor = Cursor::new(container_bytes);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?;

    let mut members = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes).map_err(|e| HunterError::ArchiveCorrupt(format!("{name}: {e}")))?;
        members.push(ArchiveMember { name, bytes });
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_zip() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("secret.txt", options).unwrap();
            writer.write_all(b"topsecret").unwrap();
            writer.start_file("dir/", options.clone()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn recognizes_by_extension_and_magic_bytes() {
        let zip = ZipExtractor;
        let bytes = sample_zip();
        assert!(zip.recognizes("archive.zip", &[]));
        assert!(zip.recognizes("no-hint", &bytes));
        assert!(!zip.recognizes("plain.txt", b"not a zip"));
    }

    #[tokio::test]
    async fn members_skips_directory_entries() {
        let zip = ZipExtractor;
        let bytes = sample_zip();
        let members = zip.members(&bytes).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "secret.txt");
        assert_eq!(members[0].bytes, b"topsecret");
    }

    #[tokio::test]
    async fn corrupt_archive_yields_archive_corrupt() {
        let zip = ZipExtractor;
        let err = zip.members(b"PK\x03\x04garbage").await.unwrap_err();
        assert!(matches!(err, HunterError::ArchiveCorrupt(_)));
    }
}
