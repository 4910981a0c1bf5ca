// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `.tar`, `.tar.gz`/`.tgz` and `.tar.zst` support, layered on the `tar`
//! crate with `flate2`/`zstd` doing the outer decompression.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{ArchiveExtractor, ArchiveMember};
use std::io::{Cursor, Read};

pub struct TarExtractor;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Wrapping {
    Plain,
    Gzip,
    Zstd,
}

fn sniff(name_hint: &str, container_bytes: &[u8]) -> Option<Wrapping> {
    let lower = name_hint.to_ascii_lowercase();
    if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        return Some(Wrapping::Gzip);
    }
    if lower.ends_with(".tar.zst") || lower.ends_with(".tzst") {
        return Some(Wrapping::Zstd);
    }
    if lower.ends_with(".tar") {
        return Some(Wrapping::Plain);
    }
    if infer::archive::is_gz(container_bytes) {
        return Some(Wrapping::Gzip);
    }
    if container_bytes.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
        return Some(Wrapping::Zstd);
    }
    if container_bytes.len() >= 262 && &container_bytes[257..262] == b"ustar" {
        return Some(Wrapping::Plain);
    }
    None
}

#[async_trait]
impl ArchiveExtractor for TarExtractor {
    fn recognizes(&self, name_hint: &str, container_bytes: &[u8]) -> bool {
        sniff(name_hint, container_bytes).is_some()
    }

    async fn members(&self, container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError> {
        let bytes = container_bytes.to_vec();
        tokio::task::spawn_blocking(move || extract(&bytes))
            .await
            .map_err(|e| HunterError::InternalError(format!("tar extraction task panicked: {e}")))?
    }
}

fn extract(container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError> {
    let wrapping = sniff("", container_bytes).unwrap_or(Wrapping::Plain);
    let decompressed: Vec<u8> = match wrapping {
        Wrapping::Plain => container_bytes.to_vec(),
        Wrapping::Gzip => {
            let mut decoder = GzDecoder::new(Cursor::new(container_bytes));
            let mut buf = Vec::new();
            decoder.read_to_end(&mut buf).map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?;
            buf
        }
        Wrapping::Zstd => zstd::stream::decode_all(Cursor::new(container_bytes)).map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?,
    };

    let mut archive = tar::Archive::new(Cursor::new(&decompressed));
    let mut members = Vec::new();
    let entries = archive.entries().map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry.path().map_err(|e| HunterError::ArchiveCorrupt(e.to_string()))?.to_string_lossy().into_owned();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(|e| HunterError::ArchiveCorrupt(format!("{name}: {e}")))?;
        members.push(ArchiveMember { name, bytes });
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tar() -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        let data = b"topsecret";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_cksum();
        builder.append_data(&mut header, "secret.txt", &data[..]).unwrap();
        builder.into_inner().unwrap()
    }

    #[test]
    fn recognizes_plain_tar_by_extension_and_ustar_magic() {
        let tar = TarExtractor;
        let bytes = sample_tar();
        assert!(tar.recognizes("dump.tar", &[]));
        assert!(tar.recognizes("no-hint", &bytes));
        assert!(!tar.recognizes("plain.txt", b"definitely not a tar"));
    }

    #[test]
    fn recognizes_gz_and_zst_wrapped_tar_by_extension() {
        let tar = TarExtractor;
        assert!(tar.recognizes("dump.tar.gz", &[]));
        assert!(tar.recognizes("dump.tgz", &[]));
        assert!(tar.recognizes("dump.tar.zst", &[]));
    }

    #[tokio::test]
    async fn members_reads_plain_tar_contents() {
        let tar = TarExtractor;
        let bytes = sample_tar();
        let members = tar.members(&bytes).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "secret.txt");
        assert_eq!(members[0].bytes, b"topsecret");
    }

    #[tokio::test]
    async fn members_transparently_decompresses_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let tar_bytes = sample_tar();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_bytes).unwrap();
        let gz_bytes = encoder.finish().unwrap();

        let tar = TarExtractor;
        let members = tar.members(&gz_bytes).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].bytes, b"topsecret");
    }
}
