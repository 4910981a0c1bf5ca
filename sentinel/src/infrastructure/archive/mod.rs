// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Archive container extractors.

mod tar_extractor;
mod zip_extractor;

pub use tar_extractor::TarExtractor;
pub use zip_extractor::ZipExtractor;

use async_trait::async_trait;
use sentinel_domain::error::HunterError;
use sentinel_domain::repositories::{ArchiveExtractor, ArchiveMember};

/// Dispatches to whichever configured extractor recognizes the container,
/// tried in order: `zip` first since it has a cheap, unambiguous magic
/// number, then the `tar` family (which may itself be wrapped in gzip or
/// zstd). Implements [`ArchiveExtractor`] itself so the analyzer can hold
/// a single `Arc<dyn ArchiveExtractor>` covering every supported format.
pub struct ChainedExtractor {
    extractors: Vec<Box<dyn ArchiveExtractor>>,
}

impl ChainedExtractor {
    pub fn new() -> Self {
        Self {
            extractors: vec![Box::new(ZipExtractor), Box::new(TarExtractor)],
        }
    }

    fn find_for(&self, name_hint: &str, container_bytes: &[u8]) -> Option<&dyn ArchiveExtractor> {
        self.extractors.iter().map(|e| e.as_ref()).find(|e| e.recognizes(name_hint, container_bytes))
    }
}

impl Default for ChainedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveExtractor for ChainedExtractor {
    fn recognizes(&self, name_hint: &str, container_bytes: &[u8]) -> bool {
        self.find_for(name_hint, container_bytes).is_some()
    }

    async fn members(&self, container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError> {
        match self.find_for("", container_bytes) {
            Some(extractor) => extractor.members(container_bytes).await,
            None => Err(HunterError::ArchiveCorrupt("no extractor recognizes this container".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_sniffed_format_not_just_extension() {
        let chained = ChainedExtractor::new();
        assert!(chained.find_for("mystery.bin", &[]).is_none());
    }
}
