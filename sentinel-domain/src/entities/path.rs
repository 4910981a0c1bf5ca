// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # ObservedPath
//!
//! One observation of a file at a location. Many `ObservedPath`
//! rows can point at the same [`crate::entities::File`] — deduplication
//! coalesces content, never the places it was seen.

use crate::value_objects::{ArchiveChain, HostId, PathId, RuleId, Sha256Digest};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ObservedPath {
    pub id: PathId,
    pub host_id: HostId,
    pub file_sha256: Sha256Digest,
    pub full_path: String,
    pub archive_chain: ArchiveChain,
    pub matched_rule: RuleId,
    pub observed_at: DateTime<Utc>,
}

impl ObservedPath {
    pub fn new(
        host_id: HostId,
        file_sha256: Sha256Digest,
        full_path: impl Into<String>,
        archive_chain: ArchiveChain,
        matched_rule: RuleId,
    ) -> Self {
        Self {
            id: PathId::new(),
            host_id,
            file_sha256,
            full_path: full_path.into(),
            archive_chain,
            matched_rule,
            observed_at: Utc::now(),
        }
    }

    /// The human-facing location string: the archive chain segments
    /// followed by the container's own path.
    pub fn observable_path(&self) -> String {
        self.archive_chain.render_observable_path(&self.full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observable_path_without_archive_chain_is_the_bare_full_path() {
        let p = ObservedPath::new(HostId::new(), Sha256Digest::of(b"x"), "/srv/backup.tar.gz", ArchiveChain::root(), RuleId::new());
        assert_eq!(p.observable_path(), "/srv/backup.tar.gz");
    }

    #[test]
    fn observable_path_with_archive_chain_prefixes_member_names() {
        let chain = ArchiveChain::root().extended("backup.tar.gz").extended("inner.zip");
        let p = ObservedPath::new(HostId::new(), Sha256Digest::of(b"x"), "secrets.txt", chain, RuleId::new());
        assert_eq!(p.observable_path(), "backup.tar.gz/inner.zip/secrets.txt");
    }
}
