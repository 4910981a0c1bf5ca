// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File
//!
//! Keyed by the SHA-256 of its full raw bytes. Bytes are absent when
//! the file was size-gated out; the row still exists so a matching
//! name/path rule has somewhere to attach to ("content-less File").

use crate::value_objects::{ReviewVerdict, RuleId, Sha256Digest, WorkspaceId};

#[derive(Debug, Clone)]
pub struct File {
    pub sha256: Sha256Digest,
    pub workspace_id: WorkspaceId,
    pub size: u64,
    /// Present only when the file passed the size gate and its content was
    /// actually fetched and hashed.
    pub bytes: Option<Vec<u8>>,
    pub mime_hint: Option<String>,
    /// The rule that produced the very first observation of this file.
    /// Concurrent inserts converge on the earliest committer's
    /// rule/category — later callers never overwrite it.
    pub matched_rule: RuleId,
    pub category: String,
    pub review_verdict: Option<ReviewVerdict>,
    pub review_comment: Option<String>,
}

impl File {
    pub fn new_content_less(
        workspace_id: WorkspaceId,
        sha256: Sha256Digest,
        size: u64,
        matched_rule: RuleId,
        category: impl Into<String>,
    ) -> Self {
        Self {
            sha256,
            workspace_id,
            size,
            bytes: None,
            mime_hint: None,
            matched_rule,
            category: category.into(),
            review_verdict: None,
            review_comment: None,
        }
    }

    pub fn new_with_content(
        workspace_id: WorkspaceId,
        bytes: Vec<u8>,
        mime_hint: Option<String>,
        matched_rule: RuleId,
        category: impl Into<String>,
    ) -> Self {
        let sha256 = Sha256Digest::of(&bytes);
        let size = bytes.len() as u64;
        Self {
            sha256,
            workspace_id,
            size,
            bytes: Some(bytes),
            mime_hint,
            matched_rule,
            category: category.into(),
            review_verdict: None,
            review_comment: None,
        }
    }

    /// Invariant check used in tests: bytes, when present, must hash to
    /// `sha256`.
    pub fn bytes_match_digest(&self) -> bool {
        match &self.bytes {
            Some(bytes) => Sha256Digest::of(bytes) == self.sha256,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bearing_file_hashes_its_own_bytes() {
        let file = File::new_with_content(
            WorkspaceId::new(),
            b"password=hunter2\n".to_vec(),
            None,
            RuleId::new(),
            "credentials",
        );
        assert!(file.bytes_match_digest());
    }

    #[test]
    fn content_less_file_trivially_satisfies_the_digest_invariant() {
        let file = File::new_content_less(WorkspaceId::new(), Sha256Digest::of(b"x"), 10 * 1024 * 1024, RuleId::new(), "backup");
        assert!(file.bytes_match_digest());
        assert!(file.bytes.is_none());
    }
}
