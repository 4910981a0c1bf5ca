// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Review
//!
//! A reviewer's disposition of a single [`crate::entities::File`].
//! Applying a `Review` is idempotent: the last write wins, and it only
//! ever touches the `review_verdict`/`review_comment` fields of the
//! target file. Scoped by `workspace_id` in addition to the file's
//! `sha256`, since the same content can be observed independently in
//! more than one workspace and a verdict in one must never bleed into
//! another.

use crate::value_objects::{ReviewVerdict, Sha256Digest, WorkspaceId};

#[derive(Debug, Clone)]
pub struct Review {
    pub workspace_id: WorkspaceId,
    pub file_sha256: Sha256Digest,
    pub verdict: ReviewVerdict,
    pub comment: Option<String>,
}

impl Review {
    pub fn new(workspace_id: WorkspaceId, file_sha256: Sha256Digest, verdict: ReviewVerdict, comment: Option<String>) -> Self {
        Self { workspace_id, file_sha256, verdict, comment }
    }

    /// Applies this review to a file in place, overwriting any prior
    /// verdict/comment.
    pub fn apply(&self, file: &mut super::file::File) {
        file.review_verdict = Some(self.verdict);
        file.review_comment = self.comment.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::File;
    use crate::value_objects::{RuleId, WorkspaceId};

    #[test]
    fn applying_a_review_overwrites_any_prior_verdict() {
        let workspace_id = WorkspaceId::new();
        let mut file = File::new_content_less(workspace_id, Sha256Digest::of(b"x"), 1, RuleId::new(), "backup");
        file.review_verdict = Some(ReviewVerdict::Relevant);

        let review = Review::new(workspace_id, file.sha256, ReviewVerdict::Irrelevant, Some("false positive".to_string()));
        review.apply(&mut file);

        assert_eq!(file.review_verdict, Some(ReviewVerdict::Irrelevant));
        assert_eq!(file.review_comment.as_deref(), Some("false positive"));
    }
}
