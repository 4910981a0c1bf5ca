// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Archive Chain
//!
//! The nested path of archive containers leading to a member file, e.g.
//! `outer.zip/inner.tar/secret.key`. Empty for files observed directly.

use serde::{Deserialize, Serialize};

/// Delimiter used when rendering the chain as an observable path for the
/// `full_path` rule pass.
pub const ARCHIVE_CHAIN_DELIMITER: char = '/';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveChain(Vec<String>);

impl ArchiveChain {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns a new chain with `container` appended, used when an archive
    /// member is itself re-submitted to the analyzer.
    pub fn extended(&self, container: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(container.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Renders the full observable path used by the `full_path` rule pass:
    /// the archive chain segments joined by [`ARCHIVE_CHAIN_DELIMITER`],
    /// followed by `full_path`.
    pub fn render_observable_path(&self, full_path: &str) -> String {
        if self.0.is_empty() {
            return full_path.to_string();
        }
        let mut rendered = self.0.join(&ARCHIVE_CHAIN_DELIMITER.to_string());
        rendered.push(ARCHIVE_CHAIN_DELIMITER);
        rendered.push_str(full_path);
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_chain_renders_bare_path() {
        let chain = ArchiveChain::root();
        assert_eq!(chain.render_observable_path("id_rsa"), "id_rsa");
    }

    #[test]
    fn nested_chain_renders_with_delimiter() {
        let chain = ArchiveChain::root().extended("secrets.zip");
        assert_eq!(chain.render_observable_path("id_rsa"), "secrets.zip/id_rsa");
        assert_eq!(chain.depth(), 1);
    }

    #[test]
    fn extending_does_not_mutate_the_original() {
        let root = ArchiveChain::root();
        let child = root.extended("outer.zip");
        assert!(root.is_empty());
        assert_eq!(child.depth(), 1);
    }
}
