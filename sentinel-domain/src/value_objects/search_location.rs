// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Search Location
//!
//! The subject a rule's pattern is matched against. Closed set of three
//! variants so the rule set's filtered views are compile-time partitions
//! rather than a string compared at runtime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLocation {
    FileName,
    FullPath,
    FileContent,
}

impl SearchLocation {
    /// Small constant summand used by the priority formula so that,
    /// at equal relevance and accuracy, `FileContent` > `FullPath` >
    /// `FileName`.
    pub fn priority_offset(self) -> i64 {
        match self {
            SearchLocation::FileContent => 200,
            SearchLocation::FullPath => 100,
            SearchLocation::FileName => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchLocation::FileName => "file_name",
            SearchLocation::FullPath => "full_path",
            SearchLocation::FileContent => "file_content",
        }
    }
}

impl std::fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file_name" => Ok(SearchLocation::FileName),
            "full_path" => Ok(SearchLocation::FullPath),
            "file_content" => Ok(SearchLocation::FileContent),
            other => Err(format!("unknown search_location: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_holds_at_equal_relevance_and_accuracy() {
        assert!(SearchLocation::FileContent.priority_offset() > SearchLocation::FullPath.priority_offset());
        assert!(SearchLocation::FullPath.priority_offset() > SearchLocation::FileName.priority_offset());
    }

    #[test]
    fn round_trips_through_str() {
        for loc in [SearchLocation::FileName, SearchLocation::FullPath, SearchLocation::FileContent] {
            let parsed: SearchLocation = loc.as_str().parse().unwrap();
            assert_eq!(parsed, loc);
        }
    }
}
