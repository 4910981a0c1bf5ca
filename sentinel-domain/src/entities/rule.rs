// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Rule
//!
//! A single pattern-matching rule plus its derived [`priority`](Rule::priority).
//! Priority is a pure function of the other attributes and is computed
//! once at compile time, not recomputed per match.

use crate::value_objects::{Accuracy, Relevance, RuleId, SearchLocation};
use serde::{Deserialize, Serialize};

/// Raw configuration-file shape for a rule, before compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub search_location: String,
    pub search_pattern: String,
    pub category: String,
    pub relevance: String,
    pub accuracy: String,
}

/// A compiled, immutable rule. Construction happens exclusively through
/// [`crate::aggregates::RuleSet::compile`], which is the only place the
/// priority formula is evaluated.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    /// Position in the original configuration list — the tie-breaker when
    /// two rules compute to the same priority.
    pub original_index: usize,
    pub search_location: SearchLocation,
    pub search_pattern: String,
    pub category: String,
    pub relevance: Relevance,
    pub accuracy: Accuracy,
    pub priority: i64,
}

impl Rule {
    /// Sort key used to order matches for review by
    /// `(priority desc, category, path)`.
    pub fn snapshot_key(&self) -> (i64, &str, &str) {
        (-self.priority, self.category.as_str(), self.search_pattern.as_str())
    }
}
