// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # RuleSet
//!
//! The compiled, priority-sorted collection of matching rules. A
//! `RuleSet` is the only place the priority formula is evaluated; once
//! compiled it is immutable and cheap to clone (an `Arc` around three
//! index vectors would be a natural follow-up if cloning ever shows up in
//! a profile).

use crate::entities::{Rule, RuleDescriptor};
use crate::error::HunterError;
use crate::value_objects::{Accuracy, Relevance, RuleId, SearchLocation};
use std::str::FromStr;

/// Weight applied to `rank(relevance)`. Chosen so that, alone, relevance
/// dominates accuracy but never crosses a `SearchLocation` boundary.
const RELEVANCE_WEIGHT: i64 = 20;
/// Weight applied to `rank(accuracy)`. `RELEVANCE_WEIGHT > ACCURACY_WEIGHT > 1`.
const ACCURACY_WEIGHT: i64 = 5;

#[derive(Debug, Clone)]
pub struct RuleSet {
    /// All rules, sorted `(priority desc, original_index asc)`.
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles raw descriptors into a priority-sorted, immutable rule set.
    /// `original_index` is the descriptor's position in `descriptors`,
    /// fixed before sorting so it survives as a stable tie-breaker.
    pub fn compile(descriptors: Vec<RuleDescriptor>) -> Result<Self, HunterError> {
        let mut rules = Vec::with_capacity(descriptors.len());
        for (original_index, descriptor) in descriptors.into_iter().enumerate() {
            let search_location = SearchLocation::from_str(&descriptor.search_location)
                .map_err(|e| HunterError::malformed_rule(original_index, e))?;
            let relevance =
                Relevance::from_str(&descriptor.relevance).map_err(|e| HunterError::malformed_rule(original_index, e))?;
            let accuracy =
                Accuracy::from_str(&descriptor.accuracy).map_err(|e| HunterError::malformed_rule(original_index, e))?;
            if descriptor.search_pattern.trim().is_empty() {
                return Err(HunterError::malformed_rule(original_index, "search_pattern is empty"));
            }
            // Compiled purely to validate the pattern at load time; the
            // actual matcher compiles its own copy per search_location view.
            regex::Regex::new(&format!("(?i){}", descriptor.search_pattern))
                .map_err(|e| HunterError::malformed_rule(original_index, e.to_string()))?;

            let priority = Self::priority_of(search_location, relevance, accuracy, &descriptor.search_pattern);

            rules.push(Rule {
                id: RuleId::new(),
                original_index,
                search_location,
                search_pattern: descriptor.search_pattern,
                category: descriptor.category,
                relevance,
                accuracy,
                priority,
            });
        }

        rules.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.original_index.cmp(&b.original_index)));

        Ok(Self { rules })
    }

    /// `priority = L(search_location) + A·rank(relevance) + B·rank(accuracy)
    /// + len(search_pattern)`.
    fn priority_of(location: SearchLocation, relevance: Relevance, accuracy: Accuracy, pattern: &str) -> i64 {
        location.priority_offset()
            + RELEVANCE_WEIGHT * relevance.rank()
            + ACCURACY_WEIGHT * accuracy.rank()
            + pattern.len() as i64
    }

    /// All rules in priority order.
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    /// The `file_content` view, priority-sorted, rules of other locations
    /// excluded.
    pub fn file_content_view(&self) -> Vec<&Rule> {
        self.view_of(SearchLocation::FileContent)
    }

    /// The `full_path` view, priority-sorted.
    pub fn full_path_view(&self) -> Vec<&Rule> {
        self.view_of(SearchLocation::FullPath)
    }

    /// The `file_name` view, priority-sorted.
    pub fn file_name_view(&self) -> Vec<&Rule> {
        self.view_of(SearchLocation::FileName)
    }

    fn view_of(&self, location: SearchLocation) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.search_location == location).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(location: &str, pattern: &str, relevance: &str, accuracy: &str) -> RuleDescriptor {
        RuleDescriptor {
            search_location: location.to_string(),
            search_pattern: pattern.to_string(),
            category: "test".to_string(),
            relevance: relevance.to_string(),
            accuracy: accuracy.to_string(),
        }
    }

    #[test]
    fn content_rules_outrank_path_rules_at_equal_relevance_and_accuracy() {
        let set = RuleSet::compile(vec![
            descriptor("full_path", "id_rsa", "high", "high"),
            descriptor("file_content", "BEGIN PRIVATE KEY", "high", "high"),
        ])
        .unwrap();
        assert_eq!(set.all()[0].search_location, SearchLocation::FileContent);
    }

    #[test]
    fn ties_break_by_original_descriptor_index() {
        let set = RuleSet::compile(vec![
            descriptor("file_name", "abc", "low", "low"),
            descriptor("file_name", "xyz", "low", "low"),
        ])
        .unwrap();
        assert_eq!(set.all()[0].original_index, 0);
        assert_eq!(set.all()[1].original_index, 1);
    }

    #[test]
    fn priority_is_a_pure_function_recomputed_identically() {
        let a = RuleSet::priority_of(SearchLocation::FileContent, Relevance::High, Accuracy::Medium, "abcd");
        let b = RuleSet::priority_of(SearchLocation::FileContent, Relevance::High, Accuracy::Medium, "abcd");
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_search_location_is_rejected() {
        let err = RuleSet::compile(vec![descriptor("not_a_location", "abc", "low", "low")]);
        assert!(err.is_err());
    }

    #[test]
    fn views_only_contain_their_own_search_location() {
        let set = RuleSet::compile(vec![
            descriptor("file_name", "a", "low", "low"),
            descriptor("full_path", "b", "low", "low"),
            descriptor("file_content", "c", "low", "low"),
        ])
        .unwrap();
        assert_eq!(set.file_name_view().len(), 1);
        assert_eq!(set.full_path_view().len(), 1);
        assert_eq!(set.file_content_view().len(), 1);
    }
}
