// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain services: synchronous, CPU-bound operations kept distinct from
//! the async infrastructure ports in [`crate::repositories`].

pub mod analyzer;
pub mod matcher;

pub use analyzer::{AnalysisOutcome, Analyzer, AnalyzerConfig};
pub use matcher::{RegexMatcher, RuleMatcher};
