// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Relevance & Accuracy
//!
//! Both attributes share the same `{low, medium, high}` shape and the same
//! `rank()` used by the priority formula, but they are kept as distinct
//! types so a rule author can't accidentally pass one where the other is
//! expected.

use serde::{Deserialize, Serialize};

macro_rules! three_level_enum {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            Low,
            Medium,
            High,
        }

        impl $name {
            /// `rank(low)=1, rank(medium)=2, rank(high)=3`.
            pub fn rank(self) -> i64 {
                match self {
                    $name::Low => 1,
                    $name::Medium => 2,
                    $name::High => 3,
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "low" => Ok($name::Low),
                    "medium" => Ok($name::Medium),
                    "high" => Ok($name::High),
                    other => Err(format!(concat!("unknown ", stringify!($name), ": {}"), other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $name::Low => "low",
                    $name::Medium => "medium",
                    $name::High => "high",
                };
                write!(f, "{s}")
            }
        }
    };
}

three_level_enum!(Relevance, "How important a match of this rule is.");
three_level_enum!(Accuracy, "How often this rule's pattern false-positives.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_monotonic() {
        assert!(Relevance::Low.rank() < Relevance::Medium.rank());
        assert!(Relevance::Medium.rank() < Relevance::High.rank());
        assert!(Accuracy::Low.rank() < Accuracy::High.rank());
    }
}
