// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Entity Identifiers
//!
//! Time-ordered ULID identifiers, one distinct type per entity so they
//! can't be confused with one another at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

macro_rules! ulid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Ulid);

        impl $name {
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            pub fn nil() -> Self {
                Self(Ulid::nil())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Ulid::from_str(s)?))
            }
        }
    };
}

ulid_id!(WorkspaceId);
ulid_id!(HostId);
ulid_id!(PathId);
ulid_id!(RuleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_string() {
        let id = HostId::new();
        let rendered = id.to_string();
        assert_eq!(HostId::from_str(&rendered).unwrap(), id);
    }

    #[test]
    fn distinct_ids_are_distinct_types() {
        // Compile-time check only: this would fail to compile if `HostId`
        // and `PathId` were the same type and this test asserted equality
        // of the underlying value across types.
        let host = HostId::new();
        let path = PathId::new();
        assert_ne!(host.to_string(), path.to_string());
    }
}
