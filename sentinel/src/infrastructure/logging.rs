// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide `tracing` subscriber setup. `--verbose` flips the default
//! level; `RUST_LOG` always wins over it when set, matching the
//! `EnvFilter` convention most `tracing-subscriber` consumers expect.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Must be called exactly once, before
/// any other module logs; `main` calls this immediately after parsing
/// the CLI.
pub fn init_tracing(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_fails_rather_than_panicking() {
        let _ = init_tracing(false);
        assert!(init_tracing(false).is_err());
    }
}
