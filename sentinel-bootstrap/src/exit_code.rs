// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Codes
//!
//! The process exit codes this binary can return: `0` clean, `2`
//! misuse/bad args, `3` unrecoverable database error, `4` all drivers
//! failed to start, `130` on cancellation signal.

use sentinel_domain::HunterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Misuse = 2,
    DatabaseError = 3,
    AllDriversFailed = 4,
    Cancelled = 130,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Maps a [`HunterError`] to the exit code an operator should see. Only
/// the fatal categories reach this point — per-file errors are logged
/// and swallowed by the coordinator, never surfaced to `main`.
pub fn map_error_to_exit_code(error: &HunterError) -> ExitCode {
    match error {
        HunterError::MalformedRule(_) | HunterError::BadThreshold(_) => ExitCode::Misuse,
        HunterError::DatabaseError(_) => ExitCode::DatabaseError,
        HunterError::Cancelled(_) => ExitCode::Cancelled,
        _ => ExitCode::AllDriversFailed,
    }
}

pub fn result_to_exit_code<T>(result: Result<T, HunterError>) -> std::process::ExitCode {
    match result {
        Ok(_) => ExitCode::Success.into(),
        Err(e) => {
            tracing::error!("fatal: {e}");
            map_error_to_exit_code(&e).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_misuse() {
        assert_eq!(map_error_to_exit_code(&HunterError::MalformedRule("bad".into())), ExitCode::Misuse);
        assert_eq!(map_error_to_exit_code(&HunterError::BadThreshold("bad".into())), ExitCode::Misuse);
    }

    #[test]
    fn database_errors_map_to_database_error_code() {
        assert_eq!(map_error_to_exit_code(&HunterError::DatabaseError("locked".into())), ExitCode::DatabaseError);
    }

    #[test]
    fn cancellation_maps_to_130() {
        assert_eq!(map_error_to_exit_code(&HunterError::Cancelled("sigterm".into())).code(), 130);
    }

    #[test]
    fn ok_result_maps_to_success() {
        assert_eq!(ExitCode::Success.code(), 0);
    }
}
