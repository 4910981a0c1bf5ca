// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secure Command-Line Argument Parsing
//!
//! Security-first argument validation for the collection engine's CLI.
//!
//! ## Security Features
//!
//! - **Length limits** - prevent pathological argument sizes
//! - **Pattern detection** - block path traversal and shell injection
//! - **Path canonicalization** - for paths that must already exist
//! - **System directory protection** - refuse to enumerate sensitive paths

use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_ARG_LENGTH: usize = 1000;
const MAX_PATH_LENGTH: usize = 4096;

const DANGEROUS_PATTERNS: &[&str] = &[
    "..", // path traversal
    "~",  // home directory expansion
    "$",  // variable expansion
    "`",  // command substitution
    ";",  // command chaining
    "&",  // background/AND
    "|",  // pipe
    ">",  // redirect output
    "<",  // redirect input
    "\n", "\r", "\0",
];

const PROTECTED_DIRS: &[&str] = &["/etc", "/bin", "/sbin", "/usr/bin", "/usr/sbin", "/boot", "/sys", "/proc", "/dev"];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("argument too long (max {MAX_ARG_LENGTH} characters): {0}")]
    ArgumentTooLong(String),

    #[error("dangerous pattern detected in argument: {pattern} in {arg}")]
    DangerousPattern { pattern: String, arg: String },

    #[error("path exceeds maximum length (max {MAX_PATH_LENGTH})")]
    PathTooLong,

    #[error("access to protected system directory denied: {0}")]
    ProtectedDirectory(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid workspace name: {0}")]
    InvalidWorkspace(String),

    #[error("invalid argument value for {arg}: {reason}")]
    InvalidValue { arg: String, reason: String },
}

pub struct SecureArgParser;

impl SecureArgParser {
    /// Validate a single argument for dangerous shell/path patterns.
    pub fn validate_argument(arg: &str) -> Result<(), ParseError> {
        if arg.len() > MAX_ARG_LENGTH {
            return Err(ParseError::ArgumentTooLong(arg.chars().take(50).collect::<String>() + "..."));
        }

        for pattern in DANGEROUS_PATTERNS {
            if arg.contains(pattern) {
                return Err(ParseError::DangerousPattern {
                    pattern: pattern.to_string(),
                    arg: arg.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Validate a workspace name: safe characters only, reasonable length.
    /// Workspace names become database keys and (via report output) file
    /// name fragments, so the same dangerous-pattern check applies.
    pub fn validate_workspace(name: &str) -> Result<String, ParseError> {
        Self::validate_argument(name).map_err(|_| ParseError::InvalidWorkspace(name.to_string()))?;

        if name.is_empty() || name.len() > 200 {
            return Err(ParseError::InvalidWorkspace(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.') {
            return Err(ParseError::InvalidWorkspace(name.to_string()));
        }

        Ok(name.to_string())
    }

    /// Validate a path that must already exist (collection roots).
    pub fn validate_existing_path(path: &Path) -> Result<PathBuf, ParseError> {
        let as_str = path.to_string_lossy();
        Self::validate_argument(&as_str).map_err(|e| match e {
            ParseError::ArgumentTooLong(_) => ParseError::InvalidPath(format!("path too long: {as_str}")),
            ParseError::DangerousPattern { pattern, .. } => {
                ParseError::InvalidPath(format!("path contains dangerous pattern '{pattern}': {as_str}"))
            }
            other => other,
        })?;

        let canonical = path
            .canonicalize()
            .map_err(|e| if !path.exists() { ParseError::PathNotFound(as_str.to_string()) } else { ParseError::InvalidPath(format!("{as_str}: {e}")) })?;

        if canonical.to_string_lossy().len() > MAX_PATH_LENGTH {
            return Err(ParseError::PathTooLong);
        }

        for protected in PROTECTED_DIRS {
            if canonical.starts_with(protected) {
                return Err(ParseError::ProtectedDirectory(canonical.display().to_string()));
            }
        }

        Ok(canonical)
    }

    /// Validate an output path that need not exist yet (report destination).
    pub fn validate_output_path(path: &Path) -> Result<PathBuf, ParseError> {
        let as_str = path.to_string_lossy();
        Self::validate_argument(&as_str).map_err(|e| match e {
            ParseError::ArgumentTooLong(_) => ParseError::InvalidPath(format!("path too long: {as_str}")),
            ParseError::DangerousPattern { pattern, .. } => {
                ParseError::InvalidPath(format!("path contains dangerous pattern '{pattern}': {as_str}"))
            }
            other => other,
        })?;

        Ok(path.to_path_buf())
    }
}
