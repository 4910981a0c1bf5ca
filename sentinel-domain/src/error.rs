// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Hierarchical error type for the collection engine, organized into the
//! same failure categories described in the error handling design:
//! configuration errors (fatal at startup), transient I/O (retried),
//! protocol-level refusals (fatal for one driver only), corrupt/too-deep
//! archives (skip and continue), and database collisions (converted to a
//! lookup, not surfaced as an error at all).

use thiserror::Error;

/// Domain-specific errors for the collection engine.
///
/// Each variant is categorized (see [`HunterError::category`]) so callers
/// can decide whether to retry, abort the current host, or abort the run.
#[derive(Error, Debug, Clone)]
pub enum HunterError {
    #[error("malformed rule: {0}")]
    MalformedRule(String),

    #[error("bad threshold: {0}")]
    BadThreshold(String),

    #[error("archive too deep (max depth {max}): {path}")]
    ArchiveTooDeep { path: String, max: u32 },

    #[error("archive corrupt: {0}")]
    ArchiveCorrupt(String),

    #[error("ftp server does not support MLSD: {0}")]
    FtpUnsupported(String),

    #[error("protocol refusal: {0}")]
    ProtocolRefusal(String),

    #[error("transient I/O error: {0}")]
    TransientIo(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl HunterError {
    pub fn malformed_rule(original_index: usize, msg: impl std::fmt::Display) -> Self {
        Self::MalformedRule(format!("rule #{original_index}: {msg}"))
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Transient failures the caller should retry with backoff rather
    /// than surface to the operator on the first attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HunterError::TransientIo(_) | HunterError::ResourceExhausted(_))
    }

    /// Archive-related failures that should skip the container but let
    /// siblings continue processing.
    pub fn is_skip_and_continue(&self) -> bool {
        matches!(self, HunterError::ArchiveTooDeep { .. } | HunterError::ArchiveCorrupt(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            HunterError::MalformedRule(_) => "configuration",
            HunterError::BadThreshold(_) => "configuration",
            HunterError::ArchiveTooDeep { .. } => "archive",
            HunterError::ArchiveCorrupt(_) => "archive",
            HunterError::FtpUnsupported(_) => "protocol",
            HunterError::ProtocolRefusal(_) => "protocol",
            HunterError::TransientIo(_) => "io",
            HunterError::IoError(_) => "io",
            HunterError::DatabaseError(_) => "database",
            HunterError::ResourceExhausted(_) => "resource",
            HunterError::Cancelled(_) => "cancellation",
            HunterError::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for HunterError {
    fn from(err: std::io::Error) -> Self {
        HunterError::IoError(err.to_string())
    }
}

impl From<regex::Error> for HunterError {
    fn from(err: regex::Error) -> Self {
        HunterError::MalformedRule(err.to_string())
    }
}
