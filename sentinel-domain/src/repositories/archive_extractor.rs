// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # ArchiveExtractor
//!
//! Port for opening an archive container and yielding its members.
//! Concrete implementations (zip, tar family) live in infrastructure and
//! are selected by the container's sniffed format, not by this trait.

use crate::error::HunterError;
use async_trait::async_trait;

/// One member of an open archive, with bytes already resident — the
/// extractor is responsible for cleaning up any scratch files it used to
/// get there.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// True if this extractor recognizes `container_bytes` as an archive
    /// it can open (extension hint first, magic-byte sniff fallback).
    fn recognizes(&self, name_hint: &str, container_bytes: &[u8]) -> bool;

    /// Opens the container and returns every member. Corrupt archives
    /// yield [`HunterError::ArchiveCorrupt`] rather than a partial list.
    async fn members(&self, container_bytes: &[u8]) -> Result<Vec<ArchiveMember>, HunterError>;
}
