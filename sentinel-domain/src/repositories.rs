// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Repositories
//!
//! Contracts for data persistence and archive/enumeration I/O, kept
//! technology-agnostic so the application layer never depends on
//! `sqlx`, `suppaftp`, `smb`, or `nfs3_client` directly.
//!
//! ## Repository Interfaces
//!
//! ### DedupStore
//! The content-addressed deduplication store: workspaces, hosts, files,
//! paths, rule snapshots, and reviews.
//!
//! ### ArchiveExtractor
//! Opens an archive container and yields its members for re-submission
//! to the analyzer.
//!
//! ### EnumerationDriver
//! One implementation per protocol, walking roots and emitting file
//! references onto the work queue.

pub mod archive_extractor;
pub mod dedup_store;
pub mod enumeration_driver;

pub use archive_extractor::{ArchiveExtractor, ArchiveMember};
pub use dedup_store::{DedupStore, UpsertOutcome};
pub use enumeration_driver::EnumerationDriver;
