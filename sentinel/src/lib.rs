// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Sentinel
//!
//! A sensitive-file hunter: walks local filesystems and FTP/NFS/SMB hosts,
//! matches file names, paths, and content against a configurable rule set,
//! and records deduplicated findings for later review.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            BOOTSTRAP (sentinel-bootstrap)    │
//! │  CLI parsing, signals, shutdown, exit codes  │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │         APPLICATION (this crate)             │
//! │  Use cases, collection coordinator           │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │      DOMAIN (sentinel-domain)                │
//! │  Analyzer, RuleSet, entities, value objects  │
//! └─────────────────────────────────────────────┘
//!                      ▲
//!                      │
//! ┌─────────────────────────────────────────────┐
//! │    INFRASTRUCTURE (this crate)               │
//! │  Enumeration drivers, archive extractors,    │
//! │  SQLite dedup store, config, metrics         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! `sentinel-domain` never depends on `sqlx`, `suppaftp`, `smb`, or
//! `nfs3_client` directly; this crate's infrastructure layer is the only
//! place those appear.

pub mod application;
pub mod infrastructure;

// Tests are organized as:
// - Unit tests: #[cfg(test)] modules within each source file
// - Integration tests: separate files in tests/ directory
