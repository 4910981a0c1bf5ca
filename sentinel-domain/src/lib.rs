// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Sentinel Domain
//!
//! Pure business logic for the sensitive-file hunter collection engine:
//! the rule compiler and priority ordering, the size-gated multi-stage
//! analyzer, and the content-addressed deduplication contracts. This
//! crate has no knowledge of SQLite, `tokio`, or any particular protocol
//! — those live in the infrastructure crate and talk to this one only
//! through the traits in [`repositories`].
//!
//! ## Layering
//!
//! - [`value_objects`] — immutable types defined entirely by their
//!   attributes (`Sha256Digest`, `SearchLocation`, `Protocol`, ...).
//! - [`entities`] — types with identity that persists across mutation
//!   (`File`, `Host`, `ObservedPath`, `Workspace`).
//! - [`aggregates`] — consistency boundaries (`RuleSet`, the priority
//!   compiler).
//! - [`services`] — domain services: the regex matcher and the analyzer
//!   decision procedure. Synchronous and CPU-bound, unlike the ports
//!   below.
//! - [`repositories`] — infrastructure ports (`DedupStore`,
//!   `ArchiveExtractor`, `EnumerationDriver`). Async, I/O-bound, and
//!   implemented outside this crate.
//! - [`error`] — the unified [`error::HunterError`] taxonomy shared by
//!   every layer.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use error::HunterError;
