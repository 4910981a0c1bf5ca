// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared by `sentinel_domain`:
//! the SQLite-backed dedup store, the per-protocol enumeration drivers,
//! the archive extractors, and the runtime's logging/config/metrics
//! glue. Nothing here is reachable from the domain crate; the
//! dependency points one way.
//!
//! ```text
//! infrastructure/
//! ├── archive/       # zip / tar family container extraction
//! ├── drivers/        # local / ftp / nfs / smb enumeration
//! ├── repositories/    # SQLite dedup store
//! ├── config/          # rule set + threshold loading
//! ├── logging/         # tracing-subscriber setup
//! └── metrics/         # prometheus counters
//! ```

pub mod archive;
pub mod config;
pub mod drivers;
pub mod logging;
pub mod metrics;
pub mod repositories;
