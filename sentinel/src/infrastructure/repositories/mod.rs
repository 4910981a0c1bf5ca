// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed persistence. `schema` owns migrations and database
//! lifecycle; `sqlite_dedup_store` implements
//! [`DedupStore`](sentinel_domain::repositories::DedupStore) against it.

mod schema;
mod sqlite_dedup_store;

pub use schema::{create_database_if_missing, drop_database, ensure_schema, initialize_database};
pub use sqlite_dedup_store::SqliteDedupStore;
