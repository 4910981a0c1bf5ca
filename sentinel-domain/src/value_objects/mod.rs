// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Value objects: immutable types defined entirely by their attributes.

mod archive_chain;
mod file_reference;
mod ids;
mod level;
mod protocol;
mod review_verdict;
mod search_location;
mod sha256_digest;

pub use archive_chain::{ArchiveChain, ARCHIVE_CHAIN_DELIMITER};
pub use file_reference::{ByteFetcher, FileReference, InMemoryFetcher};
pub use ids::{HostId, PathId, RuleId, WorkspaceId};
pub use level::{Accuracy, Relevance};
pub use protocol::{Credentials, EnumerationRoot, FtpCredentials, LocalCredentials, NfsCredentials, Protocol, SmbCredentials};
pub use review_verdict::ReviewVerdict;
pub use search_location::SearchLocation;
pub use sha256_digest::Sha256Digest;
