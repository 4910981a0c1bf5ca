// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! One [`EnumerationDriver`](sentinel_domain::repositories::EnumerationDriver)
//! per protocol.

mod ftp;
mod local;
mod nfs;
mod smb;

pub use ftp::FtpDriver;
pub use local::LocalDriver;
pub use nfs::NfsDriver;
pub use smb::SmbDriver;
