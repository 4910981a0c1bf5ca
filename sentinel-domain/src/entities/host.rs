// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Host
//!
//! A protocol endpoint within a workspace, identified by (protocol,
//! address, port, optional share/export). Carries a *completed* flag per
//! enumeration root, set exactly when its driver exits cleanly.

use crate::value_objects::{HostId, Protocol, WorkspaceId};

#[derive(Debug, Clone)]
pub struct Host {
    pub id: HostId,
    pub workspace_id: WorkspaceId,
    pub protocol: Protocol,
    pub address: String,
    pub port: Option<u16>,
    pub share: Option<String>,
    pub completed: bool,
}

impl Host {
    pub fn new(workspace_id: WorkspaceId, protocol: Protocol, address: impl Into<String>) -> Self {
        Self {
            id: HostId::new(),
            workspace_id,
            protocol,
            address: address.into(),
            port: None,
            share: None,
            completed: false,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_share(mut self, share: impl Into<String>) -> Self {
        self.share = Some(share.into());
        self
    }
}
