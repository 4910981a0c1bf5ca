// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Signal Handling
//!
//! Installs OS signal listeners that drive [`crate::shutdown::ShutdownCoordinator`].
//! SIGINT and SIGTERM both map to `130` at process exit; SIGHUP is
//! treated the same way rather than reload-on-the-fly, since the
//! collection engine has no live-reloadable state. Windows only has
//! Ctrl-C to listen for.

use crate::shutdown::ShutdownCoordinator;

/// Spawns a task that waits for a termination signal and initiates
/// graceful shutdown on the coordinator when one arrives. Returns
/// immediately; the listener runs for the lifetime of the process.
pub fn install(coordinator: ShutdownCoordinator) {
    tokio::spawn(async move {
        wait_for_signal().await;
        coordinator.initiate_shutdown();
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to install SIGTERM handler: {e}");
            return;
        }
    };
    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to install SIGHUP handler: {e}");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("received SIGINT, shutting down"),
        _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
        _ = sighup.recv() => tracing::info!("received SIGHUP, shutting down"),
    }
}

#[cfg(windows)]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl-C, shutting down"),
        Err(e) => tracing::error!("failed to install Ctrl-C handler: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn installing_does_not_trigger_shutdown_on_its_own() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        install(coordinator.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!coordinator.is_shutting_down());
    }
}
