// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Process shutdown on SIGINT / SIGTERM

use tokio::sync::watch;
use tracing::{error, info};

/// Create the shutdown channel; receivers observe `true` once shutdown begins
pub fn channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Flip `shutdown` once the process receives SIGINT or SIGTERM
pub async fn signal_on_termination(shutdown: watch::Sender<bool>) {
    wait_for_signal().await;
    info!("Shutdown signal received, stopping watchers");
    if shutdown.send(true).is_err() {
        error!("No tasks left to notify of shutdown");
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
