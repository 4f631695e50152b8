// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reloader::config::Config;
use reloader::reconcilers::{ReconcileContext, ReconcileLoop};
use reloader::sharding::Partitioner;
use reloader::shutdown;
use reloader::types::WatchedResourceKind;
use reloader::watch::ResourceWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting reloader");

    // Load configuration
    let config = Config::from_env()?;
    let assignment = config.ownership()?;
    info!(
        "Configuration loaded: terminate_on_delete={}, shard={}, identity={}, watch_namespace={}",
        config.terminate_on_delete,
        assignment,
        config.identity,
        config.watch_namespace.as_deref().unwrap_or("<all>")
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let partitioner = Arc::new(Partitioner::new(assignment));
    let ctx = Arc::new(ReconcileContext::new(client.clone(), partitioner));

    let (shutdown_tx, shutdown_rx) = shutdown::channel();
    tokio::spawn(shutdown::signal_on_termination(shutdown_tx));

    // One watcher feeding one reconcile loop per watched kind
    let (configmap_loop, configmap_handle) =
        ReconcileLoop::new(WatchedResourceKind::ConfigMap, ctx.clone());
    let (secret_loop, secret_handle) = ReconcileLoop::new(WatchedResourceKind::Secret, ctx);

    let configmap_watcher = ResourceWatcher::new(
        client.clone(),
        WatchedResourceKind::ConfigMap,
        &config,
        configmap_handle,
    );
    let secret_watcher =
        ResourceWatcher::new(client, WatchedResourceKind::Secret, &config, secret_handle);

    info!("Starting watchers...");

    tokio::try_join!(
        configmap_watcher.run(shutdown_rx.clone()),
        configmap_loop.run(shutdown_rx.clone()),
        secret_watcher.run(shutdown_rx.clone()),
        secret_loop.run(shutdown_rx)
    )?;

    info!("Reloader stopped");
    Ok(())
}
